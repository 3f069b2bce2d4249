//! The agent catalog: the builtin marketplace list or an external JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::types::agent::Agent;

const BUILTIN_CATALOG: &str = include_str!("../assets/agents.json");

/// Category filter value that matches every agent.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate agent id: {0}")]
    DuplicateAgent(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    agents: Vec<Agent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl AgentFilter {
    pub fn matches(&self, agent: &Agent) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => agent.category == category,
        };
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                [&agent.name, &agent.description, &agent.category]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            }
        };
        category_ok && search_ok
    }
}

impl Catalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        info!(path = %path.display(), agents = catalog.agents.len(), "Loaded agent catalog");
        Ok(catalog)
    }

    /// External catalog when `path` is set, otherwise the builtin one.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Parses and checks a catalog. Duplicate agent ids are rejected; config
    /// problems are only logged since the renderer tolerates them.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(content)?;

        let mut seen = std::collections::HashSet::new();
        for agent in &catalog.agents {
            if !seen.insert(agent.id.as_str()) {
                return Err(CatalogError::DuplicateAgent(agent.id.clone()));
            }
            let Some(config) = &agent.dashboard_config else {
                continue;
            };
            for issue in config.validate() {
                warn!(agent_id = %agent.id, %issue, "Dashboard config issue");
            }
        }

        Ok(catalog)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn find(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn list(&self, filter: &AgentFilter) -> Vec<&Agent> {
        self.agents.iter().filter(|agent| filter.matches(agent)).collect()
    }

    /// Distinct categories in first-seen order, led by "All".
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for agent in &self.agents {
            if !categories.contains(&agent.category.as_str()) {
                categories.push(&agent.category);
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::agent::AgentUiType;
    use std::io::Write;

    fn filter(category: Option<&str>, search: Option<&str>) -> AgentFilter {
        AgentFilter {
            category: category.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.agents().len(), 29);
        let ledger = catalog.find("acc-001").unwrap();
        assert_eq!(ledger.name, "LedgerKeeper AI");
        let config = ledger.dashboard_config.as_ref().unwrap();
        assert_eq!(config.sections.len(), 3);
        assert!(config.validate().is_empty());
        assert!(catalog.find("sales-001").unwrap().dashboard_config.is_some());
    }

    #[test]
    fn builtin_has_dashboard_agents_without_config() {
        let catalog = Catalog::builtin().unwrap();
        let bare: Vec<&str> = catalog
            .agents()
            .iter()
            .filter(|a| a.ui_type == AgentUiType::Dashboard && a.dashboard_config.is_none())
            .map(|a| a.id.as_str())
            .collect();
        assert!(bare.contains(&"acc-004"));
        assert!(bare.contains(&"hr-001"));
    }

    #[test]
    fn filter_by_category_and_search() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.list(&filter(Some("All"), None)).len(), 29);
        assert_eq!(catalog.list(&filter(Some("Accounting"), None)).len(), 5);

        let hits = catalog.list(&filter(Some("Accounting"), Some("LEDGER")));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "acc-001");

        assert!(catalog.list(&filter(None, Some("zzz-nothing"))).is_empty());
        assert_eq!(catalog.list(&filter(None, Some("   "))).len(), 29);
    }

    #[test]
    fn categories_start_with_all() {
        let catalog = Catalog::builtin().unwrap();
        let categories = catalog.categories();
        assert_eq!(categories[0], "All");
        assert_eq!(categories[1], "Accounting");
        assert_eq!(categories.len(), 7);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"agents": [{{"id": "x-1", "name": "X", "description": "d", "uiType": "dashboard",
                "status": "online", "category": "Accounting", "rating": 4.0, "usageCount": 1,
                "createdAt": "2024-01-01", "icon": "x", "author": "a"}}]}}"#
        )
        .unwrap();
        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.agents().len(), 1);
        assert!(catalog.find("x-1").unwrap().dashboard_config.is_none());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Catalog::from_json("{\"agents\": [").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let agent = r#"{"id": "dup", "name": "X", "description": "d", "uiType": "chat",
            "status": "online", "category": "Accounting", "rating": 4.0, "usageCount": 1,
            "createdAt": "2024-01-01", "icon": "x", "author": "a"}"#;
        let json = format!(r#"{{"agents": [{}, {}]}}"#, agent, agent);
        let err = Catalog::from_json(&json).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate agent id: dup");
    }

    #[test]
    fn load_or_builtin_without_path() {
        let catalog = Catalog::load_or_builtin(None).unwrap();
        assert!(catalog.find("acc-001").is_some());
    }
}
