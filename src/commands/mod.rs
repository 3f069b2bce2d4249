pub mod agent;
pub mod anomalies;
pub mod config;
pub mod dashboard;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::seed::SeedTable;
    use crate::types::config::AppConfig;
    use std::sync::Arc;

    #[test]
    fn rendered_page_returns_valid_json() {
        let catalog = Catalog::builtin().unwrap();
        let session = dashboard::dashboard_open(
            &catalog,
            Arc::new(SeedTable::builtin()),
            &AppConfig::default(),
            "sales-001",
        )
        .unwrap();
        let page = dashboard::dashboard_render(&session).unwrap();
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("\"kind\""));
        assert!(json.contains("Live Lead Feed"));
    }

    #[test]
    fn anomalies_list_returns_array() {
        let catalog = Catalog::builtin().unwrap();
        let session = dashboard::dashboard_open(
            &catalog,
            Arc::new(SeedTable::builtin()),
            &AppConfig::default(),
            "acc-001",
        )
        .unwrap();
        let items = anomalies::anomalies_list(&session).unwrap();
        let json = serde_json::to_string(&items).unwrap();
        assert!(json.starts_with('['));
    }
}
