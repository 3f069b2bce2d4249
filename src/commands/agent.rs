use crate::catalog::{AgentFilter, Catalog};
use crate::types::agent::Agent;

pub fn agents_list(catalog: &Catalog, filter: &AgentFilter) -> Vec<Agent> {
    catalog.list(filter).into_iter().cloned().collect()
}

pub fn agent_get(catalog: &Catalog, id: &str) -> Result<Agent, String> {
    catalog
        .find(id)
        .cloned()
        .ok_or_else(|| format!("Agent not found: {}", id))
}

pub fn agent_categories(catalog: &Catalog) -> Vec<String> {
    catalog.categories().into_iter().map(String::from).collect()
}
