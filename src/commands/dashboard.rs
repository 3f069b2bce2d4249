use std::sync::Arc;

use crate::catalog::Catalog;
use crate::seed::SeedTable;
use crate::session::{DashboardSession, SessionOptions};
use crate::state::DashboardState;
use crate::types::config::AppConfig;
use crate::types::view::Page;

use super::agent::agent_get;

pub fn dashboard_open(
    catalog: &Catalog,
    seeds: Arc<SeedTable>,
    config: &AppConfig,
    agent_id: &str,
) -> Result<DashboardSession, String> {
    let agent = agent_get(catalog, agent_id)?;
    Ok(DashboardSession::open(agent, seeds, SessionOptions::from(config)))
}

pub fn dashboard_render(session: &DashboardSession) -> Result<Page, String> {
    session.render().ok_or_else(|| "No dashboard is open".to_string())
}

pub fn dashboard_state(session: &DashboardSession) -> Result<DashboardState, String> {
    session.state().ok_or_else(|| "No dashboard is open".to_string())
}

/// Switches to another agent after the configured latency and renders it.
pub async fn dashboard_switch_agent(
    session: &mut DashboardSession,
    catalog: &Catalog,
    agent_id: &str,
) -> Result<Page, String> {
    let agent = agent_get(catalog, agent_id)?;
    session.switch_agent_after_latency(agent).await;
    dashboard_render(session)
}
