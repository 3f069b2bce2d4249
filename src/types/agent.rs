use serde::{Deserialize, Serialize};

use super::dashboard::DashboardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentUiType {
    Chat,
    Form,
    Dashboard,
    Workflow,
    Embedded,
    ApiOnly,
}

impl AgentUiType {
    pub fn label(self) -> &'static str {
        match self {
            AgentUiType::Chat => "Chat Interface",
            AgentUiType::Form => "Form Interface",
            AgentUiType::Dashboard => "Dashboard",
            AgentUiType::Workflow => "Workflow",
            AgentUiType::Embedded => "Embedded App",
            AgentUiType::ApiOnly => "API Only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Online,
    Offline,
    Busy,
    Error,
}

/// A catalog entry. Read-only for the lifetime of a dashboard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ui_type: AgentUiType,
    pub status: AgentStatus,
    pub category: String,
    pub rating: f64,
    pub usage_count: u64,
    pub created_at: String,
    pub icon: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_config: Option<DashboardConfig>,
}
