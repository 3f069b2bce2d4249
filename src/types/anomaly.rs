use serde::{Deserialize, Serialize};

/// One entry of the decision stream: something the agent flagged and the
/// user confirms or rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: u32,
    pub text: String,
    pub amount: String,
    pub confidence: String,
}

impl ActionItem {
    pub fn new(id: u32, text: &str, amount: &str, confidence: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            amount: amount.to_string(),
            confidence: confidence.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemAction {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}
