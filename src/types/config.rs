use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 4000;
pub const DEFAULT_SWITCH_LATENCY_MS: u64 = 350;
pub const DEFAULT_CATEGORY: &str = "Accounting";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Period of the cosmetic scanning toggle.
    pub scan_interval_ms: u64,
    /// Simulated latency before an agent switch reseeds the dashboard.
    pub switch_latency_ms: u64,
    /// Seed dataset used when an agent's category has none.
    pub default_category: String,
    /// External catalog file; the builtin catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: DEFAULT_SCAN_INTERVAL_MS,
            switch_latency_ms: DEFAULT_SWITCH_LATENCY_MS,
            default_category: DEFAULT_CATEGORY.to_string(),
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms.max(1))
    }

    pub fn switch_latency(&self) -> Duration {
        Duration::from_millis(self.switch_latency_ms)
    }
}
