use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::types::config::AppConfig;

pub const ENV_SCAN_INTERVAL_MS: &str = "AGENTDECK_SCAN_INTERVAL_MS";
pub const ENV_SWITCH_LATENCY_MS: &str = "AGENTDECK_SWITCH_LATENCY_MS";
pub const ENV_DEFAULT_CATEGORY: &str = "AGENTDECK_DEFAULT_CATEGORY";
pub const ENV_CATALOG: &str = "AGENTDECK_CATALOG";

pub fn app_data_dir() -> Result<PathBuf, String> {
    dirs::home_dir()
        .map(|home| home.join(".agentdeck"))
        .ok_or_else(|| "Could not determine home directory".to_string())
}

pub fn config_path() -> Result<PathBuf, String> {
    Ok(app_data_dir()?.join("config.json"))
}

/// Raw config JSON; `{}` when the file does not exist yet.
pub fn config_get_file(path: &Path) -> Result<String, String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok("{}".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

pub fn config_set_file(path: &Path, json: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    std::fs::write(path, json).map_err(|e| e.to_string())
}

pub fn config_update_file(path: &Path, patch_json: &str) -> Result<String, String> {
    let current = config_get_file(path)?;
    let mut current_val: serde_json::Value =
        serde_json::from_str(&current).map_err(|e| e.to_string())?;
    let patch_val: serde_json::Value =
        serde_json::from_str(patch_json).map_err(|e| e.to_string())?;

    merge_json(&mut current_val, &patch_val);
    let merged = serde_json::to_string_pretty(&current_val).map_err(|e| e.to_string())?;
    config_set_file(path, &merged)?;
    Ok(merged)
}

fn merge_json(base: &mut serde_json::Value, patch: &serde_json::Value) {
    if let (serde_json::Value::Object(base_map), serde_json::Value::Object(patch_map)) =
        (base, patch)
    {
        for (key, value) in patch_map {
            let nested = value.is_object() && base_map.get(key).is_some_and(|v| v.is_object());
            match base_map.get_mut(key) {
                Some(existing) if nested => merge_json(existing, value),
                _ => {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// Config file merged with defaults, then environment overrides.
pub fn load_app_config(path: &Path) -> Result<AppConfig, String> {
    let content = config_get_file(path)?;
    let config: AppConfig = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    Ok(config_or_env(config, |key| std::env::var(key).ok()))
}

/// Applies `AGENTDECK_*` overrides found through `lookup`. Unparseable
/// numbers are ignored with a warning.
pub fn config_or_env(mut config: AppConfig, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    if let Some(ms) = parse_millis(ENV_SCAN_INTERVAL_MS, lookup(ENV_SCAN_INTERVAL_MS)) {
        config.scan_interval_ms = ms;
    }
    if let Some(ms) = parse_millis(ENV_SWITCH_LATENCY_MS, lookup(ENV_SWITCH_LATENCY_MS)) {
        config.switch_latency_ms = ms;
    }
    if let Some(category) = lookup(ENV_DEFAULT_CATEGORY).filter(|c| !c.trim().is_empty()) {
        config.default_category = category;
    }
    if let Some(catalog) = lookup(ENV_CATALOG).filter(|c| !c.trim().is_empty()) {
        config.catalog_path = Some(PathBuf::from(catalog));
    }
    debug!(?config, "Resolved app config");
    config
}

fn parse_millis(key: &str, raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring non-numeric override");
            None
        }
    }
}
