//! `dataKey` resolution against a snapshot of the dashboard state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::state::DashboardState;
use crate::types::anomaly::{ActionItem, ChartPoint};
use crate::types::dashboard::WidgetConfig;

/// Indices shown by activity logs.
const LOG_INDICES: [u32; 5] = [1, 2, 3, 4, 5];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BoundValue {
    Text(String),
    Number(i64),
    Items(Vec<ActionItem>),
    Indices(Vec<u32>),
    Series(Vec<ChartPoint>),
}

impl BoundValue {
    /// Headline text for a stat card.
    pub fn display(&self) -> String {
        match self {
            BoundValue::Text(text) => text.clone(),
            BoundValue::Number(n) => format_thousands(*n),
            BoundValue::Items(items) => items.len().to_string(),
            BoundValue::Indices(indices) => indices.len().to_string(),
            BoundValue::Series(points) => points.len().to_string(),
        }
    }

    /// Literal `value` from a widget config. Arrays are matched by shape so
    /// a literal series, index list or item list reaches its widget intact.
    fn from_literal(literal: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match literal {
            Value::Null => None,
            Value::String(text) => Some(BoundValue::Text(text.clone())),
            Value::Number(n) => Some(match n.as_i64() {
                Some(n) => BoundValue::Number(n),
                None => BoundValue::Text(n.to_string()),
            }),
            Value::Array(values) if values.is_empty() => Some(BoundValue::Items(Vec::new())),
            Value::Array(_) => Some(Self::from_array(literal)),
            other => Some(BoundValue::Text(other.to_string())),
        }
    }

    fn from_array(literal: &serde_json::Value) -> Self {
        if let Ok(points) = Vec::<ChartPoint>::deserialize(literal) {
            return BoundValue::Series(points);
        }
        if let Ok(items) = Vec::<ActionItem>::deserialize(literal) {
            return BoundValue::Items(items);
        }
        if let Ok(indices) = Vec::<u32>::deserialize(literal) {
            return BoundValue::Indices(indices);
        }
        trace!(value = %literal, "Literal array matches no widget shape");
        BoundValue::Text(literal.to_string())
    }
}

/// `1240` -> `"1,240"`.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Plain,
    Currency,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyAlias {
    pub alias: &'static str,
    pub target: &'static str,
    pub presentation: Presentation,
}

/// Legacy key names still used by shipped configs. Consulted before the
/// primary lookup.
// TODO: drop once catalog configs bind `mainMetric`/`subMetric` directly.
pub const KEY_ALIASES: [KeyAlias; 2] = [
    KeyAlias {
        alias: "savings",
        target: "mainMetric",
        presentation: Presentation::Currency,
    },
    KeyAlias {
        alias: "categorized",
        target: "subMetric",
        presentation: Presentation::Plain,
    },
];

/// Values exposed to `dataKey`, captured from the state at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    values: HashMap<&'static str, BoundValue>,
}

impl Bindings {
    pub fn snapshot(state: &DashboardState) -> Self {
        let mut values = HashMap::new();
        values.insert("mainMetric", BoundValue::Number(state.main_metric));
        values.insert("subMetric", BoundValue::Text(state.sub_metric.clone()));
        values.insert(
            "anomalies_count",
            BoundValue::Number(state.items.len() as i64),
        );
        values.insert("anomalies_list", BoundValue::Items(state.items.clone()));
        values.insert("logs", BoundValue::Indices(LOG_INDICES.to_vec()));
        values.insert("chartData", BoundValue::Series(state.chart_data.clone()));
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<BoundValue> {
        if let Some(alias) = KEY_ALIASES.iter().find(|alias| alias.alias == key) {
            let value = self.values.get(alias.target)?;
            return Some(present(value, alias.presentation));
        }
        self.values.get(key).cloned()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.values.keys().copied().collect();
        keys.extend(KEY_ALIASES.iter().map(|alias| alias.alias));
        keys.sort_unstable();
        keys
    }
}

fn present(value: &BoundValue, presentation: Presentation) -> BoundValue {
    match (presentation, value) {
        (Presentation::Currency, BoundValue::Number(n)) => {
            BoundValue::Text(format!("${}", format_thousands(*n)))
        }
        _ => value.clone(),
    }
}

/// Live value for `config.dataKey` when the snapshot has one, otherwise the
/// literal `config.value`.
pub fn resolve(config: &WidgetConfig, bindings: &Bindings) -> Option<BoundValue> {
    if let Some(key) = config.data_key.as_deref() {
        if let Some(value) = bindings.get(key) {
            return Some(value);
        }
        trace!(data_key = key, "Unbound dataKey, using literal value");
    }
    config.value.as_ref().and_then(BoundValue::from_literal)
}
