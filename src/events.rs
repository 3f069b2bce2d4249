use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use crate::types::anomaly::ItemAction;

/// Event names as constants; a host shell forwards them under these names.
pub mod event_names {
    pub const SEEDED: &str = "dashboard:seeded";
    pub const ITEM_RESOLVED: &str = "dashboard:item-resolved";
    pub const SCAN_TOGGLED: &str = "dashboard:scan-toggled";
    pub const TORN_DOWN: &str = "dashboard:torn-down";
}

/// Something changed in a dashboard session; listeners re-render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    #[serde(rename_all = "camelCase")]
    Seeded { agent_id: String, category: String },
    #[serde(rename_all = "camelCase")]
    ItemResolved {
        item_id: u32,
        action: ItemAction,
        main_metric: i64,
    },
    #[serde(rename_all = "camelCase")]
    ScanToggled { scanning: bool },
    #[serde(rename_all = "camelCase")]
    TornDown { agent_id: String },
}

impl DashboardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardEvent::Seeded { .. } => event_names::SEEDED,
            DashboardEvent::ItemResolved { .. } => event_names::ITEM_RESOLVED,
            DashboardEvent::ScanToggled { .. } => event_names::SCAN_TOGGLED,
            DashboardEvent::TornDown { .. } => event_names::TORN_DOWN,
        }
    }
}

pub const EVENT_CHANNEL_CAPACITY: usize = 64;

pub fn event_channel() -> broadcast::Sender<DashboardEvent> {
    broadcast::channel(EVENT_CHANNEL_CAPACITY).0
}

/// Sends to current subscribers. Having none is normal (nothing is drawing
/// the dashboard) and not an error.
pub fn emit_event(sender: &broadcast::Sender<DashboardEvent>, event: DashboardEvent) {
    let name = event.name();
    match sender.send(event) {
        Ok(receivers) => trace!(event = name, receivers, "Emitted dashboard event"),
        Err(_) => trace!(event = name, "No subscribers for dashboard event"),
    }
}
