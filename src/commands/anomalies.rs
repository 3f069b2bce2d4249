use crate::session::DashboardSession;
use crate::types::anomaly::{ActionItem, ItemAction};
use crate::types::view::Page;

/// Decision items still awaiting review.
pub fn anomalies_list(session: &DashboardSession) -> Result<Vec<ActionItem>, String> {
    session
        .state()
        .map(|state| state.items)
        .ok_or_else(|| "No dashboard is open".to_string())
}

/// Confirms or rejects one item and returns the re-rendered page. Feedback on
/// an item that is already gone changes nothing.
pub fn anomalies_feedback(
    session: &mut DashboardSession,
    item_id: u32,
    action: ItemAction,
) -> Result<Page, String> {
    session.apply(item_id, action);
    session.render().ok_or_else(|| "No dashboard is open".to_string())
}
