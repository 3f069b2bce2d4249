use serde::Serialize;
use tracing::debug;

use crate::seed::SeedTable;
use crate::types::anomaly::{ActionItem, ChartPoint, ItemAction};

/// Mutable state behind one agent's dashboard. Configs are never written;
/// this is the only thing user actions and the scanning ticker change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub category: String,
    pub main_metric: i64,
    pub sub_metric: String,
    pub items: Vec<ActionItem>,
    pub chart_data: Vec<ChartPoint>,
    pub is_scanning: bool,
}

impl DashboardState {
    pub fn seeded(category: &str, seeds: &SeedTable) -> Self {
        let seed = seeds.lookup(category);
        Self {
            category: category.to_string(),
            main_metric: seed.main_metric,
            sub_metric: seed.sub_metric,
            items: seed.items,
            chart_data: seed.chart_data,
            is_scanning: true,
        }
    }

    /// Replaces every seeded field with `category`'s dataset. Nothing from the
    /// previous category survives; the scanning flag is cosmetic and kept.
    pub fn reseed(&mut self, category: &str, seeds: &SeedTable) {
        let is_scanning = self.is_scanning;
        *self = Self::seeded(category, seeds);
        self.is_scanning = is_scanning;
    }

    /// Removes the item and, for approvals, bumps the main metric. Returns the
    /// removed item; an id that is not present is a no-op.
    pub fn apply(&mut self, item_id: u32, action: ItemAction) -> Option<ActionItem> {
        let position = self.items.iter().position(|item| item.id == item_id)?;
        let item = self.items.remove(position);
        if action == ItemAction::Approve {
            self.main_metric += 1;
        }
        debug!(item_id, ?action, main_metric = self.main_metric, "Applied item action");
        Some(item)
    }

    pub fn approve(&mut self, item_id: u32) -> bool {
        self.apply(item_id, ItemAction::Approve).is_some()
    }

    pub fn reject(&mut self, item_id: u32) -> bool {
        self.apply(item_id, ItemAction::Reject).is_some()
    }

    /// Flips the scanning indicator and returns the new value.
    pub fn toggle_scanning(&mut self) -> bool {
        self.is_scanning = !self.is_scanning;
        self.is_scanning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_item_state() -> DashboardState {
        DashboardState {
            category: "Accounting".to_string(),
            main_metric: 5,
            sub_metric: "12,847".to_string(),
            items: vec![ActionItem::new(1, "Flagged charge", "$14.50", "High")],
            chart_data: Vec::new(),
            is_scanning: true,
        }
    }

    #[test]
    fn approve_removes_and_increments() {
        let mut state = single_item_state();
        assert!(state.approve(1));
        assert!(state.items.is_empty());
        assert_eq!(state.main_metric, 6);
    }

    #[test]
    fn reject_removes_without_incrementing() {
        let mut state = single_item_state();
        assert!(state.reject(1));
        assert!(state.items.is_empty());
        assert_eq!(state.main_metric, 5);
    }

    #[test]
    fn actions_on_missing_ids_are_noops() {
        let mut state = single_item_state();
        let before = state.clone();
        assert!(!state.approve(42));
        assert!(!state.reject(42));
        assert_eq!(state, before);

        assert!(state.approve(1));
        assert!(!state.approve(1));
        assert!(!state.reject(1));
        assert_eq!(state.main_metric, 6);
    }

    #[test]
    fn apply_keeps_remaining_order() {
        let mut state = DashboardState::seeded("Accounting", &SeedTable::builtin());
        let removed = state.apply(2, ItemAction::Reject).unwrap();
        assert_eq!(removed.id, 2);
        let ids: Vec<u32> = state.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn reseed_replaces_items_entirely() {
        let seeds = SeedTable::builtin();
        let mut state = DashboardState::seeded("Accounting", &seeds);
        state.approve(1);
        state.reseed("Sales Funnel", &seeds);
        assert_eq!(state.items, seeds.lookup("Sales Funnel").items);
        assert_eq!(state.main_metric, 45);
        assert_eq!(state.category, "Sales Funnel");
    }

    #[test]
    fn reseed_keeps_scanning_flag() {
        let seeds = SeedTable::builtin();
        let mut state = DashboardState::seeded("Accounting", &seeds);
        assert!(!state.toggle_scanning());
        state.reseed("HR & Payroll", &seeds);
        assert!(!state.is_scanning);
    }

    #[test]
    fn toggle_scanning_touches_nothing_else() {
        let mut state = DashboardState::seeded("Accounting", &SeedTable::builtin());
        let before = state.clone();
        state.toggle_scanning();
        state.toggle_scanning();
        assert_eq!(state, before);
    }
}
