//! Category-keyed sample datasets that seed a dashboard's state.

use std::collections::HashMap;

use tracing::debug;

use crate::types::anomaly::{ActionItem, ChartPoint};
use crate::types::config::DEFAULT_CATEGORY;

#[derive(Debug, Clone, PartialEq)]
pub struct SeedDataset {
    pub items: Vec<ActionItem>,
    pub main_metric: i64,
    pub sub_metric: String,
    pub chart_data: Vec<ChartPoint>,
}

#[derive(Debug, Clone)]
pub struct SeedTable {
    datasets: HashMap<String, SeedDataset>,
    default_category: String,
}

impl SeedTable {
    /// Builds a table from explicit datasets. When `default_category` names
    /// none of them, unmatched lookups get an empty dataset.
    pub fn new(datasets: HashMap<String, SeedDataset>, default_category: &str) -> Self {
        Self {
            datasets,
            default_category: default_category.to_string(),
        }
    }

    pub fn builtin() -> Self {
        Self::builtin_with_default(DEFAULT_CATEGORY)
    }

    /// Builtin datasets with a different fallback category. Unknown names keep
    /// the stock default.
    pub fn builtin_with_default(default_category: &str) -> Self {
        let datasets = builtin_datasets();
        let default_category = if datasets.contains_key(default_category) {
            default_category
        } else {
            DEFAULT_CATEGORY
        };
        Self::new(datasets, default_category)
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.datasets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, category: &str) -> bool {
        self.datasets.contains_key(category)
    }

    /// Dataset for `category`, or the default dataset when there is none.
    pub fn lookup(&self, category: &str) -> SeedDataset {
        if let Some(dataset) = self.datasets.get(category) {
            return dataset.clone();
        }
        debug!(category, fallback = %self.default_category, "No seed data for category");
        self.datasets
            .get(&self.default_category)
            .cloned()
            .unwrap_or_else(|| SeedDataset {
                items: Vec::new(),
                main_metric: 0,
                sub_metric: String::new(),
                chart_data: Vec::new(),
            })
    }
}

impl Default for SeedTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_datasets() -> HashMap<String, SeedDataset> {
    let mut datasets = HashMap::new();

    datasets.insert(
        "Accounting".to_string(),
        SeedDataset {
            items: vec![
                ActionItem::new(1, "Flagged 'Starbucks' charge as Personal", "$14.50", "High"),
                ActionItem::new(2, "Unusual vendor 'Garry's Supplies'", "$450.00", "Medium"),
                ActionItem::new(3, "Duplicate invoice detected #INV-002", "$1,200.00", "High"),
            ],
            main_metric: 1240,
            sub_metric: "12,847".to_string(),
            chart_data: vec![
                ChartPoint::new("Jan", 4000.0),
                ChartPoint::new("Feb", 3000.0),
                ChartPoint::new("Mar", 2000.0),
                ChartPoint::new("Apr", 2780.0),
                ChartPoint::new("May", 1890.0),
                ChartPoint::new("Jun", 2390.0),
            ],
        },
    );

    datasets.insert(
        "Sales Funnel".to_string(),
        SeedDataset {
            items: vec![
                ActionItem::new(1, "New Enterprise Lead: TechCorp", "$12k", "Hot"),
                ActionItem::new(2, "Deal Stalled: Omega Inc", "$45k", "Risk"),
                ActionItem::new(3, "Contract Sent: Alpha LLC", "$8.5k", "High"),
            ],
            main_metric: 45,
            sub_metric: "$142k".to_string(),
            chart_data: vec![
                ChartPoint::new("Wk1", 12.0),
                ChartPoint::new("Wk2", 19.0),
                ChartPoint::new("Wk3", 15.0),
                ChartPoint::new("Wk4", 22.0),
            ],
        },
    );

    datasets.insert(
        "HR & Payroll".to_string(),
        SeedDataset {
            items: vec![
                ActionItem::new(1, "Candidate Match: Snr Dev", "98%", "High"),
                ActionItem::new(2, "Missing Timesheet: A. Smith", "2 Days", "Med"),
            ],
            main_metric: 12,
            sub_metric: "15".to_string(),
            chart_data: vec![
                ChartPoint::new("Mon", 4.0),
                ChartPoint::new("Tue", 3.0),
                ChartPoint::new("Wed", 7.0),
                ChartPoint::new("Thu", 5.0),
                ChartPoint::new("Fri", 8.0),
                ChartPoint::new("Sat", 2.0),
                ChartPoint::new("Sun", 4.0),
            ],
        },
    );

    datasets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_categories() {
        let table = SeedTable::builtin();
        assert_eq!(table.categories(), vec!["Accounting", "HR & Payroll", "Sales Funnel"]);
        assert_eq!(table.default_category(), "Accounting");
    }

    #[test]
    fn lookup_known_category() {
        let table = SeedTable::builtin();
        let sales = table.lookup("Sales Funnel");
        assert_eq!(sales.main_metric, 45);
        assert_eq!(sales.sub_metric, "$142k");
        assert_eq!(sales.items.len(), 3);
        assert_eq!(sales.chart_data.len(), 4);
    }

    #[test]
    fn unknown_category_falls_back_to_default() {
        let table = SeedTable::builtin();
        let fallback = table.lookup("Social Media");
        assert_eq!(fallback, table.lookup("Accounting"));
    }

    #[test]
    fn configurable_default_category() {
        let table = SeedTable::builtin_with_default("HR & Payroll");
        assert_eq!(table.lookup("Customer Support").main_metric, 12);

        let table = SeedTable::builtin_with_default("Nope");
        assert_eq!(table.default_category(), "Accounting");
    }

    #[test]
    fn seed_item_ids_are_unique() {
        let table = SeedTable::builtin();
        for category in table.categories() {
            let items = table.lookup(category).items;
            let mut ids: Vec<u32> = items.iter().map(|item| item.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), items.len(), "duplicate ids in {}", category);
        }
    }

    #[test]
    fn missing_default_dataset_yields_empty_seed() {
        let table = SeedTable::new(HashMap::new(), "Accounting");
        let seed = table.lookup("Accounting");
        assert!(seed.items.is_empty());
        assert_eq!(seed.main_metric, 0);
    }
}
