//! Per-widget rendering, dispatched on the widget kind.

use tracing::warn;

use crate::bindings::BoundValue;
use crate::types::anomaly::{ActionItem, ChartPoint, ItemAction};
use crate::types::dashboard::{DashboardWidget, Variant, WidgetConfig, WidgetKind};
use crate::types::icon::Icon;
use crate::types::view::{
    ActivityLogView, ChartView, EmptyState, ItemCard, ItemControl, ListFeedView, LogLine, Palette,
    StatCardView, WidgetView,
};

/// Subtext that turns into an "Action Needed" badge instead of a caption.
pub const REVIEW_SENTINEL: &str = "Requires your review.";

const LOG_POINT_BASE: u32 = 8192;
const LOG_MINUTES_PER_INDEX: u32 = 12;

/// Renders one widget from its already-resolved value. Reserved and unknown
/// kinds render nothing.
pub fn render_widget(widget: &DashboardWidget, resolved: Option<BoundValue>) -> Option<WidgetView> {
    match widget.kind {
        WidgetKind::StatCard => Some(WidgetView::StatCard(stat_card(widget, resolved))),
        WidgetKind::ListFeed => Some(WidgetView::ListFeed(list_feed(widget, resolved))),
        WidgetKind::ActivityLog => Some(WidgetView::ActivityLog(activity_log(widget, resolved))),
        WidgetKind::Chart => Some(WidgetView::Chart(chart(widget, resolved))),
        WidgetKind::InfoCard => None,
        WidgetKind::Unknown => {
            warn!(widget_id = %widget.id, "Skipping widget of unknown type");
            None
        }
    }
}

fn stat_card(widget: &DashboardWidget, resolved: Option<BoundValue>) -> StatCardView {
    let config = &widget.config;
    let is_sentinel = config.subtext.as_deref() == Some(REVIEW_SENTINEL);
    StatCardView {
        id: widget.id.clone(),
        title: widget.title.clone(),
        value: resolved.map(|value| value.display()).unwrap_or_default(),
        icon: config.icon.as_deref().and_then(Icon::from_name),
        variant: config.variant,
        trend: config.trend.clone(),
        subtext: config.subtext.clone().filter(|_| !is_sentinel),
        action_needed: is_sentinel || needs_review(config),
    }
}

fn needs_review(config: &WidgetConfig) -> bool {
    config.needs_review.unwrap_or(false)
}

fn list_feed(widget: &DashboardWidget, resolved: Option<BoundValue>) -> ListFeedView {
    let items = match resolved {
        Some(BoundValue::Items(items)) => items,
        Some(other) => {
            warn!(widget_id = %widget.id, value = ?other, "list_feed bound to a non-list value");
            Vec::new()
        }
        None => Vec::new(),
    };

    let empty_state = items.is_empty().then(|| EmptyState {
        heading: "All caught up!".to_string(),
        message: format!("No new {} detected.", widget.title.to_lowercase()),
    });

    ListFeedView {
        id: widget.id.clone(),
        title: widget.title.clone(),
        cards: items.iter().map(item_card).collect(),
        empty_state,
    }
}

fn item_card(item: &ActionItem) -> ItemCard {
    ItemCard {
        item_id: item.id,
        confidence_badge: format!("{} Confidence", item.confidence),
        text: item.text.clone(),
        amount: item.amount.clone(),
        received: "Just now".to_string(),
        controls: vec![
            ItemControl {
                label: "Confirm".to_string(),
                action: ItemAction::Approve,
            },
            ItemControl {
                label: "Reject".to_string(),
                action: ItemAction::Reject,
            },
        ],
    }
}

fn activity_log(widget: &DashboardWidget, resolved: Option<BoundValue>) -> ActivityLogView {
    let indices = match resolved {
        Some(BoundValue::Indices(indices)) => indices,
        _ => Vec::new(),
    };

    ActivityLogView {
        id: widget.id.clone(),
        title: widget.title.clone(),
        entries: indices
            .into_iter()
            .map(|index| LogLine {
                index,
                text: format!(
                    "Autonomously processed data point #{}",
                    LOG_POINT_BASE + index
                ),
                minutes_ago: index * LOG_MINUTES_PER_INDEX,
            })
            .collect(),
        footer: "View all logs".to_string(),
    }
}

fn chart(widget: &DashboardWidget, resolved: Option<BoundValue>) -> ChartView {
    let points: Vec<ChartPoint> = match resolved {
        Some(BoundValue::Series(points)) => points,
        _ => Vec::new(),
    };
    let palette = match widget.config.variant {
        Variant::Success => Palette::Emerald,
        _ => Palette::Indigo,
    };

    ChartView {
        id: widget.id.clone(),
        title: widget.title.clone(),
        subtext: widget.config.subtext.clone(),
        gradient_id: format!("{}-gradient", widget.id),
        palette,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(kind: WidgetKind, title: &str, config: WidgetConfig) -> DashboardWidget {
        DashboardWidget {
            id: "w1".to_string(),
            kind,
            title: title.to_string(),
            description: None,
            width: None,
            config,
        }
    }

    fn stat(config: WidgetConfig, resolved: Option<BoundValue>) -> StatCardView {
        match render_widget(&widget(WidgetKind::StatCard, "Pending", config), resolved) {
            Some(WidgetView::StatCard(card)) => card,
            other => panic!("expected stat card, got {:?}", other),
        }
    }

    #[test]
    fn stat_card_shows_value_icon_and_trend() {
        let config = WidgetConfig {
            icon: Some("ShieldCheckIcon".into()),
            variant: Variant::Success,
            trend: Some("+12% this week".into()),
            subtext: Some("Saving approx. 64 hours of manual work.".into()),
            ..WidgetConfig::default()
        };
        let card = stat(config, Some(BoundValue::Number(12847)));
        assert_eq!(card.value, "12,847");
        assert_eq!(card.icon, Some(Icon::ShieldCheck));
        assert_eq!(card.variant, Variant::Success);
        assert_eq!(card.trend.as_deref(), Some("+12% this week"));
        assert_eq!(card.subtext.as_deref(), Some("Saving approx. 64 hours of manual work."));
        assert!(!card.action_needed);
    }

    #[test]
    fn review_sentinel_becomes_badge() {
        let config = WidgetConfig {
            subtext: Some(REVIEW_SENTINEL.into()),
            ..WidgetConfig::default()
        };
        let card = stat(config, Some(BoundValue::Number(3)));
        assert!(card.subtext.is_none());
        assert!(card.action_needed);
    }

    #[test]
    fn review_flag_adds_badge_and_keeps_subtext() {
        let config = WidgetConfig {
            subtext: Some("Three invoices waiting.".into()),
            needs_review: Some(true),
            ..WidgetConfig::default()
        };
        let card = stat(config, None);
        assert_eq!(card.subtext.as_deref(), Some("Three invoices waiting."));
        assert!(card.action_needed);
        assert_eq!(card.value, "");
    }

    #[test]
    fn unknown_icon_renders_without_pictogram() {
        let config = WidgetConfig {
            icon: Some("RocketIcon".into()),
            ..WidgetConfig::default()
        };
        assert_eq!(stat(config, None).icon, None);
    }

    #[test]
    fn list_feed_renders_cards_with_controls() {
        let items = vec![
            ActionItem::new(1, "Flagged charge", "$14.50", "High"),
            ActionItem::new(3, "Duplicate invoice", "$1,200.00", "Medium"),
        ];
        let view = render_widget(
            &widget(WidgetKind::ListFeed, "Decision Stream", WidgetConfig::default()),
            Some(BoundValue::Items(items)),
        );
        let Some(WidgetView::ListFeed(feed)) = view else {
            panic!("expected list feed");
        };
        assert!(feed.empty_state.is_none());
        let ids: Vec<u32> = feed.cards.iter().map(|card| card.item_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(feed.cards[1].confidence_badge, "Medium Confidence");
        let labels: Vec<&str> = feed.cards[0].controls.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Confirm", "Reject"]);
        assert_eq!(feed.cards[0].controls[0].action, ItemAction::Approve);
        assert_eq!(feed.cards[0].controls[1].action, ItemAction::Reject);
    }

    #[test]
    fn empty_list_feed_uses_lowercased_title() {
        let view = render_widget(
            &widget(WidgetKind::ListFeed, "Decision Stream", WidgetConfig::default()),
            Some(BoundValue::Items(Vec::new())),
        );
        let Some(WidgetView::ListFeed(feed)) = view else {
            panic!("expected list feed");
        };
        assert!(feed.cards.is_empty());
        let empty = feed.empty_state.unwrap();
        assert_eq!(empty.heading, "All caught up!");
        assert_eq!(empty.message, "No new decision stream detected.");
        assert!(empty.message.contains("decision stream"));
    }

    #[test]
    fn list_feed_with_non_list_value_is_empty() {
        let view = render_widget(
            &widget(WidgetKind::ListFeed, "Live Lead Feed", WidgetConfig::default()),
            Some(BoundValue::Text("oops".into())),
        );
        let Some(WidgetView::ListFeed(feed)) = view else {
            panic!("expected list feed");
        };
        assert!(feed.cards.is_empty());
        assert!(feed.empty_state.is_some());
    }

    #[test]
    fn activity_log_lines() {
        let view = render_widget(
            &widget(WidgetKind::ActivityLog, "Auto-Log", WidgetConfig::default()),
            Some(BoundValue::Indices(vec![1, 3])),
        );
        let Some(WidgetView::ActivityLog(log)) = view else {
            panic!("expected activity log");
        };
        assert_eq!(log.entries.len(), 2);
        assert_eq!(log.entries[0].text, "Autonomously processed data point #8193");
        assert_eq!(log.entries[0].minutes_ago, 12);
        assert_eq!(log.entries[1].minutes_ago, 36);
        assert_eq!(log.footer, "View all logs");
    }

    #[test]
    fn chart_palette_and_gradient() {
        let success = WidgetConfig {
            variant: Variant::Success,
            subtext: Some("Last 6 months performance".into()),
            ..WidgetConfig::default()
        };
        let points = vec![ChartPoint::new("Jan", 4000.0)];
        let Some(WidgetView::Chart(chart)) = render_widget(
            &widget(WidgetKind::Chart, "Cash Flow", success),
            Some(BoundValue::Series(points.clone())),
        ) else {
            panic!("expected chart");
        };
        assert_eq!(chart.palette, Palette::Emerald);
        assert_eq!(chart.gradient_id, "w1-gradient");
        assert_eq!(chart.points, points);

        let warning = WidgetConfig {
            variant: Variant::Warning,
            ..WidgetConfig::default()
        };
        let Some(WidgetView::Chart(chart)) =
            render_widget(&widget(WidgetKind::Chart, "Trend", warning), None)
        else {
            panic!("expected chart");
        };
        assert_eq!(chart.palette, Palette::Indigo);
        assert!(chart.points.is_empty());
    }

    #[test]
    fn reserved_and_unknown_kinds_render_nothing() {
        assert!(render_widget(&widget(WidgetKind::InfoCard, "Info", WidgetConfig::default()), None).is_none());
        assert!(render_widget(
            &widget(WidgetKind::Unknown, "???", WidgetConfig::default()),
            Some(BoundValue::Number(1))
        )
        .is_none());
    }
}
