//! Render output. Everything here is plain data: the drawing side (webview,
//! terminal) decides how a stat card or a chart looks.

use std::fmt;

use serde::Serialize;

use super::anomaly::{ChartPoint, ItemAction};
use super::dashboard::Variant;
use super::icon::Icon;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    NoConfiguration(Placeholder),
    Dashboard(DashboardPage),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub header: Header,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Scanning,
    Active,
}

impl ScanStatus {
    pub fn label(self) -> &'static str {
        match self {
            ScanStatus::Scanning => "Scanning...",
            ScanStatus::Active => "Active",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    pub subtitle: String,
    pub status: ScanStatus,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SectionBody {
    Grid { columns: u32, rows: Vec<GridRow> },
    Column { widgets: Vec<WidgetView> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub cells: Vec<GridCell>,
}

impl GridRow {
    pub fn tracks_used(&self) -> u32 {
        self.cells.iter().map(|cell| cell.span).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub span: u32,
    pub widget: WidgetView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetView {
    StatCard(StatCardView),
    ListFeed(ListFeedView),
    ActivityLog(ActivityLogView),
    Chart(ChartView),
}

impl WidgetView {
    pub fn id(&self) -> &str {
        match self {
            WidgetView::StatCard(view) => &view.id,
            WidgetView::ListFeed(view) => &view.id,
            WidgetView::ActivityLog(view) => &view.id,
            WidgetView::Chart(view) => &view.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCardView {
    pub id: String,
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub variant: Variant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    pub action_needed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFeedView {
    pub id: String,
    pub title: String,
    pub cards: Vec<ItemCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCard {
    /// Stable key; cards are added and removed by item id.
    pub item_id: u32,
    pub confidence_badge: String,
    pub text: String,
    pub amount: String,
    pub received: String,
    pub controls: Vec<ItemControl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemControl {
    pub label: String,
    pub action: ItemAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
    pub heading: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogView {
    pub id: String,
    pub title: String,
    pub entries: Vec<LogLine>,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    pub index: u32,
    pub text: String,
    pub minutes_ago: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Emerald,
    Indigo,
}

impl Palette {
    pub fn hex(self) -> &'static str {
        match self {
            Palette::Emerald => "#10b981",
            Palette::Indigo => "#6366f1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    pub gradient_id: String,
    pub palette: Palette,
    pub points: Vec<ChartPoint>,
}

// Plain-text outline, used by the CLI.

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::NoConfiguration(placeholder) => {
                writeln!(f, "{}", placeholder.title)?;
                writeln!(f, "{}", placeholder.message)
            }
            Page::Dashboard(page) => {
                let header = &page.header;
                writeln!(f, "{}", header.title)?;
                writeln!(
                    f,
                    "{}  [{}] {}",
                    header.subtitle,
                    header.status.label(),
                    header.category
                )?;
                for section in &page.sections {
                    writeln!(f)?;
                    write!(f, "{}", section)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SectionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title.as_deref().unwrap_or(&self.id);
        match &self.body {
            SectionBody::Grid { columns, rows } => {
                writeln!(f, "== {} (grid, {} columns)", title, columns)?;
                for (n, row) in rows.iter().enumerate() {
                    writeln!(f, "  row {}:", n + 1)?;
                    for cell in &row.cells {
                        write_widget(f, &cell.widget, cell.span, "    ")?;
                    }
                }
            }
            SectionBody::Column { widgets } => {
                writeln!(f, "== {} (column)", title)?;
                for widget in widgets {
                    write_widget(f, widget, 0, "  ")?;
                }
            }
        }
        Ok(())
    }
}

fn write_widget(f: &mut fmt::Formatter<'_>, widget: &WidgetView, span: u32, indent: &str) -> fmt::Result {
    let span = if span > 1 { format!(" (span {})", span) } else { String::new() };
    match widget {
        WidgetView::StatCard(card) => {
            write!(f, "{}* {}: {}{}", indent, card.title, card.value, span)?;
            if let Some(trend) = &card.trend {
                write!(f, " [{}]", trend)?;
            }
            if card.action_needed {
                write!(f, " [Action Needed]")?;
            }
            writeln!(f)?;
            if let Some(subtext) = &card.subtext {
                writeln!(f, "{}  {}", indent, subtext)?;
            }
        }
        WidgetView::ListFeed(feed) => {
            writeln!(f, "{}* {}{}", indent, feed.title, span)?;
            for card in &feed.cards {
                writeln!(
                    f,
                    "{}  #{} {} | {} | {}",
                    indent, card.item_id, card.text, card.amount, card.confidence_badge
                )?;
            }
            if let Some(empty) = &feed.empty_state {
                writeln!(f, "{}  {} {}", indent, empty.heading, empty.message)?;
            }
        }
        WidgetView::ActivityLog(log) => {
            writeln!(f, "{}* {}{}", indent, log.title, span)?;
            for entry in &log.entries {
                writeln!(f, "{}  {} ({} mins ago)", indent, entry.text, entry.minutes_ago)?;
            }
        }
        WidgetView::Chart(chart) => {
            writeln!(f, "{}* {}{} [{}]", indent, chart.title, span, chart.palette.hex())?;
            let series: Vec<String> = chart
                .points
                .iter()
                .map(|point| format!("{}={}", point.name, point.value))
                .collect();
            writeln!(f, "{}  {}", indent, series.join(" "))?;
        }
    }
    Ok(())
}
