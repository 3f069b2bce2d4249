use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::icon::Icon;

/// Column count used by grid sections that omit `columns` (or set it to 0).
pub const DEFAULT_GRID_COLUMNS: u32 = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub sections: Vec<DashboardSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLayout {
    Grid,
    Column,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub layout: SectionLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default)]
    pub widgets: Vec<DashboardWidget>,
}

impl DashboardSection {
    /// Track count of a grid section. Column sections ignore it.
    pub fn grid_columns(&self) -> u32 {
        match self.columns {
            Some(columns) if columns >= 1 => columns,
            _ => DEFAULT_GRID_COLUMNS,
        }
    }
}

/// Closed set of widget kinds. Type strings outside the set land on
/// `Unknown` so one bad widget never fails a whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    StatCard,
    ListFeed,
    ActivityLog,
    Chart,
    /// Reserved; has no renderer yet.
    InfoCard,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetWidth {
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "half")]
    Half,
    #[serde(rename = "third")]
    Third,
    #[serde(rename = "2/3")]
    TwoThirds,
    /// Width strings outside the set above take one track.
    #[serde(other)]
    Other,
}

impl WidgetWidth {
    /// Grid tracks taken inside a section of `columns` tracks.
    pub fn grid_span(self, columns: u32) -> u32 {
        let columns = columns.max(1);
        let span = match self {
            WidgetWidth::Full => columns,
            WidgetWidth::TwoThirds => 2,
            WidgetWidth::Half | WidgetWidth::Third | WidgetWidth::Other => 1,
        };
        span.min(columns)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Success,
    Warning,
    Error,
    Outline,
    /// Also what unrecognized variant names read as.
    #[default]
    #[serde(other)]
    Default,
}

/// Option bag attached to a widget. Keys outside the recognized set are kept
/// in `extra` and ignored by the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_review: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<WidgetWidth>,
    #[serde(default)]
    pub config: WidgetConfig,
}

impl DashboardWidget {
    pub fn grid_span(&self, columns: u32) -> u32 {
        self.width.map_or(1, |width| width.grid_span(columns))
    }
}

/// Non-fatal problems found in a config. Rendering still works; they are
/// reported so catalog authors can fix them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    DuplicateSectionId(String),
    DuplicateWidgetId { section: String, widget: String },
    ZeroColumns { section: String },
    UnknownWidgetType { section: String, widget: String },
    UnknownIcon { widget: String, icon: String },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::DuplicateSectionId(id) => write!(f, "duplicate section id '{}'", id),
            ConfigIssue::DuplicateWidgetId { section, widget } => {
                write!(f, "duplicate widget id '{}' in section '{}'", widget, section)
            }
            ConfigIssue::ZeroColumns { section } => {
                write!(f, "section '{}' declares 0 columns", section)
            }
            ConfigIssue::UnknownWidgetType { section, widget } => {
                write!(f, "widget '{}' in section '{}' has an unknown type", widget, section)
            }
            ConfigIssue::UnknownIcon { widget, icon } => {
                write!(f, "widget '{}' names unknown icon '{}'", widget, icon)
            }
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut section_ids = HashSet::new();

        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                issues.push(ConfigIssue::DuplicateSectionId(section.id.clone()));
            }
            if section.layout == SectionLayout::Grid && section.columns == Some(0) {
                issues.push(ConfigIssue::ZeroColumns {
                    section: section.id.clone(),
                });
            }

            let mut widget_ids = HashSet::new();
            for widget in &section.widgets {
                if !widget_ids.insert(widget.id.as_str()) {
                    issues.push(ConfigIssue::DuplicateWidgetId {
                        section: section.id.clone(),
                        widget: widget.id.clone(),
                    });
                }
                if widget.kind == WidgetKind::Unknown {
                    issues.push(ConfigIssue::UnknownWidgetType {
                        section: section.id.clone(),
                        widget: widget.id.clone(),
                    });
                }
                if let Some(icon) = &widget.config.icon {
                    if Icon::from_name(icon).is_none() {
                        issues.push(ConfigIssue::UnknownIcon {
                            widget: widget.id.clone(),
                            icon: icon.clone(),
                        });
                    }
                }
            }
        }

        issues
    }
}
