//! Turns an agent's dashboard config plus the current state into a page.

use tracing::debug;

use crate::bindings::{resolve, Bindings};
use crate::render::render_widget;
use crate::state::DashboardState;
use crate::types::agent::Agent;
use crate::types::dashboard::{DashboardConfig, DashboardSection, SectionLayout};
use crate::types::view::{
    DashboardPage, GridCell, GridRow, Header, Page, Placeholder, ScanStatus, SectionBody,
    SectionView,
};

pub fn compose(agent: &Agent, state: &DashboardState) -> Page {
    let Some(config) = agent.dashboard_config.as_ref() else {
        debug!(agent_id = %agent.id, "Agent has no dashboard config");
        return no_configuration();
    };

    let bindings = Bindings::snapshot(state);
    Page::Dashboard(DashboardPage {
        header: header(agent, state),
        sections: compose_sections(config, &bindings),
    })
}

pub fn no_configuration() -> Page {
    Page::NoConfiguration(Placeholder {
        title: "No Dashboard Configuration".to_string(),
        message: "This agent does not have a dashboard layout defined.".to_string(),
    })
}

fn header(agent: &Agent, state: &DashboardState) -> Header {
    Header {
        title: "Intelligence Center".to_string(),
        subtitle: format!("Real-time oversight for {}.", agent.name),
        status: if state.is_scanning {
            ScanStatus::Scanning
        } else {
            ScanStatus::Active
        },
        category: agent.category.clone(),
    }
}

/// Sections in declaration order.
pub fn compose_sections(config: &DashboardConfig, bindings: &Bindings) -> Vec<SectionView> {
    config
        .sections
        .iter()
        .map(|section| compose_section(section, bindings))
        .collect()
}

fn compose_section(section: &DashboardSection, bindings: &Bindings) -> SectionView {
    let rendered = section.widgets.iter().filter_map(|widget| {
        let value = resolve(&widget.config, bindings);
        render_widget(widget, value).map(|view| (widget, view))
    });

    let body = match section.layout {
        SectionLayout::Grid => {
            let columns = section.grid_columns();
            let cells = rendered.map(|(widget, view)| GridCell {
                span: widget.grid_span(columns),
                widget: view,
            });
            SectionBody::Grid {
                columns,
                rows: pack_rows(cells, columns),
            }
        }
        SectionLayout::Column => SectionBody::Column {
            widgets: rendered.map(|(_, view)| view).collect(),
        },
    };

    SectionView {
        id: section.id.clone(),
        title: section.title.clone(),
        body,
    }
}

/// Fills rows left to right. A cell that does not fit in what is left of the
/// current row opens the next one; cells are never split and a row never
/// holds more than `columns` tracks.
pub fn pack_rows(cells: impl IntoIterator<Item = GridCell>, columns: u32) -> Vec<GridRow> {
    let columns = columns.max(1);
    let mut rows = Vec::new();
    let mut current = GridRow { cells: Vec::new() };
    let mut used = 0;

    for mut cell in cells {
        cell.span = cell.span.clamp(1, columns);
        if used + cell.span > columns {
            rows.push(std::mem::replace(&mut current, GridRow { cells: Vec::new() }));
            used = 0;
        }
        used += cell.span;
        current.cells.push(cell);
    }

    if !current.cells.is_empty() {
        rows.push(current);
    }
    rows
}
