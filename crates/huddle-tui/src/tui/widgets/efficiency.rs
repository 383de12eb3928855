// Manager efficiency widget: points started vs. the best possible lineup.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use huddle_app::dashboard::Dashboard;

use super::{empty_row, header, panel, pct, visible};
use crate::tui::{TabId, ViewState};

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    let rows: Vec<Row> = if dash.efficiency.is_empty() {
        vec![empty_row("No rosters scanned yet")]
    } else {
        visible(&dash.efficiency, state.scroll(TabId::Efficiency))
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.team.clone()),
                    Cell::from(pct(r.efficiency)),
                    Cell::from(format!("{:.1}", r.actual_points)),
                    Cell::from(format!("{:.1}", r.max_points)),
                    Cell::from(format!("{:.1}", r.points_lost)),
                    Cell::from(r.weeks.to_string()),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header(&["Team", "Eff.", "Actual", "Optimal", "Lost", "Weeks"]))
        .block(panel("Manager Efficiency"));
    frame.render_widget(table, area);
}
