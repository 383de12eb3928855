// Standings widget: the league table as Yahoo reports it.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use huddle_app::dashboard::Dashboard;

use super::{empty_row, header, panel, pct, visible};
use crate::tui::{TabId, ViewState};

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    let rows: Vec<Row> = if dash.standings.is_empty() {
        vec![empty_row("Standings unavailable")]
    } else {
        visible(&dash.standings, state.scroll(TabId::Standings))
            .iter()
            .map(|s| {
                Row::new(vec![
                    Cell::from(s.rank.to_string()),
                    Cell::from(s.team.clone()),
                    Cell::from(s.manager.clone().unwrap_or_default()),
                    Cell::from(s.record()),
                    Cell::from(pct(s.win_pct())),
                    Cell::from(format!("{:.1}", s.points_for)),
                    Cell::from(format!("{:.1}", s.points_against)),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header(&["#", "Team", "Manager", "W-L-T", "Pct", "PF", "PA"]))
        .block(panel("Standings"));
    frame.render_widget(table, area);
}
