// Impact widget: starters ranked by wins added over the best bench option.
//
// Scrollable table: #, Player, Pos, Team, Starts, Pts, Over Bench, WAR.
// Filter by position_filter from ViewState.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use huddle_app::dashboard::Dashboard;
use huddle_core::{ImpactRecord, Position};

use super::{empty_row, header, panel, signed, visible};
use crate::tui::{TabId, ViewState};

pub fn filtered(records: &[ImpactRecord], position: Option<Position>) -> Vec<&ImpactRecord> {
    records
        .iter()
        .filter(|r| position.map_or(true, |p| r.position == p))
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    let list = filtered(&dash.impact, state.position_filter);
    let offset = state.scroll(TabId::Impact);

    let rows: Vec<Row> = if list.is_empty() {
        vec![empty_row("No starters match")]
    } else {
        visible(&list, offset)
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let style = if r.war > 0 {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from((offset + i + 1).to_string()),
                    Cell::from(r.name.clone()),
                    Cell::from(r.position.display_str()),
                    Cell::from(r.team.clone()),
                    Cell::from(r.weeks_started.to_string()),
                    Cell::from(format!("{:.1}", r.starter_points)),
                    Cell::from(signed(r.value_over_bench)),
                    Cell::from(r.war.to_string()).style(Style::default().fg(Color::Cyan)),
                ])
                .style(style)
            })
            .collect()
    };

    let title = match state.position_filter {
        Some(p) => format!("Starter Impact ({})", p.display_str()),
        None => "Starter Impact".to_string(),
    };
    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(11),
        Constraint::Length(4),
    ];
    let table = Table::new(rows, widths)
        .header(header(&["#", "Player", "Pos", "Team", "Starts", "Pts", "Over Bench", "WAR"]))
        .block(panel(title));
    frame.render_widget(table, area);
}
