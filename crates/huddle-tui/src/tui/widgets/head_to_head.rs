// Head-to-head widget: every team's results against every other team.
// Rows read "row team vs. column team".

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use huddle_app::dashboard::Dashboard;
use huddle_core::analytics::head_to_head::HeadToHead;

use super::{empty_row, header, panel};
use crate::tui::{TabId, ViewState};

/// Column headers are cut to this many characters.
const COLUMN_WIDTH: u16 = 10;

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    let h2h = &dash.head_to_head;
    let offset = state.scroll(TabId::HeadToHead).min(h2h.teams.len());

    let rows: Vec<Row> = if h2h.teams.is_empty() {
        vec![empty_row("No completed weeks yet")]
    } else {
        (offset..h2h.teams.len())
            .map(|row| {
                let mut cells = vec![Cell::from(h2h.teams[row].clone())];
                cells.extend((0..h2h.teams.len()).map(|col| {
                    Cell::from(h2h.cell_label(row, col)).style(cell_style(h2h, row, col))
                }));
                Row::new(cells)
            })
            .collect()
    };

    let short_names: Vec<String> = h2h.teams.iter().map(|t| abbreviate(t)).collect();
    let mut labels = vec!["vs."];
    labels.extend(short_names.iter().map(String::as_str));

    let mut widths = vec![Constraint::Length(20)];
    widths.extend(h2h.teams.iter().map(|_| Constraint::Length(COLUMN_WIDTH)));

    let table = Table::new(rows, widths)
        .header(header(&labels))
        .block(panel("Head to Head"));
    frame.render_widget(table, area);
}

pub fn abbreviate(name: &str) -> String {
    name.chars().take(COLUMN_WIDTH as usize).collect()
}

fn cell_style(h2h: &HeadToHead, row: usize, col: usize) -> Style {
    let (wins, losses, _) = h2h.record(row, col);
    if wins > losses {
        Style::default().fg(Color::Green)
    } else if losses > wins {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}
