// Luck widget: real record vs. all-play record, unluckiest first.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use huddle_app::dashboard::Dashboard;
use huddle_core::analytics::luck::{extremes, LuckRow};

use super::{empty_row, header, panel, pct, signed, visible};
use crate::tui::{TabId, ViewState};

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    let rows: Vec<Row> = if dash.luck.is_empty() {
        vec![empty_row("Luck needs standings and at least one scanned week")]
    } else {
        visible(&dash.luck, state.scroll(TabId::Luck))
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.team.clone()),
                    Cell::from(format!("{}-{}", r.wins, r.losses)),
                    Cell::from(format!("{}-{}", r.all_play_wins, r.all_play_losses)),
                    Cell::from(pct(r.real_pct)),
                    Cell::from(pct(r.all_play_pct)),
                    Cell::from(signed(r.luck * 100.0)).style(luck_style(r.luck)),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Min(18),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header(&["Team", "W-L", "All-Play", "Real %", "All-Play %", "Luck"]))
        .block(panel(title(&dash.luck)));
    frame.render_widget(table, area);
}

pub fn title(rows: &[LuckRow]) -> String {
    match extremes(rows) {
        Some((luckiest, unluckiest)) => format!(
            "Luck (luckiest: {}, unluckiest: {})",
            luckiest.team, unluckiest.team
        ),
        None => "Luck".to_string(),
    }
}

fn luck_style(luck: f64) -> Style {
    if luck > 0.0 {
        Style::default().fg(Color::Green)
    } else if luck < 0.0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}
