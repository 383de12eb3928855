// Matchups widget: every team-week result, optionally for one week only.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use huddle_app::dashboard::Dashboard;
use huddle_core::{Outcome, WeeklyMatchupResult};

use super::{empty_row, header, panel, signed, visible};
use crate::tui::{TabId, ViewState};

pub fn filtered(
    matchups: &[WeeklyMatchupResult],
    week: Option<u32>,
) -> Vec<&WeeklyMatchupResult> {
    matchups
        .iter()
        .filter(|m| week.map_or(true, |w| m.week == w))
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    let list = filtered(&dash.matchups, state.week_filter);

    let rows: Vec<Row> = if list.is_empty() {
        vec![empty_row("No matchups")]
    } else {
        visible(&list, state.scroll(TabId::Matchups))
            .iter()
            .map(|m| {
                Row::new(vec![
                    Cell::from(m.week.to_string()),
                    Cell::from(m.team.clone()),
                    Cell::from(format!("{:.1}", m.score)),
                    Cell::from(m.result.letter()).style(outcome_style(m.result)),
                    Cell::from(format!("{:.1}", m.opponent_score)),
                    Cell::from(m.opponent.clone()),
                    Cell::from(signed(m.margin())),
                ])
            })
            .collect()
    };

    let title = match state.week_filter {
        Some(w) => format!("Matchups (week {w})"),
        None => "Matchups".to_string(),
    };
    let widths = [
        Constraint::Length(5),
        Constraint::Min(18),
        Constraint::Length(7),
        Constraint::Length(3),
        Constraint::Length(7),
        Constraint::Min(18),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header(&["Week", "Team", "Score", "", "Opp.", "Opponent", "Margin"]))
        .block(panel(title));
    frame.render_widget(table, area);
}

fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Win => Style::default().fg(Color::Green),
        Outcome::Loss => Style::default().fg(Color::Red),
        Outcome::Tie => Style::default().fg(Color::Yellow),
    }
}
