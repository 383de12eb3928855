// Season records widget: high and low scores, heartbreaks, blowouts.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use huddle_app::dashboard::Dashboard;
use huddle_core::analytics::records::{SeasonRecords, Superlative};

use super::{header, panel, visible};
use crate::tui::{TabId, ViewState};

/// Every record, labelled, in display order. Missing records stay in the
/// list so the table shape does not change.
pub fn rows(records: &SeasonRecords) -> Vec<(&'static str, Option<&Superlative>)> {
    vec![
        ("Season high", records.season_high.as_ref()),
        ("Season low", records.season_low.as_ref()),
        ("Heartbreak (best losing score)", records.heartbreak.as_ref()),
        ("Biggest blowout", records.blowout.as_ref()),
        ("Narrowest win", records.narrowest_win.as_ref()),
    ]
}

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    let all = rows(&dash.records);
    let table_rows: Vec<Row> = visible(&all, state.scroll(TabId::Records))
        .iter()
        .map(|(label, record)| match record {
            Some(s) => Row::new(vec![
                Cell::from(*label),
                Cell::from(s.team.clone()),
                Cell::from(format!("{:.1}-{:.1}", s.score, s.opponent_score)),
                Cell::from(format!("vs {}", s.opponent)),
                Cell::from(format!("Week {}", s.week)),
            ]),
            None => Row::new(vec![Cell::from(*label), Cell::from("-")]),
        })
        .collect();

    let widths = [
        Constraint::Length(32),
        Constraint::Min(18),
        Constraint::Length(14),
        Constraint::Min(18),
        Constraint::Length(8),
    ];
    let table = Table::new(table_rows, widths)
        .header(header(&["Record", "Team", "Score", "Opponent", "Week"]))
        .block(panel("Season Records"));
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::{ready_state, screen};

    #[test]
    fn rows_keep_missing_records() {
        let records = SeasonRecords::default();
        let all = rows(&records);
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|(_, r)| r.is_none()));
    }

    #[test]
    fn shows_season_high() {
        let mut state = ready_state();
        state.active_tab = TabId::Records;
        let lines = screen(&state, 120, 20);
        let high = lines.iter().find(|l| l.contains("Season high")).unwrap();
        assert!(high.contains("Blitz Brigade"), "{high}");
        assert!(high.contains("130.0-70.0"), "{high}");
        assert!(high.contains("Week 2"), "{high}");
    }
}
