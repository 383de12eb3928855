// Status bar widget: league name, analysed weeks, tab indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{TabId, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        format!(" {} ", league_label(state)),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.active_tab));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "League name 2025, weeks 1-6", or the app name before the first load.
pub fn league_label(state: &ViewState) -> String {
    match state.dashboard.as_deref() {
        Some(dash) => format!(
            "{} {}, weeks {}-{}",
            dash.league.name, dash.league.season, dash.league.start_week, dash.through_week
        ),
        None => "huddle".to_string(),
    }
}

/// Tab indicator spans with the active tab highlighted, e.g.
/// "[1:Standings] [2:Luck] ...".
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab) in TabId::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::ready_state;

    #[test]
    fn tab_spans_highlight_active() {
        let spans = tab_spans(TabId::Power);
        // [1:Standings] " " [2:Luck] " " [3:Power]
        assert_eq!(spans[4].content, "[3:Power]");
        assert!(spans[4].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn tab_spans_cover_every_tab() {
        let labels: Vec<String> = tab_spans(TabId::Standings)
            .iter()
            .step_by(2)
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(labels.len(), 8);
        assert_eq!(labels[5], "[6:Impact]");
    }

    #[test]
    fn league_label_variants() {
        assert_eq!(league_label(&ViewState::default()), "huddle");

        let state = ready_state();
        assert_eq!(league_label(&state), "Sunday Funday 2025, weeks 1-2");
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
