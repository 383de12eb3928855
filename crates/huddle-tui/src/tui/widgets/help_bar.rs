// Help bar widget: keyboard shortcuts for the active tab.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{TabId, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(state: &ViewState) -> String {
    let mut text = String::from(" q:Quit | 1-8/Tab:Tabs | j/k:Scroll | r:Refresh");
    match state.active_tab {
        TabId::Impact => {
            let filter = state
                .position_filter
                .map(|p| p.display_str())
                .unwrap_or("All");
            text.push_str(&format!(" | p:Position ({filter})"));
        }
        TabId::Matchups => {
            let week = state
                .week_filter
                .map(|w| format!("Week {w}"))
                .unwrap_or_else(|| "All".to_string());
            text.push_str(&format!(" | [/]:Week ({week})"));
        }
        _ => {}
    }
    text
}
