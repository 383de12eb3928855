// Quit confirmation popup, drawn over the dashboard.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered;

pub fn render(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 30, 5);
    let text = vec![
        Line::from(Span::styled(
            "Quit huddle?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("y: quit   n/Esc: cancel"),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
