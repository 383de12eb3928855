// TUI widget modules for each dashboard panel, plus the table helpers they
// share.

pub mod banner;
pub mod efficiency;
pub mod head_to_head;
pub mod help_bar;
pub mod impact;
pub mod luck;
pub mod matchups;
pub mod power;
pub mod quit_confirm;
pub mod records;
pub mod standings;
pub mod status_bar;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row};
use ratatui::Frame;

use super::{LoadStatus, ViewState};

/// Bold header row.
pub fn header<'a>(labels: &[&'a str]) -> Row<'a> {
    Row::new(labels.iter().map(|l| Cell::from(*l))).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn panel(title: impl Into<Line<'static>>) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title)
}

/// Rows from `offset` on; the table clips whatever does not fit.
pub fn visible<T>(rows: &[T], offset: usize) -> &[T] {
    &rows[offset.min(rows.len())..]
}

/// Single-cell row used when a table has nothing to show.
pub fn empty_row(message: &str) -> Row<'static> {
    Row::new(vec![Cell::from(format!("  {message}"))])
        .style(Style::default().fg(Color::DarkGray))
}

/// Signed value with one decimal and an explicit plus sign.
pub fn signed(value: f64) -> String {
    format!("{value:+.1}")
}

/// Ratio as a percentage with one decimal.
pub fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Main panel content before the first dashboard arrives.
pub fn placeholder(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = match &state.load_status {
        LoadStatus::Failed(message) => format!("Could not load the league: {message}"),
        _ => "Loading league data...".to_string(),
    };
    let paragraph = Paragraph::new(text).block(panel("Huddle"));
    frame.render_widget(paragraph, area);
}
