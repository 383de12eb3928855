// Banner widget: load progress while scanning, otherwise the load error or
// data warnings, otherwise a one-line season summary.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

use huddle_app::scan::ScanProgress;

use super::panel;
use crate::tui::{LoadStatus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    match &state.load_status {
        LoadStatus::Loading(progress) => render_progress(frame, area, progress.as_ref()),
        LoadStatus::Failed(message) => {
            let line = Line::from(vec![
                Span::styled("Load failed: ", Style::default().fg(Color::Red)),
                Span::raw(message.clone()),
                Span::styled("  (r to retry)", Style::default().fg(Color::DarkGray)),
            ]);
            frame.render_widget(Paragraph::new(line).block(panel("Status")), area);
        }
        LoadStatus::Ready => {
            let lines = summary_lines(state);
            frame.render_widget(Paragraph::new(lines).block(panel("Status")), area);
        }
    }
}

fn render_progress(frame: &mut Frame, area: Rect, progress: Option<&ScanProgress>) {
    let (ratio, label) = match progress {
        Some(p) => (p.ratio(), progress_label(p)),
        None => (0.0, "Loading league data...".to_string()),
    };
    let gauge = Gauge::default()
        .block(panel("Loading league data"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

/// "Week 3: Team Name (12/40)".
pub fn progress_label(p: &ScanProgress) -> String {
    format!("{} ({}/{})", p.label, p.done, p.total)
}

fn summary_lines(state: &ViewState) -> Vec<Line<'static>> {
    let Some(dash) = state.dashboard.as_deref() else {
        return Vec::new();
    };
    if !dash.warnings.is_empty() {
        return vec![Line::from(Span::styled(
            dash.warnings.join("; "),
            Style::default().fg(Color::Yellow),
        ))];
    }
    vec![Line::from(format!(
        "{} teams, {} matchups analysed, {} starters tracked",
        dash.standings.len().max(dash.head_to_head.teams.len()),
        dash.matchups.len() / 2,
        dash.impact.len(),
    ))]
}
