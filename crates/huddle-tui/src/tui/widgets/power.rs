// Power rankings widget: the table plus a risk vs. reward scatter of
// volatility against average score.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::{
    Axis, Cell, Chart, Dataset, GraphType, LegendPosition, Paragraph, Row, Table,
};
use ratatui::Frame;

use huddle_app::dashboard::Dashboard;
use huddle_core::analytics::power::PowerRow;

use super::{empty_row, header, panel, visible};
use crate::tui::{TabId, ViewState};

/// Narrower panels show the table only.
const CHART_MIN_WIDTH: u16 = 120;

const TEAM_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::White,
    Color::LightGreen,
];

/// Where a team sits relative to the league's mean score and volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// High scoring and consistent.
    Elite,
    /// High scoring but volatile.
    Risky,
    /// Consistent but low scoring.
    LowCeiling,
    /// Low scoring and volatile.
    DangerZone,
}

impl Quadrant {
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::Elite => "elite",
            Quadrant::Risky => "risky",
            Quadrant::LowCeiling => "low ceiling",
            Quadrant::DangerZone => "danger zone",
        }
    }
}

/// League means of (volatility, avg_score), the quadrant dividers.
pub fn midpoints(rows: &[PowerRow]) -> (f64, f64) {
    if rows.is_empty() {
        return (0.0, 0.0);
    }
    let n = rows.len() as f64;
    (
        rows.iter().map(|r| r.volatility).sum::<f64>() / n,
        rows.iter().map(|r| r.avg_score).sum::<f64>() / n,
    )
}

/// Scores at or above the mean count as high; volatility strictly above
/// the mean counts as volatile.
pub fn quadrant(row: &PowerRow, mid: (f64, f64)) -> Quadrant {
    let (mid_vol, mid_avg) = mid;
    match (row.avg_score >= mid_avg, row.volatility > mid_vol) {
        (true, false) => Quadrant::Elite,
        (true, true) => Quadrant::Risky,
        (false, false) => Quadrant::LowCeiling,
        (false, true) => Quadrant::DangerZone,
    }
}

/// Axis bounds with a little padding so edge points stay visible.
fn bounds(values: impl Iterator<Item = f64> + Clone, floor_at_zero: bool) -> [f64; 2] {
    let lo = values.clone().fold(f64::INFINITY, f64::min);
    let hi = values.fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo) * 0.1).max(1.0);
    let lo = if floor_at_zero { (lo - pad).max(0.0) } else { lo - pad };
    [lo, hi + pad]
}

fn axis_labels(b: [f64; 2]) -> Vec<String> {
    let mid = (b[0] + b[1]) / 2.0;
    vec![format!("{:.0}", b[0]), format!("{mid:.0}"), format!("{:.0}", b[1])]
}

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    if area.width >= CHART_MIN_WIDTH && !dash.power.is_empty() {
        let [table_area, chart_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);
        render_table(frame, table_area, dash, state);
        render_chart(frame, chart_area, &dash.power);
    } else {
        render_table(frame, area, dash, state);
    }
}

fn render_table(frame: &mut Frame, area: Rect, dash: &Dashboard, state: &ViewState) {
    let rows: Vec<Row> = if dash.power.is_empty() {
        vec![empty_row("No completed weeks yet")]
    } else {
        visible(&dash.power, state.scroll(TabId::Power))
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.rank.to_string()),
                    Cell::from(r.team.clone()),
                    Cell::from(format!("{:.1}", r.power_score)),
                    Cell::from(format!("{:.1}", r.avg_score)),
                    Cell::from(format!("{:.1}", r.volatility)),
                    Cell::from(format!("{:.1}", r.min_score)),
                    Cell::from(format!("{:.1}", r.max_score)),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header(&["#", "Team", "Power", "Avg", "StdDev", "Low", "High"]))
        .block(panel("Power Rankings (avg - 0.5 x stddev)"));
    frame.render_widget(table, area);
}

fn render_chart(frame: &mut Frame, area: Rect, rows: &[PowerRow]) {
    let block = panel("Risk vs. Reward");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let [chart_area, key_area] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(2)]).areas(inner);

    let mid = midpoints(rows);
    let x = bounds(rows.iter().map(|r| r.volatility), true);
    let y = bounds(rows.iter().map(|r| r.avg_score), false);

    let points: Vec<[(f64, f64); 1]> =
        rows.iter().map(|r| [(r.volatility, r.avg_score)]).collect();
    let vertical = [(mid.0, y[0]), (mid.0, y[1])];
    let horizontal = [(x[0], mid.1), (x[1], mid.1)];

    let divider = Style::default().fg(Color::DarkGray);
    let mut datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(divider)
            .data(&vertical),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(divider)
            .data(&horizontal),
    ];
    datasets.extend(rows.iter().zip(&points).enumerate().map(|(i, (row, point))| {
        Dataset::default()
            .name(format!("{} ({})", row.team, quadrant(row, mid).label()))
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(TEAM_COLORS[i % TEAM_COLORS.len()]))
            .data(point)
    }));

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("Volatility")
                .style(Style::default().fg(Color::Gray))
                .bounds(x)
                .labels(axis_labels(x)),
        )
        .y_axis(
            Axis::default()
                .title("Avg")
                .style(Style::default().fg(Color::Gray))
                .bounds(y)
                .labels(axis_labels(y)),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(2, 3), Constraint::Ratio(2, 3)));
    frame.render_widget(chart, chart_area);

    let key = vec![
        Line::from("top left: elite | top right: risky"),
        Line::from("bottom left: low ceiling | bottom right: danger zone"),
    ];
    frame.render_widget(
        Paragraph::new(key).style(Style::default().fg(Color::DarkGray)),
        key_area,
    );
}
