// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState`. The app loop pushes `UiUpdate` messages over
// an mpsc channel; the TUI applies them to `ViewState` and re-renders at
// ~30 fps. Key presses either mutate `ViewState` locally (tabs, scrolling,
// filters) or become `UserCommand`s for the app loop.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use huddle_app::dashboard::Dashboard;
use huddle_app::protocol::{UiUpdate, UserCommand};
use huddle_app::scan::ScanProgress;
use huddle_core::Position;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// Dashboard tabs, in key order (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Standings,
    Luck,
    Power,
    Records,
    HeadToHead,
    Impact,
    Efficiency,
    Matchups,
}

impl TabId {
    pub const ALL: [TabId; 8] = [
        TabId::Standings,
        TabId::Luck,
        TabId::Power,
        TabId::Records,
        TabId::HeadToHead,
        TabId::Impact,
        TabId::Efficiency,
        TabId::Matchups,
    ];

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            TabId::Standings => "Standings",
            TabId::Luck => "Luck",
            TabId::Power => "Power",
            TabId::Records => "Records",
            TabId::HeadToHead => "H2H",
            TabId::Impact => "Impact",
            TabId::Efficiency => "Efficiency",
            TabId::Matchups => "Matchups",
        }
    }

    fn index(self) -> usize {
        TabId::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Tab for a number key, 1-based.
    pub fn from_number(n: u32) -> Option<TabId> {
        let i = usize::try_from(n).ok()?.checked_sub(1)?;
        TabId::ALL.get(i).copied()
    }

    pub fn next(self) -> TabId {
        TabId::ALL[(self.index() + 1) % TabId::ALL.len()]
    }

    pub fn prev(self) -> TabId {
        TabId::ALL[(self.index() + TabId::ALL.len() - 1) % TabId::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Where the current (or last) load stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    /// Loading; progress arrives once the scan starts.
    Loading(Option<ScanProgress>),
    Ready,
    Failed(String),
}

/// TUI-local state, updated from `UiUpdate` messages and key presses.
pub struct ViewState {
    /// Last successfully loaded dashboard. Kept on screen while reloading.
    pub dashboard: Option<Box<Dashboard>>,
    pub load_status: LoadStatus,
    pub active_tab: TabId,
    /// First visible row per tab.
    pub scroll_offset: HashMap<TabId, usize>,
    /// Impact tab position filter.
    pub position_filter: Option<Position>,
    /// Matchups tab week filter.
    pub week_filter: Option<u32>,
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            dashboard: None,
            load_status: LoadStatus::Loading(None),
            active_tab: TabId::Standings,
            scroll_offset: HashMap::new(),
            position_filter: None,
            week_filter: None,
            confirm_quit: false,
        }
    }
}

impl ViewState {
    pub fn scroll(&self, tab: TabId) -> usize {
        self.scroll_offset.get(&tab).copied().unwrap_or(0)
    }

    /// Number of rows the tab currently shows, after filters.
    pub fn row_count(&self, tab: TabId) -> usize {
        let Some(dash) = self.dashboard.as_deref() else {
            return 0;
        };
        match tab {
            TabId::Standings => dash.standings.len(),
            TabId::Luck => dash.luck.len(),
            TabId::Power => dash.power.len(),
            TabId::Records => widgets::records::rows(&dash.records).len(),
            TabId::HeadToHead => dash.head_to_head.teams.len(),
            TabId::Impact => widgets::impact::filtered(&dash.impact, self.position_filter).len(),
            TabId::Efficiency => dash.efficiency.len(),
            TabId::Matchups => widgets::matchups::filtered(&dash.matchups, self.week_filter).len(),
        }
    }

    /// Keep every scroll offset inside its tab's row count.
    pub fn clamp_scroll(&mut self) {
        let counts: Vec<(TabId, usize)> = TabId::ALL
            .iter()
            .map(|t| (*t, self.row_count(*t)))
            .collect();
        for (tab, count) in counts {
            if let Some(offset) = self.scroll_offset.get_mut(&tab) {
                *offset = (*offset).min(count.saturating_sub(1));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::LoadStarted => {
            state.load_status = LoadStatus::Loading(None);
        }
        UiUpdate::Progress(progress) => {
            state.load_status = LoadStatus::Loading(Some(progress));
        }
        UiUpdate::DashboardReady(dashboard) => {
            if state
                .week_filter
                .is_some_and(|w| w > dashboard.through_week)
            {
                state.week_filter = None;
            }
            state.dashboard = Some(dashboard);
            state.load_status = LoadStatus::Ready;
            state.clamp_scroll();
        }
        UiUpdate::Error(message) => {
            state.load_status = LoadStatus::Failed(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::banner::render(frame, layout.banner, state);

    let main = layout.main_panel;
    match state.dashboard.as_deref() {
        None => widgets::placeholder(frame, main, state),
        Some(dash) => match state.active_tab {
            TabId::Standings => widgets::standings::render(frame, main, dash, state),
            TabId::Luck => widgets::luck::render(frame, main, dash, state),
            TabId::Power => widgets::power::render(frame, main, dash, state),
            TabId::Records => widgets::records::render(frame, main, dash, state),
            TabId::HeadToHead => widgets::head_to_head::render(frame, main, dash, state),
            TabId::Impact => widgets::impact::render(frame, main, dash, state),
            TabId::Efficiency => widgets::efficiency::render(frame, main, dash, state),
            TabId::Matchups => widgets::matchups::render(frame, main, dash, state),
        },
    }

    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the app loop goes away.
///
/// Initializes the terminal, chains a panic hook that restores it, then
/// selects over UI updates, keyboard input and a ~30 fps render tick.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            debug!(?cmd, "user command");
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e).context("terminal input failed")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use huddle_app::scan::{ScanFailure, ScanStage, SeasonScan};
    use huddle_core::analytics::efficiency::WeeklyEfficiency;
    use huddle_core::{
        ImpactRecord, LeagueMeta, Outcome, TeamScore, TeamStanding, WeeklyMatchupResult,
    };
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn score(key: &str, name: &str, points: f64) -> TeamScore {
        TeamScore {
            team_key: key.to_string(),
            name: name.to_string(),
            points,
        }
    }

    fn standing(rank: u32, key: &str, name: &str, wins: u32, losses: u32) -> TeamStanding {
        TeamStanding {
            rank,
            team_key: key.to_string(),
            team: name.to_string(),
            manager: Some(format!("{name} GM")),
            wins,
            losses,
            ties: 0,
            points_for: 200.0,
            points_against: 190.0,
            logo_url: None,
        }
    }

    fn impact(key: &str, name: &str, position: Position, war: u32, points: f64) -> ImpactRecord {
        ImpactRecord {
            player_key: key.to_string(),
            name: name.to_string(),
            position,
            team_key: "t1".to_string(),
            team: "Gridiron Gang".to_string(),
            starter_points: points,
            weeks_started: 2,
            war,
            value_over_bench: points / 2.0,
        }
    }

    /// A small two-week, four-team dashboard for render tests.
    pub(crate) fn sample_dashboard() -> Dashboard {
        let mut matchups = Vec::new();
        for (week, a, b) in [
            (1, score("t1", "Gridiron Gang", 120.0), score("t2", "Blitz Brigade", 100.0)),
            (1, score("t3", "Sack Masters", 90.0), score("t4", "End Zone Elite", 80.0)),
            (2, score("t3", "Sack Masters", 110.0), score("t1", "Gridiron Gang", 95.0)),
            (2, score("t2", "Blitz Brigade", 130.0), score("t4", "End Zone Elite", 70.0)),
        ] {
            matchups.extend(WeeklyMatchupResult::pair(week, &a, &b));
        }
        let efficiency = matchups
            .iter()
            .map(|m| WeeklyEfficiency {
                week: m.week,
                team_key: m.team_key.clone(),
                team: m.team.clone(),
                actual_points: m.score,
                max_points: m.score + 10.0,
                unmodeled_slots: Vec::new(),
            })
            .collect();
        let scan = SeasonScan {
            matchups,
            impact: vec![
                impact("p1", "Josh Allen", Position::Quarterback, 1, 60.0),
                impact("p2", "Bijan Robinson", Position::RunningBack, 0, 40.0),
                impact("p3", "Ja'Marr Chase", Position::WideReceiver, 0, 35.0),
            ],
            efficiency,
            failures: Vec::new(),
            weeks_scanned: 2,
        };
        let league = LeagueMeta {
            league_key: "461.l.1".to_string(),
            name: "Sunday Funday".to_string(),
            num_teams: 4,
            current_week: 3,
            start_week: 1,
            end_week: 17,
            season: "2025".to_string(),
            is_finished: false,
        };
        let standings = vec![
            standing(1, "t3", "Sack Masters", 2, 0),
            standing(2, "t1", "Gridiron Gang", 1, 1),
            standing(3, "t2", "Blitz Brigade", 1, 1),
            standing(4, "t4", "End Zone Elite", 0, 2),
        ];
        Dashboard::build(league, 2, standings, scan, Vec::new())
    }

    pub(crate) fn ready_state() -> ViewState {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::DashboardReady(Box::new(sample_dashboard())),
        );
        state
    }

    /// Render the full frame and return the screen as text lines.
    pub(crate) fn screen(state: &ViewState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render_frame(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn progress(done: usize, total: usize) -> ScanProgress {
        ScanProgress {
            week: 1,
            last_week: 2,
            done,
            total,
            label: "Week 1: scoreboard".to_string(),
        }
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.dashboard.is_none());
        assert_eq!(state.load_status, LoadStatus::Loading(None));
        assert_eq!(state.active_tab, TabId::Standings);
        assert!(state.scroll_offset.is_empty());
        assert!(state.position_filter.is_none());
        assert!(state.week_filter.is_none());
        assert!(!state.confirm_quit);
        assert_eq!(state.row_count(TabId::Standings), 0);
    }

    #[test]
    fn tab_navigation_wraps() {
        assert_eq!(TabId::Standings.next(), TabId::Luck);
        assert_eq!(TabId::Matchups.next(), TabId::Standings);
        assert_eq!(TabId::Standings.prev(), TabId::Matchups);
        assert_eq!(TabId::from_number(6), Some(TabId::Impact));
        assert_eq!(TabId::from_number(0), None);
        assert_eq!(TabId::from_number(9), None);
    }

    #[test]
    fn progress_and_ready_updates() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Progress(progress(3, 10)));
        assert_eq!(state.load_status, LoadStatus::Loading(Some(progress(3, 10))));

        apply_ui_update(
            &mut state,
            UiUpdate::DashboardReady(Box::new(sample_dashboard())),
        );
        assert_eq!(state.load_status, LoadStatus::Ready);
        assert_eq!(state.row_count(TabId::Standings), 4);
        assert_eq!(state.row_count(TabId::Matchups), 8);
        assert_eq!(state.row_count(TabId::Records), 5);
    }

    #[test]
    fn reload_keeps_previous_dashboard() {
        let mut state = ready_state();
        apply_ui_update(&mut state, UiUpdate::LoadStarted);
        assert_eq!(state.load_status, LoadStatus::Loading(None));
        assert!(state.dashboard.is_some());

        apply_ui_update(&mut state, UiUpdate::Error("HTTP 503".to_string()));
        assert_eq!(state.load_status, LoadStatus::Failed("HTTP 503".to_string()));
        assert!(state.dashboard.is_some());
    }

    #[test]
    fn ready_clamps_scroll_and_stale_week_filter() {
        let mut state = ViewState::default();
        state.scroll_offset.insert(TabId::Standings, 50);
        state.week_filter = Some(9);
        apply_ui_update(
            &mut state,
            UiUpdate::DashboardReady(Box::new(sample_dashboard())),
        );
        assert_eq!(state.scroll(TabId::Standings), 3);
        assert_eq!(state.week_filter, None);
    }

    #[test]
    fn render_loading_without_dashboard() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Progress(progress(5, 10)));
        let lines = screen(&state, 100, 20).join("\n");
        assert!(lines.contains("Week 1: scoreboard"), "{lines}");
        assert!(lines.contains("Loading league data"), "{lines}");
    }

    #[test]
    fn render_every_tab() {
        let mut state = ready_state();
        for tab in TabId::ALL {
            state.active_tab = tab;
            let lines = screen(&state, 120, 30).join("\n");
            assert!(lines.contains("Sunday Funday"), "{tab:?}: {lines}");
        }
    }

    #[test]
    fn render_failed_load_shows_error() {
        let mut state = ready_state();
        apply_ui_update(&mut state, UiUpdate::Error("HTTP 503 from standings".to_string()));
        let lines = screen(&state, 120, 30).join("\n");
        assert!(lines.contains("HTTP 503 from standings"), "{lines}");
    }

    #[test]
    fn render_partial_dashboard_shows_warnings() {
        let mut dash = sample_dashboard();
        dash.failures.push(ScanFailure {
            week: 2,
            stage: ScanStage::Roster,
            team_key: Some("t4".to_string()),
            message: "HTTP 500".to_string(),
        });
        dash.warnings.push("1 fetch(es) failed; results are partial".to_string());
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::DashboardReady(Box::new(dash)));
        let lines = screen(&state, 120, 30).join("\n");
        assert!(lines.contains("results are partial"), "{lines}");
    }

    #[test]
    fn quit_confirm_overlay() {
        let mut state = ready_state();
        state.confirm_quit = true;
        let lines = screen(&state, 100, 30).join("\n");
        assert!(lines.contains("Quit huddle?"), "{lines}");
    }

    #[test]
    fn h2h_outcomes_in_sample() {
        let dash = sample_dashboard();
        let gang = dash.head_to_head.index_of("Gridiron Gang").unwrap();
        let sacks = dash.head_to_head.index_of("Sack Masters").unwrap();
        assert_eq!(dash.head_to_head.cells[gang][sacks], vec![Outcome::Loss]);
    }
}
