// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// loop, or into local ViewState mutations (tab switching, scrolling,
// filters).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use huddle_app::protocol::UserCommand;
use huddle_core::Position;

use super::{LoadStatus, TabId, ViewState};

/// Order of the Impact tab's position filter, cycled with `p`.
///
/// None -> QB -> RB -> WR -> TE -> K -> DEF -> None
const POSITION_CYCLE: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
    Position::Kicker,
    Position::Defense,
];

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should go to the app loop
/// (Refresh, Quit). Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(tab) = c.to_digit(10).and_then(TabId::from_number) {
                view_state.active_tab = tab;
            }
            None
        }
        KeyCode::Tab | KeyCode::Right => {
            view_state.active_tab = view_state.active_tab.next();
            None
        }
        KeyCode::BackTab | KeyCode::Left => {
            view_state.active_tab = view_state.active_tab.prev();
            None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SIZE);
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            view_state.scroll_offset.remove(&view_state.active_tab);
            None
        }

        KeyCode::Char('p') if view_state.active_tab == TabId::Impact => {
            cycle_position_filter(view_state);
            view_state.scroll_offset.remove(&TabId::Impact);
            None
        }
        KeyCode::Char(']') if view_state.active_tab == TabId::Matchups => {
            step_week_filter(view_state, true);
            None
        }
        KeyCode::Char('[') if view_state.active_tab == TabId::Matchups => {
            step_week_filter(view_state, false);
            None
        }
        KeyCode::Esc => {
            view_state.position_filter = None;
            view_state.week_filter = None;
            None
        }

        // A refresh while loading would only queue a second scan.
        KeyCode::Char('r') => match view_state.load_status {
            LoadStatus::Loading(_) => None,
            _ => Some(UserCommand::Refresh),
        },

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// `y`/`q` confirm, `n`/Esc cancel, everything else is ignored.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn cycle_position_filter(view_state: &mut ViewState) {
    view_state.position_filter = match view_state.position_filter {
        None => Some(POSITION_CYCLE[0]),
        Some(current) => match POSITION_CYCLE.iter().position(|p| *p == current) {
            Some(i) if i + 1 < POSITION_CYCLE.len() => Some(POSITION_CYCLE[i + 1]),
            _ => None,
        },
    };
}

/// Move the Matchups week filter through the analysed weeks, passing
/// through "all weeks" at either end.
fn step_week_filter(view_state: &mut ViewState, forward: bool) {
    let Some(dash) = view_state.dashboard.as_deref() else {
        return;
    };
    let first = dash.league.start_week;
    let last = dash.through_week;
    if last < first {
        view_state.week_filter = None;
        return;
    }
    view_state.week_filter = match (view_state.week_filter, forward) {
        (None, true) => Some(first),
        (None, false) => Some(last),
        (Some(w), true) if w < last => Some(w + 1),
        (Some(w), false) if w > first => Some(w - 1),
        _ => None,
    };
    view_state.scroll_offset.remove(&TabId::Matchups);
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let offset = view_state
        .scroll_offset
        .entry(view_state.active_tab)
        .or_insert(0);
    *offset = offset.saturating_sub(lines);
}

/// Scroll down, stopping with the last row still visible.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let max = view_state
        .row_count(view_state.active_tab)
        .saturating_sub(1);
    let offset = view_state
        .scroll_offset
        .entry(view_state.active_tab)
        .or_insert(0);
    *offset = offset.saturating_add(lines).min(max);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
