// Messages between the app loop and the TUI.

use crate::dashboard::Dashboard;
use crate::scan::ScanProgress;

/// App loop -> TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// A (re)load started; the previous dashboard stays on screen.
    LoadStarted,
    Progress(ScanProgress),
    DashboardReady(Box<Dashboard>),
    /// A load failed outright. Shown in the status bar.
    Error(String),
}

/// TUI -> app loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Drop cached responses and rescan the league.
    Refresh,
    Quit,
}
