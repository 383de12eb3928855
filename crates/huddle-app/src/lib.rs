// Application layer: configuration, the season scan, dashboard assembly,
// the draft board, CSV export and the event loop driving the TUI.

pub mod app;
pub mod config;
pub mod dashboard;
pub mod draft;
pub mod export;
pub mod protocol;
pub mod scan;

#[cfg(test)]
mod test_support;
