// The `huddle` binary's library half: CLI subcommands and the terminal
// dashboard, exposed so tests can reach them.

pub mod cli;
pub mod tui;
