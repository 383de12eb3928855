// huddle entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Initialize tracing (log to file, not terminal)
// 3. Load config
// 4. Run a one-shot subcommand, or for `dashboard`:
//    create channels, spawn the app loop, run the TUI, wait for the app loop

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use huddle_app::{app, config};
use huddle_tui::{cli, tui};
use huddle_yahoo::LeagueSource;
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "huddle", version, about = "Yahoo fantasy football league analytics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive dashboard (default).
    Dashboard,
    /// Authorize huddle with your Yahoo account.
    Auth,
    /// List your leagues for the configured game.
    Leagues,
    /// Print the configured league's standings.
    Standings,
    /// Print the draft board, optionally also as CSV.
    Draft {
        /// Also write the board to this CSV file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write every dashboard table as CSV.
    Export {
        /// Output directory.
        #[arg(long, default_value = "export")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    init_tracing()?;
    info!("huddle starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, game={}",
        if config.league.league_key.is_empty() {
            "<unset>"
        } else {
            config.league.league_key.as_str()
        },
        config.league.game_code
    );

    let result = match args.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => run_dashboard(&config).await,
        Command::Auth => cli::auth(&config).await,
        Command::Leagues => cli::leagues(&config).await,
        Command::Standings => cli::standings(&config).await,
        Command::Draft { out } => cli::draft(&config, out.as_deref()).await,
        Command::Export { out } => cli::export(&config, &out).await,
    };
    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}

async fn run_dashboard(config: &config::Config) -> anyhow::Result<()> {
    let source: Arc<dyn LeagueSource> = Arc::new(cli::build_league(config)?);

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let requirements = config.lineup.clone();
    let app_handle = tokio::spawn(app::run(cmd_rx, ui_tx, source, requirements));

    // Blocks until the user quits or the app loop ends.
    let tui_result = tui::run(ui_rx, cmd_tx).await;

    // The app loop finishes its current load before it sees Quit.
    let app_result = match tokio::time::timeout(std::time::Duration::from_secs(5), app_handle).await {
        Ok(joined) => joined.context("application loop panicked")?,
        Err(_) => {
            info!("application loop still busy, exiting anyway");
            Ok(())
        }
    };

    tui_result?;
    app_result?;
    info!("huddle shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("huddle.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("huddle=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
