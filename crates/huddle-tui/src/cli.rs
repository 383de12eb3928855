// Non-interactive subcommands: `auth`, `leagues`, `standings`, `draft`,
// `export`.
// Each prints to stdout and returns; only `dashboard` starts the TUI.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use huddle_app::config::Config;
use huddle_app::dashboard::load_dashboard;
use huddle_app::draft::{load_draft, DraftRow};
use huddle_app::export::{export_dashboard, export_draft};
use huddle_core::{LeagueSummary, TeamStanding};
use huddle_yahoo::auth::extract_code;
use huddle_yahoo::{LeagueSource, TokenStore, YahooClient, YahooLeague};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

/// Client with the configured pacing, cache TTL, credentials and token.
pub fn build_client(config: &Config) -> anyhow::Result<Arc<YahooClient>> {
    let tokens = TokenStore::load(&config.token_path).context("failed to load OAuth token")?;
    if !tokens.has_token() {
        bail!("not authenticated with Yahoo; run `huddle auth` first");
    }
    Ok(Arc::new(YahooClient::new(
        config.fetch.client_settings(),
        config.credentials.oauth_app(),
        tokens,
    )))
}

/// The configured league, backed by the Yahoo API.
pub fn build_league(config: &Config) -> anyhow::Result<YahooLeague> {
    let key = config.require_league_key()?.to_string();
    Ok(YahooLeague::new(build_client(config)?, key))
}

/// Interactive authorization-code grant: print the consent URL, read the
/// pasted redirect URL (or bare code), exchange it and save the token.
pub async fn auth(config: &Config) -> anyhow::Result<()> {
    let app = config.require_oauth_app()?;
    let url = app.authorization_url()?;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(
            format!(
                "Open this URL in a browser and approve access:\n\n  {url}\n\n\
                 Then paste the code (or the full redirect URL) here: "
            )
            .as_bytes(),
        )
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read the authorization code")?;
    let code = extract_code(&line).context("no authorization code found in the input")?;

    let token = app
        .exchange_code(&reqwest::Client::new(), &code)
        .await
        .context("failed to exchange the authorization code")?;

    let mut store = TokenStore::file(&config.token_path);
    store.set(token);
    store.save()?;
    info!(path = %config.token_path.display(), "authorization complete");
    println!("Saved token to {}", config.token_path.display());
    Ok(())
}

/// List the logged-in user's leagues for the configured game.
pub async fn leagues(config: &Config) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let game = client
        .game(&config.league.game_code)
        .await
        .with_context(|| format!("failed to look up game '{}'", config.league.game_code))?;
    let leagues = client
        .user_leagues(&game.game_key)
        .await
        .context("failed to list leagues")?;

    println!("{} {} (game {})", game.code, game.season, game.game_key);
    for line in format_leagues(&leagues) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_leagues(leagues: &[LeagueSummary]) -> Vec<String> {
    if leagues.is_empty() {
        return vec!["  no leagues found".to_string()];
    }
    leagues
        .iter()
        .map(|l| format!("  {:<16} {} ({} teams)", l.league_key, l.name, l.num_teams))
        .collect()
}

/// Print the configured league's standings.
pub async fn standings(config: &Config) -> anyhow::Result<()> {
    let league = build_league(config)?;
    let rows = league
        .standings()
        .await
        .context("failed to load standings")?;
    for line in format_standings(&rows) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_standings(rows: &[TeamStanding]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>3}  {:<24} {:<8} {:>8} {:>8}",
        "#", "Team", "W-L-T", "PF", "PA"
    )];
    lines.extend(rows.iter().map(|s| {
        format!(
            "{:>3}  {:<24} {:<8} {:>8.1} {:>8.1}",
            s.rank,
            s.team,
            s.record(),
            s.points_for,
            s.points_against
        )
    }));
    lines
}

/// Print the draft board; with `out`, also write it as CSV.
pub async fn draft(config: &Config, out: Option<&Path>) -> anyhow::Result<()> {
    let league = build_league(config)?;
    let rows = load_draft(&league)
        .await
        .context("failed to load draft results")?;
    for line in format_draft(&rows) {
        println!("{line}");
    }
    if let Some(path) = out {
        export_draft(&rows, path)?;
        println!("{}", path.display());
    }
    Ok(())
}

pub fn format_draft(rows: &[DraftRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["  no draft picks yet".to_string()];
    }
    let mut lines = vec![format!(
        "{:>3} {:>4}  {:<24} {}",
        "Rd", "Pick", "Team", "Player"
    )];
    lines.extend(rows.iter().map(|r| {
        format!(
            "{:>3} {:>4}  {:<24} {}",
            r.round,
            r.pick,
            r.team,
            r.player_key.as_deref().unwrap_or("-")
        )
    }));
    lines
}

/// Scan the season and write every dashboard table as CSV into `out`.
pub async fn export(config: &Config, out: &Path) -> anyhow::Result<()> {
    let league = build_league(config)?;
    let dashboard = load_dashboard(&league, &config.lineup, |p| {
        eprint!("\r{:<60}", format!("{} ({}/{})", p.label, p.done, p.total));
    })
    .await
    .context("failed to load league data")?;
    eprintln!();

    for warning in &dashboard.warnings {
        eprintln!("warning: {warning}");
    }
    for failure in &dashboard.failures {
        eprintln!("  {failure}");
    }

    let files = export_dashboard(&dashboard, out)?;
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}
