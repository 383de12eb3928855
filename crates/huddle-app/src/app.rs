// Application event loop.
//
// Loads the dashboard once on start, then waits for user commands from the
// TUI. A refresh clears the response cache and rescans the league. Progress
// and results are pushed to the TUI over `ui_tx`.

use std::sync::Arc;

use anyhow::Context;
use huddle_core::SlotRequirements;
use huddle_yahoo::LeagueSource;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::dashboard::load_dashboard;
use crate::protocol::{UiUpdate, UserCommand};

/// Run the app loop until `Quit` arrives or the command channel closes.
///
/// Authentication failures end the loop with an error; every other load
/// failure is reported to the TUI and the loop keeps waiting for commands.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    source: Arc<dyn LeagueSource>,
    requirements: SlotRequirements,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    load(source.as_ref(), &requirements, &ui_tx).await?;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Refresh) => {
                info!("Refresh requested");
                source.invalidate().await;
                load(source.as_ref(), &requirements, &ui_tx).await?;
            }
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }
    Ok(())
}

async fn load(
    source: &dyn LeagueSource,
    requirements: &SlotRequirements,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    let _ = ui_tx.send(UiUpdate::LoadStarted).await;

    // The scan reports progress synchronously; a full channel just drops a
    // progress tick.
    let progress_tx = ui_tx.clone();
    let result = load_dashboard(source, requirements, move |p| {
        let _ = progress_tx.try_send(UiUpdate::Progress(p));
    })
    .await;

    match result {
        Ok(dashboard) => {
            if dashboard.is_partial() {
                warn!(
                    failures = dashboard.failures.len(),
                    "dashboard loaded with missing data"
                );
            }
            let _ = ui_tx.send(UiUpdate::DashboardReady(Box::new(dashboard))).await;
            Ok(())
        }
        Err(e) if e.is_auth() => {
            error!("authentication failed: {e}");
            let _ = ui_tx
                .send(UiUpdate::Error(format!("{e}. Run `huddle auth`.")))
                .await;
            Err(e).context("Yahoo authentication failed; run `huddle auth`")
        }
        Err(e) => {
            error!("dashboard load failed: {e}");
            let _ = ui_tx.send(UiUpdate::Error(e.to_string())).await;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeLeague, Failure};

    fn channels() -> (
        mpsc::Sender<UserCommand>,
        mpsc::Receiver<UserCommand>,
        mpsc::Sender<UiUpdate>,
        mpsc::Receiver<UiUpdate>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(64);
        (cmd_tx, cmd_rx, ui_tx, ui_rx)
    }

    /// Read updates until a terminal one (dashboard or error) arrives.
    async fn next_result(ui_rx: &mut mpsc::Receiver<UiUpdate>) -> (usize, UiUpdate) {
        let mut progress = 0;
        loop {
            match ui_rx.recv().await.unwrap() {
                UiUpdate::Progress(_) => progress += 1,
                UiUpdate::LoadStarted => {}
                other => return (progress, other),
            }
        }
    }

    #[tokio::test]
    async fn loads_on_start_and_quits() {
        let league = Arc::new(FakeLeague::two_weeks());
        let (cmd_tx, cmd_rx, ui_tx, mut ui_rx) = channels();
        let handle = tokio::spawn(run(cmd_rx, ui_tx, league.clone(), SlotRequirements::default()));

        let (progress, update) = next_result(&mut ui_rx).await;
        assert_eq!(progress, 10);
        match update {
            UiUpdate::DashboardReady(dash) => assert_eq!(dash.matchups.len(), 8),
            other => panic!("unexpected update: {other:?}"),
        }

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn refresh_invalidates_and_reloads() {
        let league = Arc::new(FakeLeague::two_weeks());
        let (cmd_tx, cmd_rx, ui_tx, mut ui_rx) = channels();
        let handle = tokio::spawn(run(cmd_rx, ui_tx, league.clone(), SlotRequirements::default()));

        next_result(&mut ui_rx).await;
        cmd_tx.send(UserCommand::Refresh).await.unwrap();
        let (_, update) = next_result(&mut ui_rx).await;
        assert!(matches!(update, UiUpdate::DashboardReady(_)));
        assert_eq!(league.invalidations(), 1);
        assert_eq!(
            league.calls().iter().filter(|c| *c == "league").count(),
            2
        );

        drop(cmd_tx);
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn load_failure_is_reported_not_fatal() {
        let mut league = FakeLeague::two_weeks();
        league.fail_meta(Failure::Http(503));
        let (cmd_tx, cmd_rx, ui_tx, mut ui_rx) = channels();
        let handle = tokio::spawn(run(cmd_rx, ui_tx, Arc::new(league), SlotRequirements::default()));

        let (_, update) = next_result(&mut ui_rx).await;
        match update {
            UiUpdate::Error(msg) => assert!(msg.contains("503"), "{msg}"),
            other => panic!("unexpected update: {other:?}"),
        }

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn auth_failure_ends_the_loop() {
        let mut league = FakeLeague::two_weeks();
        league.fail_scoreboard(1, Failure::Auth);
        let (_cmd_tx, cmd_rx, ui_tx, mut ui_rx) = channels();
        let handle = tokio::spawn(run(cmd_rx, ui_tx, Arc::new(league), SlotRequirements::default()));

        let (_, update) = next_result(&mut ui_rx).await;
        match update {
            UiUpdate::Error(msg) => assert!(msg.contains("huddle auth"), "{msg}"),
            other => panic!("unexpected update: {other:?}"),
        }
        let err = handle.await.unwrap().unwrap_err();
        assert!(format!("{err:#}").contains("authentication"));
    }
}
