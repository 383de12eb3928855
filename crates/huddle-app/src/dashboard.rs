// Dashboard assembly: league metadata, standings and a season scan turned
// into every table the TUI and CSV export show.

use huddle_core::analytics::efficiency::{efficiency_table, unmodeled_slots, EfficiencyRow};
use huddle_core::analytics::head_to_head::{head_to_head, HeadToHead};
use huddle_core::analytics::luck::{luck_index, LuckRow};
use huddle_core::analytics::power::{power_rankings, PowerRow};
use huddle_core::analytics::records::{season_records, SeasonRecords};
use huddle_core::{ImpactRecord, LeagueMeta, SlotRequirements, TeamStanding, WeeklyMatchupResult};
use huddle_yahoo::{ApiError, LeagueSource};
use tracing::{info, warn};

use crate::scan::{scan_season, ScanFailure, ScanProgress, SeasonScan};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub league: LeagueMeta,
    /// Last week included in the analysis.
    pub through_week: u32,
    pub standings: Vec<TeamStanding>,
    pub luck: Vec<LuckRow>,
    pub power: Vec<PowerRow>,
    pub records: SeasonRecords,
    pub head_to_head: HeadToHead,
    pub impact: Vec<ImpactRecord>,
    pub efficiency: Vec<EfficiencyRow>,
    pub matchups: Vec<WeeklyMatchupResult>,
    pub failures: Vec<ScanFailure>,
    /// Non-fatal problems worth showing, e.g. standings unavailable.
    pub warnings: Vec<String>,
}

impl Dashboard {
    /// Compute every table from already-fetched data.
    pub fn build(
        league: LeagueMeta,
        through_week: u32,
        standings: Vec<TeamStanding>,
        scan: SeasonScan,
        mut warnings: Vec<String>,
    ) -> Self {
        let unmodeled = unmodeled_slots(&scan.efficiency);
        if !unmodeled.is_empty() {
            let slots: Vec<&str> = unmodeled.iter().map(|p| p.display_str()).collect();
            warn!(slots = ?slots, "starters in slots missing from [lineup]");
            warnings.push(format!(
                "Starters in {} slots are left out of efficiency; add them to [lineup] \
                 in config/huddle.toml (e.g. \"W/R/T\" = 1)",
                slots.join(", ")
            ));
        }
        Dashboard {
            luck: luck_index(&standings, &scan.matchups),
            power: power_rankings(&scan.matchups),
            records: season_records(&scan.matchups),
            head_to_head: head_to_head(&scan.matchups),
            efficiency: efficiency_table(&scan.efficiency),
            impact: scan.impact,
            matchups: scan.matchups,
            failures: scan.failures,
            league,
            through_week,
            standings,
            warnings,
        }
    }

    /// Whether any part of the data is missing: a failed scan fetch or
    /// unavailable standings. Config hints alone do not count.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty() || self.standings.is_empty()
    }
}

/// Standings, or an empty table plus a warning when they cannot be loaded.
pub async fn standings_or_empty(
    source: &dyn LeagueSource,
) -> Result<(Vec<TeamStanding>, Option<String>), ApiError> {
    match source.standings().await {
        Ok(rows) => Ok((rows, None)),
        Err(e) if e.is_auth() => Err(e),
        Err(e) => {
            warn!("standings unavailable: {e}");
            Ok((Vec::new(), Some(format!("Standings unavailable: {e}"))))
        }
    }
}

/// Fetch and analyze the whole league.
///
/// League metadata is required; standings degrade to empty; the scan
/// records its own failures. Auth errors propagate.
pub async fn load_dashboard<F>(
    source: &dyn LeagueSource,
    requirements: &SlotRequirements,
    progress: F,
) -> Result<Dashboard, ApiError>
where
    F: FnMut(ScanProgress),
{
    let league = source.league_meta().await?;
    let through_week = league.last_completed_week();
    info!(league = %league.league_key, through_week, "loading dashboard");

    let (standings, warning) = standings_or_empty(source).await?;
    let scan = scan_season(
        source,
        league.start_week..=through_week,
        league.num_teams as usize,
        requirements,
        progress,
    )
    .await?;

    let mut warnings: Vec<String> = warning.into_iter().collect();
    if !scan.failures.is_empty() {
        warnings.push(format!(
            "{} fetch(es) failed; results are partial",
            scan.failures.len()
        ));
    }

    Ok(Dashboard::build(league, through_week, standings, scan, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{roster_for, FakeLeague, Failure};
    use huddle_core::{Outcome, Position, RosterEntry};

    #[tokio::test]
    async fn full_dashboard() {
        let league = FakeLeague::two_weeks();
        let dash = load_dashboard(&league, &SlotRequirements::default(), |_| {})
            .await
            .unwrap();

        assert_eq!(dash.through_week, 2);
        assert_eq!(dash.standings.len(), 4);
        assert_eq!(dash.matchups.len(), 8);
        assert_eq!(dash.luck.len(), 4);
        assert_eq!(dash.power.len(), 4);
        assert_eq!(dash.efficiency.len(), 4);
        assert_eq!(dash.head_to_head.teams, vec!["A", "B", "C", "D"]);
        assert!(!dash.is_partial());

        let high = dash.records.season_high.as_ref().unwrap();
        assert_eq!((high.team.as_str(), high.score), ("B", 130.0));
        let blowout = dash.records.blowout.as_ref().unwrap();
        assert_eq!(blowout.margin(), 60.0);

        let a = dash.head_to_head.index_of("A").unwrap();
        let c = dash.head_to_head.index_of("C").unwrap();
        assert_eq!(dash.head_to_head.cells[a][c], vec![Outcome::Loss]);
    }

    #[tokio::test]
    async fn standings_failure_degrades_to_empty() {
        let mut league = FakeLeague::two_weeks();
        league.fail_standings(Failure::Http(503));

        let dash = load_dashboard(&league, &SlotRequirements::default(), |_| {})
            .await
            .unwrap();
        assert!(dash.standings.is_empty());
        assert!(dash.luck.is_empty(), "luck needs standings");
        assert_eq!(dash.power.len(), 4, "scan-based tables still build");
        assert!(dash.warnings[0].starts_with("Standings unavailable"));
        assert!(dash.is_partial());
    }

    #[tokio::test]
    async fn standings_auth_failure_propagates() {
        let mut league = FakeLeague::two_weeks();
        league.fail_standings(Failure::Auth);
        let err = load_dashboard(&league, &SlotRequirements::default(), |_| {})
            .await
            .unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn meta_failure_is_an_error() {
        let mut league = FakeLeague::two_weeks();
        league.fail_meta(Failure::Http(500));
        assert!(load_dashboard(&league, &SlotRequirements::default(), |_| {})
            .await
            .is_err());
    }

    #[tokio::test]
    async fn scan_failures_become_a_warning() {
        let mut league = FakeLeague::two_weeks();
        league.fail_scoreboard(2, Failure::Shape);
        let dash = load_dashboard(&league, &SlotRequirements::default(), |_| {})
            .await
            .unwrap();
        assert_eq!(dash.failures.len(), 1);
        assert_eq!(dash.matchups.len(), 4);
        assert!(dash.warnings.iter().any(|w| w.contains("results are partial")));
    }

    #[tokio::test]
    async fn flex_starters_without_flex_slot_warn() {
        let mut league = FakeLeague::two_weeks();
        let mut roster = roster_for("a", 35.0);
        roster.push(RosterEntry {
            player_key: "a.rb4".to_string(),
            name: "Flex Back".to_string(),
            position: Position::RunningBack,
            slot: Position::Flex,
            points: 12.0,
        });
        league.set_roster("a", 1, roster);
        let dash = load_dashboard(&league, &SlotRequirements::default(), |_| {})
            .await
            .unwrap();
        let hint = dash
            .warnings
            .iter()
            .find(|w| w.contains("W/R/T"))
            .expect("flex hint");
        assert!(hint.contains("[lineup]"), "{hint}");
        assert!(!dash.is_partial(), "a config hint is not missing data");
        assert!(dash.efficiency.iter().all(|e| e.efficiency <= 1.0));

        let flex = SlotRequirements::from_config(
            &[("QB", 1), ("RB", 2), ("WR", 3), ("TE", 1), ("K", 1), ("DEF", 1), ("W/R/T", 1)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
        .unwrap();
        let dash = load_dashboard(&league, &flex, |_| {}).await.unwrap();
        assert!(dash.warnings.is_empty(), "{:?}", dash.warnings);
    }

    #[tokio::test]
    async fn finished_season_scans_through_end_week() {
        let mut league = FakeLeague::two_weeks();
        league.meta.is_finished = true;
        league.meta.end_week = 2;
        let dash = load_dashboard(&league, &SlotRequirements::default(), |_| {})
            .await
            .unwrap();
        assert_eq!(dash.through_week, 2);
        assert!(league.calls().contains(&"scoreboard 2".to_string()));
        assert!(!league.calls().contains(&"scoreboard 3".to_string()));
    }
}
