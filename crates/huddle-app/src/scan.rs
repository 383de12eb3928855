// Season scan: walk every completed week, fetch the scoreboard and each
// team's roster, and fold them into matchups, starter impact and manager
// efficiency.
//
// Fetches are strictly sequential. A week or roster that fails is recorded
// as a `ScanFailure` and skipped; only authentication errors abort the scan.

use std::ops::RangeInclusive;

use huddle_core::analytics::efficiency::WeeklyEfficiency;
use huddle_core::{ImpactLedger, ImpactRecord, SlotRequirements, WeeklyMatchupResult};
use huddle_yahoo::{ApiError, LeagueSource};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Which fetch a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanStage {
    Scoreboard,
    Roster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanFailure {
    pub week: u32,
    pub stage: ScanStage,
    /// Set for roster failures.
    pub team_key: Option<String>,
    pub message: String,
}

impl std::fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.team_key {
            Some(team) => write!(f, "week {} roster {}: {}", self.week, team, self.message),
            None => write!(f, "week {} scoreboard: {}", self.week, self.message),
        }
    }
}

/// Progress report, sent before each fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanProgress {
    pub week: u32,
    pub last_week: u32,
    /// Fetches finished so far.
    pub done: usize,
    /// Best current estimate of the total number of fetches.
    pub total: usize,
    pub label: String,
}

impl ScanProgress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        }
    }
}

/// Everything a scan produced, partial when some fetches failed.
#[derive(Debug, Clone, Default)]
pub struct SeasonScan {
    pub matchups: Vec<WeeklyMatchupResult>,
    pub impact: Vec<ImpactRecord>,
    pub efficiency: Vec<WeeklyEfficiency>,
    pub failures: Vec<ScanFailure>,
    pub weeks_scanned: u32,
}

/// Scan `weeks` of the league.
///
/// `teams_hint` sizes the progress estimate before the first scoreboard
/// arrives. Returns `Err` only for authentication failures.
pub async fn scan_season<F>(
    source: &dyn LeagueSource,
    weeks: RangeInclusive<u32>,
    teams_hint: usize,
    requirements: &SlotRequirements,
    mut progress: F,
) -> Result<SeasonScan, ApiError>
where
    F: FnMut(ScanProgress),
{
    let first = *weeks.start();
    let last = *weeks.end();
    let week_count = weeks.clone().count();
    info!(first, last, "starting season scan");

    let mut scan = SeasonScan::default();
    let mut ledger = ImpactLedger::new();
    let mut per_week = 1 + teams_hint;
    let mut done = 0usize;

    for week in weeks {
        let remaining_weeks = (last - week + 1) as usize;
        progress(ScanProgress {
            week,
            last_week: last,
            done,
            total: done + remaining_weeks * per_week,
            label: format!("Week {week}: scoreboard"),
        });

        let rows = match source.scoreboard(week).await {
            Ok(rows) => rows,
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                warn!(week, "scoreboard fetch failed: {e}");
                scan.failures.push(ScanFailure {
                    week,
                    stage: ScanStage::Scoreboard,
                    team_key: None,
                    message: e.to_string(),
                });
                done += per_week;
                continue;
            }
        };
        done += 1;
        per_week = 1 + rows.len();
        debug!(week, teams = rows.len(), "scoreboard loaded");

        for (i, row) in rows.iter().enumerate() {
            progress(ScanProgress {
                week,
                last_week: last,
                done,
                total: done + (rows.len() - i) + (remaining_weeks - 1) * per_week,
                label: format!("Week {week}: {}", row.team),
            });

            match source.roster(&row.team_key, week).await {
                Ok(entries) => {
                    ledger.record_week(
                        week,
                        &row.team_key,
                        &row.team,
                        &entries,
                        row.result,
                        row.margin(),
                    );
                    scan.efficiency.push(WeeklyEfficiency::from_roster(
                        week,
                        &row.team_key,
                        &row.team,
                        &entries,
                        requirements,
                    ));
                }
                Err(e) if e.is_auth() => return Err(e),
                Err(e) => {
                    warn!(week, team = %row.team_key, "roster fetch failed: {e}");
                    scan.failures.push(ScanFailure {
                        week,
                        stage: ScanStage::Roster,
                        team_key: Some(row.team_key.clone()),
                        message: e.to_string(),
                    });
                }
            }
            done += 1;
        }

        scan.matchups.extend(rows);
        scan.weeks_scanned += 1;
    }

    scan.impact = ledger.finish();
    info!(
        weeks = week_count,
        matchups = scan.matchups.len(),
        failures = scan.failures.len(),
        "season scan finished"
    );
    Ok(scan)
}
