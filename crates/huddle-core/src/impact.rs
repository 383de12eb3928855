// Starter impact: value over bench and wins above replacement (WAR).
//
// For each starter, value over bench is the starter's points minus the best
// bench score at the same natural position (0 when nobody sits there). On a
// win, a starter whose value over bench exceeds the margin of victory gets
// one WAR for that week. Losses and ties never award WAR.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::matchup::Outcome;
use crate::position::Position;
use crate::roster::RosterEntry;

/// Per-starter result for one team-week.
#[derive(Debug, Clone, PartialEq)]
pub struct StarterImpact<'a> {
    pub entry: &'a RosterEntry,
    /// Best bench score at the starter's position (0.0 if none).
    pub best_bench: f64,
    pub value_over_bench: f64,
    /// Whether this starter earned a WAR this week.
    pub war: bool,
}

/// Best bench score per natural position. IR players are not bench options.
pub fn best_bench_by_position(entries: &[RosterEntry]) -> HashMap<Position, f64> {
    let mut best: HashMap<Position, f64> = HashMap::new();
    for e in entries.iter().filter(|e| e.is_bench()) {
        let slot = best.entry(e.position).or_insert(f64::NEG_INFINITY);
        if e.points > *slot {
            *slot = e.points;
        }
    }
    best
}

/// Evaluate every starter of a team-week.
///
/// `margin` is own score minus opponent score.
pub fn evaluate_starters(
    entries: &[RosterEntry],
    outcome: Outcome,
    margin: f64,
) -> Vec<StarterImpact<'_>> {
    let bench = best_bench_by_position(entries);
    entries
        .iter()
        .filter(|e| e.is_starter())
        .map(|entry| {
            let best_bench = bench.get(&entry.position).copied().unwrap_or(0.0);
            let value_over_bench = entry.points - best_bench;
            let war = outcome == Outcome::Win && value_over_bench > margin;
            StarterImpact {
                entry,
                best_bench,
                value_over_bench,
                war,
            }
        })
        .collect()
}

/// Season-long accumulation for one player on one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRecord {
    pub player_key: String,
    pub name: String,
    pub position: Position,
    pub team_key: String,
    pub team: String,
    /// Cumulative points scored while in the starting lineup.
    pub starter_points: f64,
    pub weeks_started: u32,
    pub war: u32,
    /// Cumulative value over bench across started weeks.
    pub value_over_bench: f64,
}

/// Accumulates `ImpactRecord`s across weeks, keyed by (player, team).
///
/// A traded player ends up with one row per team.
#[derive(Debug, Default)]
pub struct ImpactLedger {
    records: HashMap<(String, String), ImpactRecord>,
    /// (player, team, week) triples already credited.
    seen: HashSet<(String, String, u32)>,
}

impl ImpactLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one team-week into the ledger.
    ///
    /// A player is counted at most once per (team, week) even if the roster
    /// payload repeats them.
    pub fn record_week(
        &mut self,
        week: u32,
        team_key: &str,
        team: &str,
        entries: &[RosterEntry],
        outcome: Outcome,
        margin: f64,
    ) {
        for impact in evaluate_starters(entries, outcome, margin) {
            let entry = impact.entry;
            let seen_key = (entry.player_key.clone(), team_key.to_string(), week);
            if !self.seen.insert(seen_key) {
                continue;
            }

            let record = self
                .records
                .entry((entry.player_key.clone(), team_key.to_string()))
                .or_insert_with(|| ImpactRecord {
                    player_key: entry.player_key.clone(),
                    name: entry.name.clone(),
                    position: entry.position,
                    team_key: team_key.to_string(),
                    team: team.to_string(),
                    starter_points: 0.0,
                    weeks_started: 0,
                    war: 0,
                    value_over_bench: 0.0,
                });
            record.starter_points += entry.points;
            record.weeks_started += 1;
            record.value_over_bench += impact.value_over_bench;
            if impact.war {
                record.war += 1;
            }
        }
    }

    pub fn get(&self, player_key: &str, team_key: &str) -> Option<&ImpactRecord> {
        self.records
            .get(&(player_key.to_string(), team_key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Final rows sorted by WAR, then starter points, both descending.
    pub fn finish(self) -> Vec<ImpactRecord> {
        let mut rows: Vec<ImpactRecord> = self.records.into_values().collect();
        rows.sort_by(|a, b| {
            b.war.cmp(&a.war).then_with(|| {
                b.starter_points
                    .partial_cmp(&a.starter_points)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.player_key.cmp(&b.player_key))
        });
        rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
