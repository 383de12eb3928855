// Manager efficiency: points actually started vs. the optimal lineup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lineup::{actual_lineup, optimal_lineup};
use crate::position::Position;
use crate::roster::{RosterEntry, SlotRequirements};

/// Actual vs. optimal points for one team-week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEfficiency {
    pub week: u32,
    pub team_key: String,
    pub team: String,
    pub actual_points: f64,
    pub max_points: f64,
    /// Slots of starters that `actual_points` leaves out because the lineup
    /// config has no room for them.
    #[serde(default)]
    pub unmodeled_slots: Vec<Position>,
}

impl WeeklyEfficiency {
    pub fn from_roster(
        week: u32,
        team_key: &str,
        team: &str,
        entries: &[RosterEntry],
        requirements: &SlotRequirements,
    ) -> Self {
        let actual = actual_lineup(entries, requirements);
        WeeklyEfficiency {
            week,
            team_key: team_key.to_string(),
            team: team.to_string(),
            actual_points: actual.points,
            max_points: optimal_lineup(entries, requirements).total_points,
            unmodeled_slots: actual.unmodeled,
        }
    }

    /// Points left on the bench.
    pub fn points_lost(&self) -> f64 {
        (self.max_points - self.actual_points).max(0.0)
    }
}

/// Season totals for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRow {
    pub team_key: String,
    pub team: String,
    pub weeks: u32,
    pub actual_points: f64,
    pub max_points: f64,
    pub points_lost: f64,
    /// actual / max; 1.0 when max is zero.
    pub efficiency: f64,
}

/// Distinct slots, in display order, that some team started a player in
/// without a matching lineup count.
pub fn unmodeled_slots(weeks: &[WeeklyEfficiency]) -> Vec<Position> {
    let mut slots: Vec<Position> = weeks
        .iter()
        .flat_map(|w| w.unmodeled_slots.iter().copied())
        .collect();
    slots.sort_by_key(|p| p.sort_order());
    slots.dedup();
    slots
}

/// Aggregate weekly rows per team, most efficient first.
pub fn efficiency_table(weeks: &[WeeklyEfficiency]) -> Vec<EfficiencyRow> {
    let mut by_team: BTreeMap<&str, EfficiencyRow> = BTreeMap::new();
    for w in weeks {
        let row = by_team
            .entry(w.team_key.as_str())
            .or_insert_with(|| EfficiencyRow {
                team_key: w.team_key.clone(),
                team: w.team.clone(),
                weeks: 0,
                actual_points: 0.0,
                max_points: 0.0,
                points_lost: 0.0,
                efficiency: 1.0,
            });
        row.weeks += 1;
        row.actual_points += w.actual_points;
        row.max_points += w.max_points;
        row.points_lost += w.points_lost();
    }

    let mut rows: Vec<EfficiencyRow> = by_team
        .into_values()
        .map(|mut row| {
            row.efficiency = if row.max_points > 0.0 {
                row.actual_points / row.max_points
            } else {
                1.0
            };
            row
        })
        .collect();
    rows.sort_by(|a, b| {
        b.efficiency
            .partial_cmp(&a.efficiency)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}
