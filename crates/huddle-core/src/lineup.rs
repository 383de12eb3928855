// Optimal lineup selection.
//
// Greedy per-position fill over a single points-descending ordering. This is
// optimal because every dedicated slot accepts exactly one position. The
// optional W/R/T flex is filled after all dedicated slots from the best
// remaining RB/WR/TE, which stays optimal for a single flex class whose
// eligibility is a superset of the dedicated positions. Overlapping flex
// classes (e.g. a QB-eligible superflex next to W/R/T) would need a matching
// formulation and are not modeled.

use std::collections::{HashMap, HashSet};

use crate::position::Position;
use crate::roster::{RosterEntry, SlotRequirements};

/// One filled starting slot.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupSlot<'a> {
    /// The slot that was filled (a playing position or Flex).
    pub slot: Position,
    pub entry: &'a RosterEntry,
}

/// The maximum-points lineup for one team-week.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalLineup<'a> {
    pub slots: Vec<LineupSlot<'a>>,
    /// Sum of points over `slots` ("Max Points").
    pub total_points: f64,
}

impl<'a> OptimalLineup<'a> {
    /// Number of selected players at a given slot.
    pub fn filled(&self, slot: Position) -> usize {
        self.slots.iter().filter(|s| s.slot == slot).count()
    }

    /// Whether a player was picked for any slot.
    pub fn contains(&self, player_key: &str) -> bool {
        self.slots.iter().any(|s| s.entry.player_key == player_key)
    }
}

/// Compute the maximum-points lineup under `requirements`.
///
/// Players in injured-reserve slots are never considered. A position with
/// fewer eligible players than required is left under-filled.
pub fn optimal_lineup<'a>(
    entries: &'a [RosterEntry],
    requirements: &SlotRequirements,
) -> OptimalLineup<'a> {
    let mut ranked: Vec<&RosterEntry> = entries
        .iter()
        .filter(|e| !e.is_injured_reserve())
        .collect();
    // Stable sort: equal scores keep roster order.
    ranked.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut used: HashSet<&str> = HashSet::new();
    let mut slots: Vec<LineupSlot<'a>> = Vec::with_capacity(requirements.total());

    for pos in Position::FILL_ORDER {
        let needed = requirements.count(pos);
        if needed == 0 {
            continue;
        }
        take_best(&ranked, &mut used, &mut slots, pos, needed, |e| {
            e.position == pos
        });
    }

    let flex = requirements.count(Position::Flex);
    if flex > 0 {
        take_best(&ranked, &mut used, &mut slots, Position::Flex, flex, |e| {
            e.position.is_flex_eligible()
        });
    }

    let total_points = slots.iter().map(|s| s.entry.points).sum();
    OptimalLineup {
        slots,
        total_points,
    }
}

fn take_best<'a, F>(
    ranked: &[&'a RosterEntry],
    used: &mut HashSet<&'a str>,
    slots: &mut Vec<LineupSlot<'a>>,
    slot: Position,
    needed: usize,
    eligible: F,
) where
    F: Fn(&RosterEntry) -> bool,
{
    let mut taken = 0;
    for &entry in ranked {
        if taken == needed {
            break;
        }
        if !eligible(entry) || used.contains(entry.player_key.as_str()) {
            continue;
        }
        used.insert(entry.player_key.as_str());
        slots.push(LineupSlot { slot, entry });
        taken += 1;
    }
}

/// What the manager actually started, measured against `requirements`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActualLineup {
    /// Points from starters in configured slots, up to each slot's count.
    pub points: f64,
    /// Slots of starters left out because `requirements` has no room for
    /// them, e.g. a W/R/T starter when no flex is configured.
    pub unmodeled: Vec<Position>,
}

/// Points the manager actually started that week.
///
/// Only starters that fit `requirements` count, so the result is always a
/// lineup `optimal_lineup` could have picked and never exceeds Max Points.
/// Starters are matched to slots in roster order.
pub fn actual_lineup(entries: &[RosterEntry], requirements: &SlotRequirements) -> ActualLineup {
    let mut filled: HashMap<Position, usize> = HashMap::new();
    let mut points = 0.0;
    let mut unmodeled = Vec::new();
    for entry in entries.iter().filter(|e| e.is_starter()) {
        let used = filled.entry(entry.slot).or_insert(0);
        if *used < requirements.count(entry.slot) {
            *used += 1;
            points += entry.points;
        } else {
            unmodeled.push(entry.slot);
        }
    }
    ActualLineup { points, unmodeled }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
