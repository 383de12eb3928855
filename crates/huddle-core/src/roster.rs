// Weekly roster entries and starting-lineup slot requirements.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::Position;

/// One player on one team's roster for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Yahoo player key, e.g. "461.p.33536". Unique within a team-week.
    pub player_key: String,
    pub name: String,
    /// Natural playing position (never a designation).
    pub position: Position,
    /// Roster slot the manager put the player in that week.
    pub slot: Position,
    /// Fantasy points scored that week.
    pub points: f64,
}

impl RosterEntry {
    /// Whether the player was in the manager's starting lineup.
    pub fn is_starter(&self) -> bool {
        !matches!(self.slot, Position::Bench | Position::InjuredReserve)
    }

    /// Whether the player sat on the bench (not IR).
    pub fn is_bench(&self) -> bool {
        self.slot == Position::Bench
    }

    /// Whether the player was parked in an injured-reserve slot.
    pub fn is_injured_reserve(&self) -> bool {
        self.slot == Position::InjuredReserve
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SlotConfigError {
    #[error("unknown lineup position `{0}`")]
    UnknownPosition(String),

    #[error("`{0}` is a roster designation, not a starting slot")]
    NotAStartingSlot(String),

    #[error("lineup must require at least one starter")]
    Empty,
}

/// Required starter count per position.
///
/// Built from the `[lineup]` table in huddle.toml, e.g.
/// `{"QB": 1, "RB": 2, "WR": 3, "TE": 1, "K": 1, "DEF": 1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequirements {
    counts: BTreeMap<Position, usize>,
}

impl Default for SlotRequirements {
    fn default() -> Self {
        let counts = BTreeMap::from([
            (Position::Quarterback, 1),
            (Position::RunningBack, 2),
            (Position::WideReceiver, 3),
            (Position::TightEnd, 1),
            (Position::Kicker, 1),
            (Position::Defense, 1),
        ]);
        SlotRequirements { counts }
    }
}

impl SlotRequirements {
    /// Build requirements from a config mapping of position strings to counts.
    ///
    /// Accepts every playing position plus "W/R/T" / "FLEX". Bench and IR
    /// keys are rejected, as is any key that does not parse. Zero counts are
    /// dropped.
    pub fn from_config(config: &HashMap<String, usize>) -> Result<Self, SlotConfigError> {
        let mut counts = BTreeMap::new();
        for (key, &count) in config {
            let pos = Position::from_str_pos(key)
                .ok_or_else(|| SlotConfigError::UnknownPosition(key.clone()))?;
            if matches!(pos, Position::Bench | Position::InjuredReserve) {
                return Err(SlotConfigError::NotAStartingSlot(key.clone()));
            }
            if count > 0 {
                *counts.entry(pos).or_insert(0) += count;
            }
        }
        if counts.is_empty() {
            return Err(SlotConfigError::Empty);
        }
        Ok(SlotRequirements { counts })
    }

    /// Number of starters required at `pos` (0 when not configured).
    pub fn count(&self, pos: Position) -> usize {
        self.counts.get(&pos).copied().unwrap_or(0)
    }

    /// Total number of starting slots.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn has_flex(&self) -> bool {
        self.count(Position::Flex) > 0
    }
}
