// Football positions and roster designations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Football positions plus the roster designations Yahoo reports in a
/// player's `selected_position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    /// W/R/T flex slot.
    Flex,
    Bench,
    InjuredReserve,
}

impl Position {
    /// Order in which dedicated starter slots are filled by the lineup
    /// optimizer. Flex is handled separately, after all of these.
    pub const FILL_ORDER: [Position; 6] = [
        Position::Quarterback,
        Position::WideReceiver,
        Position::RunningBack,
        Position::TightEnd,
        Position::Kicker,
        Position::Defense,
    ];

    /// Parse a Yahoo position string.
    ///
    /// Handles Yahoo's abbreviations:
    /// - "DEF" / "D/ST" / "DST" -> Defense
    /// - "W/R/T" / "FLEX" -> Flex
    /// - "BN" / "BE" -> Bench
    /// - "IR" / "IR+" / "NA" -> InjuredReserve
    ///
    /// Multi-position strings such as "WR,TE" resolve to their first entry.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        let first = s.split(',').next().unwrap_or("").trim();
        match first.to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "DEF" | "D/ST" | "DST" => Some(Position::Defense),
            "W/R/T" | "FLEX" => Some(Position::Flex),
            "BN" | "BE" => Some(Position::Bench),
            "IR" | "IR+" | "NA" => Some(Position::InjuredReserve),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
            Position::Flex => "W/R/T",
            Position::Bench => "BN",
            Position::InjuredReserve => "IR",
        }
    }

    /// Whether this is a designation rather than a playing position.
    pub fn is_meta_slot(&self) -> bool {
        matches!(
            self,
            Position::Flex | Position::Bench | Position::InjuredReserve
        )
    }

    /// Whether a player whose natural position is `self` may fill a Flex slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(
            self,
            Position::RunningBack | Position::WideReceiver | Position::TightEnd
        )
    }

    /// Deterministic ordering index for lineup display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Quarterback => 0,
            Position::WideReceiver => 1,
            Position::RunningBack => 2,
            Position::TightEnd => 3,
            Position::Flex => 4,
            Position::Kicker => 5,
            Position::Defense => 6,
            Position::Bench => 7,
            Position::InjuredReserve => 8,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}
