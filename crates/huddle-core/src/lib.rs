// Domain model and analytics for fantasy football leagues: positions,
// rosters, optimal lineups, starter impact (WAR) and league-wide tables.
// Pure and synchronous; the data comes from huddle-yahoo.

pub mod analytics;
pub mod impact;
pub mod league;
pub mod lineup;
pub mod matchup;
pub mod position;
pub mod roster;

pub use impact::{ImpactLedger, ImpactRecord};
pub use league::{DraftPick, GameInfo, LeagueMeta, LeagueSummary, TeamInfo, TeamStanding};
pub use lineup::{actual_lineup, optimal_lineup, ActualLineup, OptimalLineup};
pub use matchup::{Outcome, TeamScore, WeeklyMatchupResult};
pub use position::Position;
pub use roster::{RosterEntry, SlotConfigError, SlotRequirements};
