// Weekly head-to-head results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a matchup from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "T")]
    Tie,
}

impl Outcome {
    /// Compare two scores. Exact equality is a tie.
    pub fn from_scores(score: f64, opponent_score: f64) -> Self {
        if score > opponent_score {
            Outcome::Win
        } else if score < opponent_score {
            Outcome::Loss
        } else {
            Outcome::Tie
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Tie => "T",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// A team's score in a matchup, as reported by the scoreboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamScore {
    pub team_key: String,
    pub name: String,
    pub points: f64,
}

/// One side of one week's matchup. The scoreboard yields two of these per
/// game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMatchupResult {
    pub week: u32,
    pub team_key: String,
    pub team: String,
    pub score: f64,
    pub opponent_key: String,
    pub opponent: String,
    pub opponent_score: f64,
    pub result: Outcome,
}

impl WeeklyMatchupResult {
    /// Own score minus opponent score.
    pub fn margin(&self) -> f64 {
        self.score - self.opponent_score
    }

    /// Expand a two-team matchup into one row per side.
    pub fn pair(week: u32, a: &TeamScore, b: &TeamScore) -> [WeeklyMatchupResult; 2] {
        [Self::side(week, a, b), Self::side(week, b, a)]
    }

    fn side(week: u32, own: &TeamScore, opp: &TeamScore) -> WeeklyMatchupResult {
        WeeklyMatchupResult {
            week,
            team_key: own.team_key.clone(),
            team: own.name.clone(),
            score: own.points,
            opponent_key: opp.team_key.clone(),
            opponent: opp.name.clone(),
            opponent_score: opp.points,
            result: Outcome::from_scores(own.points, opp.points),
        }
    }
}
