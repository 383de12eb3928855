// Season superlatives ("hall of fame / shame").

use serde::{Deserialize, Serialize};

use crate::matchup::{Outcome, WeeklyMatchupResult};

/// One superlative: which team, which week, what number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Superlative {
    pub team: String,
    pub opponent: String,
    pub week: u32,
    pub score: f64,
    pub opponent_score: f64,
}

impl Superlative {
    fn from_row(row: &WeeklyMatchupResult) -> Self {
        Superlative {
            team: row.team.clone(),
            opponent: row.opponent.clone(),
            week: row.week,
            score: row.score,
            opponent_score: row.opponent_score,
        }
    }

    pub fn margin(&self) -> f64 {
        self.score - self.opponent_score
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecords {
    pub season_high: Option<Superlative>,
    pub season_low: Option<Superlative>,
    /// Highest score in a loss.
    pub heartbreak: Option<Superlative>,
    /// Largest winning margin.
    pub blowout: Option<Superlative>,
    /// Smallest positive winning margin.
    pub narrowest_win: Option<Superlative>,
}

/// Compute superlatives. On ties the earliest row wins.
pub fn season_records(matchups: &[WeeklyMatchupResult]) -> SeasonRecords {
    let wins: Vec<&WeeklyMatchupResult> = matchups
        .iter()
        .filter(|m| m.result == Outcome::Win)
        .collect();

    SeasonRecords {
        season_high: first_best(matchups.iter(), |m| m.score),
        season_low: first_best(matchups.iter(), |m| -m.score),
        heartbreak: first_best(
            matchups.iter().filter(|m| m.result == Outcome::Loss),
            |m| m.score,
        ),
        blowout: first_best(wins.iter().copied(), |m| m.margin()),
        narrowest_win: first_best(wins.iter().copied(), |m| -m.margin()),
    }
}

fn first_best<'a, I, F>(rows: I, key: F) -> Option<Superlative>
where
    I: Iterator<Item = &'a WeeklyMatchupResult>,
    F: Fn(&WeeklyMatchupResult) -> f64,
{
    let mut best: Option<(&WeeklyMatchupResult, f64)> = None;
    for row in rows {
        let k = key(row);
        match best {
            Some((_, current)) if k <= current => {}
            _ => best = Some((row, k)),
        }
    }
    best.map(|(row, _)| Superlative::from_row(row))
}
