// League-level records: metadata, standings rows, draft picks.

use serde::{Deserialize, Serialize};

/// League metadata from the `league/{key}` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueMeta {
    pub league_key: String,
    pub name: String,
    pub num_teams: u32,
    pub current_week: u32,
    pub start_week: u32,
    pub end_week: u32,
    pub season: String,
    pub is_finished: bool,
}

impl LeagueMeta {
    /// Last week with final scores.
    ///
    /// While the season is running the current week is still in progress,
    /// so analysis stops one week earlier (never before `start_week`).
    pub fn last_completed_week(&self) -> u32 {
        if self.is_finished {
            self.end_week.max(self.start_week)
        } else {
            self.current_week.saturating_sub(1).max(self.start_week)
        }
    }
}

/// One row of the league standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub rank: u32,
    pub team_key: String,
    pub team: String,
    pub manager: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub logo_url: Option<String>,
}

impl TeamStanding {
    /// Real win percentage, W / (W + L). Ties are ignored; 0.0 with no games.
    pub fn win_pct(&self) -> f64 {
        let games = self.wins + self.losses;
        if games == 0 {
            0.0
        } else {
            self.wins as f64 / games as f64
        }
    }

    /// Record formatted as "W-L-T".
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// A team as listed by the `league/{key}/teams` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_key: String,
    pub name: String,
    pub manager: Option<String>,
}

/// One pick from `league/{key}/draftresults`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    pub pick: u32,
    pub round: u32,
    pub team_key: String,
    /// Empty for picks that have not been made yet.
    pub player_key: Option<String>,
}

/// A league the logged-in user belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub league_key: String,
    pub name: String,
    pub num_teams: u32,
}

/// A Yahoo "game" (one sport-season), e.g. nfl 2025 = game key 461.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_key: String,
    pub code: String,
    pub season: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current: u32, finished: bool) -> LeagueMeta {
        LeagueMeta {
            league_key: "461.l.1".into(),
            name: "Test".into(),
            num_teams: 10,
            current_week: current,
            start_week: 1,
            end_week: 17,
            season: "2025".into(),
            is_finished: finished,
        }
    }

    #[test]
    fn last_completed_week_in_season() {
        assert_eq!(meta(7, false).last_completed_week(), 6);
    }

    #[test]
    fn last_completed_week_never_below_start() {
        assert_eq!(meta(1, false).last_completed_week(), 1);
        assert_eq!(meta(0, false).last_completed_week(), 1);
    }

    #[test]
    fn last_completed_week_finished_season() {
        assert_eq!(meta(17, true).last_completed_week(), 17);
    }

    #[test]
    fn win_pct_ignores_ties() {
        let s = TeamStanding {
            rank: 1,
            team_key: "t".into(),
            team: "T".into(),
            manager: None,
            wins: 3,
            losses: 1,
            ties: 1,
            points_for: 0.0,
            points_against: 0.0,
            logo_url: None,
        };
        assert!((s.win_pct() - 0.75).abs() < 1e-9);
        assert_eq!(s.record(), "3-1-1");
    }

    #[test]
    fn win_pct_no_games_is_zero() {
        let s = TeamStanding {
            rank: 1,
            team_key: "t".into(),
            team: "T".into(),
            manager: None,
            wins: 0,
            losses: 0,
            ties: 0,
            points_for: 0.0,
            points_against: 0.0,
            logo_url: None,
        };
        assert_eq!(s.win_pct(), 0.0);
    }
}
