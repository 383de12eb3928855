// Luck index: actual record vs. the record a team would have if it played
// every other team every week ("all-play").

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::league::TeamStanding;
use crate::matchup::WeeklyMatchupResult;

/// All-play record for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllPlayRecord {
    pub team_key: String,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
}

impl AllPlayRecord {
    /// wins / (wins + losses); 0.0 with no games.
    pub fn pct(&self) -> f64 {
        let games = self.wins + self.losses;
        if games == 0 {
            0.0
        } else {
            self.wins as f64 / games as f64
        }
    }
}

/// One row of the luck table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuckRow {
    pub team_key: String,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub all_play_wins: u32,
    pub all_play_losses: u32,
    pub all_play_pct: f64,
    pub real_pct: f64,
    /// real_pct - all_play_pct. Positive means winning more than the points
    /// suggest.
    pub luck: f64,
}

/// Compute all-play records, ordered by team key.
///
/// Each week, a team collects a win for every team that scored strictly
/// less and a loss for every team that scored strictly more. Equal scores
/// count as neither.
pub fn all_play_records(matchups: &[WeeklyMatchupResult]) -> Vec<AllPlayRecord> {
    let mut by_week: BTreeMap<u32, Vec<&WeeklyMatchupResult>> = BTreeMap::new();
    for m in matchups {
        by_week.entry(m.week).or_default().push(m);
    }

    let mut records: BTreeMap<&str, AllPlayRecord> = BTreeMap::new();
    for week_rows in by_week.values() {
        for row in week_rows {
            let wins = week_rows.iter().filter(|o| o.score < row.score).count() as u32;
            let losses = week_rows.iter().filter(|o| o.score > row.score).count() as u32;
            let rec = records
                .entry(row.team_key.as_str())
                .or_insert_with(|| AllPlayRecord {
                    team_key: row.team_key.clone(),
                    team: row.team.clone(),
                    wins: 0,
                    losses: 0,
                });
            rec.wins += wins;
            rec.losses += losses;
        }
    }
    records.into_values().collect()
}

/// Join standings with all-play records and rank by luck, unluckiest first.
///
/// Teams missing from either side are left out.
pub fn luck_index(standings: &[TeamStanding], matchups: &[WeeklyMatchupResult]) -> Vec<LuckRow> {
    let all_play: HashMap<String, AllPlayRecord> = all_play_records(matchups)
        .into_iter()
        .map(|r| (r.team_key.clone(), r))
        .collect();

    let mut rows: Vec<LuckRow> = standings
        .iter()
        .filter_map(|s| {
            let ap = all_play.get(&s.team_key)?;
            let all_play_pct = ap.pct();
            let real_pct = s.win_pct();
            Some(LuckRow {
                team_key: s.team_key.clone(),
                team: s.team.clone(),
                wins: s.wins,
                losses: s.losses,
                all_play_wins: ap.wins,
                all_play_losses: ap.losses,
                all_play_pct,
                real_pct,
                luck: real_pct - all_play_pct,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.luck
            .partial_cmp(&b.luck)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

/// (luckiest, unluckiest) from a table sorted by `luck_index`.
pub fn extremes(rows: &[LuckRow]) -> Option<(&LuckRow, &LuckRow)> {
    Some((rows.last()?, rows.first()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::two_week_league;

    fn standing(key: &str, wins: u32, losses: u32) -> TeamStanding {
        TeamStanding {
            rank: 0,
            team_key: key.to_string(),
            team: key.to_uppercase(),
            manager: None,
            wins,
            losses,
            ties: 0,
            points_for: 0.0,
            points_against: 0.0,
            logo_url: None,
        }
    }

    fn standings() -> Vec<TeamStanding> {
        vec![
            standing("a", 1, 1),
            standing("b", 1, 1),
            standing("c", 2, 0),
            standing("d", 0, 2),
        ]
    }

    #[test]
    fn all_play_counts() {
        let records = all_play_records(&two_week_league());
        let summary: Vec<(&str, u32, u32)> = records
            .iter()
            .map(|r| (r.team_key.as_str(), r.wins, r.losses))
            .collect();
        assert_eq!(
            summary,
            vec![("a", 4, 2), ("b", 5, 1), ("c", 3, 3), ("d", 0, 6)]
        );
    }

    #[test]
    fn all_play_ignores_equal_scores() {
        use crate::analytics::fixtures::score;
        let rows = WeeklyMatchupResult::pair(1, &score("a", 100.0), &score("b", 100.0));
        let records = all_play_records(&rows);
        assert!(records.iter().all(|r| r.wins == 0 && r.losses == 0));
        assert_eq!(records[0].pct(), 0.0);
    }

    #[test]
    fn luck_index_sorted_unluckiest_first() {
        let rows = luck_index(&standings(), &two_week_league());
        let order: Vec<&str> = rows.iter().map(|r| r.team_key.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "d", "c"]);

        let c = rows.iter().find(|r| r.team_key == "c").unwrap();
        assert!((c.luck - 0.5).abs() < 1e-9);
        let b = rows.iter().find(|r| r.team_key == "b").unwrap();
        assert!((b.all_play_pct - 5.0 / 6.0).abs() < 1e-9);
        assert!((b.luck - (0.5 - 5.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn luck_index_drops_teams_without_matchups() {
        let mut s = standings();
        s.push(standing("e", 0, 0));
        let rows = luck_index(&s, &two_week_league());
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.team_key != "e"));
    }

    #[test]
    fn extremes_reports_luckiest_and_unluckiest() {
        let rows = luck_index(&standings(), &two_week_league());
        let (lucky, unlucky) = extremes(&rows).unwrap();
        assert_eq!(lucky.team_key, "c");
        assert_eq!(unlucky.team_key, "b");
        assert!(extremes(&[]).is_none());
    }
}
