// In-memory LeagueSource for scan, dashboard and app loop tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use huddle_core::{
    DraftPick, LeagueMeta, Position, RosterEntry, TeamInfo, TeamScore, TeamStanding,
    WeeklyMatchupResult,
};
use huddle_yahoo::{ApiError, LeagueSource};

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Http(u16),
    Shape,
    Auth,
}

impl Failure {
    fn error(self, payload: &'static str) -> ApiError {
        match self {
            Failure::Http(status) => ApiError::Http {
                status,
                endpoint: payload.to_string(),
                body: String::new(),
            },
            Failure::Shape => ApiError::UnexpectedShape {
                payload,
                path: "$.fantasy_content".to_string(),
                expected: "a value",
            },
            Failure::Auth => ApiError::RefreshFailed("token revoked".to_string()),
        }
    }
}

fn entry(key: String, position: Position, slot: Position, points: f64) -> RosterEntry {
    RosterEntry {
        name: key.to_uppercase(),
        player_key: key,
        position,
        slot,
        points,
    }
}

/// A default-lineup roster (QB RB RB WR WR WR TE K DEF) plus a bench QB
/// worth 10 and a bench RB worth 8.
pub fn roster_for(team: &str, qb_points: f64) -> Vec<RosterEntry> {
    use Position::*;
    let mut entries = vec![
        entry(format!("{team}.qb"), Quarterback, Quarterback, qb_points),
        entry(format!("{team}.rb1"), RunningBack, RunningBack, 10.0),
        entry(format!("{team}.rb2"), RunningBack, RunningBack, 10.0),
        entry(format!("{team}.te"), TightEnd, TightEnd, 5.0),
        entry(format!("{team}.k"), Kicker, Kicker, 5.0),
        entry(format!("{team}.def"), Defense, Defense, 5.0),
        entry(format!("{team}.qb2"), Quarterback, Bench, 10.0),
        entry(format!("{team}.rb3"), RunningBack, Bench, 8.0),
    ];
    for i in 1..=3 {
        entries.push(entry(format!("{team}.wr{i}"), WideReceiver, WideReceiver, 10.0));
    }
    entries
}

fn score(key: &str, points: f64) -> TeamScore {
    TeamScore {
        team_key: key.to_string(),
        name: key.to_uppercase(),
        points,
    }
}

fn standing(rank: u32, key: &str, wins: u32, losses: u32, pf: f64, pa: f64) -> TeamStanding {
    TeamStanding {
        rank,
        team_key: key.to_string(),
        team: key.to_uppercase(),
        manager: None,
        wins,
        losses,
        ties: 0,
        points_for: pf,
        points_against: pa,
        logo_url: None,
    }
}

pub struct FakeLeague {
    pub meta: LeagueMeta,
    standings: Vec<TeamStanding>,
    standings_failure: Option<Failure>,
    meta_failure: Option<Failure>,
    scoreboards: HashMap<u32, Vec<WeeklyMatchupResult>>,
    scoreboard_failures: HashMap<u32, Failure>,
    rosters: HashMap<(String, u32), Vec<RosterEntry>>,
    roster_failures: HashMap<(String, u32), Failure>,
    picks: Vec<DraftPick>,
    draft_failure: Option<Failure>,
    calls: Mutex<Vec<String>>,
    invalidations: AtomicUsize,
}

impl FakeLeague {
    /// Four teams, two completed weeks, one draft round (c, a, b, d):
    /// week 1 a 120 - b 100, c 90 - d 80; week 2 c 110 - a 95, b 130 - d 70.
    pub fn two_weeks() -> Self {
        let mut scoreboards = HashMap::new();
        let w1: Vec<WeeklyMatchupResult> = [
            WeeklyMatchupResult::pair(1, &score("a", 120.0), &score("b", 100.0)),
            WeeklyMatchupResult::pair(1, &score("c", 90.0), &score("d", 80.0)),
        ]
        .into_iter()
        .flatten()
        .collect();
        let w2: Vec<WeeklyMatchupResult> = [
            WeeklyMatchupResult::pair(2, &score("c", 110.0), &score("a", 95.0)),
            WeeklyMatchupResult::pair(2, &score("b", 130.0), &score("d", 70.0)),
        ]
        .into_iter()
        .flatten()
        .collect();
        scoreboards.insert(1, w1);
        scoreboards.insert(2, w2);

        let mut rosters = HashMap::new();
        for week in 1..=2 {
            for team in ["a", "b", "c", "d"] {
                let qb = if team == "a" { 35.0 } else { 20.0 };
                rosters.insert((team.to_string(), week), roster_for(team, qb));
            }
        }

        FakeLeague {
            meta: LeagueMeta {
                league_key: "461.l.1".to_string(),
                name: "Test League".to_string(),
                num_teams: 4,
                current_week: 3,
                start_week: 1,
                end_week: 17,
                season: "2025".to_string(),
                is_finished: false,
            },
            standings: vec![
                standing(1, "c", 2, 0, 200.0, 175.0),
                standing(2, "a", 1, 1, 215.0, 210.0),
                standing(3, "b", 1, 1, 230.0, 190.0),
                standing(4, "d", 0, 2, 150.0, 220.0),
            ],
            standings_failure: None,
            meta_failure: None,
            scoreboards,
            scoreboard_failures: HashMap::new(),
            rosters,
            roster_failures: HashMap::new(),
            picks: ["c", "a", "b", "d"]
                .iter()
                .enumerate()
                .map(|(i, team)| DraftPick {
                    pick: i as u32 + 1,
                    round: 1,
                    team_key: team.to_string(),
                    player_key: Some(format!("461.p.{}", 100 + i)),
                })
                .collect(),
            draft_failure: None,
            calls: Mutex::new(Vec::new()),
            invalidations: AtomicUsize::new(0),
        }
    }

    pub fn fail_scoreboard(&mut self, week: u32, failure: Failure) {
        self.scoreboard_failures.insert(week, failure);
    }

    pub fn fail_roster(&mut self, team: &str, week: u32, failure: Failure) {
        self.roster_failures.insert((team.to_string(), week), failure);
    }

    pub fn fail_standings(&mut self, failure: Failure) {
        self.standings_failure = Some(failure);
    }

    pub fn fail_meta(&mut self, failure: Failure) {
        self.meta_failure = Some(failure);
    }

    pub fn fail_draft(&mut self, failure: Failure) {
        self.draft_failure = Some(failure);
    }

    pub fn set_roster(&mut self, team: &str, week: u32, entries: Vec<RosterEntry>) {
        self.rosters.insert((team.to_string(), week), entries);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    fn log(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl LeagueSource for FakeLeague {
    async fn league_meta(&self) -> Result<LeagueMeta, ApiError> {
        self.log("league".to_string());
        match self.meta_failure {
            Some(f) => Err(f.error("league")),
            None => Ok(self.meta.clone()),
        }
    }

    async fn standings(&self) -> Result<Vec<TeamStanding>, ApiError> {
        self.log("standings".to_string());
        match self.standings_failure {
            Some(f) => Err(f.error("standings")),
            None => Ok(self.standings.clone()),
        }
    }

    async fn teams(&self) -> Result<Vec<TeamInfo>, ApiError> {
        self.log("teams".to_string());
        Ok(self
            .standings
            .iter()
            .map(|s| TeamInfo {
                team_key: s.team_key.clone(),
                name: s.team.clone(),
                manager: s.manager.clone(),
            })
            .collect())
    }

    async fn scoreboard(&self, week: u32) -> Result<Vec<WeeklyMatchupResult>, ApiError> {
        self.log(format!("scoreboard {week}"));
        if let Some(f) = self.scoreboard_failures.get(&week) {
            return Err(f.error("scoreboard"));
        }
        Ok(self.scoreboards.get(&week).cloned().unwrap_or_default())
    }

    async fn roster(&self, team_key: &str, week: u32) -> Result<Vec<RosterEntry>, ApiError> {
        self.log(format!("roster {team_key} {week}"));
        let key = (team_key.to_string(), week);
        if let Some(f) = self.roster_failures.get(&key) {
            return Err(f.error("roster"));
        }
        Ok(self.rosters.get(&key).cloned().unwrap_or_default())
    }

    async fn draft_results(&self) -> Result<Vec<DraftPick>, ApiError> {
        self.log("draftresults".to_string());
        match self.draft_failure {
            Some(f) => Err(f.error("draftresults")),
            None => Ok(self.picks.clone()),
        }
    }

    async fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}
