// The league data seam between the analytics pipeline and Yahoo.

use std::sync::Arc;

use async_trait::async_trait;
use huddle_core::{DraftPick, LeagueMeta, RosterEntry, TeamInfo, TeamStanding, WeeklyMatchupResult};

use crate::cache::CacheKey;
use crate::client::YahooClient;
use crate::error::ApiError;
use crate::schema::v2::{league, roster, scoreboard};

/// Everything the season scan and dashboard read about one league.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn league_meta(&self) -> Result<LeagueMeta, ApiError>;

    async fn standings(&self) -> Result<Vec<TeamStanding>, ApiError>;

    async fn teams(&self) -> Result<Vec<TeamInfo>, ApiError>;

    /// Both sides of every matchup in `week`.
    async fn scoreboard(&self, week: u32) -> Result<Vec<WeeklyMatchupResult>, ApiError>;

    /// A team's roster with slots and points for `week`.
    async fn roster(&self, team_key: &str, week: u32) -> Result<Vec<RosterEntry>, ApiError>;

    async fn draft_results(&self) -> Result<Vec<DraftPick>, ApiError>;

    /// Forget cached responses so the next calls hit the network.
    async fn invalidate(&self);
}

/// A Yahoo league addressed by its key, e.g. "461.l.12345".
#[derive(Clone)]
pub struct YahooLeague {
    client: Arc<YahooClient>,
    league_key: String,
}

impl YahooLeague {
    pub fn new(client: Arc<YahooClient>, league_key: impl Into<String>) -> Self {
        Self {
            client,
            league_key: league_key.into(),
        }
    }

    pub fn league_key(&self) -> &str {
        &self.league_key
    }

    fn key(&self, endpoint: &'static str) -> CacheKey {
        CacheKey::new(endpoint, [("league", self.league_key.as_str())])
    }
}

#[async_trait]
impl LeagueSource for YahooLeague {
    async fn league_meta(&self) -> Result<LeagueMeta, ApiError> {
        let path = format!("league/{}", self.league_key);
        let value = self.client.get_json(self.key("league"), &path).await?;
        league::parse_league_meta(&value)
    }

    async fn standings(&self) -> Result<Vec<TeamStanding>, ApiError> {
        let path = format!("league/{}/standings", self.league_key);
        let value = self.client.get_json(self.key("standings"), &path).await?;
        league::parse_standings(&value)
    }

    async fn teams(&self) -> Result<Vec<TeamInfo>, ApiError> {
        let path = format!("league/{}/teams", self.league_key);
        let value = self.client.get_json(self.key("teams"), &path).await?;
        league::parse_teams(&value)
    }

    async fn scoreboard(&self, week: u32) -> Result<Vec<WeeklyMatchupResult>, ApiError> {
        let path = format!("league/{}/scoreboard;week={week}", self.league_key);
        let key = CacheKey::new(
            "scoreboard",
            [("league", self.league_key.clone()), ("week", week.to_string())],
        );
        let value = self.client.get_json(key, &path).await?;
        scoreboard::parse_scoreboard(&value, week)
    }

    async fn roster(&self, team_key: &str, week: u32) -> Result<Vec<RosterEntry>, ApiError> {
        let path = format!("team/{team_key}/roster;week={week}/players/stats");
        let key = CacheKey::new(
            "roster",
            [("team", team_key.to_string()), ("week", week.to_string())],
        );
        let value = self.client.get_json(key, &path).await?;
        roster::parse_roster(&value)
    }

    async fn draft_results(&self) -> Result<Vec<DraftPick>, ApiError> {
        let path = format!("league/{}/draftresults", self.league_key);
        let value = self.client.get_json(self.key("draftresults"), &path).await?;
        league::parse_draft_results(&value)
    }

    async fn invalidate(&self) {
        self.client.clear_cache().await;
    }
}
