// Draft board: draft picks joined to team names.

use std::collections::HashMap;

use huddle_core::{DraftPick, TeamInfo};
use huddle_yahoo::{ApiError, LeagueSource};
use serde::Serialize;
use tracing::{info, warn};

/// One pick with its team resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftRow {
    pub round: u32,
    pub pick: u32,
    pub team_key: String,
    /// Team name, or the team key when the team list does not know it.
    pub team: String,
    pub manager: Option<String>,
    /// Empty for picks that have not been made yet.
    pub player_key: Option<String>,
}

/// Join picks to teams, in pick order.
pub fn draft_board(picks: &[DraftPick], teams: &[TeamInfo]) -> Vec<DraftRow> {
    let by_key: HashMap<&str, &TeamInfo> =
        teams.iter().map(|t| (t.team_key.as_str(), t)).collect();

    let mut rows: Vec<DraftRow> = picks
        .iter()
        .map(|p| {
            let team = by_key.get(p.team_key.as_str());
            if team.is_none() {
                warn!(team = %p.team_key, pick = p.pick, "draft pick for unknown team");
            }
            DraftRow {
                round: p.round,
                pick: p.pick,
                team_key: p.team_key.clone(),
                team: team.map_or_else(|| p.team_key.clone(), |t| t.name.clone()),
                manager: team.and_then(|t| t.manager.clone()),
                player_key: p.player_key.clone(),
            }
        })
        .collect();
    rows.sort_by_key(|r| r.pick);
    rows
}

/// Fetch teams and draft results and build the board.
pub async fn load_draft(source: &dyn LeagueSource) -> Result<Vec<DraftRow>, ApiError> {
    let teams = source.teams().await?;
    let picks = source.draft_results().await?;
    info!(teams = teams.len(), picks = picks.len(), "draft results loaded");
    Ok(draft_board(&picks, &teams))
}
