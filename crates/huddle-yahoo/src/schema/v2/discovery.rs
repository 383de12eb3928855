// game/{code} and users;use_login=1/games;game_keys={key}/leagues

use huddle_core::{GameInfo, LeagueSummary};
use serde_json::Value;

use super::resource;
use crate::error::ApiError;

/// The current game (sport-season) for a game code such as "nfl".
pub fn parse_game(root: &Value) -> Result<GameInfo, ApiError> {
    let game = resource(root, "game", "game")?.index(0)?;
    Ok(GameInfo {
        game_key: game.key("game_key")?.as_str()?.to_string(),
        code: game.key("code")?.as_str()?.to_string(),
        season: game.key("season")?.as_str()?.to_string(),
    })
}

/// Leagues of the logged-in user across the requested games.
pub fn parse_user_leagues(root: &Value) -> Result<Vec<LeagueSummary>, ApiError> {
    let games = resource(root, "user_leagues", "users")?
        .key("0")?
        .key("user")?
        .index(1)?
        .key("games")?
        .collection()?;

    let mut leagues = Vec::new();
    for item in &games {
        let game = item.key("game")?;
        // A game the user never played has no leagues element.
        let Ok(holder) = game.index(1) else {
            continue;
        };
        let Some(collection) = holder.opt_key("leagues") else {
            continue;
        };
        for entry in collection.collection()? {
            let league = entry.key("league")?.index(0)?;
            leagues.push(LeagueSummary {
                league_key: league.key("league_key")?.as_str()?.to_string(),
                name: league.key("name")?.as_str()?.to_string(),
                num_teams: league.key("num_teams")?.as_u32()?,
            });
        }
    }
    Ok(leagues)
}
