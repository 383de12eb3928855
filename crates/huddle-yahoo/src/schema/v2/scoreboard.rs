// league/{key}/scoreboard;week={n}

use huddle_core::{TeamScore, WeeklyMatchupResult};
use serde_json::Value;

use super::{part, resource, team_info};
use crate::error::ApiError;
use crate::schema::Node;

/// Both sides of every matchup in the week, two rows per game.
pub fn parse_scoreboard(root: &Value, week: u32) -> Result<Vec<WeeklyMatchupResult>, ApiError> {
    let matchups = resource(root, "scoreboard", "league")?
        .index(1)?
        .key("scoreboard")?
        .key("0")?
        .key("matchups")?
        .collection()?;

    let mut results = Vec::with_capacity(matchups.len() * 2);
    for item in &matchups {
        let teams = item.key("matchup")?.key("0")?.key("teams")?;
        let sides = teams.collection()?;
        let [a, b] = sides.as_slice() else {
            return Err(teams.shape_error("exactly two teams"));
        };
        results.extend(WeeklyMatchupResult::pair(week, &team_score(a)?, &team_score(b)?));
    }
    Ok(results)
}

fn team_score(item: &Node<'_>) -> Result<TeamScore, ApiError> {
    let team = item.key("team")?;
    let info = team_info(&team.index(0)?)?;
    let points = part(&team, "team_points")?.key("total")?.as_f64()?;
    Ok(TeamScore {
        team_key: info.team_key,
        name: info.name,
        points,
    })
}
