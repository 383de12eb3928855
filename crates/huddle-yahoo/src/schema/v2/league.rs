// league/{key}, league/{key}/standings, league/{key}/teams and
// league/{key}/draftresults.

use huddle_core::{DraftPick, LeagueMeta, TeamInfo, TeamStanding};
use serde_json::Value;

use super::{part, resource, team_info};
use crate::error::ApiError;
use crate::schema::Node;

/// `league[0]` metadata object.
fn meta_object<'a>(root: &'a Value, payload: &'static str) -> Result<Node<'a>, ApiError> {
    resource(root, payload, "league")?.index(0)
}

/// `league[1]`, where sub-resources live.
fn sub_resource<'a>(
    root: &'a Value,
    payload: &'static str,
    key: &str,
) -> Result<Node<'a>, ApiError> {
    resource(root, payload, "league")?.index(1)?.key(key)
}

pub fn parse_league_meta(root: &Value) -> Result<LeagueMeta, ApiError> {
    let league = meta_object(root, "league")?;
    parse_meta_fields(&league)
}

pub(crate) fn parse_meta_fields(league: &Node<'_>) -> Result<LeagueMeta, ApiError> {
    let start_week = match league.opt_key("start_week") {
        Some(n) => n.as_u32()?,
        None => 1,
    };
    let current_week = league.key("current_week")?.as_u32()?;
    Ok(LeagueMeta {
        league_key: league.key("league_key")?.as_str()?.to_string(),
        name: league.key("name")?.as_str()?.to_string(),
        num_teams: league.key("num_teams")?.as_u32()?,
        current_week,
        start_week,
        end_week: match league.opt_key("end_week") {
            Some(n) => n.as_u32()?,
            None => current_week,
        },
        season: match league.opt_key("season") {
            Some(n) => n.as_str()?.to_string(),
            None => String::new(),
        },
        is_finished: match league.opt_key("is_finished") {
            Some(n) => n.as_bool()?,
            None => false,
        },
    })
}

pub fn parse_standings(root: &Value) -> Result<Vec<TeamStanding>, ApiError> {
    let teams = sub_resource(root, "standings", "standings")?
        .index(0)?
        .key("teams")?
        .collection()?;

    teams
        .iter()
        .map(|item| {
            let team = item.key("team")?;
            let meta = team.index(0)?;
            let info = team_info(&meta)?;
            let stats = part(&team, "team_standings")?;
            let totals = stats.key("outcome_totals")?;

            Ok(TeamStanding {
                // Yahoo sends an empty rank before week 1.
                rank: stats
                    .opt_key("rank")
                    .and_then(|r| r.as_u32().ok())
                    .unwrap_or(0),
                team_key: info.team_key,
                team: info.name,
                manager: info.manager,
                wins: totals.key("wins")?.as_u32()?,
                losses: totals.key("losses")?.as_u32()?,
                ties: match totals.opt_key("ties") {
                    Some(n) => n.as_u32()?,
                    None => 0,
                },
                points_for: stats.key("points_for")?.as_f64()?,
                points_against: match stats.opt_key("points_against") {
                    Some(n) => n.as_f64()?,
                    None => 0.0,
                },
                logo_url: logo_url(&meta),
            })
        })
        .collect()
}

fn logo_url(meta: &Node<'_>) -> Option<String> {
    let logos = meta.meta("team_logos")?;
    let url = logos.index(0).ok()?.key("team_logo").ok()?.opt_key("url")?;
    url.as_str().ok().map(str::to_string)
}

pub fn parse_teams(root: &Value) -> Result<Vec<TeamInfo>, ApiError> {
    sub_resource(root, "teams", "teams")?
        .collection()?
        .iter()
        .map(|item| team_info(&item.key("team")?.index(0)?))
        .collect()
}

pub fn parse_draft_results(root: &Value) -> Result<Vec<DraftPick>, ApiError> {
    sub_resource(root, "draftresults", "draft_results")?
        .collection()?
        .iter()
        .map(|item| {
            let pick = item.key("draft_result")?;
            Ok(DraftPick {
                pick: pick.key("pick")?.as_u32()?,
                round: pick.key("round")?.as_u32()?,
                team_key: pick.key("team_key")?.as_str()?.to_string(),
                // Absent for picks not yet made.
                player_key: pick
                    .opt_key("player_key")
                    .and_then(|p| p.as_str().ok())
                    .map(str::to_string),
            })
        })
        .collect()
}
