// team/{team_key}/roster;week={n}/players/stats

use huddle_core::{Position, RosterEntry};
use serde_json::Value;
use tracing::warn;

use super::{part, resource};
use crate::error::ApiError;
use crate::schema::Node;

/// Every rostered player with slot and weekly points.
///
/// Players whose position or slot is not a football position this crate
/// models (IDP leagues, superflex slots), or whose point total is not a
/// number, are skipped with a warning rather than failing the whole team.
pub fn parse_roster(root: &Value) -> Result<Vec<RosterEntry>, ApiError> {
    let players = resource(root, "roster", "team")?
        .index(1)?
        .key("roster")?
        .key("0")?
        .key("players")?
        .collection()?;

    let mut entries = Vec::with_capacity(players.len());
    for item in &players {
        if let Some(entry) = parse_player(&item.key("player")?)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn parse_player(player: &Node<'_>) -> Result<Option<RosterEntry>, ApiError> {
    let meta = player.index(0)?;
    let player_key = meta.require_meta("player_key")?.as_str()?.to_string();
    let name = meta.require_meta("name")?.key("full")?.as_str()?.to_string();

    let natural = match meta.meta("primary_position") {
        Some(p) => p,
        None => meta.require_meta("display_position")?,
    }
    .as_str()?;
    let selected = part(player, "selected_position")?.require_meta("position")?.as_str()?;
    let points = match part(player, "player_points")?.key("total")?.as_f64() {
        Ok(points) => points,
        Err(err) => {
            warn!(player = %player_key, error = %err, "skipping player with unreadable points");
            return Ok(None);
        }
    };

    let position = Position::from_str_pos(natural).filter(|p| !p.is_meta_slot());
    let slot = Position::from_str_pos(selected);
    match (position, slot) {
        (Some(position), Some(slot)) => Ok(Some(RosterEntry {
            player_key,
            name,
            position,
            slot,
            points,
        })),
        _ => {
            warn!(player = %player_key, natural, selected, "skipping player with unsupported position");
            Ok(None)
        }
    }
}
