// Parsers for fantasy/v2 JSON payloads, one module per resource.
//
// Every parser starts at `fantasy_content` and fails with
// `ApiError::UnexpectedShape` naming the first path that does not match.

pub mod discovery;
pub mod league;
pub mod roster;
pub mod scoreboard;

use huddle_core::TeamInfo;
use serde_json::Value;

use super::Node;
use crate::error::ApiError;

/// `fantasy_content.<resource>` of a response.
pub(crate) fn resource<'a>(
    root: &'a Value,
    payload: &'static str,
    resource: &str,
) -> Result<Node<'a>, ApiError> {
    Node::root(root, payload).key("fantasy_content")?.key(resource)
}

/// First element of a resource array that is an object containing `key`.
///
/// Yahoo appends sub-resources (points, standings, roster) after the
/// metadata list, and their position shifts with the request.
pub(crate) fn part<'a>(node: &Node<'a>, key: &str) -> Result<Node<'a>, ApiError> {
    let arr = node
        .value()
        .as_array()
        .ok_or_else(|| node.shape_error("a resource array"))?;
    for i in 1..arr.len() {
        if let Some(found) = node.index(i)?.opt_key(key) {
            return Ok(found);
        }
    }
    Err(node.shape_error_at(&format!("[*].{key}"), "a sub-resource"))
}

/// Team identity from a team metadata list (`team[0]`).
pub(crate) fn team_info(meta: &Node<'_>) -> Result<TeamInfo, ApiError> {
    Ok(TeamInfo {
        team_key: meta.require_meta("team_key")?.as_str()?.to_string(),
        name: meta.require_meta("name")?.as_str()?.to_string(),
        manager: manager_nickname(meta),
    })
}

fn manager_nickname(meta: &Node<'_>) -> Option<String> {
    let managers = meta.meta("managers")?;
    let first = managers.index(0).ok()?;
    first
        .key("manager")
        .ok()?
        .opt_key("nickname")?
        .as_str()
        .ok()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn part_finds_later_element() {
        let v = json!([[{"team_key": "t.1"}], {"team_points": {"total": "1"}}, {"team_standings": {}}]);
        let node = Node::root(&v, "team");
        assert_eq!(part(&node, "team_standings").unwrap().path(), "$[2].team_standings");
        let err = part(&node, "roster").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected team payload: expected a sub-resource at `$[*].roster`"
        );
    }

    #[test]
    fn team_info_reads_manager() {
        let v = json!([
            {"team_key": "461.l.1.t.3"},
            {"team_id": "3"},
            {"name": "Gridiron Gang"},
            [],
            {"managers": [{"manager": {"manager_id": "3", "nickname": "Sam"}}]}
        ]);
        let info = team_info(&Node::root(&v, "team")).unwrap();
        assert_eq!(info.team_key, "461.l.1.t.3");
        assert_eq!(info.name, "Gridiron Gang");
        assert_eq!(info.manager.as_deref(), Some("Sam"));
    }
}
