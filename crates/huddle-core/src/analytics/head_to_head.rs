// Head-to-head matrix: row team's results against each column team.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::matchup::{Outcome, WeeklyMatchupResult};

/// Results grid, read row vs. column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    /// Team names, sorted.
    pub teams: Vec<String>,
    /// `cells[row][col]`: the row team's results vs. the column team in
    /// week order. Empty when they never met.
    pub cells: Vec<Vec<Vec<Outcome>>>,
}

impl HeadToHead {
    /// Cell text, e.g. "W, L", or "-" when the teams never met.
    pub fn cell_label(&self, row: usize, col: usize) -> String {
        let results = &self.cells[row][col];
        if results.is_empty() {
            "-".to_string()
        } else {
            results
                .iter()
                .map(|o| o.letter())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// (wins, losses, ties) of `row` against `col`.
    pub fn record(&self, row: usize, col: usize) -> (u32, u32, u32) {
        self.cells[row][col]
            .iter()
            .fold((0, 0, 0), |(w, l, t), o| match o {
                Outcome::Win => (w + 1, l, t),
                Outcome::Loss => (w, l + 1, t),
                Outcome::Tie => (w, l, t + 1),
            })
    }

    pub fn index_of(&self, team: &str) -> Option<usize> {
        self.teams.iter().position(|t| t == team)
    }
}

pub fn head_to_head(matchups: &[WeeklyMatchupResult]) -> HeadToHead {
    let mut names: Vec<String> = matchups
        .iter()
        .flat_map(|m| [m.team.clone(), m.opponent.clone()])
        .collect();
    names.sort();
    names.dedup();

    let index: BTreeMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, n)| (n.as_str(), i))
        .collect();

    let n = names.len();
    let mut cells = vec![vec![Vec::new(); n]; n];

    let mut ordered: Vec<&WeeklyMatchupResult> = matchups.iter().collect();
    ordered.sort_by_key(|m| m.week);
    for m in ordered {
        if let (Some(&r), Some(&c)) = (index.get(m.team.as_str()), index.get(m.opponent.as_str())) {
            cells[r][c].push(m.result);
        }
    }

    HeadToHead {
        teams: names,
        cells,
    }
}
