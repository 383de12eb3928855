// Power rankings: average score penalized by week-to-week volatility.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matchup::WeeklyMatchupResult;

/// Weight applied to volatility when computing the power score.
pub const VOLATILITY_PENALTY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRow {
    pub rank: u32,
    pub team_key: String,
    pub team: String,
    pub avg_score: f64,
    /// Sample standard deviation of weekly scores (0.0 with < 2 weeks).
    pub volatility: f64,
    pub min_score: f64,
    pub max_score: f64,
    /// avg_score - VOLATILITY_PENALTY * volatility.
    pub power_score: f64,
}

/// Rank teams by power score, best first.
pub fn power_rankings(matchups: &[WeeklyMatchupResult]) -> Vec<PowerRow> {
    let mut scores: BTreeMap<&str, (&str, Vec<f64>)> = BTreeMap::new();
    for m in matchups {
        scores
            .entry(m.team_key.as_str())
            .or_insert_with(|| (m.team.as_str(), Vec::new()))
            .1
            .push(m.score);
    }

    let mut rows: Vec<PowerRow> = scores
        .into_iter()
        .map(|(key, (name, s))| {
            let avg = mean(&s);
            let vol = sample_std(&s, avg);
            PowerRow {
                rank: 0,
                team_key: key.to_string(),
                team: name.to_string(),
                avg_score: avg,
                volatility: vol,
                min_score: s.iter().copied().fold(f64::INFINITY, f64::min),
                max_score: s.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                power_score: avg - VOLATILITY_PENALTY * vol,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.power_score
            .partial_cmp(&a.power_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    rows
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}
