// CSV export of every dashboard table (`huddle export --out <dir>`) and of
// the draft board (`huddle draft --out <file>`).

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::dashboard::Dashboard;
use crate::draft::DraftRow;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    Dir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Row shapes that differ from the in-memory types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct MatchupRow<'a> {
    week: u32,
    team: &'a str,
    score: f64,
    opponent: &'a str,
    opponent_score: f64,
    result: &'static str,
}

#[derive(Debug, Serialize)]
struct ImpactRow<'a> {
    player: &'a str,
    position: &'static str,
    team: &'a str,
    weeks_started: u32,
    starter_points: f64,
    value_over_bench: f64,
    war: u32,
}

#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    record: &'static str,
    team: &'a str,
    opponent: &'a str,
    week: u32,
    score: f64,
    opponent_score: f64,
    margin: f64,
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_rows<W: Write, T: Serialize>(
    writer: W,
    rows: impl IntoIterator<Item = T>,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_matchups<W: Write>(writer: W, dash: &Dashboard) -> Result<(), csv::Error> {
    write_rows(
        writer,
        dash.matchups.iter().map(|m| MatchupRow {
            week: m.week,
            team: &m.team,
            score: m.score,
            opponent: &m.opponent,
            opponent_score: m.opponent_score,
            result: m.result.letter(),
        }),
    )
}

pub fn write_impact<W: Write>(writer: W, dash: &Dashboard) -> Result<(), csv::Error> {
    write_rows(
        writer,
        dash.impact.iter().map(|r| ImpactRow {
            player: &r.name,
            position: r.position.display_str(),
            team: &r.team,
            weeks_started: r.weeks_started,
            starter_points: r.starter_points,
            value_over_bench: r.value_over_bench,
            war: r.war,
        }),
    )
}

pub fn write_records<W: Write>(writer: W, dash: &Dashboard) -> Result<(), csv::Error> {
    let r = &dash.records;
    let named = [
        ("season_high", &r.season_high),
        ("season_low", &r.season_low),
        ("heartbreak", &r.heartbreak),
        ("blowout", &r.blowout),
        ("narrowest_win", &r.narrowest_win),
    ];
    write_rows(
        writer,
        named.into_iter().filter_map(|(record, s)| {
            let s = s.as_ref()?;
            Some(RecordRow {
                record,
                team: &s.team,
                opponent: &s.opponent,
                week: s.week,
                score: s.score,
                opponent_score: s.opponent_score,
                margin: s.margin(),
            })
        }),
    )
}

/// Matrix with a header row of team names; cells read row vs. column.
pub fn write_head_to_head<W: Write>(writer: W, dash: &Dashboard) -> Result<(), csv::Error> {
    let h2h = &dash.head_to_head;
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec!["team".to_string()];
    header.extend(h2h.teams.iter().cloned());
    wtr.write_record(&header)?;
    for (row, team) in h2h.teams.iter().enumerate() {
        let mut record = vec![team.clone()];
        record.extend((0..h2h.teams.len()).map(|col| h2h.cell_label(row, col)));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_draft<W: Write>(writer: W, rows: &[DraftRow]) -> Result<(), csv::Error> {
    write_rows(writer, rows)
}

/// Write the draft board to `path`, creating its parent directory.
pub fn export_draft(rows: &[DraftRow], path: &Path) -> Result<(), ExportError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ExportError::Dir {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    let file = std::fs::File::create(path).map_err(|e| ExportError::Csv {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    write_draft(file, rows).map_err(|e| ExportError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), picks = rows.len(), "exported draft board");
    Ok(())
}

/// Write every table into `dir`. Returns the files written.
pub fn export_dashboard(dash: &Dashboard, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Dir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    type TableWriter = fn(std::fs::File, &Dashboard) -> Result<(), csv::Error>;
    let tables: [(&str, TableWriter); 8] = [
        ("standings.csv", |w, d| write_rows(w, &d.standings)),
        ("luck.csv", |w, d| write_rows(w, &d.luck)),
        ("power.csv", |w, d| write_rows(w, &d.power)),
        ("efficiency.csv", |w, d| write_rows(w, &d.efficiency)),
        ("matchups.csv", write_matchups),
        ("impact.csv", write_impact),
        ("records.csv", write_records),
        ("head_to_head.csv", write_head_to_head),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (name, write) in tables {
        let path = dir.join(name);
        let file = std::fs::File::create(&path).map_err(|e| ExportError::Csv {
            path: path.clone(),
            source: e.into(),
        })?;
        write(file, dash).map_err(|e| ExportError::Csv {
            path: path.clone(),
            source: e,
        })?;
        written.push(path);
    }
    info!(dir = %dir.display(), files = written.len(), "exported dashboard");
    Ok(written)
}
