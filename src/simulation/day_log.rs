//! CSV logs of day results.
//!
//! `day_stats.csv` accumulates every day of every run. `recent_stats.csv`
//! keeps the days of the last few runs, tagged with their run id.

use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::error::Result;
use super::stats::DayResult;

/// File name of the cumulative day log.
pub const DAY_STATS_FILE: &str = "day_stats.csv";
/// File name of the rolling per-run log.
pub const RECENT_STATS_FILE: &str = "recent_stats.csv";
/// Number of runs kept in the rolling log.
pub const RECENT_SIM_LIMIT: usize = 10;

const DAY_HEADER: &str = "day,start_creatures,food_spawned,survivors,died,end_creatures";
const RECENT_HEADER: &str =
    "sim_id,day,start_creatures,food_spawned,survivors,died,end_creatures";

/// Appends day results to a CSV file.
#[derive(Debug, Clone)]
pub struct DayLog {
    path: PathBuf,
}

impl DayLog {
    /// Opens `day_stats.csv` inside `dir`, creating the directory and the
    /// header if needed. An existing file is appended to.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(DAY_STATS_FILE);
        if !path.exists() {
            let mut file = File::create(&path)?;
            writeln!(file, "{DAY_HEADER}")?;
        }
        Ok(Self { path })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row.
    pub fn append(&mut self, result: &DayResult) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(
            file,
            "{},{},{},{},{},{}",
            result.day,
            result.start_creatures,
            result.food_spawned,
            result.survivors,
            result.died,
            result.end_creatures()
        )?;
        Ok(())
    }
}

/// One row of the rolling log.
type RecentRow = (u32, DayResult);

fn parse_recent_row(line: &str) -> Option<RecentRow> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != 7 {
        return None;
    }
    let number = |i: usize| fields[i].trim().parse::<usize>().ok();
    Some((
        fields[0].trim().parse().ok()?,
        DayResult {
            day: fields[1].trim().parse().ok()?,
            start_creatures: number(2)?,
            food_spawned: number(3)?,
            survivors: number(4)?,
            died: number(5)?,
        },
    ))
}

/// Merges a finished run into the rolling log at `path`.
///
/// Rows that cannot be parsed are dropped. Only the `RECENT_SIM_LIMIT`
/// highest run ids are kept, sorted by run id and day.
pub fn write_recent_csv(path: impl AsRef<Path>, sim_id: u32, days: &[DayResult]) -> Result<()> {
    let path = path.as_ref();
    let mut rows: Vec<RecentRow> = Vec::new();

    if path.exists() {
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines().skip(1) {
            if let Some(row) = parse_recent_row(&line?) {
                rows.push(row);
            }
        }
    }
    rows.extend(days.iter().map(|d| (sim_id, *d)));

    let keep: BTreeSet<u32> = rows
        .iter()
        .map(|(id, _)| *id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .take(RECENT_SIM_LIMIT)
        .collect();
    rows.retain(|(id, _)| keep.contains(id));
    rows.sort_by_key(|(id, d)| (*id, d.day));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    writeln!(file, "{RECENT_HEADER}")?;
    for (id, d) in &rows {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            id,
            d.day,
            d.start_creatures,
            d.food_spawned,
            d.survivors,
            d.died,
            d.end_creatures()
        )?;
    }
    Ok(())
}
