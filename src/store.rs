use crate::model::{MeetListing, RaceResult};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MEET_LIST_FILE: &str = "meet_list.csv";
pub const MEET_RESULTS_FILE: &str = "meet_results.csv";
pub const CLEANED_RESULTS_FILE: &str = "cleaned_results.csv";
pub const SUMMARY_FILE: &str = "swimmer_event_summary.csv";

pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut rows = Vec::new();
    for (index, record) in reader.deserialize().enumerate() {
        let row = record.with_context(|| format!("bad row {} in {}", index + 1, path.display()))?;
        rows.push(row);
    }
    debug!(file = %path.display(), rows = rows.len(), "loaded csv");
    Ok(rows)
}

pub fn find_meet_lists(dir: &Path) -> Result<Vec<PathBuf>> {
    find_files(dir, "meet*_list.csv")
}

pub fn find_meet_results(dir: &Path) -> Result<Vec<PathBuf>> {
    find_files(dir, "meet*_results.csv")
}

pub fn load_meet_lists(dir: &Path) -> Result<Vec<MeetListing>> {
    combine(&find_meet_lists(dir)?)
}

pub fn load_meet_results(dir: &Path) -> Result<Vec<RaceResult>> {
    combine(&find_meet_results(dir)?)
}

fn combine<T: DeserializeOwned>(paths: &[PathBuf]) -> Result<Vec<T>> {
    let mut combined = Vec::new();
    for path in paths {
        combined.extend(read_rows(path)?);
    }
    Ok(combined)
}

fn find_files(dir: &Path, file_pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{escaped}/{file_pattern}");
    let mut paths = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("invalid glob {pattern}"))? {
        paths.push(entry?);
    }
    paths.sort();
    Ok(paths)
}
