use crate::dates::parse_entry_date;
use crate::errors::AppError;
use crate::models::{EnergyEntry, EntriesFile};
use std::{fs, io::ErrorKind, path::Path};
use tracing::{info, warn};

/// Reads an entries export. A missing file is an empty history; records the
/// analytics cannot use (score outside 1-5, unreadable date) are skipped.
pub fn load_entries(path: &Path) -> Result<Vec<EnergyEntry>, AppError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no entries file, starting from an empty history");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(AppError::bad_request(format!(
                "failed to read entries file {}: {err}",
                path.display()
            )));
        }
    };

    let file: EntriesFile = serde_json::from_slice(&bytes).map_err(|err| {
        AppError::bad_request(format!("failed to parse entries file {}: {err}", path.display()))
    })?;
    let entries = sanitize(file.into_entries());
    info!(path = %path.display(), entries = entries.len(), "loaded entries");
    Ok(entries)
}

fn sanitize(entries: Vec<EnergyEntry>) -> Vec<EnergyEntry> {
    let before = entries.len();
    let kept: Vec<EnergyEntry> = entries
        .into_iter()
        .filter(|entry| {
            let valid = (1..=5).contains(&entry.score) && parse_entry_date(&entry.date).is_some();
            if !valid {
                warn!(date = %entry.date, score = entry.score, "skipping invalid entry");
            }
            valid
        })
        .collect();
    if kept.len() != before {
        warn!(skipped = before - kept.len(), "some entries were skipped");
    }
    kept
}
