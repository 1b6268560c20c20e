//! Roster import from plain text, one `name[,rating]` per line

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rating assumed for imported lines that carry none
pub const DEFAULT_IMPORT_RATING: u32 = 1500;

/// A parsed roster line, not yet registered in a tournament
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedCompetitor {
    pub name: String,
    pub rating: u32,
}

/// A line that could not be turned into a competitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the source text
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub competitors: Vec<ImportedCompetitor>,
    pub rejected: Vec<RejectedLine>,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no competitors found ({} line(s) rejected)", .rejected.len())]
    NothingImported { rejected: Vec<RejectedLine> },
}

/// Parse a roster. Bad lines are collected and skipped; the import only
/// fails when not a single line yields a competitor.
pub fn parse_roster(text: &str) -> Result<ImportOutcome, ImportError> {
    let mut outcome = ImportOutcome::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(competitor) => outcome.competitors.push(competitor),
            Err(reason) => {
                tracing::warn!(line = index + 1, content = line, %reason, "skipping roster line");
                outcome.rejected.push(RejectedLine {
                    line_number: index + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    if outcome.competitors.is_empty() {
        return Err(ImportError::NothingImported {
            rejected: outcome.rejected,
        });
    }
    Ok(outcome)
}

fn parse_line(line: &str) -> Result<ImportedCompetitor, String> {
    let mut fields = line.split(',').map(str::trim);
    let name = fields.next().unwrap_or_default();
    if name.is_empty() {
        return Err("missing name".to_string());
    }

    let rating = match fields.next() {
        None | Some("") => DEFAULT_IMPORT_RATING,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| format!("invalid rating '{raw}'"))?,
    };

    if let Some(extra) = fields.next() {
        return Err(format!("unexpected field '{extra}'"));
    }

    Ok(ImportedCompetitor {
        name: name.to_string(),
        rating,
    })
}

/// Read and parse a roster file
pub fn import_file(path: &Path) -> Result<ImportOutcome, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_roster(&text)
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod import_tests;
