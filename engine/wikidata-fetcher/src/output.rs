//! Flat-file artifacts: the candidate names list and per-player JSON

use anyhow::{Context, Result};
use career_timeline::CareerRecord;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::CandidatePlayer;

/// File stem derived from a display name: runs of non-word characters
/// become `_`, with leading and trailing `_` removed.
pub fn safe_file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_gap = false;

    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' {
            stem.push(c);
            in_gap = false;
        } else if !in_gap {
            stem.push('_');
            in_gap = true;
        }
    }

    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "unnamed".to_string()
    } else {
        stem.to_string()
    }
}

/// Serialize as JSON with four-space indentation
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).context("Failed to serialize JSON")?;

    String::from_utf8(buf).context("Serialized JSON was not UTF-8")
}

/// Writes per-player career records into one directory
#[derive(Debug, Clone)]
pub struct RecordWriter {
    out_dir: PathBuf,
}

impl RecordWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    /// Target path for a player's record
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{}.json", safe_file_stem(name)))
    }

    /// Write `record`, replacing any previous file for the same name
    pub fn write(&self, record: &CareerRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", self.out_dir))?;

        let path = self.path_for(&record.name);
        let json = to_pretty_json(record)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(path)
    }
}

/// Read player names, one per line, skipping blank lines
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read names from {:?}", path))?;

    Ok(text.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect())
}

/// Write candidate names, one per line, in pool order
pub fn write_names(path: &Path, candidates: &[CandidatePlayer]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let mut text = String::new();
    for candidate in candidates {
        text.push_str(&candidate.name);
        text.push('\n');
    }

    fs::write(path, text).with_context(|| format!("Failed to write names to {:?}", path))
}
