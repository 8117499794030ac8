//! Input discovery and output naming for the `<root>/<jurisdiction>/<period>.jsonl` layout.

use crate::period::Period;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Subdirectories of the input root that never hold jurisdiction data.
pub const DEFAULT_RESERVED_DIRS: &[&str] = &["plots"];

/// List immediate subdirectories of `input_root` (symlinked directories included),
/// skipping `reserved` names, sorted ascending. `limit` keeps the first N after sorting.
pub fn discover_jurisdictions(input_root: &Path, reserved: &[String], limit: Option<usize>) -> Result<Vec<String>> {
    if !input_root.is_dir() {
        bail!("input root {} is not a directory", input_root.display());
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(input_root).min_depth(1).max_depth(1).follow_links(true) {
        let ent = match entry {
            Ok(ent) => ent,
            Err(e) => {
                tracing::warn!(root=%input_root.display(), error=%e, "skipping unreadable entry");
                continue;
            }
        };
        if !ent.file_type().is_dir() {
            continue;
        }
        let Some(name) = ent.file_name().to_str() else {
            tracing::warn!(path=%ent.path().display(), "skipping non UTF-8 directory name");
            continue;
        };
        if reserved.iter().any(|r| r == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names.sort();

    Ok(select_prefix(names, limit))
}

/// Truncate an already-sorted list to its first `limit` entries.
pub fn select_prefix(mut sorted: Vec<String>, limit: Option<usize>) -> Vec<String> {
    if let Some(n) = limit {
        sorted.truncate(n);
    }
    sorted
}

pub fn source_file(input_root: &Path, jurisdiction: &str, period: &Period) -> PathBuf {
    input_root.join(jurisdiction).join(period.source_file_name())
}

/// `statutes_<period>.jsonl`
pub fn unified_output(output_dir: &Path, period: &Period) -> PathBuf {
    output_dir.join(format!("statutes_{period}.jsonl"))
}

/// `<jurisdiction>_<period>.jsonl`
pub fn partition_output(partition_dir: &Path, jurisdiction: &str, period: &Period) -> PathBuf {
    partition_dir.join(format!("{jurisdiction}_{period}.jsonl"))
}

/// `manifest_<period>.txt`
pub fn manifest_path(partition_dir: &Path, period: &Period) -> PathBuf {
    partition_dir.join(format!("manifest_{period}.txt"))
}
