//! Per-jurisdiction source reader. Failures are returned as [`Diagnostic`] values so
//! one bad line (or one bad file) never stops the run.

use crate::ndjson::NdjsonReader;
use crate::normalize::{normalize, Record};
use crate::paths::source_file;
use crate::period::Period;
use serde_json::Value;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// Line did not parse as JSON.
    #[error("invalid JSON on line {line} in {jurisdiction}: {detail}")]
    InvalidJson { jurisdiction: String, line: usize, detail: String },

    /// Line parsed, but to something other than an object.
    #[error("line {line} in {jurisdiction} is a JSON {found}, expected an object")]
    NotAnObject { jurisdiction: String, line: usize, found: &'static str },

    /// The file could not be opened or read to the end.
    #[error("error reading file for {jurisdiction} ({path}): {detail}")]
    ReadFailed { jurisdiction: String, path: String, detail: String },
}

impl Diagnostic {
    pub fn jurisdiction(&self) -> &str {
        match self {
            Diagnostic::InvalidJson { jurisdiction, .. }
            | Diagnostic::NotAnObject { jurisdiction, .. }
            | Diagnostic::ReadFailed { jurisdiction, .. } => jurisdiction,
        }
    }

    /// Line number for line-level diagnostics, `None` for file-level ones.
    pub fn line(&self) -> Option<usize> {
        match self {
            Diagnostic::InvalidJson { line, .. } | Diagnostic::NotAnObject { line, .. } => Some(*line),
            Diagnostic::ReadFailed { .. } => None,
        }
    }

    pub fn is_file_level(&self) -> bool {
        matches!(self, Diagnostic::ReadFailed { .. })
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Result of reading one jurisdiction's source file for a period.
#[derive(Debug, Default)]
pub struct JurisdictionRead {
    pub jurisdiction: String,
    /// Normalized records in source line order.
    pub records: Vec<Record>,
    pub diagnostics: Vec<Diagnostic>,
    /// No `<period>.jsonl` in the jurisdiction directory.
    pub file_missing: bool,
}

impl JurisdictionRead {
    /// The file-level diagnostic, if the file could not be read to the end.
    pub fn read_error(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.is_file_level())
    }

    pub fn line_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_file_level())
    }
}

/// Read and normalize `<input_root>/<jurisdiction>/<period>.jsonl`.
pub fn read_jurisdiction(input_root: &Path, jurisdiction: &str, period: &Period, read_buf_bytes: usize) -> JurisdictionRead {
    let path = source_file(input_root, jurisdiction, period);
    let mut out = JurisdictionRead { jurisdiction: jurisdiction.to_string(), ..Default::default() };

    if !path.exists() {
        out.file_missing = true;
        return out;
    }

    let read_failed = |e: std::io::Error| Diagnostic::ReadFailed {
        jurisdiction: jurisdiction.to_string(),
        path: path.display().to_string(),
        detail: e.to_string(),
    };

    let mut rdr = match NdjsonReader::open(&path, read_buf_bytes) {
        Ok(r) => r,
        Err(e) => {
            out.diagnostics.push(read_failed(e));
            return out;
        }
    };

    let mut buf = String::new();
    loop {
        let line = match rdr.read_line(&mut buf) {
            Ok(Some(n)) => n,
            Ok(None) => break,
            Err(e) => {
                out.diagnostics.push(read_failed(e));
                break;
            }
        };
        match serde_json::from_str::<Value>(&buf) {
            Ok(Value::Object(map)) => out.records.push(normalize(map)),
            Ok(other) => out.diagnostics.push(Diagnostic::NotAnObject {
                jurisdiction: jurisdiction.to_string(),
                line,
                found: json_kind(&other),
            }),
            Err(e) => out.diagnostics.push(Diagnostic::InvalidJson {
                jurisdiction: jurisdiction.to_string(),
                line,
                detail: e.to_string(),
            }),
        }
    }

    out
}
