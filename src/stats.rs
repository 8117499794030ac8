//! Per-run counters. Created fresh by the driver, mutated as jurisdictions are
//! processed, and handed to [`crate::report`] once at the end.

use crate::period::Period;
use crate::reader::Diagnostic;
use crate::sink::Aggregation;
use std::path::PathBuf;

/// Why a jurisdiction contributed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoDataReason {
    /// No `<period>.jsonl` in the jurisdiction directory.
    FileMissing,
    /// The file exists but every line was skipped (or it was empty).
    NoValidRecords,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JurisdictionCount {
    pub jurisdiction: String,
    pub records: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    /// `None` for the unified file.
    pub jurisdiction: Option<String>,
    pub bytes: u64,
}

#[derive(Clone, Debug)]
pub struct WriteFailure {
    pub jurisdiction: String,
    pub path: PathBuf,
    pub error: String,
}

#[derive(Clone, Debug)]
pub struct RunStats {
    pub period: Period,
    pub aggregation: Aggregation,
    pub output_dir: PathBuf,
    /// Jurisdictions found under the input root, before any limit.
    pub discovered: usize,
    /// Jurisdictions actually visited (after the limit).
    pub selected: usize,
    /// Processing order, i.e. lexicographic.
    pub with_data: Vec<JurisdictionCount>,
    pub without_data: Vec<(String, NoDataReason)>,
    /// File-level read errors, one per jurisdiction.
    pub failed: Vec<Diagnostic>,
    /// Line-level diagnostics across all jurisdictions.
    pub skipped_lines: Vec<Diagnostic>,
    pub outputs: Vec<OutputFile>,
    pub write_failures: Vec<WriteFailure>,
    pub manifest: Option<PathBuf>,
}

impl RunStats {
    pub fn new(period: Period, aggregation: Aggregation, output_dir: PathBuf) -> Self {
        Self {
            period,
            aggregation,
            output_dir,
            discovered: 0,
            selected: 0,
            with_data: Vec::new(),
            without_data: Vec::new(),
            failed: Vec::new(),
            skipped_lines: Vec::new(),
            outputs: Vec::new(),
            write_failures: Vec::new(),
            manifest: None,
        }
    }

    pub fn record_with_data(&mut self, jurisdiction: &str, records: usize) {
        self.with_data.push(JurisdictionCount { jurisdiction: jurisdiction.to_string(), records });
    }

    pub fn record_without_data(&mut self, jurisdiction: &str, reason: NoDataReason) {
        self.without_data.push((jurisdiction.to_string(), reason));
    }

    pub fn record_output(&mut self, path: PathBuf, jurisdiction: Option<&str>, bytes: u64) {
        self.outputs.push(OutputFile { path, jurisdiction: jurisdiction.map(str::to_string), bytes });
    }

    pub fn total_records(&self) -> usize {
        self.with_data.iter().map(|c| c.records).sum()
    }

    pub fn total_output_bytes(&self) -> u64 {
        self.outputs.iter().map(|o| o.bytes).sum()
    }

    pub fn records_for(&self, jurisdiction: &str) -> Option<usize> {
        self.with_data.iter().find(|c| c.jurisdiction == jurisdiction).map(|c| c.records)
    }

    /// True when every output that should exist was written.
    pub fn is_complete(&self) -> bool {
        self.write_failures.is_empty()
    }
}
