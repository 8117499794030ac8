//! Aggregation strategies. The driver loop is shared; a [`RecordSink`] decides whether
//! records are buffered until the end (Unified) or flushed per jurisdiction with a
//! manifest written at the end (Partitioned).

use crate::ndjson::NdjsonWriter;
use crate::normalize::Record;
use crate::paths::{manifest_path, partition_output, unified_output};
use crate::period::Period;
use crate::stats::{RunStats, WriteFailure};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Output layout for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregation {
    /// Every jurisdiction concatenated into `statutes_<period>.jsonl`.
    Unified,
    /// `<jurisdiction>_<period>.jsonl` per jurisdiction plus `manifest_<period>.txt`.
    Partitioned,
}

pub(crate) trait RecordSink {
    /// Take one jurisdiction's non-empty record set, in processing order.
    /// Returns false when the records were dropped (a recorded write failure).
    fn accept(&mut self, jurisdiction: &str, records: Vec<Record>, stats: &mut RunStats) -> Result<bool>;
    /// Flush whatever is pending once every jurisdiction has been seen.
    fn finish(self: Box<Self>, stats: &mut RunStats) -> Result<()>;
}

pub(crate) fn make_sink(aggregation: Aggregation, out_dir: &Path, period: &Period, write_buf: usize) -> Box<dyn RecordSink> {
    match aggregation {
        Aggregation::Unified => Box::new(UnifiedSink {
            out_path: unified_output(out_dir, period),
            records: Vec::new(),
            write_buf,
        }),
        Aggregation::Partitioned => Box::new(PartitionedSink {
            dir: out_dir.to_path_buf(),
            period: period.clone(),
            written: Vec::new(),
            write_buf,
        }),
    }
}

fn write_records(path: &Path, records: &[Record], write_buf: usize) -> Result<u64> {
    let mut w = NdjsonWriter::create(path, write_buf)?;
    for rec in records {
        w.write_record(rec)?;
    }
    w.commit()
}

struct UnifiedSink {
    out_path: PathBuf,
    records: Vec<Record>,
    write_buf: usize,
}

impl RecordSink for UnifiedSink {
    fn accept(&mut self, _jurisdiction: &str, mut records: Vec<Record>, _stats: &mut RunStats) -> Result<bool> {
        self.records.append(&mut records);
        Ok(true)
    }

    fn finish(self: Box<Self>, stats: &mut RunStats) -> Result<()> {
        if self.records.is_empty() {
            tracing::info!("No statutes found for period {}", stats.period);
            return Ok(());
        }
        tracing::info!("Writing {} statutes to {}", self.records.len(), self.out_path.display());
        let bytes = write_records(&self.out_path, &self.records, self.write_buf)
            .with_context(|| format!("writing unified output {}", self.out_path.display()))?;
        stats.record_output(self.out_path, None, bytes);
        Ok(())
    }
}

struct PartitionedSink {
    dir: PathBuf,
    period: Period,
    /// Jurisdictions whose output file was committed.
    written: Vec<String>,
    write_buf: usize,
}

impl RecordSink for PartitionedSink {
    fn accept(&mut self, jurisdiction: &str, records: Vec<Record>, stats: &mut RunStats) -> Result<bool> {
        let path = partition_output(&self.dir, jurisdiction, &self.period);
        match write_records(&path, &records, self.write_buf) {
            Ok(bytes) => {
                stats.record_output(path, Some(jurisdiction), bytes);
                self.written.push(jurisdiction.to_string());
                Ok(true)
            }
            Err(e) => {
                // Keep going: the remaining jurisdictions still get their files.
                tracing::warn!(jurisdiction, path=%path.display(), error=%format!("{e:#}"), "failed writing jurisdiction output");
                stats.write_failures.push(WriteFailure {
                    jurisdiction: jurisdiction.to_string(),
                    path,
                    error: format!("{e:#}"),
                });
                Ok(false)
            }
        }
    }

    fn finish(mut self: Box<Self>, stats: &mut RunStats) -> Result<()> {
        self.written.sort();
        let path = manifest_path(&self.dir, &self.period);
        let mut w = NdjsonWriter::create(&path, self.write_buf)?;
        for name in &self.written {
            w.write_line(name)?;
        }
        w.commit().with_context(|| format!("writing manifest {}", path.display()))?;
        tracing::info!("Created manifest file: {}", path.display());
        stats.manifest = Some(path);
        Ok(())
    }
}
