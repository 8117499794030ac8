use crate::config::CopyOptions;
use crate::paths::{discover_jurisdictions, select_prefix};
use crate::period::Period;
use crate::progress::ProgressScope;
use crate::reader::read_jurisdiction;
use crate::sink::{make_sink, Aggregation};
use crate::stats::{NoDataReason, RunStats};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Entry point: configure with builder methods, then run one of the copy operations.
#[derive(Clone, Debug, Default)]
pub struct StatuteCopier {
    pub(crate) opts: CopyOptions,
}

impl StatuteCopier {
    pub fn new() -> Self {
        Self { opts: CopyOptions::default() }
    }

    pub fn with_options(opts: CopyOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &CopyOptions {
        &self.opts
    }

    // -------- Builder methods --------
    pub fn input_root(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_input_root(dir); self }
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output_dir(dir); self }
    pub fn partition_subdir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_partition_subdir(dir); self }
    pub fn reserved_dirs<I, S>(mut self, names: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> { self.opts = self.opts.with_reserved_dirs(names); self }
    pub fn limit(mut self, limit: Option<usize>) -> Self { self.opts = self.opts.with_limit(limit); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn keep_partial_on_read_error(mut self, yes: bool) -> Self { self.opts = self.opts.with_keep_partial_on_read_error(yes); self }
    pub fn io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self { self.opts = self.opts.with_io_buffers(read_bytes, write_bytes); self }

    // -------- Operations --------

    /// Sorted jurisdictions under the input root, honoring reserved names and the limit.
    pub fn jurisdictions(&self) -> Result<Vec<String>> {
        discover_jurisdictions(&self.opts.input_root, &self.opts.reserved_dirs, self.opts.limit)
    }

    /// All jurisdictions into `<output_dir>/statutes_<period>.jsonl`.
    pub fn copy_unified(&self, period: &Period) -> Result<RunStats> {
        self.run(period, Aggregation::Unified)
    }

    /// One file per jurisdiction plus a manifest, under `<output_dir>/<partition_subdir>/`.
    pub fn copy_by_jurisdiction(&self, period: &Period) -> Result<RunStats> {
        self.run(period, Aggregation::Partitioned)
    }

    /// Shared driver: discover, read + normalize each jurisdiction in order, hand
    /// non-empty record sets to the sink, then flush.
    pub fn run(&self, period: &Period, aggregation: Aggregation) -> Result<RunStats> {
        init_tracing_once();

        let out_dir = match aggregation {
            Aggregation::Unified => self.opts.output_dir.clone(),
            Aggregation::Partitioned => self.opts.partition_dir(),
        };
        let all = discover_jurisdictions(&self.opts.input_root, &self.opts.reserved_dirs, None)
            .context("discovering jurisdictions")?;
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("create output directory {}", out_dir.display()))?;
        let discovered = all.len();
        tracing::info!("Found {} jurisdictions to process for period {}", discovered, period);
        if let Some(n) = self.opts.limit {
            tracing::info!("Processing limited to first {} jurisdictions", n);
        }
        let selected = select_prefix(all, self.opts.limit);

        let mut stats = RunStats::new(period.clone(), aggregation, out_dir.clone());
        stats.discovered = discovered;
        stats.selected = selected.len();

        let mut sink = make_sink(aggregation, &out_dir, period, self.opts.write_buffer_bytes);
        let pb = ProgressScope::count(self.opts.progress, "Copying statutes", selected.len() as u64);
        let total = selected.len();

        for (i, name) in selected.iter().enumerate() {
            let idx = i + 1;
            pb.set_current(name);
            let read = read_jurisdiction(&self.opts.input_root, name, period, self.opts.read_buffer_bytes);
            pb.inc();

            if read.file_missing {
                tracing::info!("[{:2}/{}] No {} data for {}", idx, total, period, name);
                stats.record_without_data(name, NoDataReason::FileMissing);
                continue;
            }

            for d in read.line_diagnostics() {
                tracing::warn!("{}", d);
            }
            stats.skipped_lines.extend(read.line_diagnostics().cloned());

            if let Some(err) = read.read_error() {
                tracing::warn!("{}", err);
                stats.failed.push(err.clone());
                if !self.opts.keep_partial_on_read_error || read.records.is_empty() {
                    continue;
                }
            }

            if read.records.is_empty() {
                tracing::info!("[{:2}/{}] {}: no valid statutes found", idx, total, name);
                stats.record_without_data(name, NoDataReason::NoValidRecords);
                continue;
            }

            let count = read.records.len();
            if sink.accept(name, read.records, &mut stats)? {
                tracing::info!("[{:2}/{}] {}: added {} statutes", idx, total, name, count);
                stats.record_with_data(name, count);
            }
        }

        sink.finish(&mut stats)?;
        pb.finish("done");

        Ok(stats)
    }
}
