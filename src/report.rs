//! Human-readable run summary. Presentation only: reads [`RunStats`], never mutates it.

use crate::sink::Aggregation;
use crate::stats::{NoDataReason, RunStats};
use std::fmt;

const RULE_WIDTH: usize = 60;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// `1234567` -> `"1,234,567"`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Display adapter over [`RunStats`].
pub struct Summary<'a>(pub &'a RunStats);

pub fn render_summary(stats: &RunStats) -> String {
    Summary(stats).to_string()
}

impl Summary<'_> {
    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "Processing complete!")?;
        writeln!(f, "{rule}")
    }

    fn processed_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        write!(f, "Jurisdictions processed: {} out of {}", s.with_data.len(), s.selected)?;
        if s.discovered != s.selected {
            write!(f, " (limited from {} discovered)", s.discovered)?;
        }
        writeln!(f)
    }

    fn unified(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let Some(out) = s.outputs.first() else {
            return writeln!(f, "No statutes found for period {}", s.period);
        };
        self.header(f)?;
        let name = out.path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        writeln!(f, "Output file: {}", name)?;
        writeln!(f, "Output path: {}", out.path.display())?;
        writeln!(f, "File size: {:.2} MB", megabytes(out.bytes))?;
        writeln!(f, "Total statutes: {}", format_count(s.total_records()))?;
        self.processed_line(f)?;

        writeln!(f)?;
        writeln!(f, "Jurisdictions with data ({}):", s.with_data.len())?;
        let mut rows: Vec<_> = s.with_data.iter().collect();
        rows.sort_by(|a, b| a.jurisdiction.cmp(&b.jurisdiction));
        for c in rows {
            writeln!(f, "  - {}: {} statutes", c.jurisdiction, format_count(c.records))?;
        }
        Ok(())
    }

    fn partitioned(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        self.header(f)?;
        writeln!(f, "Output directory: {}", s.output_dir.display())?;
        writeln!(f, "Total statutes: {}", format_count(s.total_records()))?;
        self.processed_line(f)?;

        writeln!(f)?;
        writeln!(f, "File sizes by jurisdiction:")?;
        let mut files: Vec<_> = s.outputs.iter().filter_map(|o| o.jurisdiction.as_deref().map(|j| (j, o.bytes))).collect();
        files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        for (name, bytes) in files {
            let records = s.records_for(name).unwrap_or(0);
            writeln!(f, "  {:20}: {:6.1} MB ({} statutes)", name, megabytes(bytes), format_count(records))?;
        }
        writeln!(f)?;
        writeln!(f, "Total size: {:.1} MB", megabytes(s.total_output_bytes()))?;
        Ok(())
    }

    fn problems(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;

        if !s.without_data.is_empty() {
            writeln!(f)?;
            writeln!(f, "Jurisdictions without {} data ({}):", s.period, s.without_data.len())?;
            let mut rows: Vec<_> = s.without_data.iter().collect();
            rows.sort_by(|a, b| a.0.cmp(&b.0));
            for (name, reason) in rows {
                let why = match reason {
                    NoDataReason::FileMissing => "no source file",
                    NoDataReason::NoValidRecords => "no valid statutes",
                };
                writeln!(f, "  - {} ({})", name, why)?;
            }
        }

        if !s.failed.is_empty() {
            writeln!(f)?;
            writeln!(f, "Jurisdictions with read errors ({}):", s.failed.len())?;
            for d in &s.failed {
                writeln!(f, "  - {}", d)?;
            }
        }

        if !s.skipped_lines.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped lines ({}):", format_count(s.skipped_lines.len()))?;
            for d in &s.skipped_lines {
                writeln!(f, "  - {}", d)?;
            }
        }

        if !s.write_failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed to write ({}):", s.write_failures.len())?;
            for w in &s.write_failures {
                writeln!(f, "  - {} -> {}: {}", w.jurisdiction, w.path.display(), w.error)?;
            }
        }

        if let Some(manifest) = &s.manifest {
            writeln!(f)?;
            writeln!(f, "Created manifest file: {}", manifest.display())?;
        }
        Ok(())
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.aggregation {
            Aggregation::Unified => self.unified(f)?,
            Aggregation::Partitioned => self.partitioned(f)?,
        }
        self.problems(f)
    }
}
