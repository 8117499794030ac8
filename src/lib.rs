mod config;
mod ndjson;
mod normalize;
mod paths;
mod period;
mod pipeline;
mod progress;
mod reader;
mod report;
mod sink;
mod stats;
mod util;

pub use crate::config::CopyOptions;
pub use crate::period::Period;
pub use crate::pipeline::StatuteCopier;
pub use crate::sink::Aggregation;

// Record normalization (pure, no I/O).
pub use crate::normalize::{looks_absolute, normalize, normalize_in_place, Record, BASE_ORIGIN, STATUTE_TYPE, TYPE_KEY, URL_KEY};

// Discovery and output naming.
pub use crate::paths::{discover_jurisdictions, manifest_path, partition_output, select_prefix, source_file, unified_output, DEFAULT_RESERVED_DIRS};

// Per-jurisdiction reading with diagnostics.
pub use crate::reader::{read_jurisdiction, Diagnostic, JurisdictionRead};

// Run statistics and the textual summary.
pub use crate::stats::{JurisdictionCount, NoDataReason, OutputFile, RunStats, WriteFailure};
pub use crate::report::{format_count, megabytes, render_summary, Summary};

//export NDJSON helpers and robust file ops so binaries can import from crate root.
pub use crate::ndjson::{NdjsonReader, NdjsonWriter};
pub use crate::util::{create_with_backoff, init_tracing_once, open_with_backoff, replace_file_atomic_backoff};
