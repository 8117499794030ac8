use crate::paths::DEFAULT_RESERVED_DIRS;
use std::path::{Path, PathBuf};

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct CopyOptions {
    pub input_root: PathBuf,          // <input_root>/<jurisdiction>/<period>.jsonl
    pub output_dir: PathBuf,          // unified output lands here
    pub partition_subdir: PathBuf,    // per-jurisdiction outputs + manifest, relative to output_dir
    pub reserved_dirs: Vec<String>,   // never treated as jurisdictions
    pub limit: Option<usize>,         // keep only the first N jurisdictions (sorted)
    pub progress: bool,               // show progress bar
    pub keep_partial_on_read_error: bool,

    // IO tuning
    pub read_buffer_bytes: usize,     // BufReader capacity
    pub write_buffer_bytes: usize,    // BufWriter capacity
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("data/state_laws"),
            output_dir: PathBuf::from("data/json"),
            partition_subdir: PathBuf::from("by_state"),
            reserved_dirs: DEFAULT_RESERVED_DIRS.iter().map(|s| s.to_string()).collect(),
            limit: None,
            progress: true,
            keep_partial_on_read_error: false,
            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
        }
    }
}

impl CopyOptions {
    pub fn with_input_root(mut self, dir: impl AsRef<Path>) -> Self {
        self.input_root = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_partition_subdir(mut self, dir: impl AsRef<Path>) -> Self {
        self.partition_subdir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_reserved_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_dirs = names.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_keep_partial_on_read_error(mut self, yes: bool) -> Self {
        self.keep_partial_on_read_error = yes;
        self
    }
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }

    /// Directory holding per-jurisdiction outputs and the manifest.
    pub fn partition_dir(&self) -> PathBuf {
        self.output_dir.join(&self.partition_subdir)
    }
}
