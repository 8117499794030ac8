use crate::normalize::Record;
use crate::util::{create_with_backoff, open_with_backoff, remove_with_backoff, replace_file_atomic_backoff};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Minimal NDJSON reader with buffering and 1-based line numbering.
pub struct NdjsonReader {
    rdr: BufReader<File>,
    line_no: usize,
}

impl NdjsonReader {
    pub fn open(path: &Path, buf_bytes: usize) -> io::Result<Self> {
        let f = open_with_backoff(path, 16, 50)?;
        Ok(Self { rdr: BufReader::with_capacity(buf_bytes.max(8 * 1024), f), line_no: 0 })
    }

    /// Read the next line into `buf`, stripping a trailing `\r?\n`.
    /// Returns `Ok(None)` at EOF, otherwise the line's number.
    /// Invalid UTF-8 surfaces as an `InvalidData` error.
    pub fn read_line(&mut self, buf: &mut String) -> io::Result<Option<usize>> {
        buf.clear();
        if self.rdr.read_line(buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') { buf.pop(); }
        }
        self.line_no += 1;
        Ok(Some(self.line_no))
    }
}

/// Buffered line writer that stages into `<final>.inprogress` and only promotes
/// to the final name on [`NdjsonWriter::commit`]. Dropping an uncommitted writer
/// closes the handle and removes the staging file.
pub struct NdjsonWriter {
    tmp_path: PathBuf,
    final_path: PathBuf,
    w: Option<BufWriter<File>>,
}

fn staging_path(final_path: &Path) -> PathBuf {
    let mut name: OsString = final_path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "output".into());
    name.push(".inprogress");
    final_path.with_file_name(name)
}

impl NdjsonWriter {
    pub fn create(final_path: &Path, buf_bytes: usize) -> Result<Self> {
        let tmp_path = staging_path(final_path);
        let f = create_with_backoff(&tmp_path, 16, 50)
            .with_context(|| format!("create {}", tmp_path.display()))?;
        Ok(Self {
            tmp_path,
            final_path: final_path.to_path_buf(),
            w: Some(BufWriter::with_capacity(buf_bytes.max(8 * 1024), f)),
        })
    }

    /// Serialize one record as a compact JSON line. Non-ASCII is written literally.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        if let Some(w) = &mut self.w {
            serde_json::to_writer(&mut *w, record)
                .with_context(|| format!("write {}", self.tmp_path.display()))?;
            w.write_all(b"\n").with_context(|| format!("write {}", self.tmp_path.display()))?;
        }
        Ok(())
    }

    #[inline]
    pub fn write_line(&mut self, s: &str) -> Result<()> {
        if let Some(w) = &mut self.w {
            w.write_all(s.as_bytes())
                .and_then(|_| w.write_all(b"\n"))
                .with_context(|| format!("write {}", self.tmp_path.display()))?;
        }
        Ok(())
    }

    /// Flush, close, and promote the staging file. Returns the final size in bytes.
    pub fn commit(mut self) -> Result<u64> {
        if let Some(mut w) = self.w.take() {
            let flushed = w.flush();
            drop(w);
            if let Err(e) = flushed {
                let _ = remove_with_backoff(&self.tmp_path, 4, 25);
                return Err(e).with_context(|| format!("flush {}", self.tmp_path.display()));
            }
        }
        if let Err(e) = replace_file_atomic_backoff(&self.tmp_path, &self.final_path) {
            let _ = remove_with_backoff(&self.tmp_path, 4, 25);
            return Err(e);
        }
        let len = fs::metadata(&self.final_path)
            .with_context(|| format!("stat {}", self.final_path.display()))?
            .len();
        Ok(len)
    }
}

impl Drop for NdjsonWriter {
    fn drop(&mut self) {
        if let Some(w) = self.w.take() {
            drop(w);
            if let Err(e) = remove_with_backoff(&self.tmp_path, 4, 25) {
                tracing::warn!(path=%self.tmp_path.display(), error=%e, "failed to remove staging file");
            }
        }
    }
}
