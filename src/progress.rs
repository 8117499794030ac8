//! Progress reporting: one count-style bar ticking once per jurisdiction.

use indicatif::{ProgressBar, ProgressStyle};

/// Count-style progress bar (items processed out of total), with an optional label.
pub fn make_count_progress(total: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
         elapsed: {elapsed_precise}  eta: {eta_precise}"
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Optional bar: a no-op when progress is disabled.
pub struct ProgressScope {
    pb: Option<ProgressBar>,
}

impl ProgressScope {
    pub fn count(enabled: bool, label: &str, total: u64) -> Self {
        Self { pb: enabled.then(|| make_count_progress(total, label)) }
    }

    /// Show the jurisdiction being read.
    pub fn set_current(&self, name: &str) {
        if let Some(pb) = &self.pb { pb.set_message(name.to_string()); }
    }

    #[inline]
    pub fn inc(&self) {
        if let Some(pb) = &self.pb { pb.inc(1); }
    }

    pub fn finish(&self, msg: &str) {
        if let Some(pb) = &self.pb { pb.finish_with_message(msg.to_string()); }
    }
}
