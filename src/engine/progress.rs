//! Progress bar utilities for displaying decompression and extraction status.
//!
//! Bars are only touched from the coordinating thread, through the observers below.

use kdam::{Animation, Bar, BarExt};

use crate::utils::config::ProgressConsts;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: String,
    pub unit: &'static str,
    pub unit_scale: bool,
}

impl ProgressBarConfig {
    /// Counter-style bar over `total` items.
    pub fn items(total: usize, desc: impl Into<String>) -> Self {
        Self {
            total,
            desc: desc.into(),
            unit: " docs",
            unit_scale: false,
        }
    }

    /// Byte bar with SI scaling.
    pub fn bytes(total: u64, desc: impl Into<String>) -> Self {
        Self {
            total: total as usize,
            desc: desc.into(),
            unit: "B",
            unit_scale: true,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        unit = config.unit,
        unit_scale = config.unit_scale,
        animation = Animation::Classic
    )
}

/// Draw the final state and move to a fresh line.
pub fn finish_bar(mut bar: Bar) {
    let _ = bar.refresh();
    eprintln!();
}

/// Byte progress for one archive's decompression. Fed by the decompressor's
/// `(done, total)` callback; redraws at most every [`ProgressConsts::BYTES_REFRESH_STEP`].
pub struct DecompressProgress {
    desc: Option<String>,
    bar: Option<Bar>,
    drawn: u64,
}

impl DecompressProgress {
    pub fn new(enabled: bool, archive_name: &str) -> Self {
        Self {
            desc: enabled.then(|| format!("{archive_name} unpacking")),
            bar: None,
            drawn: 0,
        }
    }

    pub fn observe(&mut self, done: u64, total: u64) {
        let Some(desc) = self.desc.as_ref() else {
            return;
        };
        let bar = self
            .bar
            .get_or_insert_with(|| create_progress_bar(ProgressBarConfig::bytes(total, desc.clone())));
        let delta = done.saturating_sub(self.drawn);
        if delta >= ProgressConsts::BYTES_REFRESH_STEP || (done == total && delta > 0) {
            let _ = bar.update(delta as usize);
            self.drawn = done;
        }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            finish_bar(bar);
        }
    }
}

/// Document counter for one extraction batch, advanced once per task outcome.
pub struct DocumentProgress {
    bar: Option<Bar>,
}

impl DocumentProgress {
    pub fn new(enabled: bool, total: usize, desc: impl Into<String>) -> Self {
        Self {
            bar: enabled.then(|| create_progress_bar(ProgressBarConfig::items(total, desc))),
        }
    }

    pub fn advance(&mut self) {
        if let Some(bar) = self.bar.as_mut() {
            let _ = bar.update(1);
        }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            finish_bar(bar);
        }
    }
}
