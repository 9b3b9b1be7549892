// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Progress bars for the slow build phases.
//!
//! indicatif draws to stderr and stays silent when stderr is not a terminal,
//! so tests and pipelines see nothing.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress style for the build progress bars
fn style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

pub(crate) fn bar(len: usize, prefix: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(style());
    bar.set_prefix(prefix);
    bar
}
