//! Progress bar display for command steps

use indicatif::{ProgressBar, ProgressStyle};

/// Progress of one step across all packages.
///
/// The position counts packages that finished the step, including skipped
/// and ignored ones. It only ever moves forward and never gates execution.
pub struct StepProgress {
    bar: ProgressBar,
}

impl StepProgress {
    /// Create progress for a step over `total` packages
    pub fn new(total: usize, step_name: &str, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };

        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_length(total as u64);
        bar.set_message(step_name.to_string());

        Self { bar }
    }

    /// Mark one package as done with this step
    pub fn tick(&self) {
        self.bar.inc(1);
    }

    /// Packages done so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    pub fn total(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    /// Remove the bar once the step is over
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
