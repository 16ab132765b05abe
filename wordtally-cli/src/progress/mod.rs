//! Progress reporting module

use indicatif::{ProgressBar, ProgressBarIter, ProgressStyle};
use std::io::Read;
use std::time::Duration;

/// Byte progress reporter for reading the input file
pub struct ProgressReporter {
    progress_bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter for `total_bytes` of input
    ///
    /// A quiet reporter keeps a hidden bar so callers need no special case.
    pub fn new(total_bytes: u64, quiet: bool) -> Self {
        if quiet {
            return Self {
                progress_bar: ProgressBar::hidden(),
            };
        }

        let pb = ProgressBar::new(total_bytes);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { progress_bar: pb }
    }

    /// Count bytes read through `reader` on the bar
    pub fn wrap_read<R: Read>(&self, reader: R) -> ProgressBarIter<R> {
        self.progress_bar.wrap_read(reader)
    }

    /// Show what is being worked on
    pub fn set_stage(&self, stage: &str) {
        self.progress_bar.set_message(stage.to_string());
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}
