//! Progress reporting.
//!
//! The pipeline emits [`ProgressEvent`]s through a plain callback. The CLI
//! feeds them to a [`ProgressPrinter`], an `indicatif` bar on stderr that
//! any worker thread can update.

use bilevel_dither::DitherJob;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The image is loaded and `total` outputs are about to be produced.
    Started { total: usize },
    JobStarted(DitherJob),
    /// An output finished, successfully or not.
    OutputDone { target: String, ok: bool },
    Finished,
}

/// A progress bar counting finished outputs.
pub struct ProgressPrinter {
    bar: ProgressBar,
}

impl ProgressPrinter {
    /// A bar drawn to stderr.
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{msg:<28} [{bar:30}] {pos}/{len}")
                .map(|style| style.progress_chars("=> "))
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }

    /// A bar that tracks events but never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn handle(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => {
                self.bar.set_length(total as u64);
                self.bar.set_message("Rendering");
            }
            ProgressEvent::JobStarted(job) => self.bar.set_message(format!("Rendering {job}")),
            ProgressEvent::OutputDone { target, ok } => {
                if !ok {
                    self.bar.println(format!("Failed: {target}"));
                }
                self.bar.inc(1);
            }
            ProgressEvent::Finished => self.bar.finish_with_message("Done"),
        }
    }

    /// Outputs finished so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// A reporter that discards every event.
pub fn silent(_event: ProgressEvent) {}
