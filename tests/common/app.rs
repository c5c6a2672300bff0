//! A configured run inside its own temporary directory.

use std::path::{Path, PathBuf};

use halftone::config::RunConfig;
use halftone::error::RunError;
use halftone::pipeline::{self, RunSummary};
use halftone::progress::{self, ProgressEvent};
use image::RgbaImage;
use tempfile::TempDir;

use super::fixtures::write_png;

pub struct TestRun {
    pub dir: TempDir,
    pub config: RunConfig,
}

impl TestRun {
    /// Write `image` as the source and point the output at `<tmp>/out`.
    pub fn new(image: &RgbaImage) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = write_png(dir.path(), "source.png", image);
        let mut config = RunConfig::new(source);
        config.output_dir = dir.path().join("out");
        Self { dir, config }
    }

    pub fn out_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Path of `relative` under the output directory.
    pub fn output(&self, relative: &str) -> PathBuf {
        self.config.output_dir.join(relative)
    }

    pub fn run(&self) -> Result<RunSummary, RunError> {
        pipeline::run(&self.config, &progress::silent)
    }

    /// Run while recording every progress event.
    pub fn run_recorded(&self) -> (Result<RunSummary, RunError>, Vec<ProgressEvent>) {
        let events = std::sync::Mutex::new(Vec::new());
        let result = pipeline::run(&self.config, &|event| {
            events.lock().expect("event lock").push(event)
        });
        (result, events.into_inner().expect("event lock"))
    }
}
