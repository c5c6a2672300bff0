//! One complete run: load, plan, dither in parallel, write.
//!
//! Output layout under the configured directory:
//!
//! ```text
//! grayscale.png          plain luminance conversion
//! treshold.png           flat threshold baseline
//! color/<Kernel>.png     per-channel diffusion, alpha kept
//! mono/<Kernel>.png      luminance diffusion, 1-bit
//! ```
//!
//! A failed output is logged and collected; it never stops the other
//! outputs from being produced.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use bilevel_dither::{plan_jobs, threshold, DitherJob, Raster};
use rayon::prelude::*;

use crate::config::RunConfig;
use crate::error::{ConfigError, OutputError, OutputFailure, OutputFailures, RunError};
use crate::image_io::{load_image, write_bilevel_png, write_gray_png, write_result};
use crate::progress::ProgressEvent;

/// File name of the grayscale export.
pub const GRAYSCALE_FILE: &str = "grayscale.png";

/// File name of the threshold baseline. The spelling is kept so existing
/// output trees stay comparable.
pub const THRESHOLD_FILE: &str = "treshold.png";

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub width: usize,
    pub height: usize,
    /// Every file written, in planning order
    pub written: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Where `job` writes its result under `output_dir`.
pub fn job_output_path(output_dir: &Path, job: &DitherJob) -> PathBuf {
    output_dir
        .join(job.mode.dir_name())
        .join(format!("{}.png", job.algorithm.name()))
}

/// Execute `config`, reporting progress through `progress`.
///
/// Returns [`RunError::Output`] when any output failed; the outputs that
/// succeeded are still on disk.
pub fn run<F>(config: &RunConfig, progress: &F) -> Result<RunSummary, RunError>
where
    F: Fn(ProgressEvent) + Sync,
{
    config.validate()?;
    let started = Instant::now();
    let image = load_image(&config.image)?;
    tracing::info!(
        path = %config.image.display(),
        width = image.width(),
        height = image.height(),
        "Loaded source image"
    );

    let outcomes = match config.jobs {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(ConfigError::from)?;
            pool.install(|| render_all(config, &image, progress))
        }
        None => render_all(config, &image, progress),
    };
    progress(ProgressEvent::Finished);

    let mut written = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(path) => written.push(path),
            Err(failure) => failures.push(failure),
        }
    }

    let elapsed = started.elapsed();
    if !failures.is_empty() {
        tracing::warn!(failed = failures.len(), written = written.len(), "Run incomplete");
        return Err(OutputFailures {
            failures,
            written: written.len(),
        }
        .into());
    }

    tracing::info!(outputs = written.len(), elapsed_ms = elapsed.as_millis() as u64, "Run complete");
    Ok(RunSummary {
        width: image.width(),
        height: image.height(),
        written,
        elapsed,
    })
}

type Outcome = Result<PathBuf, OutputFailure>;

fn render_all<F>(config: &RunConfig, image: &Raster, progress: &F) -> Vec<Outcome>
where
    F: Fn(ProgressEvent) + Sync,
{
    let jobs = plan_jobs(&config.kernels, config.export.modes());
    let extras = usize::from(config.grayscale) + usize::from(config.threshold);
    progress(ProgressEvent::Started {
        total: jobs.len() + extras,
    });

    let dir = &config.output_dir;
    let mut outcomes = Vec::with_capacity(jobs.len() + extras);

    if config.grayscale || config.threshold {
        let luma = image.to_luma();
        if config.grayscale {
            let path = dir.join(GRAYSCALE_FILE);
            let outcome = write_output(&path, |p| write_gray_png(p, &luma));
            outcomes.push(finish_output("grayscale", path, outcome, progress));
        }
        if config.threshold {
            let path = dir.join(THRESHOLD_FILE);
            let baseline = threshold(&luma, config.threshold_level);
            let outcome = write_output(&path, |p| write_bilevel_png(p, &baseline));
            outcomes.push(finish_output("threshold", path, outcome, progress));
        }
    }

    let job_outcomes: Vec<Outcome> = jobs
        .par_iter()
        .map(|job| {
            progress(ProgressEvent::JobStarted(*job));
            tracing::debug!(%job, "Dithering");
            let result = job.run(image, config.error_multiplier);
            let path = job_output_path(dir, job);
            let outcome = write_output(&path, |p| write_result(p, &result));
            finish_output(&job.to_string(), path, outcome, progress)
        })
        .collect();
    outcomes.extend(job_outcomes);
    outcomes
}

/// Ensure the parent directory exists, then write.
fn write_output(
    path: &Path,
    write: impl FnOnce(&Path) -> Result<(), OutputError>,
) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    write(path)
}

fn finish_output<F>(
    target: &str,
    path: PathBuf,
    outcome: Result<(), OutputError>,
    progress: &F,
) -> Outcome
where
    F: Fn(ProgressEvent) + Sync,
{
    progress(ProgressEvent::OutputDone {
        target: target.to_string(),
        ok: outcome.is_ok(),
    });
    match outcome {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Wrote {target}");
            Ok(path)
        }
        Err(error) => {
            tracing::warn!(%target, %error, "Output failed");
            Err(OutputFailure {
                target: target.to_string(),
                error,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bilevel_dither::{DitherAlgorithm, DitherMode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_output_path() {
        let job = DitherJob::new(DitherAlgorithm::SierraLite, DitherMode::Mono);
        assert_eq!(
            job_output_path(Path::new("out"), &job),
            PathBuf::from("out/mono/Sierra-Lite.png")
        );
        let job = DitherJob::new(DitherAlgorithm::FloydSteinberg, DitherMode::Color);
        assert_eq!(
            job_output_path(Path::new("out"), &job),
            PathBuf::from("out/color/FloydSteinberg.png")
        );
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("x.png");
        write_output(&path, |p| {
            std::fs::write(p, b"x").map_err(|source| OutputError::Create {
                path: p.to_path_buf(),
                source,
            })
        })
        .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_output_reports_blocked_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mono"), b"not a directory").unwrap();
        let path = dir.path().join("mono").join("Atkinson.png");
        let err = write_output(&path, |_| Ok(())).unwrap_err();
        assert!(matches!(err, OutputError::CreateDir { .. }));
    }

    #[test]
    fn test_invalid_config_fails_before_loading() {
        let mut config = RunConfig::new("/nonexistent/in.png");
        config.kernels.clear();
        let err = run(&config, &crate::progress::silent).unwrap_err();
        assert!(matches!(err, RunError::Config(ConfigError::NoKernels)));
    }
}
