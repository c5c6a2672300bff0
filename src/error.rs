use std::fmt;
use std::path::PathBuf;

use bilevel_dither::{GridError, UnknownAlgorithm};
use thiserror::Error;

/// The source image could not be turned into a raster.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Cannot read {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot decode {}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Decoded image {} is malformed", path.display())]
    Raster { path: PathBuf, source: GridError },
}

/// Settings that no run can use.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error multiplier must be finite, got {0}")]
    InvalidMultiplier(f32),

    #[error("No kernels selected")]
    NoKernels,

    #[error("Worker count must be at least 1")]
    ZeroJobs,

    #[error(transparent)]
    UnknownKernel(#[from] UnknownAlgorithm),

    #[error("Cannot read config {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Cannot start worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// One output file could not be produced.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Cannot create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create {}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PNG encode error for {}", path.display())]
    Encode {
        path: PathBuf,
        source: png::EncodingError,
    },
}

/// An output that failed, labelled with what it was meant to hold.
#[derive(Debug)]
pub struct OutputFailure {
    /// `grayscale`, `threshold` or a job label such as `mono/Atkinson`
    pub target: String,
    pub error: OutputError,
}

/// Every output failure of a run, plus how many outputs succeeded.
#[derive(Debug)]
pub struct OutputFailures {
    pub failures: Vec<OutputFailure>,
    pub written: usize,
}

impl fmt::Display for OutputFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.failures.len() + self.written;
        write!(f, "{} of {} outputs failed", self.failures.len(), total)?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.target, failure.error)?;
            if let Some(source) = std::error::Error::source(&failure.error) {
                write!(f, ": {source}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for OutputFailures {}

/// Why a run did not complete cleanly.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputFailures),
}
