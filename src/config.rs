//! Run configuration.
//!
//! Settings are layered: built-in defaults, then an optional YAML file,
//! then command-line flags. The result is one explicit [`RunConfig`] that
//! is handed to [`pipeline::run`](crate::pipeline::run); nothing is read
//! from global state afterwards.

use std::path::{Path, PathBuf};

use bilevel_dither::{DitherAlgorithm, DitherMode, DEFAULT_ERROR_MULTIPLIER, DEFAULT_THRESHOLD_LEVEL};
use serde::Deserialize;

use crate::error::ConfigError;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Which dithered variants to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Color and mono
    #[default]
    All,
    /// Per-channel color only
    Color,
    /// Grayscale only
    Mono,
}

impl ExportMode {
    pub fn modes(self) -> &'static [DitherMode] {
        match self {
            ExportMode::All => &[DitherMode::Color, DitherMode::Mono],
            ExportMode::Color => &[DitherMode::Color],
            ExportMode::Mono => &[DitherMode::Mono],
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Source image path
    pub image: PathBuf,
    pub output_dir: PathBuf,
    pub export: ExportMode,
    /// Export the plain grayscale conversion
    pub grayscale: bool,
    /// Export the flat threshold baseline
    pub threshold: bool,
    /// Baseline level; samples above it turn white
    pub threshold_level: u8,
    /// Scale applied to accumulated error before it is subtracted
    pub error_multiplier: f32,
    /// Kernels to run, in output order
    pub kernels: Vec<DitherAlgorithm>,
    /// Worker threads; `None` lets rayon decide
    pub jobs: Option<usize>,
}

impl RunConfig {
    /// Defaults for `image`.
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            export: ExportMode::default(),
            grayscale: true,
            threshold: true,
            threshold_level: DEFAULT_THRESHOLD_LEVEL,
            error_multiplier: DEFAULT_ERROR_MULTIPLIER,
            kernels: DitherAlgorithm::ALL.to_vec(),
            jobs: None,
        }
    }

    /// Overlay every key present in `file`.
    pub fn apply_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(dir) = file.output_dir {
            self.output_dir = dir;
        }
        if let Some(export) = file.export {
            self.export = export;
        }
        if let Some(grayscale) = file.grayscale {
            self.grayscale = grayscale;
        }
        if let Some(threshold) = file.threshold {
            self.threshold = threshold;
        }
        if let Some(level) = file.threshold_level {
            self.threshold_level = level;
        }
        if let Some(multiplier) = file.error_multiplier {
            self.error_multiplier = multiplier;
        }
        if let Some(names) = file.kernels {
            self.kernels = names
                .iter()
                .map(|name| name.parse())
                .collect::<Result<_, _>>()?;
        }
        if let Some(jobs) = file.jobs {
            self.jobs = Some(jobs);
        }
        Ok(())
    }

    /// Reject settings no run could use.
    ///
    /// The multiplier only has to be finite; large or negative values are
    /// accepted and simply give degenerate output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.error_multiplier.is_finite() {
            return Err(ConfigError::InvalidMultiplier(self.error_multiplier));
        }
        if self.kernels.is_empty() {
            return Err(ConfigError::NoKernels);
        }
        if self.jobs == Some(0) {
            return Err(ConfigError::ZeroJobs);
        }
        Ok(())
    }
}

/// Settings file contents. Every key is optional.
///
/// ```yaml
/// output_dir: renders
/// export: mono
/// threshold: false
/// error_multiplier: 0.92
/// kernels: [Atkinson, Sierra-Lite]
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub output_dir: Option<PathBuf>,
    pub export: Option<ExportMode>,
    pub grayscale: Option<bool>,
    pub threshold: Option<bool>,
    pub threshold_level: Option<u8>,
    pub error_multiplier: Option<f32>,
    pub kernels: Option<Vec<String>>,
    pub jobs: Option<usize>,
}

impl FileConfig {
    /// Read and parse a YAML settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RunConfig::new("in.png");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.export, ExportMode::All);
        assert!(config.grayscale);
        assert!(config.threshold);
        assert_eq!(config.threshold_level, 123);
        assert_eq!(config.error_multiplier, 1.0);
        assert_eq!(config.kernels.len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_export_modes() {
        assert_eq!(ExportMode::All.modes(), &[DitherMode::Color, DitherMode::Mono]);
        assert_eq!(ExportMode::Mono.modes(), &[DitherMode::Mono]);
    }

    #[test]
    fn test_file_overlay() {
        let file: FileConfig = serde_yaml::from_str(
            "output_dir: renders\nexport: mono\nthreshold: false\nerror_multiplier: 0.92\nkernels: [atkinson, Sierra-Lite]\n",
        )
        .unwrap();
        let mut config = RunConfig::new("in.png");
        config.apply_file(file).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("renders"));
        assert_eq!(config.export, ExportMode::Mono);
        assert!(!config.threshold);
        assert!(config.grayscale, "absent keys keep their default");
        assert_eq!(config.error_multiplier, 0.92);
        assert_eq!(
            config.kernels,
            vec![DitherAlgorithm::Atkinson, DitherAlgorithm::SierraLite]
        );
    }

    #[test]
    fn test_file_rejects_unknown_keys() {
        let result: Result<FileConfig, _> = serde_yaml::from_str("multiplier: 1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_file_rejects_unknown_kernel() {
        let file = FileConfig {
            kernels: Some(vec!["Bayer".to_string()]),
            ..Default::default()
        };
        let err = RunConfig::new("in.png").apply_file(file).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKernel(_)));
    }

    #[test]
    fn test_validate() {
        let mut config = RunConfig::new("in.png");
        config.error_multiplier = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMultiplier(_))
        ));

        let mut config = RunConfig::new("in.png");
        config.error_multiplier = 7.5;
        assert!(config.validate().is_ok());

        config.kernels.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoKernels)));

        let mut config = RunConfig::new("in.png");
        config.jobs = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroJobs)));
    }
}
