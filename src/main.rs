use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bilevel_dither::DitherAlgorithm;
use halftone::config::{ExportMode, FileConfig, RunConfig};
use halftone::error::ConfigError;
use halftone::pipeline;
use halftone::progress::{self, ProgressPrinter};

#[derive(Parser)]
#[command(name = "halftone", version)]
#[command(about = "Render an image with bi-level error diffusion kernels, in color and mono")]
struct Cli {
    /// Source image (PNG or JPEG)
    image: PathBuf,

    /// Output directory [default: output]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Which dithered variants to export [default: all]
    #[arg(short, long, value_enum)]
    export: Option<ExportMode>,

    /// Export the plain grayscale conversion [default: true]
    #[arg(long, value_name = "BOOL")]
    grayscale: Option<bool>,

    /// Export the flat threshold baseline [default: true]
    #[arg(short, long, value_name = "BOOL")]
    threshold: Option<bool>,

    /// Baseline threshold level; samples above it turn white [default: 123]
    #[arg(long, value_name = "LEVEL")]
    threshold_level: Option<u8>,

    /// Scale applied to accumulated error (e.g., 0.92 or 1.18) [default: 1.0]
    #[arg(short = 'm', long, value_name = "FLOAT", allow_negative_numbers = true)]
    error_multiplier: Option<f32>,

    /// Kernels to run, comma-separated (e.g. "Atkinson,Sierra-Lite") [default: all]
    #[arg(short, long = "kernel", value_name = "NAME", value_delimiter = ',')]
    kernels: Vec<DitherAlgorithm>,

    /// Worker threads [default: one per core]
    #[arg(short, long)]
    jobs: Option<usize>,

    /// YAML settings file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not print progress
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Layer defaults, the settings file and flags into one config.
    fn into_config(self) -> Result<RunConfig, ConfigError> {
        let mut config = RunConfig::new(self.image);
        if let Some(path) = &self.config {
            config.apply_file(FileConfig::load(path)?)?;
        }
        if let Some(dir) = self.output {
            config.output_dir = dir;
        }
        if let Some(export) = self.export {
            config.export = export;
        }
        if let Some(grayscale) = self.grayscale {
            config.grayscale = grayscale;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(level) = self.threshold_level {
            config.threshold_level = level;
        }
        if let Some(multiplier) = self.error_multiplier {
            config.error_multiplier = multiplier;
        }
        if !self.kernels.is_empty() {
            config.kernels = self.kernels;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = Some(jobs);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halftone=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let quiet = cli.quiet;
    let config = cli.into_config().context("Invalid configuration")?;

    let summary = if quiet {
        pipeline::run(&config, &progress::silent)
    } else {
        let printer = ProgressPrinter::new();
        pipeline::run(&config, &|event| printer.handle(event))
    }
    .with_context(|| format!("Rendering {} failed", config.image.display()))?;

    println!(
        "Rendered {}x{} image to {} files in {}",
        summary.width,
        summary.height,
        summary.written.len(),
        config.output_dir.display()
    );
    println!("Rendered in: {:.2}s", summary.elapsed.as_secs_f64());
    Ok(())
}
