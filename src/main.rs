// Command-line runner for the `cubemap_vision` library.

use anyhow::Context;
use clap::Parser;
use cubemap_vision::pipeline::{
    self, CubemapConfig, CubemapPipeline, FaceOutcome, DEFAULT_FACE_NAMES, DEFAULT_JPEG_QUALITY,
};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Converts an equirectangular panorama into six cube map faces.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Source panorama path
    #[arg(long, default_value = pipeline::DEFAULT_SOURCE_PATH)]
    src: PathBuf,

    /// Name prefix for output images (<prefix><sidename>.jpg, cube_north.jpg, cube_top.jpg etc)
    #[arg(long, default_value = pipeline::DEFAULT_PREFIX)]
    prefix: String,

    /// Side names for output images, in north,south,west,east,top,bottom order
    #[arg(long, default_value = DEFAULT_FACE_NAMES)]
    sides: String,

    /// Additional rotation around the vertical axis (degrees)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rot: f64,

    /// Cube side width (in pixels)
    #[arg(long, default_value_t = pipeline::DEFAULT_FACE_WIDTH)]
    width: u32,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Workers used to convert the decoded panorama (defaults to the CPU count)
    #[arg(long)]
    workers: Option<usize>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<CubemapConfig> {
        let face_names = pipeline::parse_face_names(&self.sides)?;
        Ok(CubemapConfig {
            source_path: self.src,
            prefix: self.prefix,
            face_names,
            face_width: self.width,
            rotation_degrees: self.rot,
            jpeg_quality: self.quality,
            worker_count: self.workers.unwrap_or_else(num_cpus::get),
        })
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = args.into_config()?;
    let pipeline = CubemapPipeline::new(config)?;
    let source = pipeline
        .load_source()
        .await
        .with_context(|| format!("cannot read {}", pipeline.config().source_path.display()))?;

    let summary = pipeline.run_with_source(source).await;
    for report in &summary.faces {
        match &report.outcome {
            FaceOutcome::Saved => info!("{} -> {}", report.name, report.path.display()),
            FaceOutcome::Failed(err) => error!("{} failed: {}", report.name, err),
        }
    }

    if summary.all_saved() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    match run(Args::parse()).await {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
