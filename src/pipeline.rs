// THEORY:
// The `pipeline` module is the top-level API of the engine. A `CubemapPipeline`
// is built from a validated `CubemapConfig` and turns one equirectangular
// panorama into six cube faces on disk:
//
//   load (fatal on failure) → normalize to RGBA (parallel by columns)
//     → six concurrent face tasks (extract → encode → write) → join → summary
//
// A load failure ends the run before any face work starts. A face that fails to
// write only marks its own report; the run still waits for all six and returns
// a `RunSummary` describing what was produced.

use crate::core_modules::face::{CubeFace, FaceSpec};
use crate::core_modules::pixel_buffer::pixel_buffer::PixelBuffer;
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::CubemapError;
use crate::parallel_pipeline;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Re-export key data structures for the public API.
pub use crate::parallel_pipeline::{FaceOutcome, FaceReport};

pub const DEFAULT_SOURCE_PATH: &str = "sphere.jpg";
pub const DEFAULT_PREFIX: &str = "cube_";
pub const DEFAULT_FACE_NAMES: &str = "north,south,west,east,top,bottom";
pub const DEFAULT_FACE_WIDTH: u32 = 256;
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Configuration for a cube map run.
#[derive(Debug, Clone)]
pub struct CubemapConfig {
    pub source_path: PathBuf,
    /// Prepended verbatim to every face name; may include a directory.
    pub prefix: String,
    /// North, south, west, east, top, bottom.
    pub face_names: [String; 6],
    /// Side length of every face, in pixels.
    pub face_width: u32,
    /// Extra rotation around the vertical axis, in degrees.
    pub rotation_degrees: f64,
    pub jpeg_quality: u8,
    /// Workers used to normalize the decoded panorama.
    pub worker_count: usize,
}

impl Default for CubemapConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            prefix: DEFAULT_PREFIX.to_string(),
            face_names: CubeFace::ALL.map(|face| face.default_name().to_string()),
            face_width: DEFAULT_FACE_WIDTH,
            rotation_degrees: 0.0,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            worker_count: num_cpus::get(),
        }
    }
}

impl CubemapConfig {
    pub fn validate(&self) -> Result<(), CubemapError> {
        if self.face_width == 0 {
            return Err(CubemapError::InvalidConfig(
                "face width must be at least 1 pixel".into(),
            ));
        }
        if let Some(position) = self.face_names.iter().position(|name| name.is_empty()) {
            return Err(CubemapError::InvalidConfig(format!(
                "face name #{} is empty",
                position + 1
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(CubemapError::InvalidConfig(format!(
                "jpeg quality {} is outside 1..=100",
                self.jpeg_quality
            )));
        }
        if self.worker_count == 0 {
            return Err(CubemapError::InvalidConfig(
                "worker count must be at least 1".into(),
            ));
        }
        if !self.rotation_degrees.is_finite() {
            return Err(CubemapError::InvalidConfig(
                "rotation must be a finite number of degrees".into(),
            ));
        }
        Ok(())
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }
}

/// Splits a comma-separated list into exactly six face names.
pub fn parse_face_names(list: &str) -> Result<[String; 6], CubemapError> {
    let names: Vec<String> = list.split(',').map(str::to_string).collect();
    names.try_into().map_err(|_| {
        CubemapError::InvalidConfig("'sides' must contain six comma-separated names".into())
    })
}

/// The outcome of a full run.
#[derive(Debug)]
pub struct RunSummary {
    pub source_width: u32,
    pub source_height: u32,
    /// One report per face, in canonical order.
    pub faces: Vec<FaceReport>,
}

impl RunSummary {
    pub fn all_saved(&self) -> bool {
        self.faces.iter().all(FaceReport::is_saved)
    }

    pub fn failed_faces(&self) -> impl Iterator<Item = &FaceReport> {
        self.faces.iter().filter(|report| !report.is_saved())
    }
}

/// The main, top-level struct for the reprojection engine.
pub struct CubemapPipeline {
    config: CubemapConfig,
}

impl CubemapPipeline {
    pub fn new(config: CubemapConfig) -> Result<Self, CubemapError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CubemapConfig {
        &self.config
    }

    pub fn face_specs(&self) -> Vec<FaceSpec> {
        FaceSpec::cube(
            &self.config.face_names,
            self.config.face_width,
            self.config.rotation_radians(),
        )
    }

    /// Decodes and normalizes the source panorama.
    pub async fn load_source(&self) -> Result<PixelBuffer, CubemapError> {
        load_panorama(&self.config.source_path, self.config.worker_count).await
    }

    /// Renders the six faces in memory without encoding them.
    pub async fn render(
        &self,
        source: Arc<PixelBuffer>,
    ) -> Result<Vec<(FaceSpec, PixelBuffer)>, CubemapError> {
        let specs = self.face_specs();
        let faces = parallel_pipeline::render_faces(source, &specs).await?;
        Ok(specs.into_iter().zip(faces).collect())
    }

    /// Generates and writes all six faces from an already loaded panorama.
    pub async fn run_with_source(&self, source: PixelBuffer) -> RunSummary {
        let (source_width, source_height) = (source.width(), source.height());
        let specs = self.face_specs();
        let faces = parallel_pipeline::generate_faces(
            Arc::new(source),
            &specs,
            &self.config.prefix,
            self.config.jpeg_quality,
        )
        .await;

        let summary = RunSummary {
            source_width,
            source_height,
            faces,
        };
        let failed = summary.failed_faces().count();
        if failed > 0 {
            warn!("{} of {} faces failed", failed, summary.faces.len());
        }
        summary
    }

    /// Loads the configured panorama and writes all six faces.
    pub async fn run(&self) -> Result<RunSummary, CubemapError> {
        let source = self.load_source().await?;
        Ok(self.run_with_source(source).await)
    }
}

/// Decodes `path` on a blocking worker and normalizes it to RGBA.
pub async fn load_panorama(path: &Path, workers: usize) -> Result<PixelBuffer, CubemapError> {
    info!("reading {}...", path.display());
    let owned = path.to_path_buf();
    let image = tokio::task::spawn_blocking(move || image_helper::load(&owned))
        .await
        .map_err(|err| CubemapError::Worker(err.to_string()))??;
    info!("decoded {}x{} panorama", image.width(), image.height());
    parallel_pipeline::normalize_to_rgba(image, workers).await
}
