// THEORY:
// This file is the main entry point for the `cubemap_vision` library crate.
// The public surface is deliberately small: `pipeline` exposes the
// `CubemapPipeline` and its `CubemapConfig` for whole runs, while the
// `core_modules` hold the reprojection engine itself (pixel buffer, bilinear
// sampler, face projections and the per-face extractor) for callers that want
// to drive single faces in memory. `parallel_pipeline` holds the fan-out/join
// phases that the top-level pipeline is built from.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use core_modules::face::{CubeFace, FaceSpec};
pub use core_modules::pixel::pixel::Pixel;
pub use core_modules::pixel_buffer::pixel_buffer::PixelBuffer;
pub use core_modules::projection::{Projection, SourceCoord};
pub use error::CubemapError;
pub use pipeline::{CubemapConfig, CubemapPipeline, RunSummary};
