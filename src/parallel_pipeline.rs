// THEORY:
// The parallel pipeline owns the two fan-out phases of a run. Both follow the
// same shape: split the work into independent pieces, hand each piece to a
// blocking worker task, and wait for all of them before moving on.
//
// 1.  **Color Normalization**: A decoded panorama that is not already RGBA8 is
//     split into contiguous column ranges, one per worker. Each worker converts
//     only its own columns into a private strip, and the strips are stitched into
//     the destination buffer once every worker has joined. No two workers ever
//     touch the same column, so nothing is locked.
// 2.  **Face Generation**: One task per cube face. Each task extracts its face
//     from the shared, read-only source and then encodes and writes it. A face
//     that fails to write reports the failure in its own `FaceReport`; its
//     siblings keep running and the join still waits for all six.
//
// Reports come back in the order the specs were given, whatever order the
// tasks actually finished in.

use crate::core_modules::extractor::extract_face;
use crate::core_modules::face::FaceSpec;
use crate::core_modules::pixel::pixel::CHANNELS;
use crate::core_modules::pixel_buffer::pixel_buffer::PixelBuffer;
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::CubemapError;
use futures::future::join_all;
use image::{DynamicImage, GenericImageView};
use log::{debug, error, info};
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinError;

/// What happened to one face.
#[derive(Debug)]
pub enum FaceOutcome {
    Saved,
    Failed(CubemapError),
}

#[derive(Debug)]
pub struct FaceReport {
    pub name: String,
    pub path: PathBuf,
    pub outcome: FaceOutcome,
}

impl FaceReport {
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, FaceOutcome::Saved)
    }
}

/// A run of columns converted by one worker, stored row-major.
struct ColumnStrip {
    x_start: u32,
    width: u32,
    data: Vec<u8>,
}

fn worker_error(err: JoinError) -> CubemapError {
    CubemapError::Worker(err.to_string())
}

/// Splits `[0, width)` into at most `workers` contiguous, non-empty ranges of
/// `ceil(width / workers)` columns each (the last may be shorter).
///
/// More workers than columns is the same as one worker per column.
pub fn column_ranges(width: u32, workers: usize) -> Vec<Range<u32>> {
    let workers = workers.clamp(1, width.max(1) as usize) as u32;
    let step = width.div_ceil(workers).max(1);
    (0..workers)
        .map(|k| (k * step).min(width)..((k + 1) * step).min(width))
        .filter(|range| !range.is_empty())
        .collect()
}

fn convert_columns(image: &DynamicImage, columns: Range<u32>) -> ColumnStrip {
    let height = image.height();
    let width = columns.end - columns.start;
    let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for y in 0..height {
        for x in columns.clone() {
            data.extend_from_slice(&image.get_pixel(x, y).0);
        }
    }
    ColumnStrip {
        x_start: columns.start,
        width,
        data,
    }
}

/// Converts a decoded image into an RGBA `PixelBuffer`, splitting the columns
/// across `workers` blocking tasks. RGBA8 input is taken over without copying.
pub async fn normalize_to_rgba(
    image: DynamicImage,
    workers: usize,
) -> Result<PixelBuffer, CubemapError> {
    let image = match image {
        DynamicImage::ImageRgba8(rgba) => return Ok(PixelBuffer::from_rgba_image(rgba)),
        other => Arc::new(other),
    };

    let (width, height) = image.dimensions();
    let ranges = column_ranges(width, workers);
    info!("converting to rgba ({} workers)...", ranges.len());

    let tasks = ranges.into_iter().map(|columns| {
        let image = Arc::clone(&image);
        tokio::task::spawn_blocking(move || convert_columns(&image, columns))
    });

    let mut buffer = PixelBuffer::new(width, height);
    for strip in join_all(tasks).await {
        let strip = strip.map_err(worker_error)?;
        buffer.blit_columns(strip.x_start, strip.width, &strip.data)?;
    }
    debug!("converted {}x{} panorama", width, height);
    Ok(buffer)
}

/// Extracts every face concurrently and returns the buffers in the order of `specs`.
pub async fn render_faces(
    source: Arc<PixelBuffer>,
    specs: &[FaceSpec],
) -> Result<Vec<PixelBuffer>, CubemapError> {
    let tasks = specs.iter().cloned().map(|spec| {
        let source = Arc::clone(&source);
        tokio::task::spawn_blocking(move || extract_face(&source, &spec))
    });

    join_all(tasks)
        .await
        .into_iter()
        .map(|face| face.map_err(worker_error))
        .collect()
}

/// Extracts, encodes and writes every face concurrently.
///
/// Each face resolves its own failure; the returned reports cover all specs.
pub async fn generate_faces(
    source: Arc<PixelBuffer>,
    specs: &[FaceSpec],
    prefix: &str,
    quality: u8,
) -> Vec<FaceReport> {
    let tasks = specs.iter().cloned().map(|spec| {
        let source = Arc::clone(&source);
        let path = spec.output_path(prefix);
        let task_path = path.clone();
        let name = spec.name.clone();
        let handle = tokio::task::spawn_blocking(move || {
            info!("processing: {}", spec.name);
            let face = extract_face(&source, &spec);
            match image_helper::save_jpeg(&task_path, &face, quality) {
                Ok(()) => {
                    info!("saved: {}", task_path.display());
                    FaceOutcome::Saved
                }
                Err(err) => {
                    error!("{}: {}", spec.name, err);
                    FaceOutcome::Failed(err)
                }
            }
        });
        async move {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!("{}: {}", name, err);
                    FaceOutcome::Failed(worker_error(err))
                }
            };
            FaceReport {
                name,
                path,
                outcome,
            }
        }
    });

    join_all(tasks).await
}
