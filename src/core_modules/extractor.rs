// THEORY:
// The extractor is the per-face inner loop. It walks the square output grid,
// maps each pixel to face-local coordinates in `[-1, 1]` (inverted on both axes,
// so pixel (0, 0) sits at `(1, 1)`), asks the projection where that lands in the
// panorama, and writes the bilinear sample there. Every output pixel is
// independent of every other one; nothing is shared but the read-only source.

use crate::core_modules::face::FaceSpec;
use crate::core_modules::pixel_buffer::pixel_buffer::PixelBuffer;
use crate::core_modules::projection::Projection;
use crate::core_modules::sampler;

/// Renders one `output_width × output_width` face from `source`.
pub fn extract(
    source: &PixelBuffer,
    output_width: u32,
    projection: Projection,
    h_rot: f64,
) -> PixelBuffer {
    let mut face = PixelBuffer::new(output_width, output_width);
    if output_width == 0 || source.width() == 0 || source.height() == 0 {
        return face;
    }

    let src_width = source.width() as f64;
    let src_height = source.height() as f64;
    let step = 2.0 / output_width as f64;

    for j in 0..output_width {
        let rj = 1.0 - j as f64 * step;
        for i in 0..output_width {
            let ri = 1.0 - i as f64 * step;
            let coord = projection.project(ri, rj, h_rot, src_width, src_height);
            let pixel = sampler::sample(source, coord.x, coord.y, coord.x_frac, coord.y_frac);
            face.set(i, j, pixel);
        }
    }
    face
}

pub fn extract_face(source: &PixelBuffer, spec: &FaceSpec) -> PixelBuffer {
    extract(source, spec.output_width, spec.projection, spec.horizontal_rotation)
}
