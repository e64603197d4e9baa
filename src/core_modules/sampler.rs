// THEORY:
// The sampler turns a fractional source coordinate into a color by blending the
// four texels around it. All blending is integer fixed-point: each fractional
// offset becomes a weight out of 256, the four products are summed, and the
// result is shifted right by 16 (one factor of 256 per axis). Truncation, not
// rounding, so output is bit-for-bit stable across platforms.
//
// The right and bottom neighbors are fetched through the buffer's wrap
// addressing, which is what lets a panorama's last column blend with its first.

use crate::core_modules::pixel::pixel::{Channel, Pixel};
use crate::core_modules::pixel_buffer::pixel_buffer::PixelBuffer;

/// Fixed-point value of a full weight.
pub const WEIGHT_ONE: u32 = 256;
const WEIGHT_SHIFT: u32 = 16;

/// Converts a fractional offset in `[0, 1)` to an integer weight in `0..=255`.
///
/// The result is clamped to at most 255, so the complementary weight
/// `WEIGHT_ONE - w` is always at least 1.
#[inline]
pub fn fixed_weight(fraction: f64) -> u32 {
    ((fraction * WEIGHT_ONE as f64) as u32).min(WEIGHT_ONE - 1)
}

#[inline]
fn blend(c00: Channel, c10: Channel, c01: Channel, c11: Channel, xki: u32, yki: u32) -> Channel {
    let xk = WEIGHT_ONE - xki;
    let yk = WEIGHT_ONE - yki;
    let top = c00 as u32 * xk + c10 as u32 * xki;
    let bottom = c01 as u32 * xk + c11 as u32 * xki;
    ((top * yk + bottom * yki) >> WEIGHT_SHIFT) as Channel
}

/// Bilinearly samples `buffer` at `(x + x_frac, y + y_frac)`.
///
/// `x` and `y` may lie outside the buffer; they are wrapped before any read.
pub fn sample(buffer: &PixelBuffer, x: i64, y: i64, x_frac: f64, y_frac: f64) -> Pixel {
    let x0 = buffer.wrap_x(x);
    let y0 = buffer.wrap_y(y);
    let x1 = buffer.wrap_x(x0 as i64 + 1);
    let y1 = buffer.wrap_y(y0 as i64 + 1);

    let p00 = buffer.get(x0, y0);
    let p10 = buffer.get(x1, y0);
    let p01 = buffer.get(x0, y1);
    let p11 = buffer.get(x1, y1);

    let xki = fixed_weight(x_frac);
    let yki = fixed_weight(y_frac);

    Pixel {
        red: blend(p00.red, p10.red, p01.red, p11.red, xki, yki),
        green: blend(p00.green, p10.green, p01.green, p11.green, xki, yki),
        blue: blend(p00.blue, p10.blue, p01.blue, p11.blue, xki, yki),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buffer.set(x, y, Pixel::new((x * 17) as u8, (y * 29) as u8, ((x + y) * 7) as u8));
            }
        }
        buffer
    }

    #[test]
    fn weights_cover_the_unit_interval() {
        assert_eq!(fixed_weight(0.0), 0);
        assert_eq!(fixed_weight(0.5), 128);
        assert_eq!(fixed_weight(0.999), 255);
        assert_eq!(fixed_weight(1.0), 255);
        assert_eq!(fixed_weight(-0.25), 0);
    }

    #[test]
    fn complement_weight_never_drops_to_zero() {
        for fraction in [0.0, 0.5, 0.996, 1.0 - f64::EPSILON, 1.0] {
            let weight = fixed_weight(fraction);
            assert!(weight <= 255, "{fraction}");
            assert!(WEIGHT_ONE - weight >= 1, "{fraction}");
        }
    }

    #[test]
    fn integer_coordinates_return_the_stored_texel() {
        let buffer = gradient(8, 5);
        for y in 0..5 {
            for x in 0..8 {
                assert_eq!(sample(&buffer, x as i64, y as i64, 0.0, 0.0), buffer.get(x, y));
            }
        }
    }

    #[test]
    fn midpoint_of_equal_texels_is_exact() {
        let color = Pixel::new(255, 0, 137);
        let buffer = PixelBuffer::filled(4, 4, color);
        assert_eq!(sample(&buffer, 1, 1, 0.5, 0.5), color);
        assert_eq!(sample(&buffer, 3, 3, 0.5, 0.5), color);
        assert_eq!(sample(&buffer, 2, 0, 0.73, 0.11), color);
    }

    #[test]
    fn past_the_edge_reads_wrap_to_the_start() {
        let buffer = gradient(6, 3);
        assert_eq!(sample(&buffer, 6, 0, 0.0, 0.0), sample(&buffer, 0, 0, 0.0, 0.0));
        assert_eq!(sample(&buffer, 6, 3, 0.0, 0.0), buffer.get(0, 0));
        assert_eq!(sample(&buffer, 12, 1, 0.25, 0.5), sample(&buffer, 0, 1, 0.25, 0.5));
    }

    #[test]
    fn last_column_blends_with_first() {
        let mut buffer = PixelBuffer::new(4, 1);
        buffer.set(0, 0, Pixel::new(200, 200, 200));
        let blended = sample(&buffer, 3, 0, 0.5, 0.0);
        assert_eq!(blended, Pixel::new(100, 100, 100));
    }

    #[test]
    fn blending_truncates() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set(1, 0, Pixel::new(200, 1, 3));
        // weight 255 for the right texel: 200 * 255 * 256 >> 16 = 199.2
        assert_eq!(sample(&buffer, 0, 0, 0.9999, 0.0), Pixel::new(199, 0, 2));
    }
}
