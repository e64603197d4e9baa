// THEORY:
// The `PixelBuffer` is the raster every other module reads from or writes to: a
// row-major, interleaved RGBA byte vector with a fixed width and height.
//
// Key architectural principles:
// 1.  **Flat Storage**: Texel `(x, y)` starts at byte `(x + y * width) * 4`. The
//     length invariant `pixels.len() == width * height * 4` is established at
//     construction and never broken afterwards.
// 2.  **Toroidal Addressing**: An equirectangular panorama wraps around
//     horizontally, and the projection formulas produce coordinates up to a few
//     extents past the edge. `normalize` folds any integer coordinate back into
//     `[0, extent)`, so sampling past the last column continues from the first.
// 3.  **Unchecked Hot Path**: `get` and `set` trust the caller to pass in-range
//     coordinates. Range safety comes from `normalize`, not from the accessor.
// 4.  **Column Strips**: The parallel normalization phase produces independent
//     column strips; `blit_columns` stitches one strip into its own column range.

pub mod pixel_buffer {
    use crate::core_modules::pixel::pixel::{Byte, CHANNELS, OPAQUE, Pixel};
    use crate::error::CubemapError;
    use image::RgbaImage;

    /// Folds an integer coordinate into `[0, extent)`.
    ///
    /// For non-negative inputs this is the same as subtracting `extent` until the
    /// value is in range. Negative inputs wrap from the far edge.
    pub fn normalize(position: i64, extent: u32) -> u32 {
        debug_assert!(extent > 0, "cannot wrap into an empty axis");
        position.rem_euclid(extent as i64) as u32
    }

    /// A row-major, interleaved RGBA raster.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PixelBuffer {
        width: u32,
        height: u32,
        pixels: Vec<Byte>,
    }

    impl PixelBuffer {
        /// Allocates an opaque black buffer.
        pub fn new(width: u32, height: u32) -> Self {
            Self::filled(width, height, Pixel::BLACK)
        }

        /// Allocates an opaque buffer where every texel is `color`.
        pub fn filled(width: u32, height: u32, color: Pixel) -> Self {
            let texel = [color.red, color.green, color.blue, OPAQUE];
            let count = width as usize * height as usize;
            let mut pixels = Vec::with_capacity(count * CHANNELS);
            for _ in 0..count {
                pixels.extend_from_slice(&texel);
            }
            Self {
                width,
                height,
                pixels,
            }
        }

        /// Wraps an existing RGBA byte vector.
        pub fn from_raw(width: u32, height: u32, pixels: Vec<Byte>) -> Result<Self, CubemapError> {
            let expected = width as usize * height as usize * CHANNELS;
            if pixels.len() != expected {
                return Err(CubemapError::BufferSize {
                    expected,
                    actual: pixels.len(),
                });
            }
            Ok(Self {
                width,
                height,
                pixels,
            })
        }

        /// Takes ownership of an already-interleaved RGBA image without copying.
        pub fn from_rgba_image(image: RgbaImage) -> Self {
            let (width, height) = image.dimensions();
            Self {
                width,
                height,
                pixels: image.into_raw(),
            }
        }

        pub fn into_rgba_image(self) -> Result<RgbaImage, CubemapError> {
            let expected = self.width as usize * self.height as usize * CHANNELS;
            let actual = self.pixels.len();
            RgbaImage::from_raw(self.width, self.height, self.pixels)
                .ok_or(CubemapError::BufferSize { expected, actual })
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        pub fn as_bytes(&self) -> &[Byte] {
            &self.pixels
        }

        /// Packs the color channels into a tightly interleaved RGB vector.
        pub fn to_rgb_bytes(&self) -> Vec<Byte> {
            let mut rgb = Vec::with_capacity(self.pixels.len() / CHANNELS * 3);
            for texel in self.pixels.chunks_exact(CHANNELS) {
                rgb.extend_from_slice(&texel[..3]);
            }
            rgb
        }

        #[inline]
        fn offset(&self, x: u32, y: u32) -> usize {
            (x as usize + y as usize * self.width as usize) * CHANNELS
        }

        /// Reads the color at `(x, y)`. Both coordinates must already be in range.
        #[inline]
        pub fn get(&self, x: u32, y: u32) -> Pixel {
            let o = self.offset(x, y);
            Pixel::new(self.pixels[o], self.pixels[o + 1], self.pixels[o + 2])
        }

        /// Writes the color at `(x, y)`, leaving alpha untouched.
        #[inline]
        pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
            let o = self.offset(x, y);
            self.pixels[o] = pixel.red;
            self.pixels[o + 1] = pixel.green;
            self.pixels[o + 2] = pixel.blue;
        }

        #[inline]
        pub fn wrap_x(&self, x: i64) -> u32 {
            normalize(x, self.width)
        }

        #[inline]
        pub fn wrap_y(&self, y: i64) -> u32 {
            normalize(y, self.height)
        }

        /// Copies a row-major RGBA strip `strip_width` columns wide into the
        /// columns starting at `x_start`. Returns an error if the strip does not
        /// fit or its length disagrees with its dimensions.
        pub fn blit_columns(
            &mut self,
            x_start: u32,
            strip_width: u32,
            strip: &[Byte],
        ) -> Result<(), CubemapError> {
            let row_len = strip_width as usize * CHANNELS;
            let expected = row_len * self.height as usize;
            if strip.len() != expected || x_start as u64 + strip_width as u64 > self.width as u64 {
                return Err(CubemapError::BufferSize {
                    expected,
                    actual: strip.len(),
                });
            }
            if row_len == 0 {
                return Ok(());
            }
            for (y, row) in strip.chunks_exact(row_len).enumerate() {
                let o = self.offset(x_start, y as u32);
                self.pixels[o..o + row_len].copy_from_slice(row);
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn new_buffer_is_opaque_black() {
            let buffer = PixelBuffer::new(3, 2);
            assert_eq!(buffer.as_bytes().len(), 3 * 2 * 4);
            for texel in buffer.as_bytes().chunks(4) {
                assert_eq!(texel, &[0, 0, 0, 255]);
            }
        }

        #[test]
        fn set_then_get_keeps_alpha() {
            let mut buffer = PixelBuffer::new(4, 4);
            buffer.set(2, 3, Pixel::new(10, 20, 30));
            assert_eq!(buffer.get(2, 3), Pixel::new(10, 20, 30));
            let o = (2 + 3 * 4) * 4;
            assert_eq!(buffer.as_bytes()[o + 3], 255);
            assert_eq!(buffer.get(3, 3), Pixel::BLACK);
        }

        #[test]
        fn normalize_wraps_past_the_edge() {
            assert_eq!(normalize(0, 512), 0);
            assert_eq!(normalize(511, 512), 511);
            assert_eq!(normalize(512, 512), 0);
            assert_eq!(normalize(513, 512), 1);
            assert_eq!(normalize(1024, 512), 0);
            assert_eq!(normalize(-1, 512), 511);
        }

        #[test]
        fn from_raw_rejects_wrong_length() {
            let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
            assert!(matches!(
                err,
                CubemapError::BufferSize {
                    expected: 16,
                    actual: 15
                }
            ));
            assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
        }

        #[test]
        fn rgba_image_bridge_keeps_bytes() {
            let mut buffer = PixelBuffer::new(2, 1);
            buffer.set(1, 0, Pixel::new(1, 2, 3));
            let image = buffer.clone().into_rgba_image().unwrap();
            assert_eq!(image.get_pixel(1, 0).0, [1, 2, 3, 255]);
            assert_eq!(PixelBuffer::from_rgba_image(image), buffer);
        }

        #[test]
        fn rgb_bytes_drop_alpha() {
            let buffer = PixelBuffer::filled(2, 1, Pixel::new(9, 8, 7));
            assert_eq!(buffer.to_rgb_bytes(), vec![9, 8, 7, 9, 8, 7]);
        }

        #[test]
        fn blit_columns_writes_only_its_range() {
            let mut buffer = PixelBuffer::new(4, 2);
            let strip: Vec<u8> = [
                [5, 5, 5, 255],
                [6, 6, 6, 255],
                [7, 7, 7, 255],
                [8, 8, 8, 255],
            ]
            .concat();
            buffer.blit_columns(1, 2, &strip).unwrap();
            assert_eq!(buffer.get(0, 0), Pixel::BLACK);
            assert_eq!(buffer.get(1, 0), Pixel::new(5, 5, 5));
            assert_eq!(buffer.get(2, 0), Pixel::new(6, 6, 6));
            assert_eq!(buffer.get(1, 1), Pixel::new(7, 7, 7));
            assert_eq!(buffer.get(2, 1), Pixel::new(8, 8, 8));
            assert_eq!(buffer.get(3, 1), Pixel::BLACK);
        }

        #[test]
        fn blit_columns_rejects_overflowing_strip() {
            let mut buffer = PixelBuffer::new(4, 1);
            assert!(buffer.blit_columns(3, 2, &[0; 8]).is_err());
        }
    }
}
