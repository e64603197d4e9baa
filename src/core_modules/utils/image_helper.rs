pub mod image_helper {
    use crate::core_modules::pixel_buffer::pixel_buffer::PixelBuffer;
    use crate::error::CubemapError;
    use image::codecs::jpeg::JpegEncoder;
    use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageReader};
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::Path;

    /// Decodes any format `image` recognizes, sniffing the content rather than
    /// trusting the extension.
    pub fn load(path: &Path) -> Result<DynamicImage, CubemapError> {
        let load_error = |source: ImageError| CubemapError::Load {
            path: path.to_path_buf(),
            source,
        };
        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| load_error(ImageError::IoError(e)))?;
        reader.decode().map_err(load_error)
    }

    /// Writes `buffer` as a baseline JPEG. Alpha is dropped.
    pub fn save_jpeg(path: &Path, buffer: &PixelBuffer, quality: u8) -> Result<(), CubemapError> {
        let encode_error = |source: ImageError| CubemapError::Encode {
            path: path.to_path_buf(),
            source,
        };
        let output = File::create(path).map_err(|e| encode_error(ImageError::IoError(e)))?;
        let mut writer = BufWriter::new(output);
        let encoder = JpegEncoder::new_with_quality(&mut writer, quality);

        encoder
            .write_image(
                &buffer.to_rgb_bytes(),
                buffer.width(),
                buffer.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(encode_error)?;
        writer.flush().map_err(|e| encode_error(ImageError::IoError(e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::image_helper::*;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_buffer::pixel_buffer::PixelBuffer;
    use crate::error::CubemapError;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cubemap_vision_helper_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("Error creating scratch dir.");
        dir
    }

    #[test]
    fn save_red_face() {
        let dir = scratch_dir("red");
        let path = dir.join("red.jpg");
        let buffer = PixelBuffer::filled(32, 32, Pixel::new(255, 0, 0));

        save_jpeg(&path, &buffer, 90).expect("Error Saving File.");

        let decoded = image::open(&path).expect("Error Reading File.").to_rgb8();
        assert_eq!(decoded.dimensions(), (32, 32));
        let centre = decoded.get_pixel(16, 16).0;
        assert!(centre[0] > 200 && centre[1] < 60 && centre[2] < 60, "{centre:?}");
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let path = std::env::temp_dir().join("cubemap_vision_no_such_dir").join("face.jpg");
        let buffer = PixelBuffer::new(4, 4);
        let err = save_jpeg(&path, &buffer, 75).unwrap_err();
        assert!(matches!(err, CubemapError::Encode { .. }));
    }

    #[test]
    fn load_round_trips_a_png() {
        let dir = scratch_dir("png");
        let path = dir.join("panorama.png");
        let mut source = image::RgbImage::new(8, 4);
        source.put_pixel(3, 2, image::Rgb([10, 20, 30]));
        source.save(&path).expect("Error Saving File.");

        let loaded = load(&path).expect("Error Loading File.");
        assert_eq!(loaded.to_rgb8().get_pixel(3, 2).0, [10, 20, 30]);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn load_missing_file_is_a_load_error() {
        let err = load(std::path::Path::new("/definitely/not/here.jpg")).unwrap_err();
        assert!(matches!(err, CubemapError::Load { .. }));
    }
}
