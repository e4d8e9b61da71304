//! Image file decoding.

use super::PixelBuffer;
use crate::error::{Error, Result};
use std::path::Path;

/// Decode an image file into an RGB pixel buffer.
pub fn decode_image_file(path: &Path) -> Result<PixelBuffer> {
    let image = image::open(path).map_err(|e| Error::ImageDecode {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    Ok(PixelBuffer::from_rgb(image.to_rgb8()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_decode_png_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        let source = image::RgbImage::from_pixel(8, 6, image::Rgb([10, 20, 30]));
        source.save(&path).unwrap();

        let buffer = decode_image_file(&path).unwrap();
        assert_eq!(buffer.width(), 8);
        assert_eq!(buffer.height(), 6);
        assert_eq!(buffer.pixel(3, 2), [10, 20, 30]);
    }

    #[test]
    fn test_decode_missing_file_errors() {
        let result = decode_image_file(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(Error::ImageDecode { .. })));
    }

    #[test]
    fn test_decode_corrupt_file_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"not an image").unwrap();

        let result = decode_image_file(&path);
        assert!(matches!(result, Err(Error::ImageDecode { .. })));
    }
}
