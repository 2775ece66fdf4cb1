//! Header-only image inspection.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use image::{ImageFormat, ImageReader};
use std::path::Path;
use tracing::instrument;

/// Pixel dimensions and container format of an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Lower-case format name (`jpeg`, `png`, `webp`, ...).
    pub format: String,
}

/// Reads the dimensions and format of the image at `path`.
///
/// The format is sniffed from the file's magic bytes rather than trusted from
/// its extension, and only the header is decoded.
#[instrument(level = "trace")]
pub fn probe(path: &Path) -> Result<ImageInfo> {
    let reader = ImageReader::open(path)
        .map_err(|e| ErrorKind::from_io(e, path))?
        .with_guessed_format()
        .map_err(|e| ErrorKind::from_io(e, path))?;
    let format = reader.format().map(format_name).ok_or_else(|| ErrorKind::Decode(path.to_path_buf()))?;
    let (width, height) = reader.into_dimensions().or_raise(|| ErrorKind::Decode(path.to_path_buf()))?;
    Ok(ImageInfo { width, height, format })
}

/// Like [`probe`], but a missing or unreadable image is simply unknown.
pub fn try_probe(path: &Path) -> Option<ImageInfo> {
    match probe(path) {
        Ok(info) => Some(info),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %*err, "Image unavailable");
            None
        },
    }
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        other => format!("{other:?}").to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_image(path: &Path, width: u32, height: u32, format: ImageFormat) {
        RgbImage::from_pixel(width, height, Rgb([120, 80, 40])).save_with_format(path, format).unwrap();
    }

    #[test]
    fn test_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        write_image(&path, 30, 20, ImageFormat::Png);
        assert_eq!(
            probe(&path).unwrap(),
            ImageInfo {
                width: 30,
                height: 20,
                format: "png".to_string()
            }
        );
    }

    #[test]
    fn test_format_sniffed_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabelled.jpg");
        write_image(&path, 8, 12, ImageFormat::Png);
        let info = probe(&path).unwrap();
        assert_eq!(info.format, "png");
        assert_eq!((info.width, info.height), (8, 12));
    }

    #[test]
    fn test_jpeg_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        write_image(&path, 16, 9, ImageFormat::Jpeg);
        assert_eq!(probe(&path).unwrap().format, "jpeg");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        let err = probe(&path).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        assert_eq!(try_probe(&path), None);
    }

    #[test]
    fn test_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = probe(&path).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Decode(_)));
        assert_eq!(try_probe(&path), None);
    }
}
