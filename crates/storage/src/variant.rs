//! Writing WEBP variants.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::fs;
use std::path::Path;
use tracing::instrument;
use webp::Encoder;

/// Fully decodes the image at `path`.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).or_raise(|| ErrorKind::Decode(path.to_path_buf()))
}

/// Height matching `width` for an image of `source` dimensions, never zero.
pub fn scaled_height(source: (u32, u32), width: u32) -> u32 {
    let (source_width, source_height) = source;
    if source_width == 0 {
        return 1;
    }
    let height = (u64::from(source_height) * u64::from(width) + u64::from(source_width) / 2) / u64::from(source_width);
    u32::try_from(height).unwrap_or(u32::MAX).max(1)
}

/// Resizes `image` to `width` pixels wide, keeping its aspect ratio, and
/// writes it with [`write_webp`].
///
/// Returns the dimensions written.
#[instrument(level = "debug", skip(image), fields(target = %target.display()))]
pub fn write_webp_variant(image: &DynamicImage, width: u32, quality: u8, target: &Path) -> Result<(u32, u32)> {
    let height = scaled_height(image.dimensions(), width);
    write_webp(&image.resize_exact(width, height, FilterType::Lanczos3), quality, target)
}

/// Writes `image` unscaled as a lossy WEBP of the given quality (0 to 100)
/// to `target`, creating parent folders.
///
/// Returns the dimensions written.
#[instrument(level = "debug", skip(image), fields(target = %target.display()))]
pub fn write_webp(image: &DynamicImage, quality: u8, target: &Path) -> Result<(u32, u32)> {
    let (width, height) = image.dimensions();
    // libwebp only takes 8-bit RGB(A).
    let encoded = match image.color().has_alpha() {
        true => Encoder::from_rgba(image.to_rgba8().as_raw(), width, height).encode_simple(false, f32::from(quality.min(100))),
        false => Encoder::from_rgb(image.to_rgb8().as_raw(), width, height).encode_simple(false, f32::from(quality.min(100))),
    };
    let encoded = encoded.map_err(|err| {
        tracing::debug!(?err, "WEBP encoding failed");
        ErrorKind::Encode(target.to_path_buf())
    })?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| ErrorKind::from_io(e, parent))?;
    }
    fs::write(target, &*encoded).map_err(|e| ErrorKind::from_io(e, target))?;
    Ok((width, height))
}

/// Deletes the variant at `target` if there is one.
///
/// Returns whether a file was removed.
pub fn remove_variant(target: &Path) -> Result<bool> {
    match fs::remove_file(target) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => exn::bail!(ErrorKind::from_io(err, target)),
    }
}
