//! Regeneration of WEBP variants from the originals.
//!
//! [`convert_originals`] writes a full-size `<stem>.webp` of every original to
//! `originalsWEBP`. [`resize_variants`] maintains the width buckets: for every
//! original and every target width, the `w<width>` folder should hold a
//! `<stem>.webp` copy exactly when the original is at least that wide, and
//! copies that would be upscaled are removed.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use image::DynamicImage;
use mosaic_extract::split_extension;
use mosaic_storage::{
    ImageLibrary, Photographer, SizeFolder, open_image, remove_variant, try_probe, write_webp, write_webp_variant,
};
use tracing::instrument;

/// Outcome of [`resize_variants`] and [`convert_originals`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeReport {
    /// Variants (re)written.
    pub written: usize,
    /// Upscaled variants deleted.
    pub removed: usize,
    /// Originals whose dimensions could not be read.
    pub skipped: usize,
    /// Variants that could not be written or removed.
    pub failed: usize,
}
impl ResizeReport {
    fn merge(&mut self, other: ResizeReport) {
        self.written += other.written;
        self.removed += other.removed;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

fn select(library: &ImageLibrary, only: Option<&str>) -> Result<Vec<Photographer>> {
    match only {
        Some(slug) => {
            let photographer = library.photographer(slug).or_raise(|| ErrorKind::Storage)?;
            if !photographer.has_folder(SizeFolder::Originals.as_str()) {
                exn::bail!(ErrorKind::UnknownPhotographer(slug.to_string()));
            }
            Ok(vec![photographer])
        },
        None => library.photographers().or_raise(|| ErrorKind::Storage),
    }
}

fn webp_name(filename: &str) -> String {
    let (stem, _) = split_extension(filename);
    format!("{stem}.webp")
}

/// Writes a full-size WEBP copy of every original to `originalsWEBP`, for
/// every photographer or only `only`.
#[instrument(skip(library), fields(root = %library.root().display()))]
pub fn convert_originals(library: &ImageLibrary, quality: u8, only: Option<&str>) -> Result<ResizeReport> {
    let photographers = select(library, only)?;
    let mut report = ResizeReport::default();
    for photographer in &photographers {
        for filename in photographer.originals().or_raise(|| ErrorKind::Storage)? {
            let source = photographer.file(SizeFolder::Originals.as_str(), &filename).or_raise(|| ErrorKind::Storage)?;
            let target = photographer
                .file(SizeFolder::OriginalsWebp.as_str(), &webp_name(&filename))
                .or_raise(|| ErrorKind::Storage)?;
            let image = match open_image(&source) {
                Ok(image) => image,
                Err(err) => {
                    tracing::warn!(path = %source.display(), error = %*err, "Skipping undecodable original");
                    report.skipped += 1;
                    continue;
                },
            };
            match write_webp(&image, quality, &target) {
                Ok(_) => {
                    tracing::debug!(path = %target.display(), "Converted original");
                    report.written += 1;
                },
                Err(err) => {
                    tracing::warn!(path = %target.display(), error = %*err, "Could not convert original");
                    report.failed += 1;
                },
            }
        }
    }
    tracing::info!(
        photographers = photographers.len(),
        written = report.written,
        skipped = report.skipped,
        failed = report.failed,
        "Converted originals"
    );
    Ok(report)
}

/// Rebuilds the resized variants of every photographer, or only of `only`.
#[instrument(skip(library, widths), fields(root = %library.root().display()))]
pub fn resize_variants(library: &ImageLibrary, widths: &[u32], quality: u8, only: Option<&str>) -> Result<ResizeReport> {
    let photographers = select(library, only)?;
    let mut report = ResizeReport::default();
    for photographer in &photographers {
        for filename in photographer.originals().or_raise(|| ErrorKind::Storage)? {
            report.merge(resize_original(photographer, &filename, widths, quality)?);
        }
    }
    tracing::info!(
        photographers = photographers.len(),
        written = report.written,
        removed = report.removed,
        skipped = report.skipped,
        failed = report.failed,
        "Resized variants"
    );
    Ok(report)
}

fn resize_original(photographer: &Photographer, filename: &str, widths: &[u32], quality: u8) -> Result<ResizeReport> {
    let mut report = ResizeReport::default();
    let source = photographer.file(SizeFolder::Originals.as_str(), filename).or_raise(|| ErrorKind::Storage)?;
    let Some(info) = try_probe(&source) else {
        tracing::warn!(path = %source.display(), "Skipping unreadable original");
        report.skipped += 1;
        return Ok(report);
    };
    let variant_name = webp_name(filename);

    // Decoded on first use; originals narrower than every width are never decoded.
    let mut image: Option<DynamicImage> = None;
    for &width in widths {
        let target = photographer
            .file(&SizeFolder::folder_for_width(width), &variant_name)
            .or_raise(|| ErrorKind::Storage)?;

        if info.width < width {
            match remove_variant(&target) {
                Ok(true) => {
                    tracing::info!(path = %target.display(), "Deleted upscaled variant");
                    report.removed += 1;
                },
                Ok(false) => {},
                Err(err) => {
                    tracing::warn!(path = %target.display(), error = %*err, "Could not delete upscaled variant");
                    report.failed += 1;
                },
            }
            continue;
        }

        let decoded = match image.take() {
            Some(decoded) => decoded,
            None => match open_image(&source) {
                Ok(decoded) => decoded,
                Err(err) => {
                    tracing::warn!(path = %source.display(), error = %*err, "Skipping undecodable original");
                    report.skipped += 1;
                    return Ok(report);
                },
            },
        };
        match write_webp_variant(&decoded, width, quality, &target) {
            Ok(_) => {
                tracing::debug!(path = %target.display(), width, "Wrote variant");
                report.written += 1;
            },
            Err(err) => {
                tracing::warn!(path = %target.display(), error = %*err, "Could not write variant");
                report.failed += 1;
            },
        }
        image = Some(decoded);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogOptions, generate_catalog};
    use crate::url::UrlGenerator;
    use image::{Rgb, RgbImage};
    use mosaic_extract::models::{AliasTable, NudityTokens};
    use mosaic_storage::probe;
    use std::fs;
    use std::path::Path;

    fn save(root: &Path, relative: &str, width: u32, height: u32) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbImage::from_pixel(width, height, Rgb([200, 100, 50])).save(path).unwrap();
    }

    #[test]
    fn test_writes_and_removes_variants() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "anne-brigman/originals/brigman_soul-of-the-blasted-pine.jpg", 700, 350);
        // Left over from an earlier, larger original.
        save(dir.path(), "anne-brigman/w800/brigman_soul-of-the-blasted-pine.webp", 800, 400);
        let library = ImageLibrary::open(dir.path()).unwrap();

        let report = resize_variants(&library, &[400, 600, 800, 1200], 85, None).unwrap();
        assert_eq!(report, ResizeReport {
            written: 2,
            removed: 1,
            skipped: 0,
            failed: 0
        });

        let w400 = probe(&dir.path().join("anne-brigman/w400/brigman_soul-of-the-blasted-pine.webp")).unwrap();
        assert_eq!((w400.width, w400.height, w400.format.as_str()), (400, 200, "webp"));
        assert!(dir.path().join("anne-brigman/w600/brigman_soul-of-the-blasted-pine.webp").is_file());
        assert!(!dir.path().join("anne-brigman/w800/brigman_soul-of-the-blasted-pine.webp").exists());
        assert!(!dir.path().join("anne-brigman/w1200").exists());
    }

    #[test]
    fn test_exact_width_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "demachy/originals/demachy_struggle.png", 400, 400);
        let library = ImageLibrary::open(dir.path()).unwrap();

        let report = resize_variants(&library, &[400], 85, None).unwrap();
        assert_eq!(report.written, 1);
        assert!(dir.path().join("demachy/w400/demachy_struggle.webp").is_file());
    }

    #[test]
    fn test_skips_unreadable_originals() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("demachy/originals")).unwrap();
        fs::write(dir.path().join("demachy/originals/demachy_broken.jpg"), b"broken").unwrap();
        let library = ImageLibrary::open(dir.path()).unwrap();

        let report = resize_variants(&library, &[400], 85, None).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.written, 0);
    }

    #[test]
    fn test_single_photographer() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "demachy/originals/demachy_struggle.jpg", 500, 500);
        save(dir.path(), "weston/originals/weston_pepper.jpg", 500, 500);
        let library = ImageLibrary::open(dir.path()).unwrap();

        let report = resize_variants(&library, &[400], 85, Some("weston")).unwrap();
        assert_eq!(report.written, 1);
        assert!(!dir.path().join("demachy/w400").exists());

        let err = resize_variants(&library, &[400], 85, Some("nobody")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownPhotographer(_)));
        let err = resize_variants(&library, &[400], 85, Some("../weston")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Storage));
    }

    #[test]
    fn test_convert_originals_feeds_catalog() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "durieu/originals/durieu_portrait_year-1860.jpg", 30, 40);
        save(dir.path(), "durieu/originals/durieu_study.png", 20, 10);
        fs::create_dir_all(dir.path().join("weston/originals")).unwrap();
        fs::write(dir.path().join("weston/originals/weston_broken.jpg"), b"broken").unwrap();
        let library = ImageLibrary::open(dir.path()).unwrap();

        let report = convert_originals(&library, 95, None).unwrap();
        assert_eq!(report, ResizeReport {
            written: 2,
            removed: 0,
            skipped: 1,
            failed: 0
        });
        let converted = probe(&dir.path().join("durieu/originalsWEBP/durieu_portrait_year-1860.webp")).unwrap();
        assert_eq!((converted.width, converted.height, converted.format.as_str()), (30, 40, "webp"));
        assert!(dir.path().join("durieu/originalsWEBP/durieu_study.webp").is_file());

        let options = CatalogOptions {
            aliases: AliasTable::default(),
            nudity_tokens: NudityTokens::default(),
            infer_orientation: false,
            urls: UrlGenerator::new("{{ cdn }}/{{ photographer }}/{{ size }}/{{ filename }}", "https://cdn.example").unwrap(),
        };
        let records = generate_catalog(&library, &options).unwrap();
        let portrait = records.iter().find(|r| r.filename == "durieu_portrait_year-1860.jpg").unwrap();
        let webp = portrait.sizes.get(SizeFolder::OriginalsWebp).unwrap();
        assert_eq!(webp.url, "https://cdn.example/durieu/originalsWEBP/durieu_portrait_year-1860.webp");
        assert_eq!((webp.width, webp.height, webp.format.as_str()), (30, 40, "webp"));
    }

    #[test]
    fn test_convert_single_photographer() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "durieu/originals/durieu_portrait.jpg", 10, 10);
        save(dir.path(), "weston/originals/weston_pepper.jpg", 10, 10);
        let library = ImageLibrary::open(dir.path()).unwrap();

        assert_eq!(convert_originals(&library, 95, Some("weston")).unwrap().written, 1);
        assert!(!dir.path().join("durieu/originalsWEBP").exists());
        let err = convert_originals(&library, 95, Some("nobody")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownPhotographer(_)));
    }
}
