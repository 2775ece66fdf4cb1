//! Catalog generation from the image tree.
//!
//! Every supported file in a photographer's `originals` folder becomes one
//! [`CatalogRecord`]. Metadata comes from the structured filename; the
//! `sizes_info` column lists the size folders that hold a readable copy of
//! the image.

mod record;

pub use self::record::{CatalogRecord, HEADER, SizeVariant, Sizes};

use crate::error::{ErrorKind, Result};
use crate::table::write_records;
use crate::url::UrlGenerator;
use exn::ResultExt;
use mosaic_extract::models::{AliasTable, NudityTokens, Orientation};
use mosaic_extract::{ParsedName, canonical_filename, resolve_author, split_extension};
use mosaic_storage::{ImageLibrary, Photographer, SizeFolder, try_probe};
use std::path::Path;
use tracing::instrument;

/// Everything catalog generation needs besides the image tree.
pub struct CatalogOptions {
    pub aliases: AliasTable,
    pub nudity_tokens: NudityTokens,
    /// Take the orientation from the original's dimensions when the filename
    /// has no orientation tag.
    pub infer_orientation: bool,
    pub urls: UrlGenerator,
}

/// Outcome of [`write_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogReport {
    pub images: usize,
    /// Size variants recorded across all images.
    pub variants: usize,
    /// Images without a single readable variant.
    pub unmeasured: usize,
}
impl CatalogReport {
    pub fn from_records(records: &[CatalogRecord]) -> Self {
        Self {
            images: records.len(),
            variants: records.iter().map(|record| record.sizes.len()).sum(),
            unmeasured: records.iter().filter(|record| record.sizes.is_empty()).count(),
        }
    }
}

/// Builds a record for every original image, photographers and files in name
/// order.
#[instrument(skip(library, options), fields(root = %library.root().display()))]
pub fn generate_catalog(library: &ImageLibrary, options: &CatalogOptions) -> Result<Vec<CatalogRecord>> {
    let mut records = Vec::new();
    for photographer in library.photographers().or_raise(|| ErrorKind::Storage)? {
        let originals = photographer.originals().or_raise(|| ErrorKind::Storage)?;
        tracing::debug!(photographer = %photographer.slug, images = originals.len(), "Cataloguing photographer");
        for filename in originals {
            records.push(catalog_image(&photographer, &filename, options)?);
        }
    }
    Ok(records)
}

/// Writes `records` as a catalog table.
pub fn write_catalog(path: &Path, records: &[CatalogRecord]) -> Result<CatalogReport> {
    let rows = records.iter().map(CatalogRecord::fields).collect::<Result<Vec<_>>>()?;
    write_records(path, HEADER, rows)?;
    let report = CatalogReport::from_records(records);
    tracing::info!(
        path = %path.display(),
        images = report.images,
        variants = report.variants,
        unmeasured = report.unmeasured,
        "Wrote catalog"
    );
    Ok(report)
}

fn catalog_image(photographer: &Photographer, filename: &str, options: &CatalogOptions) -> Result<CatalogRecord> {
    let canonical = canonical_filename(filename);
    let parsed = ParsedName::parse(filename, options.nudity_tokens);
    let author = resolve_author(&options.aliases, &parsed.author, filename);
    tracing::trace!(%filename, author = %author.name, rule = %author.rule, "Resolved author");

    let sizes = probe_sizes(photographer, &canonical, &options.urls)?;
    let orientation = match parsed.orientation {
        Some(orientation) => Some(orientation),
        None if options.infer_orientation => photographer
            .file(SizeFolder::Originals.as_str(), filename)
            .ok()
            .and_then(|path| try_probe(&path))
            .map(|info| Orientation::from_dimensions(info.width, info.height)),
        None => None,
    };

    Ok(CatalogRecord {
        base_url: options.urls.base_url(&photographer.slug)?,
        filename: canonical,
        author: author.name,
        title: parsed.title,
        year: parsed.year.unwrap_or_default(),
        orientation: orientation.map(|o| o.as_str().to_string()).unwrap_or_default(),
        color: parsed.color.map(|c| c.as_str().to_string()).unwrap_or_default(),
        nudity: parsed.nudity.as_str().to_string(),
        description: parsed.description,
        sizes,
    })
}

/// Looks for `canonical` in each existing size folder.
///
/// JPEG originals are converted for `originalsWEBP`, so that folder is
/// searched for the `.webp` sibling instead. Every other folder is searched
/// for the canonical name as is.
fn probe_sizes(photographer: &Photographer, canonical: &str, urls: &UrlGenerator) -> Result<Sizes> {
    let (stem, ext) = split_extension(canonical);
    let webp = format!("{stem}.webp");
    let mut sizes = Sizes::default();
    for folder in SizeFolder::ALL {
        if !photographer.has_folder(folder.as_str()) {
            continue;
        }
        let name = match folder {
            SizeFolder::OriginalsWebp if ext.eq_ignore_ascii_case(".jpg") => webp.as_str(),
            _ => canonical,
        };
        let info = match photographer.file(folder.as_str(), name) {
            Ok(path) => try_probe(&path),
            Err(err) => {
                tracing::warn!(photographer = %photographer.slug, %name, error = %*err, "Skipping unsafe variant path");
                None
            },
        };
        if let Some(info) = info {
            sizes.insert(folder, SizeVariant {
                url: urls.variant_url(&photographer.slug, folder.as_str(), name)?,
                format: info.format,
                width: info.width,
                height: info.height,
            });
        }
    }
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Encoding, Table};
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::TempDir;

    const CDN: &str = "https://cdn.example/collection";

    fn options(infer_orientation: bool) -> CatalogOptions {
        CatalogOptions {
            aliases: AliasTable::default(),
            nudity_tokens: NudityTokens::default(),
            infer_orientation,
            urls: UrlGenerator::new("{{ cdn }}/{{ photographer }}/{{ size }}/{{ filename }}", CDN).unwrap(),
        }
    }

    fn save(root: &Path, relative: &str, width: u32, height: u32) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbImage::from_pixel(width, height, Rgb([90, 60, 30])).save(path).unwrap();
    }

    fn catalog(dir: &TempDir, infer_orientation: bool) -> Vec<CatalogRecord> {
        let library = ImageLibrary::open(dir.path()).unwrap();
        generate_catalog(&library, &options(infer_orientation)).unwrap()
    }

    #[test]
    fn test_durieu_record() {
        let dir = tempfile::tempdir().unwrap();
        let name = "000_aaa_durieu_portrait_year-1860_vertical_bw.jpg";
        save(dir.path(), &format!("eugene-durieu/originals/{name}"), 30, 40);
        save(dir.path(), "eugene-durieu/originalsWEBP/000_aaa_durieu_portrait_year-1860_vertical_bw.webp", 30, 40);
        save(dir.path(), &format!("eugene-durieu/w400/{name}"), 20, 26);

        let records = catalog(&dir, false);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.base_url, format!("{CDN}/eugene-durieu/{{size}}"));
        assert_eq!(record.filename, name);
        assert_eq!(record.author, "Eugene Durieu");
        assert_eq!(record.title, "portrait");
        assert_eq!(record.year, "1860");
        assert_eq!(record.orientation, "vertical");
        assert_eq!(record.color, "bw");
        assert_eq!(record.nudity, "nude");
        assert_eq!(record.description, "Portrait.");

        let folders: Vec<_> = record.sizes.iter().map(|(folder, _)| folder).collect();
        assert_eq!(folders, [SizeFolder::Originals, SizeFolder::OriginalsWebp, SizeFolder::W400]);
        let webp = record.sizes.get(SizeFolder::OriginalsWebp).unwrap();
        assert_eq!(webp.format, "webp");
        assert_eq!(webp.url, format!("{CDN}/eugene-durieu/originalsWEBP/000_aaa_durieu_portrait_year-1860_vertical_bw.webp"));
        let w400 = record.sizes.get(SizeFolder::W400).unwrap();
        assert_eq!((w400.width, w400.height, w400.format.as_str()), (20, 26, "jpeg"));
    }

    #[test]
    fn test_missing_webp_sibling_is_omitted() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "edward-weston/originals/weston_pepper.jpg", 10, 10);
        // Only a jpg copy in originalsWEBP, which is not what is looked for.
        save(dir.path(), "edward-weston/originalsWEBP/weston_pepper.jpg", 10, 10);

        let records = catalog(&dir, false);
        assert!(records[0].sizes.get(SizeFolder::OriginalsWebp).is_none());
        assert!(records[0].sizes.get(SizeFolder::Originals).is_some());
    }

    #[test]
    fn test_png_uses_own_name_in_originals_webp() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "edward-weston/originals/weston_shell.png", 10, 10);
        save(dir.path(), "edward-weston/originalsWEBP/weston_shell.png", 10, 10);

        let records = catalog(&dir, false);
        let variant = records[0].sizes.get(SizeFolder::OriginalsWebp).unwrap();
        assert!(variant.url.ends_with("/originalsWEBP/weston_shell.png"));
        assert_eq!(variant.format, "png");
    }

    #[test]
    fn test_ms_suffix_matches_plain_name() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "j-smith/originals/jsmith_title_ms.jpg", 10, 10);
        save(dir.path(), "j-smith/w400/jsmith_title.jpg", 10, 10);
        save(dir.path(), "k-smith/originals/jsmith_title.jpg", 10, 10);
        save(dir.path(), "k-smith/w400/jsmith_title.jpg", 10, 10);

        let records = catalog(&dir, false);
        assert_eq!(records.len(), 2);
        let (ms, plain) = (&records[0], &records[1]);
        assert_eq!(ms.filename, plain.filename);
        assert_eq!(ms.author, plain.author);
        assert_eq!(ms.title, plain.title);
        assert_eq!(ms.description, plain.description);
        assert!(ms.sizes.get(SizeFolder::W400).is_some());
        // The `_ms` original itself is only published under its plain name.
        assert!(ms.sizes.get(SizeFolder::Originals).is_none());
    }

    #[test]
    fn test_skips_unsupported_and_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "edward-weston/originals/weston_pepper.jpg", 10, 10);
        fs::write(dir.path().join("edward-weston/originals/notes.txt"), "notes").unwrap();
        fs::write(dir.path().join("edward-weston/originals/weston_broken.JPG"), "not a jpeg").unwrap();
        fs::create_dir_all(dir.path().join("no-originals/w400")).unwrap();

        let records = catalog(&dir, false);
        let filenames: Vec<_> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(filenames, ["weston_broken.JPG", "weston_pepper.jpg"]);
        assert!(records[0].sizes.is_empty());
        assert_eq!(CatalogReport::from_records(&records), CatalogReport {
            images: 2,
            variants: 1,
            unmeasured: 1
        });
    }

    #[test]
    fn test_infer_orientation() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "edward-weston/originals/weston_dunes.jpg", 40, 20);
        save(dir.path(), "edward-weston/originals/weston_nude_vertical.jpg", 40, 20);

        let records = catalog(&dir, false);
        assert_eq!(records[0].orientation, "");

        let records = catalog(&dir, true);
        assert_eq!(records[0].orientation, "horizontal");
        // An orientation tag always wins over the dimensions.
        assert_eq!(records[1].orientation, "vertical");
    }

    #[test]
    fn test_write_catalog() {
        let dir = tempfile::tempdir().unwrap();
        save(dir.path(), "images/fred-holland-day/originals/fred-holland-day_morning-walk_year-1905_sepia.jpg", 12, 8);
        let library = ImageLibrary::open(dir.path().join("images")).unwrap();
        let records = generate_catalog(&library, &options(false)).unwrap();
        let output = dir.path().join("catalog.csv");

        let report = write_catalog(&output, &records).unwrap();
        assert_eq!(report.images, 1);

        let table = Table::read(&output, Encoding::Utf8).unwrap();
        assert_eq!(table.headers.iter().collect::<Vec<_>>(), HEADER);
        let row = &table.rows[0];
        assert_eq!(&row[2], "Fred Holland Day");
        assert_eq!(&row[3], "morning-walk");
        assert_eq!(&row[6], "sepia");
        assert_eq!(&row[8], "Morning walk.");
        assert_eq!(
            &row[9],
            format!(
                r#"{{"originals": {{"url": "{CDN}/fred-holland-day/originals/fred-holland-day_morning-walk_year-1905_sepia.jpg", "format": "jpeg", "width": 12, "height": 8}}}}"#
            )
        );
    }
}
