//! Print-quality annotation from original image dimensions.

use crate::error::Result;
use crate::table::{Encoding, Table, set_field};
use mosaic_extract::models::PrintQuality;
use mosaic_storage::{FolderTable, ImageInfo, ImageLibrary, SizeFolder, try_probe};
use std::path::Path;
use tracing::instrument;

const AUTHOR: &str = "author";
const FILENAME: &str = "filename";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const PRINT_QUALITY: &str = "print_quality";

/// Outcome of [`annotate_quality`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityReport {
    pub rows: usize,
    /// Rows whose original image was found and measured.
    pub measured: usize,
    /// Rows whose original image was missing or unreadable.
    pub missing: usize,
}

/// Annotates each row of `table` with the dimensions and print-quality tier of
/// its original image.
///
/// The `width`, `height` and `print_quality` columns are appended when absent
/// and overwritten otherwise; rows without a measurable image get blanks.
pub fn annotate_table(table: &mut Table, library: &ImageLibrary, folders: &FolderTable) -> QualityReport {
    let author_idx = table.column(AUTHOR);
    let filename_idx = table.column(FILENAME);
    let width_idx = table.ensure_column(WIDTH);
    let height_idx = table.ensure_column(HEIGHT);
    let quality_idx = table.ensure_column(PRINT_QUALITY);

    let mut report = QualityReport {
        rows: table.rows.len(),
        ..Default::default()
    };
    for row in table.rows.iter_mut() {
        let author = author_idx.and_then(|idx| row.get(idx)).unwrap_or_default().trim().to_string();
        let filename = filename_idx.and_then(|idx| row.get(idx)).unwrap_or_default().trim().to_string();

        let (width, height, quality) = match locate(library, folders, &author, &filename).as_deref().and_then(try_probe) {
            Some(ImageInfo { width, height, .. }) => {
                report.measured += 1;
                let quality = PrintQuality::from_dimensions(width, height);
                (width.to_string(), height.to_string(), quality.as_str().to_string())
            },
            None => {
                report.missing += 1;
                tracing::debug!(%author, %filename, "No readable original image");
                (String::new(), String::new(), String::new())
            },
        };

        if let Some(idx) = author_idx {
            *row = set_field(row, idx, &author);
        }
        *row = set_field(row, width_idx, &width);
        *row = set_field(row, height_idx, &height);
        *row = set_field(row, quality_idx, &quality);
    }
    report
}

/// Path of the original image for a row, if the row names one safely.
fn locate(library: &ImageLibrary, folders: &FolderTable, author: &str, filename: &str) -> Option<std::path::PathBuf> {
    if filename.is_empty() {
        return None;
    }
    // The first candidate folder that exists, else the preferred one.
    let candidates = folders.candidates(author);
    let folder = candidates
        .iter()
        .find(|folder| library.photographer(folder).is_ok_and(|p| p.dir.is_dir()))
        .or(candidates.first())?;
    let path = library
        .photographer(folder)
        .and_then(|photographer| photographer.file(SizeFolder::Originals.as_str(), filename));
    match path {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::warn!(%author, %filename, error = %*err, "Refusing to look up image");
            None
        },
    }
}

/// Reads `input`, annotates it with print-quality tiers and writes `output`.
#[instrument(skip(library, folders), fields(input = %input.display(), output = %output.display()))]
pub fn annotate_quality(
    library: &ImageLibrary,
    folders: &FolderTable,
    input: &Path,
    output: &Path,
    encoding: Encoding,
) -> Result<QualityReport> {
    let mut table = Table::read(input, encoding)?;
    let report = annotate_table(&mut table, library, folders);
    table.write(output)?;
    tracing::info!(
        rows = report.rows,
        measured = report.measured,
        missing = report.missing,
        "Annotated print quality"
    );
    Ok(report)
}
