pub mod catalog;
pub mod error;
mod nudity;
mod quality;
mod resize;
mod table;
mod url;

pub use crate::catalog::{CatalogOptions, CatalogRecord, CatalogReport, generate_catalog, write_catalog};
pub use crate::nudity::{NudityReport, normalize_nudity, normalize_table};
pub use crate::quality::{QualityReport, annotate_quality, annotate_table};
pub use crate::resize::{ResizeReport, convert_originals, resize_variants};
pub use crate::table::{Encoding, Table};
pub use crate::url::{SIZE_PLACEHOLDER, UrlGenerator};
