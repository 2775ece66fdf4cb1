use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use mosaic_storage::SizeFolder;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::ser::Formatter;
use std::io;

/// Column order of a written catalog.
pub const HEADER: [&str; 10] = [
    "base_url",
    "filename",
    "author",
    "title",
    "year",
    "orientation",
    "color",
    "nudity",
    "description",
    "sizes_info",
];

/// One published size of an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeVariant {
    pub url: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
}

/// The size variants found for an image, keyed by size folder.
///
/// Serializes as a JSON object whose keys follow [`SizeFolder::ALL`] order,
/// whatever order the variants were inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sizes(Vec<(SizeFolder, SizeVariant)>);
impl Sizes {
    /// Records `variant` under `folder`, replacing any earlier entry.
    pub fn insert(&mut self, folder: SizeFolder, variant: SizeVariant) {
        self.0.retain(|(existing, _)| *existing != folder);
        let idx = self.0.partition_point(|(existing, _)| position(*existing) < position(folder));
        self.0.insert(idx, (folder, variant));
    }

    pub fn get(&self, folder: SizeFolder) -> Option<&SizeVariant> {
        self.0.iter().find(|(existing, _)| *existing == folder).map(|(_, variant)| variant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SizeFolder, &SizeVariant)> {
        self.0.iter().map(|(folder, variant)| (*folder, variant))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Serialize for Sizes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (folder, variant) in &self.0 {
            map.serialize_entry(folder.as_str(), variant)?;
        }
        map.end()
    }
}

/// Compact JSON with a space after each `,` and `:`, matching the separators
/// of catalogs exported before this tool existed.
struct SpacedFormatter;
impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn position(folder: SizeFolder) -> usize {
    SizeFolder::ALL.iter().position(|f| *f == folder).unwrap_or(usize::MAX)
}

/// One row of the catalog: a source image and everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    /// Variant URL with `{size}` standing in for the size folder.
    pub base_url: String,
    /// Published filename (without any `_ms` suffix).
    pub filename: String,
    pub author: String,
    pub title: String,
    pub year: String,
    pub orientation: String,
    pub color: String,
    pub nudity: String,
    pub description: String,
    pub sizes: Sizes,
}
impl CatalogRecord {
    /// `sizes_info` column value.
    pub fn sizes_info(&self) -> Result<String> {
        let failed = || ErrorKind::SizesInfo(self.filename.clone());
        let mut json = Vec::new();
        self.sizes
            .serialize(&mut serde_json::Serializer::with_formatter(&mut json, SpacedFormatter))
            .or_raise(failed)?;
        String::from_utf8(json).or_raise(failed)
    }

    /// Field values in [`HEADER`] order.
    pub fn fields(&self) -> Result<[String; 10]> {
        Ok([
            self.base_url.clone(),
            self.filename.clone(),
            self.author.clone(),
            self.title.clone(),
            self.year.clone(),
            self.orientation.clone(),
            self.color.clone(),
            self.nudity.clone(),
            self.description.clone(),
            self.sizes_info()?,
        ])
    }
}
