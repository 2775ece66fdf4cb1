//! CSV tables with a header row.
//!
//! Tables are read whole into memory; catalogs are a few thousand rows at
//! most. Rows may have a different number of fields than the header, and are
//! carried through as they are.

use crate::error::{ErrorKind, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use exn::ResultExt;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Character encoding of an input table. Output is always UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1, as exported by some spreadsheet tools.
    Latin1,
}
impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }

    fn decode(&self, bytes: Vec<u8>, path: &Path) -> Result<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).or_raise(|| ErrorKind::Encoding {
                path: path.to_path_buf(),
                encoding: self.as_str(),
            }),
            // Every Latin-1 byte is the code point of the same value.
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}
impl FromStr for Encoding {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            other => Err(format!("unsupported encoding: {other}")),
        }
    }
}
impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A header row and the records below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}
impl Table {
    /// Reads a table, decoding it from `encoding`.
    pub fn read(path: &Path, encoding: Encoding) -> Result<Self> {
        let bytes = fs::read(path).or_raise(|| ErrorKind::ReadTable(path.to_path_buf()))?;
        let text = encoding.decode(bytes, path)?;
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());
        let headers = reader.headers().or_raise(|| ErrorKind::ReadTable(path.to_path_buf()))?.clone();
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .or_raise(|| ErrorKind::ReadTable(path.to_path_buf()))?;
        Ok(Self { headers, rows })
    }

    /// Writes the table as UTF-8.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_records(path, &self.headers, &self.rows)
    }

    /// Position of a header, compared exactly.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Position of a header, appending it when absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        match self.column(name) {
            Some(idx) => idx,
            None => {
                self.headers.push_field(name);
                self.headers.len() - 1
            },
        }
    }
}

/// Writes a header and rows as UTF-8 CSV, creating or truncating `path`.
pub(crate) fn write_records<H, R>(path: &Path, headers: H, rows: impl IntoIterator<Item = R>) -> Result<()>
where
    H: IntoIterator,
    H::Item: AsRef<[u8]>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let failed = || ErrorKind::WriteTable(path.to_path_buf());
    let mut writer = WriterBuilder::new().flexible(true).from_path(path).or_raise(failed)?;
    writer.write_record(headers).or_raise(failed)?;
    for row in rows {
        writer.write_record(row).or_raise(failed)?;
    }
    writer.flush().or_raise(failed)?;
    Ok(())
}

/// Replaces field `idx` of `row`, padding short rows with blanks first.
pub(crate) fn set_field(row: &StringRecord, idx: usize, value: &str) -> StringRecord {
    let mut fields: Vec<&str> = row.iter().collect();
    if fields.len() <= idx {
        fields.resize(idx + 1, "");
    }
    fields[idx] = value;
    StringRecord::from(fields)
}
