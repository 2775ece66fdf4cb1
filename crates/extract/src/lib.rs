//! Metadata derivation for Mosaic catalog images.
//!
//! Catalog filenames are structured: underscore-separated tokens carry the
//! author slug, title words and optional tags (`year-1860`, `vertical`, `bw`,
//! `not-nude`). This crate turns such a name into a [`ParsedName`], resolves
//! the author slug into a display name through an ordered list of [`Rule`]s,
//! and classifies image dimensions into a [`PrintQuality`](models::PrintQuality) tier.

mod consts;
mod filename;
pub mod models;
mod resolve;

pub use crate::filename::{ParsedName, canonical_filename, describe, split_extension};
pub use crate::resolve::{Resolution, Rule, resolve_author};
