//! Structured catalog filenames.
//!
//! A catalog filename looks like `durieu_portrait_year-1860_vertical_bw.jpg`:
//! the first token is the author slug, the second the title slug, and any
//! further tokens are either tags (year, orientation, colour, nudity) or extra
//! title words. Curated uploads carry a `000_aaa_` marker in front of the
//! author slug, and manually-sized duplicates end in `_ms`; neither is part of
//! the image's identity.

use crate::consts::{MARKER_PREFIX, MS_SUFFIX, YEAR_PREFIX};
use crate::models::{ColorMode, Nudity, NudityTokens, Orientation};
use tracing::instrument;

/// Splits a filename into its stem and extension (including the dot).
///
/// A leading dot does not start an extension, so `.hidden` has no extension.
pub fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename.split_at(idx),
        _ => (filename, ""),
    }
}

/// The filename an image is published under: the `_ms` suffix is removed from
/// the stem, the extension is kept.
pub fn canonical_filename(filename: &str) -> String {
    let (stem, ext) = split_extension(filename);
    format!("{}{}", stem.strip_suffix(MS_SUFFIX).unwrap_or(stem), ext)
}

/// Builds a sentence from the title tokens of a split filename stem.
///
/// Uses the tokens after the author slug and before the first `year-` token,
/// with hyphens read as spaces. The first letter is upper-cased and a full
/// stop is appended when missing. Returns an empty string when there are no
/// title tokens.
pub fn describe(tokens: &[&str]) -> String {
    let end = tokens.iter().position(|t| t.starts_with(YEAR_PREFIX)).unwrap_or(tokens.len());
    let words = match tokens.get(1..end) {
        Some(words) if !words.is_empty() => words,
        _ => return String::new(),
    };
    let sentence = words.join(" ").replace('-', " ");
    let mut chars = sentence.chars();
    let mut description = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if !description.ends_with('.') {
        description.push('.');
    }
    description
}

/// Metadata encoded in a catalog filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Raw author slug; resolve it with [`resolve_author`](crate::resolve_author).
    pub author: String,
    /// Title slug followed by any unrecognised tokens, space-separated.
    pub title: String,
    pub year: Option<String>,
    pub orientation: Option<Orientation>,
    pub color: Option<ColorMode>,
    /// Defaults to [`Nudity::Nude`] when the filename carries no tag.
    pub nudity: Nudity,
    pub description: String,
    /// Whether the filename carried the curated-upload marker.
    pub marked: bool,
}
impl ParsedName {
    /// Parses a filename (with or without extension).
    ///
    /// Tags may appear in any order after the title slug; when a tag kind is
    /// repeated the last occurrence wins.
    #[instrument(level = "trace", skip(nudity_tokens))]
    pub fn parse(filename: &str, nudity_tokens: NudityTokens) -> Self {
        let (stem, _) = split_extension(filename);
        let stem = stem.strip_suffix(MS_SUFFIX).unwrap_or(stem);
        let marked = stem.get(..MARKER_PREFIX.len()).is_some_and(|p| p.eq_ignore_ascii_case(MARKER_PREFIX));
        let stem = match marked {
            true => &stem[MARKER_PREFIX.len()..],
            false => stem,
        };
        let tokens: Vec<&str> = stem.split('_').collect();

        let author = tokens.first().copied().unwrap_or_default().to_string();
        let mut title = tokens.get(1).copied().unwrap_or_default().to_string();
        let mut year = None;
        let mut orientation = None;
        let mut color = None;
        let mut nudity = None;
        for &token in tokens.iter().skip(2) {
            if let Some(value) = token.strip_prefix(YEAR_PREFIX) {
                year = Some(value.to_string());
            } else if let Some(value) = Orientation::from_token(token) {
                orientation = Some(value);
            } else if let Some(value) = ColorMode::from_token(token) {
                color = Some(value);
            } else if nudity_tokens.matches(token) {
                if NudityTokens::is_legacy_only(token) {
                    tracing::warn!(filename, token, "Token treated as nudity tag by legacy rule");
                }
                nudity = Some(Nudity::normalize(token));
            } else {
                title.push(' ');
                title.push_str(token);
            }
        }

        Self {
            author,
            title,
            year,
            orientation,
            color,
            nudity: nudity.unwrap_or_default(),
            description: describe(&tokens),
            marked,
        }
    }
}
