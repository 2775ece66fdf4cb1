//! Author display-name resolution.
//!
//! Filenames carry the photographer as a free-form slug (`durieu`,
//! `clarence-h-white`, `publicdomainunverified`, ...). Resolution runs an
//! ordered list of [`Rule`]s against the [`AliasTable`]; the first rule that
//! produces a name wins. Several rules use substring matches, which can
//! collide, so the order below is part of the contract:
//!
//! 1. [`Rule::MarkerSlug`] - slug following a `000_aaa_` marker
//! 2. [`Rule::ExactSlug`] - raw author equals an alias
//! 3. [`Rule::FilenameContains`] - an alias appears anywhere in the filename
//! 4. [`Rule::Placeholder`] - placeholder authors never fall through
//! 5. [`Rule::PartialSlug`] - an alias appears inside the raw author
//! 6. [`Rule::TitleCase`] - rebuild a name from the raw author

use crate::consts::{MARKER_PREFIX, PLACEHOLDER_AUTHORS};
use crate::models::AliasTable;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::instrument;

/// A single author-resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// For `000_aaa_<slug>_...` filenames: exact lookup of `<slug>`, then the
    /// first alias contained in `<slug>`.
    MarkerSlug,
    /// The raw author equals an alias, or the alias with hyphens as spaces.
    ExactSlug,
    /// The first alias contained anywhere in the filename.
    FilenameContains,
    /// Placeholder authors (`unknown`, `0`, blank, ...) resolve through the
    /// filename only; when that fails they resolve to a blank name.
    Placeholder,
    /// The first alias (or its spaced form) contained in the raw author, for
    /// truncated or decorated slugs.
    PartialSlug,
    /// Title-cased words of the raw author. Always succeeds.
    TitleCase,
}
impl Rule {
    /// Rules in the order they are tried.
    pub const ORDER: [Rule; 6] = [
        Rule::MarkerSlug,
        Rule::ExactSlug,
        Rule::FilenameContains,
        Rule::Placeholder,
        Rule::PartialSlug,
        Rule::TitleCase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarkerSlug => "marker-slug",
            Self::ExactSlug => "exact-slug",
            Self::FilenameContains => "filename-contains",
            Self::Placeholder => "placeholder",
            Self::PartialSlug => "partial-slug",
            Self::TitleCase => "title-case",
        }
    }

    /// Applies this rule alone. `raw` and `filename` must already be
    /// lower-cased.
    fn apply(&self, aliases: &AliasTable, raw: &str, filename: &str) -> Option<String> {
        match self {
            Self::MarkerSlug => {
                let rest = filename.strip_prefix(MARKER_PREFIX)?;
                let slug = rest.split('_').next().unwrap_or_default();
                aliases
                    .get(slug)
                    .or_else(|| aliases.iter().find(|a| slug.contains(a.slug.as_str())).map(|a| a.name.as_str()))
                    .map(str::to_string)
            },
            Self::ExactSlug => aliases
                .iter()
                .find(|a| raw == a.slug || raw == a.spaced())
                .map(|a| a.name.clone()),
            Self::FilenameContains => search_filename(aliases, filename),
            Self::Placeholder => PLACEHOLDER_AUTHORS
                .contains(&raw)
                .then(|| search_filename(aliases, filename).unwrap_or_default()),
            Self::PartialSlug => aliases
                .iter()
                .find(|a| raw.contains(a.slug.as_str()) || raw.contains(a.spaced().as_str()))
                .map(|a| a.name.clone()),
            Self::TitleCase => Some(title_case(raw)),
        }
    }
}
impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved display name and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Display name; blank for unidentifiable placeholder authors.
    pub name: String,
    pub rule: Rule,
}

/// Resolves the raw author slug of `filename` into a display name.
///
/// `raw` is the author token as parsed from the filename (or as found in an
/// existing table); `filename` is the full source filename, including any
/// marker and extension.
#[instrument(level = "trace", skip(aliases))]
pub fn resolve_author(aliases: &AliasTable, raw: &str, filename: &str) -> Resolution {
    let raw = raw.trim().to_lowercase();
    let filename = filename.to_lowercase();
    Rule::ORDER
        .iter()
        .find_map(|rule| rule.apply(aliases, &raw, &filename).map(|name| Resolution { name, rule: *rule }))
        // TitleCase always produces a name, this is never reached.
        .unwrap_or_else(|| Resolution {
            name: title_case(&raw),
            rule: Rule::TitleCase,
        })
}

fn search_filename(aliases: &AliasTable, filename: &str) -> Option<String> {
    // Every `000_aaa_<alias>` match is also a plain substring match.
    aliases.iter().find(|a| filename.contains(a.slug.as_str())).map(|a| a.name.clone())
}

fn title_case(raw: &str) -> String {
    raw.replace('-', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
