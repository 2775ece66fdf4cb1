/// Marker placed in front of the author slug on curated uploads.
pub(crate) const MARKER_PREFIX: &str = "000_aaa_";
/// Suffix appended to the base name of manually-sized duplicates.
pub(crate) const MS_SUFFIX: &str = "_ms";
pub(crate) const YEAR_PREFIX: &str = "year-";
/// Raw author values that carry no information about the photographer.
pub(crate) const PLACEHOLDER_AUTHORS: [&str; 4] = ["publicdomainunverified", "unknown", "0", ""];
