//! Path validation for names that come from table input.
//!
//! Photographer folders and filenames read from CSV are joined onto the
//! images root; these helpers make sure the result cannot leave that root.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates a path relative to the images root and returns it normalized.
///
/// `.` segments and repeated separators are dropped and `..` is resolved
/// lexically. The path is rejected when it is empty, absolute, carries a
/// Windows prefix, contains a NUL byte, or climbs above the root.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mosaic_storage::validate_path;
/// assert_eq!(validate_path("durieu/originals/./a.jpg").unwrap(), Path::new("durieu/originals/a.jpg"));
/// assert_eq!(validate_path("a/../b.jpg").unwrap(), Path::new("b.jpg"));
/// assert!(validate_path("../secrets.jpg").is_err());
/// assert!(validate_path("/etc/passwd").is_err());
/// assert!(validate_path("").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(path.to_path_buf());
    let mut normal = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(segment) if segment.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(segment) => normal.push(segment),
            Component::CurDir => {},
            Component::RootDir | Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if normal.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if normal.is_empty() {
        exn::bail!(invalid());
    }
    Ok(normal.into_iter().collect())
}

/// Joins validated segments onto `root`.
///
/// Each segment is validated on its own, so a segment cannot undo the
/// segments before it.
pub fn join<I, S>(root: impl AsRef<Path>, segments: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = root.as_ref().to_path_buf();
    for segment in segments {
        joined.push(validate(segment)?);
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.jpg", "a.jpg")]
    #[case("durieu/originals/a.jpg", "durieu/originals/a.jpg")]
    #[case("a//b", "a/b")]
    #[case("./a/./b", "a/b")]
    #[case("a/b/..", "a")]
    fn test_valid(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate(input).unwrap(), Path::new(expected));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("../a.jpg")]
    #[case("a/../../b")]
    #[case("/abs/a.jpg")]
    #[case("a\0b.jpg")]
    fn test_invalid(#[case] input: &str) {
        assert!(validate(input).is_err());
    }

    #[test]
    fn test_join_validates_each_segment() {
        let root = Path::new("/images");
        assert_eq!(join(root, ["durieu", "originals", "a.jpg"]).unwrap(), Path::new("/images/durieu/originals/a.jpg"));
        assert!(join(root, ["durieu", "..", "a.jpg"]).is_err());
        assert!(join(root, ["durieu/..", "a.jpg"]).is_err());
        assert!(join(root, ["durieu", "/etc/passwd"]).is_err());
    }
}
