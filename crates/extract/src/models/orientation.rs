use std::fmt::{Display, Formatter, Result as FmtResult};

/// Orientation of an image, either tagged in its filename or derived from
/// its pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
    Square,
}
impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Square => "square",
        }
    }

    /// Classifies an image by its pixel dimensions.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        match width.cmp(&height) {
            std::cmp::Ordering::Equal => Self::Square,
            std::cmp::Ordering::Greater => Self::Horizontal,
            std::cmp::Ordering::Less => Self::Vertical,
        }
    }

    /// Matches a filename token exactly (no case folding), as tags in
    /// filenames are always written lower-case.
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        match token {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            "square" => Some(Self::Square),
            _ => None,
        }
    }
}
impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, 100, Orientation::Square)]
    #[case(1600, 900, Orientation::Horizontal)]
    #[case(900, 1600, Orientation::Vertical)]
    #[case(0, 0, Orientation::Square)]
    fn test_from_dimensions(#[case] width: u32, #[case] height: u32, #[case] expected: Orientation) {
        assert_eq!(Orientation::from_dimensions(width, height), expected);
    }

    #[test]
    fn test_token_is_exact() {
        assert_eq!(Orientation::from_token("vertical"), Some(Orientation::Vertical));
        assert_eq!(Orientation::from_token("Vertical"), None);
        assert_eq!(Orientation::from_token("verticals"), None);
    }
}
