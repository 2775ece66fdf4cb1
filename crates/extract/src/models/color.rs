use std::fmt::{Display, Formatter, Result as FmtResult};

/// Colour treatment of a photograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Black and white
    Bw,
    Color,
    Sepia,
}
impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bw => "bw",
            Self::Color => "color",
            Self::Sepia => "sepia",
        }
    }

    pub(crate) fn from_token(token: &str) -> Option<Self> {
        match token {
            "bw" => Some(Self::Bw),
            "color" => Some(Self::Color),
            "sepia" => Some(Self::Sepia),
            _ => None,
        }
    }
}
impl Display for ColorMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bw", Some(ColorMode::Bw))]
    #[case("color", Some(ColorMode::Color))]
    #[case("sepia", Some(ColorMode::Sepia))]
    #[case("BW", None)]
    #[case("colour", None)]
    fn test_from_token(#[case] token: &str, #[case] expected: Option<ColorMode>) {
        assert_eq!(ColorMode::from_token(token), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(ColorMode::Bw.to_string(), "bw");
    }
}
