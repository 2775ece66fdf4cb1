use std::fmt::{Display, Formatter, Result as FmtResult};

/// Nudity tag of a catalog image.
///
/// The catalog only accepts three values: `nude`, `not-nude` and blank. Any
/// other tag is treated as `nude`, erring on the side of flagging content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Nudity {
    #[default]
    Nude,
    NotNude,
    /// Not yet classified
    Blank,
}
impl Nudity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nude => "nude",
            Self::NotNude => "not-nude",
            Self::Blank => "",
        }
    }

    /// Maps any raw value onto the closed set of allowed tags.
    ///
    /// The value is trimmed and lower-cased; exact matches of the three
    /// allowed spellings are kept, everything else becomes [`Nudity::Nude`].
    pub fn normalize(raw: impl AsRef<str>) -> Self {
        match raw.as_ref().trim().to_lowercase().as_str() {
            "not-nude" => Self::NotNude,
            "" => Self::Blank,
            _ => Self::Nude,
        }
    }
}
impl Display for Nudity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Rule used to recognise a nudity tag among filename tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NudityTokens {
    /// Any token containing `nude`.
    #[default]
    Strict,
    /// Any token containing `nude` or `not`. Reproduces historical catalog
    /// output, including misfires on title words such as `nothing`.
    Legacy,
}
impl NudityTokens {
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::Strict => token.contains("nude"),
            Self::Legacy => token.contains("nude") || token.contains("not"),
        }
    }

    /// Whether only the legacy rule would classify `token` as a nudity tag.
    pub fn is_legacy_only(token: &str) -> bool {
        !Self::Strict.matches(token) && Self::Legacy.matches(token)
    }
}
