use std::fmt::{Display, Formatter, Result as FmtResult};

/// Coarse classification of how large an image can be printed.
///
/// Ordered from least to most suitable, so tiers compare naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrintQuality {
    Standard,
    Good,
    Excellent,
    Professional,
}
impl PrintQuality {
    /// Minimum pixel length of the longest side for each tier, checked from
    /// the top down.
    const THRESHOLDS: [(u32, Self); 3] = [(3500, Self::Professional), (2500, Self::Excellent), (1400, Self::Good)];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Good => "good",
            Self::Excellent => "excellent",
            Self::Professional => "professional",
        }
    }

    /// Tier of an image with the given pixel dimensions; either side reaching
    /// a threshold is enough.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        let longest = width.max(height);
        Self::THRESHOLDS
            .iter()
            .find(|(minimum, _)| longest >= *minimum)
            .map(|(_, tier)| *tier)
            .unwrap_or(Self::Standard)
    }
}
impl Display for PrintQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
