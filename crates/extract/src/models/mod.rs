mod alias;
mod color;
mod nudity;
mod orientation;
mod quality;

pub use self::alias::{AliasTable, AuthorAlias};
pub use self::color::ColorMode;
pub use self::nudity::{Nudity, NudityTokens};
pub use self::orientation::Orientation;
pub use self::quality::PrintQuality;
