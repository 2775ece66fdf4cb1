pub mod error;
mod folders;
mod layout;
mod path;
mod probe;
mod variant;

pub use crate::folders::{FolderAlias, FolderTable};
pub use crate::layout::{ImageLibrary, Photographer, SizeFolder, is_supported_image};
pub use crate::path::{join as join_path, validate as validate_path};
pub use crate::probe::{ImageInfo, probe, try_probe};
pub use crate::variant::{open_image, remove_variant, scaled_height, write_webp, write_webp_variant};
