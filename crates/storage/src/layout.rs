//! The on-disk image library.
//!
//! Images are stored per photographer, with one folder per size variant:
//!
//! ```text
//! <root>/<photographer-slug>/originals/<file>
//! <root>/<photographer-slug>/originalsWEBP/<file>.webp
//! <root>/<photographer-slug>/w400/<file>
//! ...
//! ```
//!
//! The presence of a file in a size folder is what signals that the variant
//! exists; there is no separate index.

use crate::error::{ErrorKind, Result};
use crate::path::join;
use exn::ResultExt;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::WalkDir;

/// Extensions (lower-case, without dot) of files treated as source images.
const SUPPORTED_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "tif", "tiff", "bmp"];

/// Returns `true` if `filename` has a supported image extension (any case).
pub fn is_supported_image(filename: impl AsRef<Path>) -> bool {
    filename
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// One of the fixed size-variant folders of a photographer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeFolder {
    /// Full-resolution source files
    Originals,
    /// Full-resolution WEBP conversions
    OriginalsWebp,
    W400,
    W600,
    W800,
    W1200,
    W1600,
}
impl SizeFolder {
    /// All size folders, in catalog order.
    pub const ALL: [SizeFolder; 7] = [
        Self::Originals,
        Self::OriginalsWebp,
        Self::W400,
        Self::W600,
        Self::W800,
        Self::W1200,
        Self::W1600,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Originals => "originals",
            Self::OriginalsWebp => "originalsWEBP",
            Self::W400 => "w400",
            Self::W600 => "w600",
            Self::W800 => "w800",
            Self::W1200 => "w1200",
            Self::W1600 => "w1600",
        }
    }

    /// Name of the folder holding variants resized to `width` pixels.
    pub fn folder_for_width(width: u32) -> String {
        format!("w{width}")
    }
}
impl Display for SizeFolder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Root of the per-photographer image tree.
#[derive(Debug, Clone)]
pub struct ImageLibrary {
    root: PathBuf,
}
impl ImageLibrary {
    /// Opens an existing image tree.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotFound`] if `root` does not exist, or
    /// [`ErrorKind::InvalidPath`] if it is not a directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            exn::bail!(ErrorKind::NotFound(root));
        }
        if !root.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A photographer by folder slug; the folder is not required to exist.
    pub fn photographer(&self, slug: &str) -> Result<Photographer> {
        let dir = join(&self.root, [slug])?;
        Ok(Photographer {
            slug: slug.to_string(),
            dir,
        })
    }

    /// Photographer folders that contain an `originals` folder, sorted by slug.
    ///
    /// Folders with non-UTF-8 names are skipped, as their slug could not be
    /// written to a URL.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn photographers(&self) -> Result<Vec<Photographer>> {
        let mut photographers = Vec::new();
        for entry in list(&self.root)? {
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(slug) = entry.file_name().to_str() else {
                tracing::warn!(path = %entry.path().display(), "Skipping photographer folder with non UTF-8 name");
                continue;
            };
            let photographer = Photographer {
                slug: slug.to_string(),
                dir: entry.path().to_path_buf(),
            };
            if photographer.has_folder(SizeFolder::Originals.as_str()) {
                photographers.push(photographer);
            }
        }
        Ok(photographers)
    }
}

/// A photographer's folder within the [`ImageLibrary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photographer {
    pub slug: String,
    pub dir: PathBuf,
}
impl Photographer {
    pub fn has_folder(&self, folder: &str) -> bool {
        self.dir.join(folder).is_dir()
    }

    /// Path of `filename` inside one of this photographer's folders.
    pub fn file(&self, folder: &str, filename: &str) -> Result<PathBuf> {
        join(&self.dir, [folder, filename])
    }

    /// Supported image filenames in the `originals` folder, sorted.
    pub fn originals(&self) -> Result<Vec<String>> {
        let dir = self.dir.join(SizeFolder::Originals.as_str());
        let mut names = Vec::new();
        for entry in list(&dir)? {
            if !entry.file_type().is_file() || !is_supported_image(entry.file_name()) {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => tracing::warn!(path = %entry.path().display(), "Skipping image with non UTF-8 name"),
            }
        }
        Ok(names)
    }
}

/// Immediate children of `dir`, sorted by name.
///
/// Symbolic links are followed, so entries report the type of their target.
/// Children that cannot be read (dangling links, permissions) are skipped.
fn list(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    if !dir.is_dir() {
        exn::bail!(ErrorKind::NotFound(dir.to_path_buf()));
    }
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) if err.depth() == 0 => return Err(err).or_raise(|| ErrorKind::Listing(dir.to_path_buf())),
            Err(err) => tracing::warn!(path = ?err.path(), error = %err, "Skipping unreadable entry"),
        }
    }
    Ok(entries)
}
