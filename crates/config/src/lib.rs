//! Configuration for the Mosaic catalog tools.
//!
//! Settings are layered with [figment], later layers overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`]),
//! 2. a configuration file: the path given on the command-line, or
//!    `config.toml` in the platform configuration directory when present,
//! 3. environment variables prefixed with `MOSAIC_`, using `__` to reach
//!    nested keys (`MOSAIC_RESIZE__WIDTHS=[400,800]`).
//!
//! Files may be TOML, YAML or JSON, chosen by extension.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::OptionExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use mosaic_extract::models::{AliasTable, NudityTokens};
use mosaic_storage::FolderTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const DEFAULT_CDN_BASE: &str = "https://cdn.mosaic.photography/mosaic-collections/public-domain-collection";
pub const DEFAULT_URL_TEMPLATE: &str = "{{ cdn }}/{{ photographer }}/{{ size }}/{{ filename }}";
const ENV_PREFIX: &str = "MOSAIC_";

/// Settings shared by every job.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Root of the per-photographer image tree.
    pub images_root: Option<PathBuf>,
    /// Public URL prefix the image tree is served from.
    pub cdn_base: String,
    /// Template for variant URLs; see `mosaic_library::UrlGenerator`.
    pub url_template: String,
    /// Ordered slug aliases used to resolve author display names.
    pub authors: AliasTable,
    /// Display names whose folder is not their plain slug.
    pub folders: FolderTable,
    pub nudity_tokens: NudityTokens,
    /// Fill in missing orientation tags from the original's dimensions.
    pub infer_orientation: bool,
    pub resize: ResizeConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            images_root: None,
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            authors: AliasTable::default(),
            folders: FolderTable::default(),
            nudity_tokens: NudityTokens::default(),
            infer_orientation: false,
            resize: ResizeConfig::default(),
        }
    }
}

/// Settings for regenerating WEBP variants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Target widths in pixels; each is written to a `w<width>` folder.
    pub widths: Vec<u32>,
    /// WEBP quality (0 to 100) of the width-bucketed variants.
    pub quality: u8,
    /// WEBP quality (0 to 100) of the full-size `originalsWEBP` copies.
    pub originals_quality: u8,
}
impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            widths: vec![400, 600, 800, 1200, 1600],
            quality: 85,
            originals_quality: 95,
        }
    }
}

impl Config {
    /// Loads the layered configuration.
    ///
    /// An explicit `path` must exist; the default location is optional.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(path)?)
    }

    /// Builds the provider stack without extracting it.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => figment = merge_file(figment, path)?,
            None => {
                if let Some(path) = default_path().filter(|p| p.is_file()) {
                    tracing::debug!(path = %path.display(), "Using default configuration file");
                    figment = merge_file(figment, &path)?;
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extracts and validates a configuration from any provider stack.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().map_err(|e| ErrorKind::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The images root, for jobs that read the image tree.
    pub fn require_images_root(&self) -> Result<&Path> {
        self.images_root.as_deref().ok_or_raise(|| ErrorKind::Missing("images_root"))
    }

    fn validate(&self) -> Result<()> {
        if self.cdn_base.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid {
                field: "cdn_base",
                reason: "must not be empty".to_string(),
            });
        }
        if self.url_template.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid {
                field: "url_template",
                reason: "must not be empty".to_string(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.authors.iter().find(|alias| !seen.insert(alias.slug.as_str())) {
            exn::bail!(ErrorKind::Invalid {
                field: "authors",
                reason: format!("duplicate slug '{}'", duplicate.slug),
            });
        }
        if self.resize.widths.contains(&0) {
            exn::bail!(ErrorKind::Invalid {
                field: "resize.widths",
                reason: "widths must be greater than zero".to_string(),
            });
        }
        for (field, quality) in [
            ("resize.quality", self.resize.quality),
            ("resize.originals_quality", self.resize.originals_quality),
        ] {
            if quality > 100 {
                exn::bail!(ErrorKind::Invalid {
                    field,
                    reason: format!("{quality} is above 100"),
                });
            }
        }
        Ok(())
    }
}

/// `config.toml` in the platform configuration directory.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("photography", "Mosaic", "mosaic").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    Ok(match ext.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}
