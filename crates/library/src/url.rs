//! CDN URL templating.
//!
//! Public URLs of image variants are rendered from a user-configured [upon]
//! template. The template syntax follows upon's Mustache-like conventions
//! (`{{ variable }}`).
//!
//! # Template Variables
//!
//! | Variable       | Description                                      |
//! |----------------|--------------------------------------------------|
//! | `cdn`          | Configured CDN base, without trailing slash      |
//! | `photographer` | Photographer folder slug                         |
//! | `size`         | Size folder (`originals`, `w400`, ...)           |
//! | `filename`     | Filename within the size folder                  |
//!
//! # Example
//!
//! ```
//! use mosaic_library::UrlGenerator;
//!
//! let urls = UrlGenerator::new("{{ cdn }}/{{ photographer }}/{{ size }}/{{ filename }}", "https://cdn.example.com/").unwrap();
//! assert_eq!(urls.variant_url("durieu", "w400", "a.jpg").unwrap(), "https://cdn.example.com/durieu/w400/a.jpg");
//! assert_eq!(urls.base_url("durieu").unwrap(), "https://cdn.example.com/durieu/{size}");
//! ```

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use tracing::instrument;
use upon::{Engine, Template};

/// Placeholder left in base URLs for consumers to substitute a size folder.
pub const SIZE_PLACEHOLDER: &str = "{size}";

/// Renders variant URLs from a compiled template.
///
/// The template is compiled at construction so that syntax errors surface
/// before any job starts; the compiled template is reused for every image.
pub struct UrlGenerator {
    engine: Engine<'static>,
    template: Template<'static>,
    cdn: String,
}
impl UrlGenerator {
    /// Compiles `template` for the given CDN base. A trailing slash on the
    /// base is ignored.
    pub fn new(template: impl Into<String>, cdn: impl AsRef<str>) -> Result<Self> {
        let engine = Engine::new();
        let template = engine.compile(template.into()).or_raise(|| ErrorKind::Template)?;
        Ok(Self {
            engine,
            template,
            cdn: cdn.as_ref().trim().trim_end_matches('/').to_string(),
        })
    }

    /// Public URL of `filename` in one size folder of a photographer.
    #[instrument(level = "trace", skip(self))]
    pub fn variant_url(&self, photographer: &str, size: &str, filename: &str) -> Result<String> {
        self.render(photographer, size, filename)
    }

    /// URL prefix for every variant of a photographer, with the size folder
    /// left as [`SIZE_PLACEHOLDER`].
    pub fn base_url(&self, photographer: &str) -> Result<String> {
        let url = self.render(photographer, SIZE_PLACEHOLDER, "")?;
        Ok(url.trim_end_matches('/').to_string())
    }

    fn render(&self, photographer: &str, size: &str, filename: &str) -> Result<String> {
        let url = self
            .template
            .render(
                &self.engine,
                upon::value! {
                    cdn: self.cdn.as_str(),
                    photographer: photographer,
                    size: size,
                    filename: filename,
                },
            )
            .to_string()
            .or_raise(|| ErrorKind::Template)?;
        Ok(url.trim().to_string())
    }
}
