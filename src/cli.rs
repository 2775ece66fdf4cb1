use clap::{Parser, Subcommand};
use mosaic_library::Encoding;
use std::path::PathBuf;

/// Offline batch tools for the Mosaic image catalog.
#[derive(Debug, Parser)]
#[command(name = "mosaic", version, about)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON); defaults to the user config directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log more detail; repeat for more.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite a table's nudity column onto `nude`, `not-nude` or blank.
    NormalizeNudity {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Encoding of the input table (`utf-8` or `latin-1`).
        #[arg(long, default_value = "latin-1")]
        encoding: Encoding,
    },
    /// Add width, height and print-quality tier of each row's original image.
    AnnotateQuality {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Encoding of the input table (`utf-8` or `latin-1`).
        #[arg(long, default_value = "utf-8")]
        encoding: Encoding,
    },
    /// Build the catalog table from the image tree.
    Catalog {
        #[arg(long)]
        output: PathBuf,
    },
    /// Write full-size WEBP copies of the originals to `originalsWEBP`.
    ConvertOriginals {
        /// Only this photographer's folder.
        #[arg(long, value_name = "SLUG")]
        photographer: Option<String>,
    },
    /// Regenerate resized WEBP variants from the originals.
    Resize {
        /// Only this photographer's folder.
        #[arg(long, value_name = "SLUG")]
        photographer: Option<String>,
    },
}
