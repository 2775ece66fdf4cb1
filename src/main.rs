mod cli;
mod error;
mod logging;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use mosaic_config::Config;
use mosaic_library::{CatalogOptions, UrlGenerator};
use mosaic_storage::ImageLibrary;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    tracing::debug!(command = ?cli.command, "Starting job");
    match cli.command {
        Command::NormalizeNudity {
            input,
            output,
            encoding,
        } => {
            mosaic_library::normalize_nudity(&input, &output, encoding).or_raise(|| ErrorKind::Job("normalize-nudity"))?;
        },
        Command::AnnotateQuality {
            input,
            output,
            encoding,
        } => {
            let library = open_library(&config)?;
            mosaic_library::annotate_quality(&library, &config.folders, &input, &output, encoding)
                .or_raise(|| ErrorKind::Job("annotate-quality"))?;
        },
        Command::Catalog { output } => {
            let library = open_library(&config)?;
            let failed = || ErrorKind::Job("catalog");
            let options = CatalogOptions {
                urls: UrlGenerator::new(config.url_template.as_str(), &config.cdn_base).or_raise(failed)?,
                aliases: config.authors,
                nudity_tokens: config.nudity_tokens,
                infer_orientation: config.infer_orientation,
            };
            let records = mosaic_library::generate_catalog(&library, &options).or_raise(failed)?;
            mosaic_library::write_catalog(&output, &records).or_raise(failed)?;
        },
        Command::ConvertOriginals { photographer } => {
            let library = open_library(&config)?;
            mosaic_library::convert_originals(&library, config.resize.originals_quality, photographer.as_deref())
                .or_raise(|| ErrorKind::Job("convert-originals"))?;
        },
        Command::Resize { photographer } => {
            let library = open_library(&config)?;
            mosaic_library::resize_variants(
                &library,
                &config.resize.widths,
                config.resize.quality,
                photographer.as_deref(),
            )
            .or_raise(|| ErrorKind::Job("resize"))?;
        },
    }
    Ok(())
}

fn open_library(config: &Config) -> Result<ImageLibrary> {
    let root = config.require_images_root().or_raise(|| ErrorKind::Config)?;
    ImageLibrary::open(root).or_raise(|| ErrorKind::ImagesRoot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn cli(config: &Path, args: &[&str]) -> Cli {
        let mut argv = vec!["mosaic", "--config", config.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write_config(dir: &Path, images_root: Option<&Path>) -> std::path::PathBuf {
        let path = dir.join("mosaic.toml");
        let contents = match images_root {
            Some(root) => format!("images_root = {:?}\n", root.to_str().unwrap()),
            None => String::new(),
        };
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_normalize_nudity_runs_without_images_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), None);
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "filename,nudity\na.jpg, Topless\n").unwrap();

        let args = ["normalize-nudity", "--input", input.to_str().unwrap(), "--output", output.to_str().unwrap()];
        run(cli(&config, &args)).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "filename,nudity\na.jpg,nude\n");
    }

    #[test]
    fn test_catalog_writes_header_for_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        fs::create_dir_all(&images).unwrap();
        let config = write_config(dir.path(), Some(&images));
        let output = dir.path().join("catalog.csv");

        run(cli(&config, &["catalog", "--output", output.to_str().unwrap()])).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "base_url,filename,author,title,year,orientation,color,nudity,description,sizes_info\n"
        );
    }

    #[test]
    fn test_image_jobs_require_images_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), None);
        let err = run(cli(&config, &["resize"])).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Config));
    }

    #[test]
    fn test_missing_images_root_folder() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), Some(&dir.path().join("missing")));
        let err = run(cli(&config, &["convert-originals"])).unwrap_err();
        assert!(matches!(&*err, ErrorKind::ImagesRoot));
    }

    #[test]
    fn test_unknown_photographer_fails_job() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), Some(dir.path()));
        let err = run(cli(&config, &["resize", "--photographer", "nobody"])).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Job("resize")));
    }
}
