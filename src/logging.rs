use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Installs console logging.
///
/// `RUST_LOG` takes precedence; otherwise every count of `verbose` raises the
/// level of the `mosaic` crates by one step from `info`.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("mosaic={level}")));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
