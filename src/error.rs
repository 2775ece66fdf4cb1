//! Command-line Error Types

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Configuration could not be loaded or is incomplete.
    #[display("invalid configuration")]
    Config,
    /// The images root could not be opened.
    #[display("cannot open images root")]
    ImagesRoot,
    /// A batch job stopped before finishing.
    #[display("{_0} failed")]
    Job(#[error(not(source))] &'static str),
}
