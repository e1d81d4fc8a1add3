use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the fetch, normalize and master-table layers.
///
/// The driver logs a failure and moves on to the next index; nothing in the
/// library swallows an error itself.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0:?} is not a supported index symbol; expected one of SPX, IND, NDX")]
    UnsupportedSymbol(String),

    /// The raw file does not match the layout its vendor is supposed to serve.
    #[error("{}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    /// A per-index canonical CSV is missing when building the master table.
    #[error("missing constituents file for index {index}: {}", path.display())]
    MissingIndexFile { index: String, path: PathBuf },

    #[error("GET {url} failed")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),
}

impl Error {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
