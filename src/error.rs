use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for CSV acquisition.
pub type LoadResult<T> = Result<T, LoadError>;

/// Failure to acquire the CSV text (the only error the pipeline surfaces).
///
/// Malformed rows and cells are never errors; they are coerced to empty text
/// or 0 by the parser.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Local file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level failure while fetching a URL.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} while reading {url}")]
    HttpStatus { status: u16, url: String },
}
