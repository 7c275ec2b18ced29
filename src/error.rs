//! Error types for the quatrains library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, navigating, searching or building the site.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Century {0} is out of range (expected 1-10)")]
    InvalidCentury(u32),
    #[error("Quatrain number must be positive")]
    InvalidQuatrainNumber,
    #[error("Invalid quatrain id: {0}")]
    InvalidId(String),
    #[error("Invalid quatrain link: {0}")]
    InvalidLink(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Failed to parse century {century} data: {source}")]
    Parse {
        century: u8,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid century document {path}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },
    #[error("Quatrain {number} not found in century {century}")]
    QuatrainNotFound { century: u8, number: u32 },
    #[error("Century {0} has no quatrains")]
    EmptyCentury(u8),
    #[error("No century loaded")]
    NoCenturyLoaded,
    #[error("Search index build failed: {0}")]
    Index(String),
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from fetching or decoding a century document.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::Http { .. } | Error::Status { .. } | Error::Parse { .. }
        )
    }
}

impl From<fst::Error> for Error {
    fn from(e: fst::Error) -> Self {
        Error::Index(e.to_string())
    }
}
