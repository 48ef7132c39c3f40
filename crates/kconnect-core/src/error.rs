//! Error types for kconnect-core

use thiserror::Error;

/// Result type alias for kconnect-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kconnect-core
///
/// Non-2xx HTTP responses are not errors; they come back as
/// [`ApiResponse`](crate::ApiResponse) values for the caller to display.
#[derive(Error, Debug)]
pub enum Error {
    /// Environment file could not be found
    #[error("environment file not found: {path}")]
    ConfigMissing {
        /// Path that was searched
        path: String,
    },

    /// Environment file is not valid JSON for the expected shape
    #[error("failed to parse environment file {path}: {source}")]
    ConfigMalformed {
        /// Path of the malformed file
        path: String,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Environment file parsed but violates an invariant
    #[error("invalid environment file: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Named environment is not in `available`
    #[error("unknown environment '{name}' (available: {})", .available.join(", "))]
    UnknownEnvironment {
        /// Requested environment name
        name: String,
        /// Names that do exist
        available: Vec<String>,
    },

    /// No environment was given and none is marked current
    #[error("no environment selected; use `env --set NAME` or pass --env")]
    NoEnvironmentSelected,

    /// The cluster could not be reached (DNS failure, connection refused)
    #[error("cannot reach {url}: {source}")]
    Unreachable {
        /// URL of the failed request
        url: String,
        /// Underlying transport error
        source: reqwest::Error,
    },

    /// Any other transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error means the cluster could not be reached.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::Unreachable { .. })
    }
}
