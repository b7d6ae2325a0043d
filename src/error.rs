//! Newsletter error types

use thiserror::Error;

/// Errors raised while fetching, planning, rendering or persisting newsletters
///
/// Decoding front matter and extracting entries never fail; they degrade to
/// empty results instead. Everything that touches the network, the file system
/// or caller-supplied arguments reports through this type.
#[derive(Error, Debug)]
pub enum NewsletterError {
    /// IO error while reading documents or writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP failure (DNS, TLS, timeout, body decoding)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the GitHub API
    #[error("HTTP error {status}: {message}")]
    Http {
        /// HTTP status code (e.g., 404, 500)
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// GitHub rejected the request because of rate limiting (403/429)
    #[error("Rate limited by GitHub API (status {status}); try again with a token")]
    RateLimited {
        /// HTTP status code returned by the API
        status: u16,
    },

    /// Layout batch size must be a positive integer
    #[error("Invalid batch size: {0} (must be at least 1)")]
    InvalidBatchSize(usize),

    /// Invalid caller-supplied argument (repository slug, date, URL)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input directory or file does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias using NewsletterError
pub type Result<T> = std::result::Result<T, NewsletterError>;
