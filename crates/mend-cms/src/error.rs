//! CMS adapter error types.

use thiserror::Error;

/// Errors that can occur when talking to a CMS backend.
#[derive(Debug, Error)]
pub enum CmsError {
    /// HTTP transport error (includes timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CMS API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the CMS.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Credentials were rejected (401/403).
    #[error("authentication failed (HTTP {status}); check the configured credentials")]
    Auth {
        /// HTTP status code returned by the CMS.
        status: u16,
    },

    /// The target document or entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation is not supported on this platform.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Failed to parse a CMS response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The adapter's configuration section is missing required fields.
    #[error("configuration error: {0}")]
    Config(String),
}
