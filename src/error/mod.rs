//! Error types for the TrainerDex client.
//!
//! Local validation (level lookups, schema translation, read-only field checks) fails
//! fast with a dedicated variant before any request is sent. Failures reported by the
//! remote service are mapped from their HTTP status into [`Error::NotFound`],
//! [`Error::Forbidden`] or [`Error::RequestFailed`] and propagated unchanged through the
//! entity layer.

pub mod config;
pub mod retry;
pub mod schema;
pub mod validation;

use reqwest::StatusCode;
use thiserror::Error;

pub use self::{config::ConfigError, schema::SchemaError, validation::ValidationError};

/// Main error type for the TrainerDex client.
///
/// Aggregates the domain-specific error types and external library errors into a
/// single type so that `?` works across the translator, connector and entity layers.
///
/// # Error Categories
/// - Remote errors (`NotFound`, `Forbidden`, `RequestFailed`) carrying status and body
/// - Client-side validation (`Validation`, `OutOfRange`, `Schema`)
/// - Configuration errors (invalid environment variables)
/// - External library errors (HTTP transport, JSON decoding)
#[derive(Error, Debug)]
pub enum Error {
    /// The entity or relation does not exist (HTTP 404).
    #[error("Resource not found (HTTP {status}): {body}")]
    NotFound {
        /// HTTP status returned by the service
        status: u16,
        /// Response body, as text
        body: String,
    },
    /// The request was rejected for authentication or permission reasons (HTTP 401, 403, 423).
    #[error("Request forbidden (HTTP {status}): {body}")]
    Forbidden {
        /// HTTP status returned by the service
        status: u16,
        /// Response body, as text
        body: String,
    },
    /// Client-side validation failed before any request was attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A level or leaderboard position lookup fell outside the table or page bounds.
    #[error("{what} {value} is out of range ({min}..={max})")]
    OutOfRange {
        /// What was being looked up, e.g. "level" or "position"
        what: &'static str,
        /// The rejected value
        value: u64,
        /// Lowest accepted value
        min: u64,
        /// Highest accepted value
        max: u64,
    },
    /// Any other non-2xx response from the service.
    #[error("Request failed (HTTP {status}): {body}")]
    RequestFailed {
        /// HTTP status returned by the service
        status: u16,
        /// Response body, as text
        body: String,
    },
    /// A canonical field could not be encoded for the wire.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Configuration error (invalid environment variables).
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// HTTP transport error (connection, TLS, timeouts).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// A wire record did not match the expected record shape.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Maps a non-success HTTP status and its body to the matching error variant.
    ///
    /// # Arguments
    /// - `status` - Status code returned by the service
    /// - `body` - Response body, as text
    ///
    /// # Returns
    /// - `Error::Forbidden` - For 401, 403 and 423
    /// - `Error::NotFound` - For 404
    /// - `Error::RequestFailed` - For every other status
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let code = status.as_u16();
        match code {
            401 | 403 | 423 => Self::Forbidden { status: code, body },
            404 => Self::NotFound { status: code, body },
            _ => Self::RequestFailed { status: code, body },
        }
    }

    /// Returns the HTTP status carried by a remote error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. }
            | Self::Forbidden { status, .. }
            | Self::RequestFailed { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true when the error is a 404 from the service.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
