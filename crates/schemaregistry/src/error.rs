//! Error types for registry operations
//!
//! Three disjoint kinds reach the caller: endpoint validation failures
//! (before any I/O), transport failures, and structured API errors
//! returned by the registry itself. A body that cannot be decoded is a
//! distinct decode error, never conflated with an empty success.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Well-known error codes returned by the registry.
///
/// The set is open: the service may also pass a raw HTTP status (e.g. 409)
/// through as the code, so [`ApiError::code`] stays a plain integer.
pub mod error_codes {
    /// Subject not found
    pub const SUBJECT_NOT_FOUND: i32 = 40401;
    /// Version not found
    pub const VERSION_NOT_FOUND: i32 = 40402;
    /// Schema not found
    pub const SCHEMA_NOT_FOUND: i32 = 40403;

    /// Invalid schema
    pub const INVALID_SCHEMA: i32 = 42201;
    /// Invalid version
    pub const INVALID_VERSION: i32 = 42202;
    /// Invalid compatibility level
    pub const INVALID_COMPATIBILITY_LEVEL: i32 = 42203;

    /// Error in the backend data store
    pub const BACKEND_STORE_ERROR: i32 = 50001;
    /// Operation timed out
    pub const OPERATION_TIMED_OUT: i32 = 50002;
    /// Error while forwarding the request to the master
    pub const FORWARD_TO_MASTER_ERROR: i32 = 50003;
}

/// Structured error returned by the Schema Registry API.
///
/// `code` is the domain error code (see [`error_codes`]), distinct from
/// the transport status, so callers can branch on semantic conditions
/// such as "subject not found" vs "schema invalid".
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("schema registry API error (code {code}): {message}")]
pub struct ApiError {
    /// Domain error code.
    #[serde(rename = "error_code")]
    pub code: i32,
    /// Human-readable message.
    pub message: String,
}

/// Errors surfaced by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The endpoint is not a well-formed absolute URL. Detected at
    /// construction time, before any network activity.
    #[error("invalid endpoint URL: {endpoint}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// Network or connection failure; the response (if any) was not
    /// decodable as an application error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP exchange completed but the body did not decode as the
    /// expected shape.
    #[error("error decoding response (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Structured, code-bearing failure returned by the registry.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Not a recognized compatibility level name.
    #[error("invalid compatibility level: {0}")]
    InvalidCompatibility(String),
}

impl RegistryError {
    /// The domain error code, if this is an API error.
    pub fn api_code(&self) -> Option<i32> {
        match self {
            RegistryError::Api(err) => Some(err.code),
            _ => None,
        }
    }
}
