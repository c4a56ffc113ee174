//! Error types for the brand API client.
//!
//! # Design
//! Every `ApiError` variant renders a message that can be shown to the user
//! as-is; the UI never maps kinds to strings itself. Callers that need to
//! branch do so on `ApiError::kind()`, not on message text.

use thiserror::Error;

/// Fixed message shown for any connectivity-class transport failure.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error: Unable to connect to the server. Please check your internet connection.";

/// Errors returned by `BrandClient` operations. All of them are terminal for
/// the current call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The caller passed an empty or absent brand id. No request was issued.
    #[error("Invalid brand ID: ID must be a non-empty string")]
    InvalidId,

    /// The server could not be reached (name resolution, refused connection).
    /// `cause` keeps the transport's own text for logs only.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network { cause: String },

    /// The transport failed for a reason other than connectivity.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server returned a non-2xx status (other than 404 on a single fetch).
    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    /// 404 on a single-brand fetch.
    #[error("Brand with ID \"{id}\" not found")]
    NotFound { id: String },

    /// The body is JSON but not the expected envelope.
    #[error("Invalid response format: expected {expected}")]
    Format { expected: &'static str },

    /// The body is not JSON at all.
    #[error("Invalid response format: {0}")]
    Deserialization(String),

    /// A brand inside the envelope lacks one of the required fields.
    #[error("Invalid brand data: missing required fields")]
    MissingFields { field: &'static str },

    /// A brand field holds an array or object instead of a scalar.
    #[error("Invalid brand data: field `{field}` is not a scalar value")]
    NonScalarField { field: &'static str },
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    Transport,
    Http,
    NotFound,
    Format,
    Data,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidId => ErrorKind::Validation,
            ApiError::Network { .. } => ErrorKind::Network,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Format { .. } | ApiError::Deserialization(_) => ErrorKind::Format,
            ApiError::MissingFields { .. } | ApiError::NonScalarField { .. } => ErrorKind::Data,
        }
    }

    /// HTTP status associated with the failure, if the server answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Errors raised while constructing a `BrandClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
