//! Error types for the bakalari library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, server-reported API failures, session lifecycle misuse and
//! input validation errors.

use thiserror::Error;

/// The unified error type for bakalari operations.
///
/// Every failure the library can produce maps onto one of these variants,
/// so callers can match on the kind without inspecting message text.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered, but with an error or an unusable response.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The session is in the wrong lifecycle state for the operation.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Input validation errors (base URL, route template, credentials).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status the server reported, if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => api.status(),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Errors reported by, or decoded from, the Bakaláři server.
///
/// The message is the server's own text when it supplied one.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 400.
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// The server returned 401.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The server returned 404.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The response could not be used as requested (wrong content type,
    /// malformed JSON, missing fields).
    #[error("invalid server response: {message}")]
    InvalidServerResponse { message: String },
}

impl ApiError {
    /// Returns the server-supplied (or fallback) message.
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message }
            | ApiError::Unauthorized { message }
            | ApiError::NotFound { message }
            | ApiError::InvalidServerResponse { message } => message,
        }
    }

    /// Returns the HTTP status this error was raised for, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest { .. } => Some(400),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::InvalidServerResponse { .. } => None,
        }
    }

    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        ApiError::InvalidServerResponse {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Api(ApiError::invalid_response(err.to_string()))
    }
}

/// Session lifecycle errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No connection exists: the session was never logged in, or was closed.
    #[error("not connected")]
    NotConnected,

    /// A connection exists but no access token has been obtained yet.
    #[error("not authenticated")]
    NotAuthenticated,

    /// `login` was called on a session that already holds a token.
    #[error("already authenticated")]
    AlreadyAuthenticated,

    /// `login` was called on a closed session.
    #[error("session closed")]
    Closed,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid route template or parameters.
    #[error("invalid route '{template}': {reason}")]
    Route { template: String, reason: String },

    /// Missing username or password.
    #[error("invalid credentials: {reason}")]
    Credentials { reason: String },

    /// Header name or value that cannot be sent.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },
}
