//! Tokens issued by `/api/login`.
//!
//! Both kinds wrap a shared, redacted [`Secret`]. Every request clones the
//! access token out of the session lock, so the text sits behind an `Arc`
//! and cloning never copies it.

use std::fmt;
use std::sync::Arc;

/// Opaque token text. Formats as `[REDACTED]`.
#[derive(Clone, PartialEq, Eq)]
struct Secret(Arc<str>);

impl Secret {
    fn new(text: impl Into<String>) -> Self {
        Self(Arc::from(text.into()))
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// The bearer token sent with every authenticated request.
///
/// Replaced as a whole on each refresh; treat the value as opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(Secret);

impl AccessToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token))
    }

    /// Returns the raw token, for building an `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0.0
    }
}

/// Exchanged at `/api/login` for a fresh token pair. Never leaves the crate.
#[derive(Debug, Clone)]
pub(crate) struct RefreshToken(Secret);

impl RefreshToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0.0
    }
}
