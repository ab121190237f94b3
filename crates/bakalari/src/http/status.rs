//! Response classification.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde::Deserialize;

/// How a response status is treated.
///
/// Only 400, 401 and 404 are failures on status alone. Every other code,
/// success or not, goes through normal response processing and can only fail
/// on a content-type mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200 OK.
    Success,
    /// 400 Bad Request.
    BadRequest,
    /// 401 Unauthorized.
    Unauthorized,
    /// 404 Not Found.
    NotFound,
    /// Anything else; processed like [`StatusClass::Success`].
    Unclassified,
}

impl StatusClass {
    pub fn of(status: StatusCode) -> Self {
        match status {
            StatusCode::OK => StatusClass::Success,
            StatusCode::BAD_REQUEST => StatusClass::BadRequest,
            StatusCode::UNAUTHORIZED => StatusClass::Unauthorized,
            StatusCode::NOT_FOUND => StatusClass::NotFound,
            _ => StatusClass::Unclassified,
        }
    }

    /// Whether the body should be decoded as a success payload.
    pub fn falls_through(self) -> bool {
        matches!(self, StatusClass::Success | StatusClass::Unclassified)
    }
}

/// Error body shape used by the login endpoint (`error_description`) and the
/// v3 API (`Message`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default, rename = "Message")]
    message: Option<String>,
}

/// Returns the response content type, if declared.
pub(crate) fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

pub(crate) fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.trim_start().starts_with("application/json"))
}

/// Extract a human-readable message from an error response body.
///
/// JSON bodies yield `error_description`, then `Message`; other bodies yield
/// their text. Anything empty or undecodable falls back to the status line.
pub(crate) fn error_message(status: StatusCode, json: bool, body: &str) -> String {
    let body = body.trim();

    if json {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
            && let Some(message) = parsed.error_description.or(parsed.message)
        {
            return message;
        }
    } else if !body.is_empty() {
        return body.to_string();
    }

    format!("HTTP {}", status)
}
