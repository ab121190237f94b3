//! HTTP client implementation.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::config::SessionConfig;
use crate::error::{ApiError, Error, InvalidInputError};
use crate::route::Route;

use super::options::{RequestBody, RequestOptions};
use super::status::{self, StatusClass};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed JSON document.
    Json(Value),
    /// Raw body bytes, exactly as received.
    Raw(Vec<u8>),
}

impl Payload {
    /// Returns the JSON document, parsing raw bytes if necessary.
    pub fn into_json(self) -> Result<Value, Error> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Raw(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }

    /// Returns the body bytes, serializing JSON if necessary.
    pub fn into_bytes(self) -> Result<Vec<u8>, Error> {
        match self {
            Payload::Json(value) => Ok(serde_json::to_vec(&value)?),
            Payload::Raw(bytes) => Ok(bytes),
        }
    }
}

/// The single transport connection owned by a session.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build the transport for the given configuration.
    pub(crate) fn new(config: &SessionConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// Send a request and decode the response.
    ///
    /// The bearer header is attached when `token` is given.
    #[instrument(skip(self, options, token), fields(%route))]
    pub(crate) async fn send(
        &self,
        route: &Route,
        raw: bool,
        options: RequestOptions,
        token: Option<&str>,
    ) -> Result<Payload, Error> {
        let (headers, query, body) = options.into_parts();
        let headers = build_headers(&headers, body.as_ref(), token)?;

        debug!(raw, "sending request");

        let mut request = self
            .client
            .request(route.method().clone(), route.url())
            .headers(headers);
        if !query.is_empty() {
            request = request.query(&query);
        }
        request = match body {
            Some(RequestBody::Form(fields)) => request.body(encode_form(&fields)),
            Some(RequestBody::Json(value)) => request.body(serde_json::to_vec(&value)?),
            Some(RequestBody::Text(text)) => request.body(text),
            None => request,
        };

        let response = request.send().await?;
        self.handle_response(response, raw).await
    }

    /// Classify the status and decode the body.
    async fn handle_response(
        &self,
        response: reqwest::Response,
        raw: bool,
    ) -> Result<Payload, Error> {
        let status = response.status();
        let class = StatusClass::of(status);
        let content_type = status::content_type(response.headers()).map(str::to_string);
        let json = status::is_json(content_type.as_deref());
        trace!(%status, ?class, content_type = content_type.as_deref(), "response");

        if !class.falls_through() {
            let body = response.text().await?;
            let message = status::error_message(status, json, &body);
            debug!(%status, %message, "request failed");
            return Err(match class {
                StatusClass::BadRequest => ApiError::BadRequest { message },
                StatusClass::Unauthorized => ApiError::Unauthorized { message },
                _ => ApiError::NotFound { message },
            }
            .into());
        }

        if class == StatusClass::Unclassified {
            debug!(%status, "unclassified status, processing body");
        }

        if !raw && !json {
            return Err(ApiError::invalid_response(format!(
                "expected application/json, got {}",
                content_type.as_deref().unwrap_or("no content type")
            ))
            .into());
        }

        let bytes = response.bytes().await?;
        if raw {
            Ok(Payload::Raw(bytes.to_vec()))
        } else {
            Ok(Payload::Json(serde_json::from_slice(&bytes)?))
        }
    }
}

/// Assemble request headers: caller headers, or the default content type,
/// plus the bearer token.
fn build_headers(
    custom: &[(String, String)],
    body: Option<&RequestBody>,
    token: Option<&str>,
) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    if custom.is_empty() {
        let content_type = match body {
            Some(RequestBody::Json(_)) => JSON_CONTENT_TYPE,
            _ => FORM_CONTENT_TYPE,
        };
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    } else {
        for (name, value) in custom {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid_header(name, e))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid_header(name, e))?;
            headers.append(header_name, header_value);
        }
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| invalid_header(AUTHORIZATION.as_str(), e))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn invalid_header(name: &str, err: impl std::fmt::Display) -> Error {
    InvalidInputError::Header {
        name: name.to_string(),
        reason: err.to_string(),
    }
    .into()
}

/// Encode form fields as `application/x-www-form-urlencoded`.
fn encode_form(fields: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        assert!(HttpClient::new(&SessionConfig::default()).is_ok());
    }

    #[test]
    fn default_content_type_is_form() {
        let headers = build_headers(&[], None, None).unwrap();
        assert_eq!(headers[CONTENT_TYPE], FORM_CONTENT_TYPE);
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn json_body_defaults_to_json_content_type() {
        let body = RequestBody::Json(serde_json::json!({}));
        let headers = build_headers(&[], Some(&body), None).unwrap();
        assert_eq!(headers[CONTENT_TYPE], JSON_CONTENT_TYPE);
    }

    #[test]
    fn custom_headers_replace_defaults() {
        let custom = vec![("Accept".to_string(), "text/plain".to_string())];
        let headers = build_headers(&custom, None, Some("tok")).unwrap();
        assert!(!headers.contains_key(CONTENT_TYPE));
        assert_eq!(headers["accept"], "text/plain");
        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn invalid_header_is_rejected() {
        let custom = vec![("bad header".to_string(), "x".to_string())];
        let err = build_headers(&custom, None, None).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Header { .. })
        ));
    }

    #[test]
    fn form_encoding() {
        let fields = vec![
            ("client_id".to_string(), "ANDR".to_string()),
            ("password".to_string(), "a b&c".to_string()),
        ];
        assert_eq!(
            encode_form(&fields),
            "client_id=ANDR&password=a+b%26c"
        );
    }
}
