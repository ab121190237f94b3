//! Per-request transport options.

use serde_json::Value;

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// A JSON document.
    Json(Value),
    /// Plain text, sent as-is.
    Text(String),
}

/// Extra headers, query parameters and body for [`Session::request`](crate::Session::request).
///
/// When no headers are given the request is sent with
/// `Content-Type: application/x-www-form-urlencoded` (or `application/json`
/// for a JSON body). Supplying any header replaces that default entirely.
///
/// # Example
///
/// ```
/// use bakalari::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query("from", "2024-09-01")
///     .query("to", "2024-09-30");
/// assert_eq!(options.query_pairs().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. Any header disables the default `Content-Type`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter when `value` is present.
    pub fn query_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Send form fields as the body.
    pub fn form<K, V, I>(mut self, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.body = Some(RequestBody::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        self
    }

    /// Send a JSON document as the body.
    pub fn json(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Send plain text as the body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(text.into()));
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<(String, String)>,
        Vec<(String, String)>,
        Option<RequestBody>,
    ) {
        (self.headers, self.query, self.body)
    }
}
