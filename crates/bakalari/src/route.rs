//! Route resolution.
//!
//! A [`Route`] is a method-tagged, fully resolved URL. Path templates use
//! `{name}` placeholders; text values are percent-encoded before substitution
//! so a parameter can never inject extra path segments or a query string.

use std::fmt;

use reqwest::Method;

use crate::error::{Error, InvalidInputError};
use crate::types::BaseUrl;

/// A value substituted into a path placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParam {
    /// Text, percent-encoded on substitution.
    Text(String),
    /// Substituted as `true` / `false`.
    Bool(bool),
    /// Substituted in decimal form.
    Int(i64),
}

impl PathParam {
    fn render(&self) -> String {
        match self {
            PathParam::Text(s) => urlencoding::encode(s).into_owned(),
            PathParam::Bool(b) => b.to_string(),
            PathParam::Int(i) => i.to_string(),
        }
    }
}

impl From<&str> for PathParam {
    fn from(s: &str) -> Self {
        PathParam::Text(s.to_string())
    }
}

impl From<String> for PathParam {
    fn from(s: String) -> Self {
        PathParam::Text(s)
    }
}

impl From<&String> for PathParam {
    fn from(s: &String) -> Self {
        PathParam::Text(s.clone())
    }
}

impl From<bool> for PathParam {
    fn from(b: bool) -> Self {
        PathParam::Bool(b)
    }
}

impl From<i64> for PathParam {
    fn from(i: i64) -> Self {
        PathParam::Int(i)
    }
}

impl From<u32> for PathParam {
    fn from(i: u32) -> Self {
        PathParam::Int(i64::from(i))
    }
}

/// A resolved, method-tagged URL ready to be sent.
///
/// # Example
///
/// ```
/// use bakalari::{BaseUrl, Method, PathParam, Route};
///
/// let base = BaseUrl::new("https://x.test").unwrap();
/// let route = Route::with_params(
///     &base,
///     Method::GET,
///     "/api/3/subjects/themes/{subject_id}",
///     [("subject_id", PathParam::from("a b"))],
/// )
/// .unwrap();
/// assert_eq!(route.url(), "https://x.test/api/3/subjects/themes/a%20b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    method: Method,
    url: String,
}

impl Route {
    /// Build a route from a template without placeholders.
    ///
    /// # Errors
    ///
    /// Returns an error if the template contains a placeholder.
    pub fn new(base: &BaseUrl, method: Method, template: &str) -> Result<Self, Error> {
        Self::with_params(base, method, template, std::iter::empty::<(&str, PathParam)>())
    }

    /// Build a route, substituting named path parameters into the template.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Route`] if a placeholder has no value, a
    /// parameter is not used by the template, a placeholder is unterminated
    /// or empty, or the same parameter is supplied twice.
    pub fn with_params<'a, I>(
        base: &BaseUrl,
        method: Method,
        template: &str,
        params: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (&'a str, PathParam)>,
    {
        // (name, value, used by a placeholder)
        let mut supplied: Vec<(&str, PathParam, bool)> = Vec::new();
        for (name, value) in params {
            if supplied.iter().any(|(n, _, _)| *n == name) {
                return Err(route_error(template, format!("parameter '{name}' given twice")));
            }
            supplied.push((name, value, false));
        }

        let mut path = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| route_error(template, "unterminated placeholder"))?;
            let name = &after[..close];
            if name.is_empty() {
                return Err(route_error(template, "empty placeholder"));
            }

            let entry = supplied
                .iter_mut()
                .find(|(n, _, _)| *n == name)
                .ok_or_else(|| route_error(template, format!("no value for '{{{name}}}'")))?;
            entry.2 = true;
            path.push_str(&entry.1.render());

            rest = &after[close + 1..];
        }
        path.push_str(rest);

        if let Some((name, _, _)) = supplied.iter().find(|(_, _, used)| !used) {
            return Err(route_error(
                template,
                format!("parameter '{name}' has no placeholder"),
            ));
        }

        Ok(Self {
            method,
            url: base.join(&path),
        })
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the resolved URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

fn route_error(template: &str, reason: impl Into<String>) -> Error {
    InvalidInputError::Route {
        template: template.to_string(),
        reason: reason.into(),
    }
    .into()
}
