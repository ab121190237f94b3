//! Login credentials type.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// Username and password for a Bakaláři account.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use bakalari::Credentials;
///
/// let creds = Credentials::new("novak.jan", "heslo");
/// assert_eq!(creds.username(), "novak.jan");
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password. Only used to build the login form.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Both parts must be non-empty.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.username.trim().is_empty() {
            return Err(InvalidInputError::Credentials {
                reason: "username cannot be empty".to_string(),
            }
            .into());
        }
        if self.password.is_empty() {
            return Err(InvalidInputError::Credentials {
                reason: "password cannot be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
