//! Session configuration.

use std::time::Duration;

/// Client identifier the Bakaláři login endpoint expects from mobile clients.
pub const DEFAULT_CLIENT_ID: &str = "ANDR";

/// Tunables for a [`Session`](crate::Session).
///
/// The defaults match what the official mobile application sends, so most
/// callers never need to touch this.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use bakalari::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_refresh_margin(Duration::from_secs(120));
/// assert_eq!(config.client_id(), "ANDR");
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    client_id: String,
    user_agent: String,
    timeout: Option<Duration>,
    refresh_margin: Duration,
    min_refresh_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            user_agent: concat!("bakalari-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
            refresh_margin: Duration::from_secs(60),
            min_refresh_interval: Duration::from_secs(5),
        }
    }
}

impl SessionConfig {
    /// Override the `client_id` sent to the login endpoint.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Override the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Apply a total timeout to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// How long before expiry the renewal loop refreshes the token.
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Lower bound on the delay between two automatic refreshes.
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn refresh_margin(&self) -> Duration {
        self.refresh_margin
    }

    pub fn min_refresh_interval(&self) -> Duration {
        self.min_refresh_interval
    }

    /// Delay before the next automatic refresh for a token valid for `expires_in`.
    pub(crate) fn renewal_delay(&self, expires_in: Duration) -> Duration {
        expires_in
            .saturating_sub(self.refresh_margin)
            .max(self.min_refresh_interval)
    }
}
