//! Session management for authenticated Bakaláři API calls.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};

use crate::config::SessionConfig;
use crate::error::{ApiError, Error, SessionError};
use crate::http::{HttpClient, Payload, RequestOptions};
use crate::route::Route;
use crate::types::BaseUrl;
use crate::Method;

use super::credentials::Credentials;
use super::renewal::{self, Renewal};
use super::tokens::{AccessToken, RefreshToken};

const LOGIN_PATH: &str = "/api/login";

/// An authenticated connection to one Bakaláři server.
///
/// Every API call flows through [`Session::request`]. The session owns the
/// single transport connection, the token pair, and (when requested at
/// login) a background task that renews the access token shortly before it
/// expires.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Requests only ever read a complete token; login and
/// refresh replace the token pair as a whole and never run concurrently
/// with each other.
///
/// # Example
///
/// ```no_run
/// use bakalari::{BaseUrl, Credentials, Method, RequestOptions, Route, Session};
///
/// # async fn example() -> Result<(), bakalari::Error> {
/// let base = BaseUrl::new("https://bakalari.example.cz")?;
/// let session = Session::new(base.clone());
/// let login = session
///     .login(Credentials::new("novak.jan", "heslo"), true)
///     .await?;
/// println!("API version {}", login.api_version);
///
/// let route = Route::new(&base, Method::GET, "/api/3/user")?;
/// let user = session.request_json(&route, RequestOptions::new()).await?;
/// println!("{}", user["FullName"]);
///
/// session.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

pub(super) struct SessionInner {
    base: BaseUrl,
    pub(super) config: SessionConfig,
    connection: RwLock<Connection>,
    tokens: RwLock<Option<SessionTokens>>,
    /// Held by login and refresh, the only token writers.
    writer: Mutex<()>,
    renewal: Mutex<Option<Renewal>>,
}

enum Connection {
    Idle,
    Open(HttpClient),
    Closed,
}

struct SessionTokens {
    access_token: AccessToken,
    refresh_token: RefreshToken,
    api_version: String,
}

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token yet.
    Unauthenticated,
    /// Holding a token.
    Authenticated,
    /// Holding a token while a refresh is in flight.
    Refreshing,
    /// Closed; terminal.
    Closed,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Login {
    /// Bearer token issued by the server.
    pub access_token: AccessToken,
    /// Server-advertised API version (`bak:ApiVersion`).
    pub api_version: String,
    /// Lifetime of the access token.
    pub expires_in: Duration,
}

/// Token endpoint response, for both grant types.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    #[serde(default, rename = "bak:ApiVersion")]
    api_version: Option<String>,
}

impl Session {
    /// Create an unauthenticated session with the default configuration.
    ///
    /// No connection is opened until [`Session::login`].
    pub fn new(base: BaseUrl) -> Self {
        Self::with_config(base, SessionConfig::default())
    }

    /// Create an unauthenticated session with a custom configuration.
    pub fn with_config(base: BaseUrl, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                base,
                config,
                connection: RwLock::new(Connection::Idle),
                tokens: RwLock::new(None),
                writer: Mutex::new(()),
                renewal: Mutex::new(None),
            }),
        }
    }

    /// Log in with a password grant.
    ///
    /// Opens the connection on first use. When `auto_refresh` is set, a
    /// background task keeps the access token fresh until [`Session::close`].
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyAuthenticated`] if the session holds a token
    /// - [`SessionError::Closed`] if the session was closed
    /// - [`ApiError`] variants for server-reported failures (wrong password is
    ///   a 400 with the server's `error_description`)
    ///
    /// A failed login leaves the session unauthenticated, so it may be retried.
    #[instrument(skip(self, credentials), fields(base = %self.inner.base, username = %credentials.username()))]
    pub async fn login(&self, credentials: Credentials, auto_refresh: bool) -> Result<Login, Error> {
        credentials.validate()?;
        info!("Logging in");

        let login = {
            let _writer = self.inner.writer.lock().await;
            let client = self.inner.connect().await?;

            if self.inner.tokens.read().await.is_some() {
                return Err(SessionError::AlreadyAuthenticated.into());
            }

            let options = RequestOptions::new().form([
                ("client_id", self.inner.config.client_id()),
                ("grant_type", "password"),
                ("username", credentials.username()),
                ("password", credentials.password()),
            ]);
            let response: TokenResponse = self.inner.token_request(&client, options).await?;

            let api_version = response.api_version.ok_or_else(|| {
                ApiError::invalid_response("login response is missing bak:ApiVersion")
            })?;
            let login = Login {
                access_token: AccessToken::new(response.access_token),
                api_version: api_version.clone(),
                expires_in: Duration::from_secs(response.expires_in),
            };

            self.inner
                .store_tokens(SessionTokens {
                    access_token: login.access_token.clone(),
                    refresh_token: RefreshToken::new(response.refresh_token),
                    api_version,
                })
                .await?;
            login
        };

        debug!(api_version = %login.api_version, expires_in = ?login.expires_in, "Logged in");

        if auto_refresh {
            let delay = self.inner.config.renewal_delay(login.expires_in);
            SessionInner::start_renewal(&self.inner, delay).await;
        }

        Ok(login)
    }

    /// Send an authenticated request.
    ///
    /// With `raw` set the body is returned untouched as [`Payload::Raw`];
    /// otherwise the response must declare a JSON content type and is parsed
    /// into [`Payload::Json`].
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotConnected`] before login or after close
    /// - [`SessionError::NotAuthenticated`] while no token is held
    /// - [`ApiError::BadRequest`], [`ApiError::Unauthorized`],
    ///   [`ApiError::NotFound`] for 400, 401 and 404 responses
    /// - [`ApiError::InvalidServerResponse`] for a non-JSON body when JSON was
    ///   expected
    #[instrument(skip(self, options), fields(%route))]
    pub async fn request(
        &self,
        route: &Route,
        raw: bool,
        options: RequestOptions,
    ) -> Result<Payload, Error> {
        // The token is read under the connection guard so a concurrent close
        // is seen as NotConnected, never as a missing token
        let (client, token) = {
            let connection = self.inner.connection.read().await;
            let Connection::Open(client) = &*connection else {
                return Err(SessionError::NotConnected.into());
            };
            (client.clone(), self.inner.current_access_token().await?)
        };

        client.send(route, raw, options, Some(token.as_str())).await
    }

    /// Send an authenticated request and return the parsed JSON body.
    pub async fn request_json(&self, route: &Route, options: RequestOptions) -> Result<Value, Error> {
        self.request(route, false, options).await?.into_json()
    }

    /// Send an authenticated request and return the body bytes.
    pub async fn request_raw(
        &self,
        route: &Route,
        options: RequestOptions,
    ) -> Result<Vec<u8>, Error> {
        self.request(route, true, options).await?.into_bytes()
    }

    /// Exchange the refresh token for a new token pair.
    ///
    /// Returns the lifetime of the new access token. The renewal loop calls
    /// this on its own; calling it by hand is safe and never races with it.
    pub async fn refresh(&self) -> Result<Duration, Error> {
        self.inner.refresh().await
    }

    /// Close the session.
    ///
    /// Stops the renewal task, drops the connection and forgets the tokens.
    /// Later requests fail with [`SessionError::NotConnected`]. Calling this
    /// more than once is harmless.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub async fn close(&self) {
        let previous = {
            let mut connection = self.inner.connection.write().await;
            std::mem::replace(&mut *connection, Connection::Closed)
        };
        *self.inner.tokens.write().await = None;

        let renewal = self.inner.renewal.lock().await.take();
        if let Some(renewal) = renewal {
            renewal.stop().await;
        }

        match previous {
            Connection::Closed => debug!("Session already closed"),
            _ => info!("Session closed"),
        }
    }

    /// Returns the current lifecycle state.
    pub async fn state(&self) -> SessionState {
        let connection = self.inner.connection.read().await;
        match &*connection {
            Connection::Idle => SessionState::Unauthenticated,
            Connection::Closed => SessionState::Closed,
            Connection::Open(_) => {
                if self.inner.tokens.read().await.is_none() {
                    SessionState::Unauthenticated
                } else if self.inner.writer.try_lock().is_err() {
                    SessionState::Refreshing
                } else {
                    SessionState::Authenticated
                }
            }
        }
    }

    /// Returns the base URL this session talks to.
    pub fn base_url(&self) -> &BaseUrl {
        &self.inner.base
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Returns the current access token, if logged in.
    pub async fn access_token(&self) -> Option<AccessToken> {
        self.inner
            .tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Returns the API version reported at login, if logged in.
    pub async fn api_version(&self) -> Option<String> {
        self.inner
            .tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.api_version.clone())
    }

    /// Whether a background renewal task is running.
    pub async fn is_auto_refreshing(&self) -> bool {
        self.inner
            .renewal
            .lock()
            .await
            .as_ref()
            .is_some_and(|r| !r.is_finished())
    }
}

impl SessionInner {
    /// Returns the open connection, creating it if the session is idle.
    async fn connect(&self) -> Result<HttpClient, Error> {
        let mut connection = self.connection.write().await;
        match &*connection {
            Connection::Open(client) => Ok(client.clone()),
            Connection::Closed => Err(SessionError::Closed.into()),
            Connection::Idle => {
                debug!("Opening connection");
                let client = HttpClient::new(&self.config)?;
                *connection = Connection::Open(client.clone());
                Ok(client)
            }
        }
    }

    /// Returns the open connection without creating one.
    async fn client(&self) -> Result<HttpClient, Error> {
        match &*self.connection.read().await {
            Connection::Open(client) => Ok(client.clone()),
            Connection::Idle | Connection::Closed => Err(SessionError::NotConnected.into()),
        }
    }

    async fn current_access_token(&self) -> Result<AccessToken, Error> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or_else(|| SessionError::NotAuthenticated.into())
    }

    /// Replace the token pair, unless the session was closed meanwhile.
    async fn store_tokens(&self, tokens: SessionTokens) -> Result<(), Error> {
        let connection = self.connection.read().await;
        if !matches!(&*connection, Connection::Open(_)) {
            return Err(SessionError::Closed.into());
        }
        *self.tokens.write().await = Some(tokens);
        Ok(())
    }

    /// POST a grant to the login endpoint. No bearer header is sent.
    async fn token_request<T: DeserializeOwned>(
        &self,
        client: &HttpClient,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let route = Route::new(&self.base, Method::POST, LOGIN_PATH)?;
        let value = client.send(&route, false, options, None).await?.into_json()?;
        Ok(serde_json::from_value(value)?)
    }

    #[instrument(skip(self), fields(base = %self.base))]
    pub(super) async fn refresh(&self) -> Result<Duration, Error> {
        let _writer = self.writer.lock().await;
        let client = self.client().await?;

        let (refresh_token, api_version) = {
            let tokens = self.tokens.read().await;
            let tokens = tokens.as_ref().ok_or(SessionError::NotAuthenticated)?;
            (tokens.refresh_token.clone(), tokens.api_version.clone())
        };

        info!("Refreshing access token");

        let options = RequestOptions::new().form([
            ("client_id", self.config.client_id()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ]);
        let response: TokenResponse = self.token_request(&client, options).await?;
        let expires_in = Duration::from_secs(response.expires_in);

        self.store_tokens(SessionTokens {
            access_token: AccessToken::new(response.access_token),
            refresh_token: RefreshToken::new(response.refresh_token),
            api_version: response.api_version.unwrap_or(api_version),
        })
        .await?;

        debug!(?expires_in, "Access token refreshed");
        Ok(expires_in)
    }

    /// Spawn the renewal loop, unless the session was closed meanwhile or a
    /// loop is already running.
    async fn start_renewal(self: &Arc<Self>, delay: Duration) {
        let mut renewal = self.renewal.lock().await;
        if !matches!(&*self.connection.read().await, Connection::Open(_)) {
            return;
        }
        if renewal.as_ref().is_some_and(|r| !r.is_finished()) {
            return;
        }
        debug!(?delay, "Scheduling token renewal");
        *renewal = Some(renewal::spawn(Arc::downgrade(self), delay));
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base", &self.inner.base)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
