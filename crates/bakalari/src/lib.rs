//! bakalari - Async client for the Bakaláři school information system API
//!
//! All authenticated calls flow through a [`Session`], which owns the
//! connection, the token pair and an optional background token renewal.
//! [`Client`] wraps a session with one method per known endpoint.
//!
//! # Example
//!
//! ```no_run
//! use bakalari::{BaseUrl, Client, Credentials};
//!
//! # async fn example() -> Result<(), bakalari::Error> {
//! let client = Client::new(BaseUrl::new("https://bakalari.example.cz")?);
//! client.login(Credentials::new("novak.jan", "heslo"), true).await?;
//!
//! for subject in client.subjects().await?.as_array().into_iter().flatten() {
//!     println!("{}", subject["Subject"]["Name"]);
//! }
//!
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod route;
pub mod types;

// Re-export primary types at crate root for convenience
pub use api::{Client, EventScope, TimetableKind};
pub use auth::{AccessToken, Credentials, Login, Session, SessionState};
pub use config::SessionConfig;
pub use error::Error;
pub use http::{Payload, RequestBody, RequestOptions, StatusClass};
pub use reqwest::Method;
pub use route::{PathParam, Route};
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
