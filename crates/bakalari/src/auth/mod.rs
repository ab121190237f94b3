//! Authentication types and session management.
//!
//! All authenticated operations require a [`Session`] that has been logged in.

mod credentials;
mod renewal;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use session::{Login, Session, SessionState};
pub use tokens::AccessToken;
