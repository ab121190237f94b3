//! HTTP transport.
//!
//! This module owns the reqwest client, request assembly and the
//! classification of responses into payloads or typed errors.

mod client;
mod options;
mod status;

pub(crate) use client::HttpClient;
pub use client::Payload;
pub use options::{RequestBody, RequestOptions};
pub use status::StatusClass;
