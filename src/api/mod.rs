//! Outbound client for the query backend.
//!
//! A single endpoint: the user's text goes out as `{"query": ...}` and the
//! JSON reply comes back as an untyped [`serde_json::Value`].

mod client;
mod error;

pub use client::QueryClient;
pub(crate) use client::endpoint;
pub use error::{Error, Result};
