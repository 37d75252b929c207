//! Typed HTTP client for the Kalvi API.
//!
//! Used by the admin tools and the learner app to talk to `kalvi-api`.
//! The bearer token lives in a caller-supplied [`TokenStore`].

pub mod client;
pub mod error;
pub mod models;
pub mod token;

pub use client::ApiClient;
pub use error::ClientError;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
