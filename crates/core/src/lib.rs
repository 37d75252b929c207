//! Domain logic for the Kalvi activity platform.
//!
//! No database and no HTTP: everything here is pure and synchronous so the
//! API server, the client and tests can share it.

pub mod activity;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod language;
pub mod media;
pub mod roles;
pub mod types;
