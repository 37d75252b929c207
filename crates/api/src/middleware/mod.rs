//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`]: the caller identified by a Bearer token.
//! - [`rbac::RequireEditor`], [`rbac::RequireAuth`]: role gates built on
//!   top of it.

pub mod auth;
pub mod rbac;
