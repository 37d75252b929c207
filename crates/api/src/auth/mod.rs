//! Authentication primitives: Argon2id passwords, JWT access tokens and
//! hashed refresh tokens.

pub mod jwt;
pub mod password;
