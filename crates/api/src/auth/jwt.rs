//! Access and refresh tokens.
//!
//! Access tokens are HS256 JWTs whose claims carry the account's [`Role`],
//! so RBAC checks never touch the database. Refresh tokens are opaque; the
//! server keeps only their SHA-256 hex digest in `user_sessions`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use kalvi_core::roles::Role;
use kalvi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccessClaims {
    pub sub: DbId,
    /// Unknown role names fail to decode, which rejects the token.
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_mins: i64,
    pub refresh_ttl_days: i64,
}

impl JwtConfig {
    /// Load token settings from the environment.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | no       | `60`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or a lifetime is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_ttl_mins: positive_env("JWT_ACCESS_EXPIRY_MINS", 60),
            refresh_ttl_days: positive_env("JWT_REFRESH_EXPIRY_DAYS", 30),
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_mins * 60
    }

    /// When a refresh session issued at `now` stops being accepted.
    pub fn refresh_expires_at(&self, now: Timestamp) -> Timestamp {
        now + Duration::days(self.refresh_ttl_days)
    }
}

fn positive_env(name: &str, default: i64) -> i64 {
    let value = std::env::var(name)
        .map(|v| {
            v.parse::<i64>()
                .unwrap_or_else(|_| panic!("{name} must be an integer"))
        })
        .unwrap_or(default);
    assert!(value > 0, "{name} must be positive");
    value
}

/// Sign an access token for `user_id` acting as `role`.
pub fn issue_access_token(
    user_id: DbId,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = AccessClaims {
        sub: user_id,
        role,
        exp: now + config.access_ttl_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry of a bearer token.
pub fn decode_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// A freshly minted refresh token. `plaintext` goes to the client once,
/// `hash` goes to the database.
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let hash = Self::digest(&plaintext);
        Self { plaintext, hash }
    }

    /// Hex SHA-256 of a presented token, for session lookups.
    pub fn digest(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "kalvi-unit-secret".to_string(),
            access_ttl_mins: 60,
            refresh_ttl_days: 30,
        }
    }

    fn sign(claims: &serde_json::Value, config: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_role_survives_the_round_trip() {
        let token = issue_access_token(42, Role::Editor, &config()).unwrap();
        let claims = decode_access_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Editor);
        assert_eq!(claims.exp - claims.iat, config().access_ttl_secs());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let now = Utc::now().timestamp();
        let token = sign(
            &serde_json::json!({"sub": 7, "role": "superuser", "exp": now + 600, "iat": now, "jti": "x"}),
            &config(),
        );
        assert_matches!(decode_access_token(&token, &config()), Err(_));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        // Past the default 60 second leeway.
        let token = sign(
            &serde_json::json!({"sub": 1, "role": "learner", "exp": now - 300, "iat": now - 600, "jti": "x"}),
            &config(),
        );
        assert!(decode_access_token(&token, &config()).is_err());
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = issue_access_token(1, Role::Learner, &config()).unwrap();
        let other = JwtConfig {
            secret: "someone-else".to_string(),
            ..config()
        };
        assert!(decode_access_token(&token, &other).is_err());
    }

    #[test]
    fn test_refresh_tokens_are_unique_and_hashed() {
        let a = RefreshToken::generate();
        let b = RefreshToken::generate();
        assert_ne!(a.plaintext, b.plaintext);
        assert_eq!(a.hash, RefreshToken::digest(&a.plaintext));
        assert_eq!(a.hash.len(), 64);
    }

    #[test]
    fn test_refresh_expiry_uses_days() {
        let now = Utc::now();
        assert_eq!(config().refresh_expires_at(now) - now, Duration::days(30));
    }
}
