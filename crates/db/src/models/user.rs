//! User account model and DTOs.

use kalvi_core::roles::Role;
use kalvi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
///
/// Holds the password hash, so it is never serialized. Responses use
/// [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// `true` while a lockout is in force at `now`.
    pub fn is_locked(&self, now: Timestamp) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

/// Counter state after a failed login.
#[derive(Debug, Clone, FromRow)]
pub struct LoginFailure {
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
}

impl LoginFailure {
    /// `true` when this failure triggered a lock. Locking resets the counter.
    pub fn locked(&self) -> bool {
        self.failed_login_count == 0 && self.locked_until.is_some()
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UserResponse {
    pub fn from_user(user: &User, role: Role) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn user(locked_until: Option<Timestamp>) -> User {
        let now = Utc::now();
        User {
            id: 1,
            username: "meena".into(),
            email: "meena@example.com".into(),
            password_hash: "hash".into(),
            role_id: 3,
            is_active: true,
            last_login_at: None,
            failed_login_count: 0,
            locked_until,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_failure_that_locks_resets_counter() {
        let until = Some(Utc::now() + Duration::minutes(15));
        assert!(LoginFailure { failed_login_count: 0, locked_until: until }.locked());
        assert!(!LoginFailure { failed_login_count: 3, locked_until: None }.locked());
        // A lapsed lock from earlier stays in the row until the next lock.
        let stale = Some(Utc::now() - Duration::minutes(1));
        assert!(!LoginFailure { failed_login_count: 1, locked_until: stale }.locked());
    }

    #[test]
    fn test_lock_expires() {
        let now = Utc::now();
        assert!(user(Some(now + Duration::minutes(5))).is_locked(now));
        assert!(!user(Some(now - Duration::minutes(5))).is_locked(now));
        assert!(!user(None).is_locked(now));
    }
}
