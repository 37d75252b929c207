//! Repository tests for users, roles and sessions.
//!
//! Need `DATABASE_URL`; run with `cargo test -p kalvi-db -- --ignored`.

use chrono::{Duration, Utc};
use kalvi_core::roles::Role;
use kalvi_db::models::session::CreateSession;
use kalvi_db::models::user::CreateUser;
use kalvi_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use sqlx::PgPool;

async fn learner(pool: &PgPool, username: &str) -> kalvi_db::models::user::User {
    let role_id = RoleRepo::id_of(pool, Role::Learner).await.unwrap().unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role_id,
        },
    )
    .await
    .unwrap()
}

async fn session(pool: &PgPool, user_id: i64, hash: &str, expires_in: Duration) {
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id,
            refresh_token_hash: hash.to_string(),
            expires_at: Utc::now() + expires_in,
            user_agent: None,
        },
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_roles_are_seeded(pool: PgPool) {
    for role in [Role::Admin, Role::Editor, Role::Learner] {
        let id = RoleRepo::id_of(&pool, role).await.unwrap().unwrap();
        assert_eq!(RoleRepo::role_of(&pool, id).await.unwrap(), Some(role));
    }
    assert_eq!(RoleRepo::role_of(&pool, 9_999).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_lock_applies_on_threshold_and_restarts_counter(pool: PgPool) {
    let user = learner(&pool, "kavin").await;
    let until = Utc::now() + Duration::minutes(15);

    for expected in 1..=2 {
        let failure = UserRepo::record_failed_login(&pool, user.id, 3, until).await.unwrap();
        assert_eq!(failure.failed_login_count, expected);
        assert!(!failure.locked());
    }
    let failure = UserRepo::record_failed_login(&pool, user.id, 3, until).await.unwrap();
    assert!(failure.locked());
    let locked = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(locked.is_locked(Utc::now()));
    assert_eq!(locked.failed_login_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_failure_after_lapsed_lock_does_not_relock(pool: PgPool) {
    let user = learner(&pool, "meena").await;
    let lapsed = Utc::now() - Duration::minutes(1);
    for _ in 0..3 {
        UserRepo::record_failed_login(&pool, user.id, 3, lapsed).await.unwrap();
    }

    let next_lock = Utc::now() + Duration::minutes(15);
    let failure = UserRepo::record_failed_login(&pool, user.id, 3, next_lock).await.unwrap();
    assert_eq!(failure.failed_login_count, 1);
    assert!(!failure.locked());
    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(!user.is_locked(Utc::now()));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_successful_login_clears_failures(pool: PgPool) {
    let user = learner(&pool, "kavya").await;
    let until = Utc::now() + Duration::minutes(15);
    UserRepo::record_failed_login(&pool, user.id, 5, until).await.unwrap();

    UserRepo::record_successful_login(&pool, user.id).await.unwrap();
    let reset = UserRepo::find_by_username(&pool, "kavya").await.unwrap().unwrap();
    assert_eq!(reset.failed_login_count, 0);
    assert!(reset.locked_until.is_none());
    assert!(reset.last_login_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_refresh_session_is_consumed_once(pool: PgPool) {
    let user = learner(&pool, "nila").await;
    session(&pool, user.id, "abc123", Duration::days(1)).await;

    let consumed = SessionRepo::consume(&pool, "abc123").await.unwrap().unwrap();
    assert_eq!(consumed.user_id, user.id);
    assert!(consumed.is_revoked);
    assert!(SessionRepo::consume(&pool, "abc123").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_expired_session_cannot_be_consumed(pool: PgPool) {
    let user = learner(&pool, "arul").await;
    session(&pool, user.id, "old", Duration::days(-1)).await;
    assert!(SessionRepo::consume(&pool, "old").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_purge_keeps_only_live_sessions(pool: PgPool) {
    let user = learner(&pool, "devi").await;
    session(&pool, user.id, "live", Duration::days(1)).await;
    session(&pool, user.id, "expired", Duration::days(-1)).await;
    session(&pool, user.id, "used", Duration::days(1)).await;
    SessionRepo::consume(&pool, "used").await.unwrap();

    assert_eq!(SessionRepo::purge_dead(&pool).await.unwrap(), 2);
    assert!(SessionRepo::consume(&pool, "live").await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_logout_revokes_every_session(pool: PgPool) {
    let user = learner(&pool, "ezhil").await;
    session(&pool, user.id, "phone", Duration::days(1)).await;
    session(&pool, user.id, "tablet", Duration::days(1)).await;

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap(), 2);
    assert!(SessionRepo::consume(&pool, "phone").await.unwrap().is_none());
}
