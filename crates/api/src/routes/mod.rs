pub mod activity;
pub mod activity_type;
pub mod auth;
pub mod exercise;
pub mod health;
pub mod lesson;
pub mod level;
pub mod main_activity;
pub mod media;
pub mod multilingual;

use axum::routing::post;
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /activity-types                                  registry listing (public)
/// /activity-types/{id}/template                    default content (public)
/// /content/validate                                dry-run content check (POST)
///
/// /levels                                          list, create
/// /levels/{id}                                     get, update, delete
/// /levels/{level_id}/lessons                       list, create
///
/// /lessons/{id}                                    get, update, delete
/// /lessons/{lesson_id}/activities                  list, create
///
/// /main-activities                                 list, create
/// /main-activities/{id}                            get, update, delete
///
/// /activities/preview                              render unsaved content (POST)
/// /activities/{id}                                 get, update, delete
/// /activities/{id}/render                          render stored content
/// /activities/{activity_id}/exercises              list, create, replace all
///
/// /exercises/{id}                                  get, update, delete
///
/// /multilingual/levels                             levels with nested names
/// /multilingual/activities?lesson_id=              activities with nested titles
///
/// /media                                           upload (multipart POST)
/// /media/{id}                                      asset metadata
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        // Activity type registry and content dry-run.
        .nest("/activity-types", activity_type::router())
        .route(
            "/content/validate",
            post(handlers::activity_type::validate_content),
        )
        // Curriculum hierarchy.
        .nest("/levels", level::router())
        .nest("/lessons", lesson::router())
        .nest("/main-activities", main_activity::router())
        .nest("/activities", activity::router())
        .nest("/exercises", exercise::router())
        .nest("/multilingual", multilingual::router())
        .nest("/media", media::router(config.media_max_bytes))
}
