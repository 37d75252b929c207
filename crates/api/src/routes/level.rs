//! Route definitions for the `/levels` resource.
//!
//! Also nests lesson routes under `/levels/{level_id}/lessons`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{lesson, level};
use crate::state::AppState;

/// Routes mounted at `/levels`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
///
/// GET    /{level_id}/lessons    -> lesson::list_by_level
/// POST   /{level_id}/lessons    -> lesson::create
/// ```
pub fn router() -> Router<AppState> {
    let lesson_routes =
        Router::new().route("/", get(lesson::list_by_level).post(lesson::create));

    Router::new()
        .route("/", get(level::list).post(level::create))
        .route(
            "/{id}",
            get(level::get_by_id)
                .put(level::update)
                .delete(level::delete),
        )
        .nest("/{level_id}/lessons", lesson_routes)
}
