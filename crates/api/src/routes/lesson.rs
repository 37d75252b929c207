//! Route definitions for the `/lessons` resource.
//!
//! Also nests activity routes under `/lessons/{lesson_id}/activities`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{activity, lesson};
use crate::state::AppState;

/// Routes mounted at `/lessons`.
///
/// ```text
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
///
/// GET    /{lesson_id}/activities    -> activity::list_by_lesson
/// POST   /{lesson_id}/activities    -> activity::create
/// ```
pub fn router() -> Router<AppState> {
    let activity_routes =
        Router::new().route("/", get(activity::list_by_lesson).post(activity::create));

    Router::new()
        .route(
            "/{id}",
            get(lesson::get_by_id)
                .put(lesson::update)
                .delete(lesson::delete),
        )
        .nest("/{lesson_id}/activities", activity_routes)
}
