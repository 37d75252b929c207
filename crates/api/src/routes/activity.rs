//! Route definitions for the `/activities` resource.
//!
//! Also nests exercise routes under `/activities/{activity_id}/exercises`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{activity, exercise};
use crate::state::AppState;

/// Routes mounted at `/activities`.
///
/// ```text
/// POST   /preview                     -> preview
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// GET    /{id}/render                 -> render_stored
///
/// GET    /{activity_id}/exercises     -> exercise::list_by_activity
/// POST   /{activity_id}/exercises     -> exercise::create
/// PUT    /{activity_id}/exercises     -> exercise::replace_all
/// ```
pub fn router() -> Router<AppState> {
    let exercise_routes = Router::new().route(
        "/",
        get(exercise::list_by_activity)
            .post(exercise::create)
            .put(exercise::replace_all),
    );

    Router::new()
        .route("/preview", post(activity::preview))
        .route(
            "/{id}",
            get(activity::get_by_id)
                .put(activity::update)
                .delete(activity::delete),
        )
        .route("/{id}/render", get(activity::render_stored))
        .nest("/{activity_id}/exercises", exercise_routes)
}
