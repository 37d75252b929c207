//! Route definitions for the `/main-activities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::main_activity;
use crate::state::AppState;

/// Routes mounted at `/main-activities`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(main_activity::list).post(main_activity::create))
        .route(
            "/{id}",
            get(main_activity::get_by_id)
                .put(main_activity::update)
                .delete(main_activity::delete),
        )
}
