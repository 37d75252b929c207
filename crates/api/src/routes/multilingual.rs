//! Route definitions for the `/multilingual` views.

use axum::routing::get;
use axum::Router;

use crate::handlers::multilingual;
use crate::state::AppState;

/// Routes mounted at `/multilingual`.
///
/// ```text
/// GET /levels                   -> levels
/// GET /activities?lesson_id=    -> activities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/levels", get(multilingual::levels))
        .route("/activities", get(multilingual::activities))
}
