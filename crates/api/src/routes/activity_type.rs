//! Route definitions for the `/activity-types` registry.

use axum::routing::get;
use axum::Router;

use crate::handlers::activity_type;
use crate::state::AppState;

/// Routes mounted at `/activity-types`.
///
/// ```text
/// GET /               -> list
/// GET /{id}/template  -> template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(activity_type::list))
        .route("/{id}/template", get(activity_type::template))
}
