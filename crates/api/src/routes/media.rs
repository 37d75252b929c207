//! Route definitions for the `/media` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::media;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Routes mounted at `/media`.
///
/// The upload route replaces axum's default 2 MiB body limit with one sized
/// for `max_upload_bytes`.
///
/// ```text
/// POST /       -> upload (multipart, field `file`)
/// GET  /{id}   -> get_by_id
/// ```
pub fn router(max_upload_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES))
        .unwrap_or(usize::MAX);

    Router::new()
        .route(
            "/",
            post(media::upload)
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
        .route("/{id}", get(media::get_by_id))
}
