//! Read-only views with every language nested under one field instead of
//! flattened into `_ta`/`_en`/`_si` columns.

use axum::extract::{Query, State};
use axum::Json;
use kalvi_db::models::activity::MultilingualActivity;
use kalvi_db::models::level::MultilingualLevel;
use kalvi_db::repositories::{ActivityRepo, LevelRepo};

use super::activity::ensure_lesson_exists;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::query::LessonFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/multilingual/levels
pub async fn levels(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MultilingualLevel>>>> {
    let levels = LevelRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: levels.iter().map(MultilingualLevel::from).collect(),
    }))
}

/// GET /api/v1/multilingual/activities?lesson_id=
pub async fn activities(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(filter): Query<LessonFilter>,
) -> AppResult<Json<DataResponse<Vec<MultilingualActivity>>>> {
    ensure_lesson_exists(&state, filter.lesson_id).await?;
    let activities = ActivityRepo::list_by_lesson(&state.pool, filter.lesson_id).await?;
    Ok(Json(DataResponse {
        data: activities.iter().map(MultilingualActivity::from).collect(),
    }))
}
