//! Handlers for the `/levels` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kalvi_core::error::CoreError;
use kalvi_core::types::DbId;
use kalvi_db::models::level::{CreateLevel, Level, UpdateLevel};
use kalvi_db::repositories::LevelRepo;

use super::{merged_name, require_name};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireEditor};
use crate::query::LangParams;
use crate::response::{DataResponse, Localized};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Level",
        id,
    })
}

/// POST /api/v1/levels
pub async fn create(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateLevel>,
) -> AppResult<(StatusCode, Json<Level>)> {
    require_name("Level", &input.name())?;
    let level = LevelRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(level)))
}

/// GET /api/v1/levels
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<Vec<Localized<Level>>>>> {
    let lang = params.language(state.config.default_language)?;
    let levels = LevelRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: Localized::all(levels, lang),
    }))
}

/// GET /api/v1/levels/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<Localized<Level>>> {
    let lang = params.language(state.config.default_language)?;
    let level = LevelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Localized::new(level, lang)))
}

/// PUT /api/v1/levels/{id}
pub async fn update(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLevel>,
) -> AppResult<Json<Level>> {
    let existing = LevelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    require_name(
        "Level",
        &merged_name(
            [&input.name_ta, &input.name_en, &input.name_si],
            [existing.name_ta, existing.name_en, existing.name_si],
        ),
    )?;
    let level = LevelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(level))
}

/// DELETE /api/v1/levels/{id}
///
/// Removes the level's lessons, activities and exercises with it.
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LevelRepo::delete(&state.pool, id).await? {
        tracing::info!(level_id = id, user_id = user.user_id, "Deleted level");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
