//! Handlers for lessons, nested under `/levels/{level_id}/lessons` for
//! listing and creation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kalvi_core::error::CoreError;
use kalvi_core::types::DbId;
use kalvi_db::models::lesson::{CreateLesson, Lesson, UpdateLesson};
use kalvi_db::repositories::{LessonRepo, LevelRepo};

use super::{merged_name, require_name};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireEditor};
use crate::query::LangParams;
use crate::response::{DataResponse, Localized};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Lesson",
        id,
    })
}

async fn ensure_level_exists(state: &AppState, level_id: DbId) -> AppResult<()> {
    LevelRepo::find_by_id(&state.pool, level_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Level",
            id: level_id,
        }))?;
    Ok(())
}

/// POST /api/v1/levels/{level_id}/lessons
pub async fn create(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(level_id): Path<DbId>,
    Json(mut input): Json<CreateLesson>,
) -> AppResult<(StatusCode, Json<Lesson>)> {
    input.level_id = level_id;
    require_name("Lesson", &input.name())?;
    ensure_level_exists(&state, level_id).await?;
    let lesson = LessonRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// GET /api/v1/levels/{level_id}/lessons
pub async fn list_by_level(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(level_id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<Vec<Localized<Lesson>>>>> {
    let lang = params.language(state.config.default_language)?;
    ensure_level_exists(&state, level_id).await?;
    let lessons = LessonRepo::list_by_level(&state.pool, level_id).await?;
    Ok(Json(DataResponse {
        data: Localized::all(lessons, lang),
    }))
}

/// GET /api/v1/lessons/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<Localized<Lesson>>> {
    let lang = params.language(state.config.default_language)?;
    let lesson = LessonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Localized::new(lesson, lang)))
}

/// PUT /api/v1/lessons/{id}
pub async fn update(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLesson>,
) -> AppResult<Json<Lesson>> {
    let existing = LessonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    require_name(
        "Lesson",
        &merged_name(
            [&input.name_ta, &input.name_en, &input.name_si],
            [existing.name_ta, existing.name_en, existing.name_si],
        ),
    )?;
    let lesson = LessonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(lesson))
}

/// DELETE /api/v1/lessons/{id}
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LessonRepo::delete(&state.pool, id).await? {
        tracing::info!(lesson_id = id, user_id = user.user_id, "Deleted lesson");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
