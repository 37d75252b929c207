//! Handlers for exercises: the independently editable content instances
//! of an activity.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kalvi_core::activity::{validate_for_type, ActivityType, ContentError};
use kalvi_core::editor::{EditorError, ExerciseEditor};
use kalvi_core::error::CoreError;
use kalvi_core::types::DbId;
use kalvi_db::models::exercise::{CreateExercise, Exercise, UpdateExercise};
use kalvi_db::repositories::ExerciseRepo;
use serde_json::Value;

use super::activity::find_activity;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Exercise",
        id,
    })
}

/// Build an editor from a request body.
///
/// An array of strings is taken as raw editor drafts, one per exercise;
/// any other array holds the exercises as JSON values.
pub fn editor_from_body(body: Value) -> Result<ExerciseEditor, EditorError> {
    match body {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_string) => {
            let raw: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect();
            Ok(ExerciseEditor::from_raw(&raw))
        }
        other => ExerciseEditor::from_values(other),
    }
}

/// POST /api/v1/activities/{activity_id}/exercises
pub async fn create(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
    Json(mut input): Json<CreateExercise>,
) -> AppResult<(StatusCode, Json<Exercise>)> {
    input.activity_id = activity_id;
    let activity = find_activity(&state, activity_id).await?;
    validate_for_type(activity.activity_type_id, &input.content_json)?;
    let exercise = ExerciseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

/// GET /api/v1/activities/{activity_id}/exercises
pub async fn list_by_activity(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Exercise>>>> {
    find_activity(&state, activity_id).await?;
    let exercises = ExerciseRepo::list_by_activity(&state.pool, activity_id).await?;
    Ok(Json(DataResponse { data: exercises }))
}

/// PUT /api/v1/activities/{activity_id}/exercises
///
/// Replace every exercise of the activity with the submitted array. Any
/// unparseable draft or schema violation rejects the whole request and
/// leaves the stored exercises untouched.
pub async fn replace_all(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<Json<DataResponse<Vec<Exercise>>>> {
    let editor = editor_from_body(body)?;
    // Fails before touching the database when a draft is not JSON.
    editor.values()?;

    let activity = find_activity(&state, activity_id).await?;
    let activity_type = ActivityType::from_id(activity.activity_type_id)
        .ok_or(ContentError::UnknownActivityType(activity.activity_type_id))?;
    editor.validate_for(activity_type)?;

    let exercises = ExerciseRepo::replace_all(&state.pool, activity_id, &editor.values()?).await?;
    tracing::info!(
        activity_id,
        user_id = user.user_id,
        count = exercises.len(),
        "Replaced exercises"
    );
    Ok(Json(DataResponse { data: exercises }))
}

/// GET /api/v1/exercises/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Exercise>> {
    let exercise = ExerciseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(exercise))
}

/// PUT /api/v1/exercises/{id}
pub async fn update(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExercise>,
) -> AppResult<Json<Exercise>> {
    let existing = ExerciseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(content) = &input.content_json {
        let activity = find_activity(&state, existing.activity_id).await?;
        validate_for_type(activity.activity_type_id, content)?;
    }
    let exercise = ExerciseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(exercise))
}

/// DELETE /api/v1/exercises/{id}
pub async fn delete(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ExerciseRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
