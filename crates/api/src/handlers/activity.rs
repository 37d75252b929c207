//! Handlers for activities: CRUD nested under lessons, plus rendering.
//!
//! Content is checked against the activity type's schema before every
//! write. Rendering never fails on bad content; it reports it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kalvi_core::activity::{
    default_template, render, validate_for_type, ActivityType, ContentError, RenderDescription,
};
use kalvi_core::error::CoreError;
use kalvi_core::types::DbId;
use kalvi_db::models::activity::{Activity, CreateActivity, UpdateActivity};
use kalvi_db::models::exercise::Exercise;
use kalvi_db::repositories::{ActivityRepo, ExerciseRepo, LessonRepo};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireEditor};
use crate::query::LangParams;
use crate::response::{DataResponse, Localized};
use crate::state::AppState;

/// Unsaved content to render for an editor preview.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(alias = "activityTypeId")]
    pub activity_type_id: i32,
    #[serde(default, alias = "contentJson")]
    pub content: Value,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Activity",
        id,
    })
}

fn known_type(activity_type_id: i32) -> Result<ActivityType, ContentError> {
    ActivityType::from_id(activity_type_id)
        .ok_or(ContentError::UnknownActivityType(activity_type_id))
}

pub(crate) async fn ensure_lesson_exists(state: &AppState, lesson_id: DbId) -> AppResult<()> {
    LessonRepo::find_by_id(&state.pool, lesson_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: lesson_id,
        }))?;
    Ok(())
}

/// Every stored exercise must still parse under `activity_type_id`.
fn ensure_exercises_fit(activity_type_id: i32, exercises: &[Exercise]) -> AppResult<()> {
    for exercise in exercises {
        validate_for_type(activity_type_id, &exercise.content_json).map_err(|err| {
            AppError::Core(CoreError::Validation(format!(
                "Exercise {} does not fit activity type {activity_type_id}: {err}",
                exercise.id
            )))
        })?;
    }
    Ok(())
}

pub(crate) async fn find_activity(state: &AppState, id: DbId) -> AppResult<Activity> {
    ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// POST /api/v1/lessons/{lesson_id}/activities
///
/// Without `content_json` the activity starts from its type's default
/// template.
pub async fn create(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(lesson_id): Path<DbId>,
    Json(mut input): Json<CreateActivity>,
) -> AppResult<(StatusCode, Json<Activity>)> {
    input.lesson_id = lesson_id;
    let activity_type = known_type(input.activity_type_id)?;
    let content = match input.content_json.take() {
        Some(content) => {
            validate_for_type(activity_type.id(), &content)?;
            content
        }
        None => default_template(activity_type).to_value(),
    };
    input.content_json = Some(content);

    ensure_lesson_exists(&state, lesson_id).await?;
    let activity = ActivityRepo::create(&state.pool, &input).await?;
    tracing::info!(
        activity_id = activity.id,
        lesson_id,
        activity_type = activity_type.code(),
        "Created activity"
    );
    Ok((StatusCode::CREATED, Json(activity)))
}

/// GET /api/v1/lessons/{lesson_id}/activities
pub async fn list_by_lesson(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(lesson_id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<Vec<Localized<Activity>>>>> {
    let lang = params.language(state.config.default_language)?;
    ensure_lesson_exists(&state, lesson_id).await?;
    let activities = ActivityRepo::list_by_lesson(&state.pool, lesson_id).await?;
    Ok(Json(DataResponse {
        data: Localized::all(activities, lang),
    }))
}

/// GET /api/v1/activities/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<Localized<Activity>>> {
    let lang = params.language(state.config.default_language)?;
    let activity = find_activity(&state, id).await?;
    Ok(Json(Localized::new(activity, lang)))
}

/// PUT /api/v1/activities/{id}
///
/// A new type or new content is checked as the pair that will be stored:
/// changing only the type still validates the existing content. A type
/// change is also refused while any stored exercise would not fit the new
/// type.
pub async fn update(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActivity>,
) -> AppResult<Json<Activity>> {
    let existing = find_activity(&state, id).await?;
    if input.activity_type_id.is_some() || input.content_json.is_some() {
        let type_id = input.activity_type_id.unwrap_or(existing.activity_type_id);
        let content = input.content_json.as_ref().unwrap_or(&existing.content_json);
        validate_for_type(type_id, content)?;

        if type_id != existing.activity_type_id {
            let exercises = ExerciseRepo::list_by_activity(&state.pool, id).await?;
            ensure_exercises_fit(type_id, &exercises)?;
        }
    }
    let activity = ActivityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(activity))
}

/// DELETE /api/v1/activities/{id}
pub async fn delete(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ActivityRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/activities/{id}/render
pub async fn render_stored(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RenderDescription>> {
    let activity = find_activity(&state, id).await?;
    let outcome = render(activity.activity_type_id, &activity.content_json);
    Ok(Json(outcome.describe()))
}

/// POST /api/v1/activities/preview
pub async fn preview(
    RequireEditor(_user): RequireEditor,
    Json(input): Json<PreviewRequest>,
) -> Json<RenderDescription> {
    Json(render(input.activity_type_id, &input.content).describe())
}
