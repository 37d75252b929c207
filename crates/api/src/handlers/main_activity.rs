//! Handlers for the `/main-activities` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kalvi_core::error::CoreError;
use kalvi_core::types::DbId;
use kalvi_db::models::main_activity::{CreateMainActivity, MainActivity, UpdateMainActivity};
use kalvi_db::repositories::MainActivityRepo;

use super::{merged_name, require_name};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireEditor};
use crate::query::LangParams;
use crate::response::{DataResponse, Localized};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MainActivity",
        id,
    })
}

/// POST /api/v1/main-activities
pub async fn create(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateMainActivity>,
) -> AppResult<(StatusCode, Json<MainActivity>)> {
    require_name("Main activity", &input.name())?;
    let main_activity = MainActivityRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(main_activity)))
}

/// GET /api/v1/main-activities
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<Vec<Localized<MainActivity>>>>> {
    let lang = params.language(state.config.default_language)?;
    let items = MainActivityRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: Localized::all(items, lang),
    }))
}

/// GET /api/v1/main-activities/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<Localized<MainActivity>>> {
    let lang = params.language(state.config.default_language)?;
    let item = MainActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Localized::new(item, lang)))
}

/// PUT /api/v1/main-activities/{id}
pub async fn update(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMainActivity>,
) -> AppResult<Json<MainActivity>> {
    let existing = MainActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    require_name(
        "Main activity",
        &merged_name(
            [&input.name_ta, &input.name_en, &input.name_si],
            [existing.name_ta, existing.name_en, existing.name_si],
        ),
    )?;
    let item = MainActivityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// DELETE /api/v1/main-activities/{id}
pub async fn delete(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MainActivityRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
