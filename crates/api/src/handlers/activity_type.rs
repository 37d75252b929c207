//! Handlers for the activity type registry and content checks.

use axum::extract::{Path, Query, State};
use axum::Json;
use kalvi_core::activity::{
    default_template, registry_entries, validate_for_type, ActivityType, RegistryEntry,
};
use kalvi_core::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::LangParams;
use crate::response::{DataResponse, Localized};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateContentRequest {
    #[serde(alias = "activityTypeId")]
    pub activity_type_id: i32,
    pub content: Value,
}

#[derive(Debug, Serialize)]
pub struct ValidateContentResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/v1/activity-types
///
/// Each entry carries its names in every language plus a `display_name`
/// resolved for `?lang=`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<Vec<Localized<RegistryEntry>>>>> {
    let lang = params.language(state.config.default_language)?;
    Ok(Json(DataResponse {
        data: Localized::all(registry_entries(), lang),
    }))
}

/// GET /api/v1/activity-types/{id}/template
pub async fn template(Path(id): Path<i32>) -> AppResult<Json<Value>> {
    let activity_type = ActivityType::from_id(id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "ActivityType",
        id: i64::from(id),
    }))?;
    Ok(Json(default_template(activity_type).to_value()))
}

/// POST /api/v1/content/validate
///
/// Dry run of the save-time check. Invalid content is a normal `200`
/// answer with `valid: false`.
pub async fn validate_content(
    RequireAuth(_user): RequireAuth,
    Json(input): Json<ValidateContentRequest>,
) -> Json<ValidateContentResponse> {
    let response = match validate_for_type(input.activity_type_id, &input.content) {
        Ok(_) => ValidateContentResponse {
            valid: true,
            error: None,
        },
        Err(err) => ValidateContentResponse {
            valid: false,
            error: Some(err.to_string()),
        },
    };
    Json(response)
}
