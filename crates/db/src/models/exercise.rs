//! Exercise entity model and DTOs.

use kalvi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `exercises` table: one content instance of an activity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Exercise {
    pub id: DbId,
    pub activity_id: DbId,
    pub content_json: serde_json::Value,
    pub sequence_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an exercise. `activity_id` is taken from the URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExercise {
    #[serde(default, alias = "activityId")]
    pub activity_id: DbId,
    #[serde(alias = "contentJson")]
    pub content_json: serde_json::Value,
    #[serde(default, alias = "sequenceOrder")]
    pub sequence_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExercise {
    #[serde(default, alias = "contentJson")]
    pub content_json: Option<serde_json::Value>,
    #[serde(default, alias = "sequenceOrder")]
    pub sequence_order: Option<i32>,
}
