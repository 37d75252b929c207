//! Media asset model and DTOs.

use kalvi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `media_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaAsset {
    pub id: DbId,
    /// `image`, `audio` or `video`.
    pub kind: String,
    pub original_name: String,
    /// Path relative to the media root.
    pub stored_path: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a stored upload.
#[derive(Debug, Clone)]
pub struct CreateMediaAsset {
    pub kind: String,
    pub original_name: String,
    pub stored_path: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: Option<DbId>,
}
