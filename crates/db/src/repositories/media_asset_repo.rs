//! Repository for the `media_assets` table.

use kalvi_core::types::DbId;
use sqlx::PgPool;

use crate::models::media_asset::{CreateMediaAsset, MediaAsset};

const COLUMNS: &str = "id, kind, original_name, stored_path, content_type, size_bytes, \
                       width, height, uploaded_by, created_at, updated_at";

pub struct MediaAssetRepo;

impl MediaAssetRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaAsset,
    ) -> Result<MediaAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_assets (kind, original_name, stored_path, content_type,
                                       size_bytes, width, height, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(&input.kind)
            .bind(&input.original_name)
            .bind(&input.stored_path)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.width)
            .bind(input.height)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_assets WHERE id = $1");
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
