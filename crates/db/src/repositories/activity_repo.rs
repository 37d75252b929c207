//! Repository for the `activities` table.
//!
//! Content is stored as given. Callers validate it against the activity
//! type before writing.

use kalvi_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, CreateActivity, UpdateActivity};

const COLUMNS: &str = "id, lesson_id, main_activity_id, activity_type_id, title_ta, title_en, \
                       title_si, content_json, sequence_order, created_at, updated_at";

pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert an activity. A missing `content_json` is stored as `{}`.
    pub async fn create(pool: &PgPool, input: &CreateActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (lesson_id, main_activity_id, activity_type_id, title_ta,
                                     title_en, title_si, content_json, sequence_order)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, '{{}}'::jsonb),
                     COALESCE($8, (SELECT COALESCE(MAX(sequence_order), 0) + 1
                                   FROM activities WHERE lesson_id = $1)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.lesson_id)
            .bind(input.main_activity_id)
            .bind(input.activity_type_id)
            .bind(&input.title_ta)
            .bind(&input.title_en)
            .bind(&input.title_si)
            .bind(&input.content_json)
            .bind(input.sequence_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the activities of a lesson by `sequence_order`.
    pub async fn list_by_lesson(
        pool: &PgPool,
        lesson_id: DbId,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities WHERE lesson_id = $1 ORDER BY sequence_order, id"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(lesson_id)
            .fetch_all(pool)
            .await
    }

    /// Update an activity. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActivity,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                lesson_id = COALESCE($2, lesson_id),
                main_activity_id = COALESCE($3, main_activity_id),
                activity_type_id = COALESCE($4, activity_type_id),
                title_ta = COALESCE($5, title_ta),
                title_en = COALESCE($6, title_en),
                title_si = COALESCE($7, title_si),
                content_json = COALESCE($8, content_json),
                sequence_order = COALESCE($9, sequence_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(input.lesson_id)
            .bind(input.main_activity_id)
            .bind(input.activity_type_id)
            .bind(&input.title_ta)
            .bind(&input.title_en)
            .bind(&input.title_si)
            .bind(&input.content_json)
            .bind(input.sequence_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete an activity and, by cascade, its exercises.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
