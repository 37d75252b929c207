//! Repository for the `lessons` table.

use kalvi_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson::{CreateLesson, Lesson, UpdateLesson};

const COLUMNS: &str = "id, level_id, name_ta, name_en, name_si, description_ta, \
                       description_en, description_si, sequence_order, created_at, updated_at";

pub struct LessonRepo;

impl LessonRepo {
    /// Insert a lesson. Without an explicit `sequence_order` it goes last
    /// within its level.
    pub async fn create(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons (level_id, name_ta, name_en, name_si, description_ta,
                                  description_en, description_si, sequence_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7,
                     COALESCE($8, (SELECT COALESCE(MAX(sequence_order), 0) + 1
                                   FROM lessons WHERE level_id = $1)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.level_id)
            .bind(&input.name_ta)
            .bind(&input.name_en)
            .bind(&input.name_si)
            .bind(&input.description_ta)
            .bind(&input.description_en)
            .bind(&input.description_si)
            .bind(input.sequence_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lessons WHERE id = $1");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the lessons of a level in order.
    pub async fn list_by_level(pool: &PgPool, level_id: DbId) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lessons WHERE level_id = $1 ORDER BY sequence_order, id"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(level_id)
            .fetch_all(pool)
            .await
    }

    /// Update a lesson. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLesson,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!(
            "UPDATE lessons SET
                level_id = COALESCE($2, level_id),
                name_ta = COALESCE($3, name_ta),
                name_en = COALESCE($4, name_en),
                name_si = COALESCE($5, name_si),
                description_ta = COALESCE($6, description_ta),
                description_en = COALESCE($7, description_en),
                description_si = COALESCE($8, description_si),
                sequence_order = COALESCE($9, sequence_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .bind(input.level_id)
            .bind(&input.name_ta)
            .bind(&input.name_en)
            .bind(&input.name_si)
            .bind(&input.description_ta)
            .bind(&input.description_en)
            .bind(&input.description_si)
            .bind(input.sequence_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
