//! Repository for the `levels` table.

use kalvi_core::types::DbId;
use sqlx::PgPool;

use crate::models::level::{CreateLevel, Level, UpdateLevel};

const COLUMNS: &str = "id, name_ta, name_en, name_si, description_ta, description_en, \
                       description_si, sequence_order, created_at, updated_at";

pub struct LevelRepo;

impl LevelRepo {
    /// Insert a level. Without an explicit `sequence_order` it goes last.
    pub async fn create(pool: &PgPool, input: &CreateLevel) -> Result<Level, sqlx::Error> {
        let query = format!(
            "INSERT INTO levels (name_ta, name_en, name_si, description_ta, description_en,
                                 description_si, sequence_order)
             VALUES ($1, $2, $3, $4, $5, $6,
                     COALESCE($7, (SELECT COALESCE(MAX(sequence_order), 0) + 1 FROM levels)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
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

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Level>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM levels WHERE id = $1");
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List levels in curriculum order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Level>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM levels ORDER BY sequence_order, id");
        sqlx::query_as::<_, Level>(&query).fetch_all(pool).await
    }

    /// Update a level. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLevel,
    ) -> Result<Option<Level>, sqlx::Error> {
        let query = format!(
            "UPDATE levels SET
                name_ta = COALESCE($2, name_ta),
                name_en = COALESCE($3, name_en),
                name_si = COALESCE($4, name_si),
                description_ta = COALESCE($5, description_ta),
                description_en = COALESCE($6, description_en),
                description_si = COALESCE($7, description_si),
                sequence_order = COALESCE($8, sequence_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
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

    /// Delete a level and, by cascade, its lessons. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM levels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
