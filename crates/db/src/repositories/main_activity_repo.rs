//! Repository for the `main_activities` table.

use kalvi_core::types::DbId;
use sqlx::PgPool;

use crate::models::main_activity::{CreateMainActivity, MainActivity, UpdateMainActivity};

const COLUMNS: &str = "id, name_ta, name_en, name_si, created_at, updated_at";

pub struct MainActivityRepo;

impl MainActivityRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMainActivity,
    ) -> Result<MainActivity, sqlx::Error> {
        let query = format!(
            "INSERT INTO main_activities (name_ta, name_en, name_si)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MainActivity>(&query)
            .bind(&input.name_ta)
            .bind(&input.name_en)
            .bind(&input.name_si)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MainActivity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM main_activities WHERE id = $1");
        sqlx::query_as::<_, MainActivity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<MainActivity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM main_activities ORDER BY id");
        sqlx::query_as::<_, MainActivity>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMainActivity,
    ) -> Result<Option<MainActivity>, sqlx::Error> {
        let query = format!(
            "UPDATE main_activities SET
                name_ta = COALESCE($2, name_ta),
                name_en = COALESCE($3, name_en),
                name_si = COALESCE($4, name_si)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MainActivity>(&query)
            .bind(id)
            .bind(&input.name_ta)
            .bind(&input.name_en)
            .bind(&input.name_si)
            .fetch_optional(pool)
            .await
    }

    /// Delete a main activity. Activities in it keep existing, ungrouped.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM main_activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
