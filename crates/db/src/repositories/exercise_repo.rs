//! Repository for the `exercises` table.

use kalvi_core::types::DbId;
use sqlx::PgPool;

use crate::models::exercise::{CreateExercise, Exercise, UpdateExercise};

const COLUMNS: &str = "id, activity_id, content_json, sequence_order, created_at, updated_at";

pub struct ExerciseRepo;

impl ExerciseRepo {
    pub async fn create(pool: &PgPool, input: &CreateExercise) -> Result<Exercise, sqlx::Error> {
        let query = format!(
            "INSERT INTO exercises (activity_id, content_json, sequence_order)
             VALUES ($1, $2, COALESCE($3, (SELECT COALESCE(MAX(sequence_order), 0) + 1
                                           FROM exercises WHERE activity_id = $1)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Exercise>(&query)
            .bind(input.activity_id)
            .bind(&input.content_json)
            .bind(input.sequence_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Exercise>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exercises WHERE id = $1");
        sqlx::query_as::<_, Exercise>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_activity(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Vec<Exercise>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM exercises WHERE activity_id = $1 ORDER BY sequence_order, id"
        );
        sqlx::query_as::<_, Exercise>(&query)
            .bind(activity_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExercise,
    ) -> Result<Option<Exercise>, sqlx::Error> {
        let query = format!(
            "UPDATE exercises SET
                content_json = COALESCE($2, content_json),
                sequence_order = COALESCE($3, sequence_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Exercise>(&query)
            .bind(id)
            .bind(&input.content_json)
            .bind(input.sequence_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace every exercise of an activity with `contents`, numbered
    /// `1..=n` in order. Runs in one transaction: either all rows are
    /// replaced or none are.
    pub async fn replace_all(
        pool: &PgPool,
        activity_id: DbId,
        contents: &[serde_json::Value],
    ) -> Result<Vec<Exercise>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM exercises WHERE activity_id = $1")
            .bind(activity_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO exercises (activity_id, content_json, sequence_order)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let mut exercises = Vec::with_capacity(contents.len());
        for (index, content) in contents.iter().enumerate() {
            let exercise = sqlx::query_as::<_, Exercise>(&query)
                .bind(activity_id)
                .bind(content)
                .bind(index as i32 + 1)
                .fetch_one(&mut *tx)
                .await?;
            exercises.push(exercise);
        }

        tx.commit().await?;
        tracing::debug!(activity_id, count = exercises.len(), "Replaced exercises");
        Ok(exercises)
    }
}
