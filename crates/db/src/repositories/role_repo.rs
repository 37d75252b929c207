//! Lookups against the seeded `roles` table.

use kalvi_core::roles::Role;
use kalvi_core::types::DbId;
use sqlx::PgPool;

pub struct RoleRepo;

impl RoleRepo {
    /// Row id of `role`, `None` if the seed row is missing.
    pub async fn id_of(pool: &PgPool, role: Role) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM roles WHERE name = $1")
            .bind(role.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Role stored under `id`. A name that is not a known [`Role`] is a
    /// decode error.
    pub async fn role_of(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        name.map(|n| n.parse::<Role>().map_err(|e| sqlx::Error::Decode(Box::new(e))))
            .transpose()
    }
}
