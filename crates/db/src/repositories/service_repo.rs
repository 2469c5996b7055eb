//! Repository for the `services` table.

use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service, UpdateService};

const COLUMNS: &str = "id, name, price, duration_mins, is_active, created_at, updated_at";

pub struct ServiceRepo;

impl ServiceRepo {
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (name, price, duration_mins)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(input.name.trim())
            .bind(input.price)
            .bind(input.duration_mins)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List services by name. Inactive ones are included only on request.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services
             WHERE is_active = true OR $1
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Active services among `ids`. Missing or inactive ids are simply absent.
    pub async fn find_active_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<Service>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM services WHERE id = ANY($1) AND is_active = true");
        sqlx::query_as::<_, Service>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a service. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                duration_mins = COALESCE($4, duration_mins),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.price)
            .bind(input.duration_mins)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
