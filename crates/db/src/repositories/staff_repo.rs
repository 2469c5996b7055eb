//! Repository for the `staff` table.

use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff::{NewStaff, Staff};

const COLUMNS: &str =
    "id, display_name, email, role, password_hash, is_active, created_at, updated_at";

pub struct StaffRepo;

impl StaffRepo {
    pub async fn create(pool: &PgPool, input: &NewStaff) -> Result<Staff, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff (display_name, email, role, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Staff>(&query)
            .bind(input.display_name.trim())
            .bind(&input.email)
            .bind(&input.role)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE id = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a staff member by login e-mail (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, Staff>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<Staff>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM staff WHERE is_active = true ORDER BY display_name, id"
        );
        sqlx::query_as::<_, Staff>(&query).fetch_all(pool).await
    }

    /// Active staff among `ids`. Missing or inactive ids are simply absent.
    pub async fn find_active_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<Staff>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM staff WHERE id = ANY($1) AND is_active = true");
        sqlx::query_as::<_, Staff>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Soft-deactivate a staff member. Returns `true` if the row changed.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE staff SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
