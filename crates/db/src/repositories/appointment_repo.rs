//! Repository for the `appointments` and `appointment_services` tables.

use chrono::NaiveDate;
use salon_core::appointments::ACTIVE_STATUSES;
use salon_core::booking::AppointmentPayload;
use salon_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::appointment::{
    Appointment, AppointmentDetail, AppointmentService, CalendarRow,
};

const COLUMNS: &str = "id, client_id, staff_id, start_time, end_time, appointment_date, \
                       status, total_price, created_by, created_at, updated_at";

const SERVICE_COLUMNS: &str = "id, appointment_id, service_id, price, position";

pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert one appointment and its service lines in a single transaction.
    ///
    /// Service lines keep the payload order in `position`.
    pub async fn create_with_services(
        pool: &PgPool,
        payload: &AppointmentPayload,
        created_by: Option<DbId>,
    ) -> Result<Appointment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO appointments \
                (client_id, staff_id, start_time, end_time, appointment_date, \
                 total_price, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let appointment = sqlx::query_as::<_, Appointment>(&insert_query)
            .bind(payload.customer_id)
            .bind(payload.staff_id)
            .bind(payload.start_time)
            .bind(payload.end_time)
            .bind(payload.date)
            .bind(payload.total_price())
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        for (position, service) in payload.services.iter().enumerate() {
            sqlx::query(
                "INSERT INTO appointment_services (appointment_id, service_id, price, position) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(appointment.id)
            .bind(service.service_id)
            .bind(service.price)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(appointment)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Service lines of one appointment, in booking order.
    pub async fn list_services(
        pool: &PgPool,
        appointment_id: DbId,
    ) -> Result<Vec<AppointmentService>, sqlx::Error> {
        let query = format!(
            "SELECT {SERVICE_COLUMNS} FROM appointment_services
             WHERE appointment_id = $1
             ORDER BY position"
        );
        sqlx::query_as::<_, AppointmentService>(&query)
            .bind(appointment_id)
            .fetch_all(pool)
            .await
    }

    /// An appointment with its service lines, or `None` if it does not exist.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AppointmentDetail>, sqlx::Error> {
        let Some(appointment) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let services = Self::list_services(pool, id).await?;
        Ok(Some(AppointmentDetail {
            appointment,
            services,
        }))
    }

    /// Appointments starting in `[from, to)`, optionally for one staff member.
    pub async fn list_in_range(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
        staff_id: Option<DbId>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments
             WHERE start_time >= $1 AND start_time < $2
               AND ($3::BIGINT IS NULL OR staff_id = $3)
             ORDER BY start_time, id"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(from)
            .bind(to)
            .bind(staff_id)
            .fetch_all(pool)
            .await
    }

    /// Appointments on `date` that still occupy the calendar, joined with
    /// the client's name.
    pub async fn calendar_for_date(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<CalendarRow>, sqlx::Error> {
        let statuses: Vec<String> = ACTIVE_STATUSES.iter().map(|s| s.to_string()).collect();
        sqlx::query_as::<_, CalendarRow>(
            "SELECT a.id, a.staff_id,
                    c.first_name AS client_first_name,
                    c.last_name AS client_last_name,
                    a.start_time, a.end_time
             FROM appointments a
             JOIN clients c ON c.id = a.client_id
             WHERE a.appointment_date = $1 AND a.status = ANY($2)
             ORDER BY a.start_time, a.id",
        )
        .bind(date)
        .bind(statuses)
        .fetch_all(pool)
        .await
    }

    /// Move an appointment from `from` to `to`.
    ///
    /// Returns `None` when the row is missing or its status is no longer
    /// `from`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Delete an appointment and, by cascade, its service lines.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
