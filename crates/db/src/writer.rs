//! PostgreSQL-backed [`AppointmentWriter`].

use async_trait::async_trait;
use salon_core::booking::{AppointmentPayload, AppointmentWriter};
use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::appointment::Appointment;
use crate::repositories::AppointmentRepo;

/// Writes each booking draft as one `appointments` row plus its service
/// lines, attributed to the staff member who made the booking.
#[derive(Debug, Clone)]
pub struct PgAppointmentWriter {
    pool: PgPool,
    created_by: Option<DbId>,
}

impl PgAppointmentWriter {
    pub fn new(pool: PgPool, created_by: Option<DbId>) -> Self {
        Self { pool, created_by }
    }
}

#[async_trait]
impl AppointmentWriter for PgAppointmentWriter {
    type Record = Appointment;
    type Error = sqlx::Error;

    async fn create_appointment(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<Appointment, sqlx::Error> {
        let appointment =
            AppointmentRepo::create_with_services(&self.pool, payload, self.created_by).await?;
        tracing::debug!(
            appointment_id = appointment.id,
            staff_id = ?appointment.staff_id,
            "Appointment row created",
        );
        Ok(appointment)
    }
}
