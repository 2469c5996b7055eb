//! Appointment models.

use chrono::NaiveDate;
use salon_core::booking::{ConfirmedBlock, StaffKey};
use salon_core::types::{DbId, Price, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub client_id: DbId,
    pub staff_id: Option<DbId>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub appointment_date: NaiveDate,
    pub status: String,
    pub total_price: Price,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `appointment_services`, ordered by `position`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppointmentService {
    pub id: DbId,
    pub appointment_id: DbId,
    pub service_id: DbId,
    pub price: Price,
    pub position: i32,
}

/// An appointment together with its service lines.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub services: Vec<AppointmentService>,
}

/// Calendar projection: an appointment joined with its client's name.
#[derive(Debug, Clone, FromRow)]
pub struct CalendarRow {
    pub id: DbId,
    pub staff_id: Option<DbId>,
    pub client_first_name: String,
    pub client_last_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl From<CalendarRow> for ConfirmedBlock {
    fn from(row: CalendarRow) -> Self {
        ConfirmedBlock {
            appointment_id: row.id,
            staff: StaffKey::from(row.staff_id),
            title: format!("{} {}", row.client_first_name, row.client_last_name),
            start: row.start_time,
            end: row.end_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn calendar_row_becomes_confirmed_block() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let row = CalendarRow {
            id: 7,
            staff_id: Some(10),
            client_first_name: "Ana".into(),
            client_last_name: "Silva".into(),
            start_time: start,
            end_time: start + chrono::TimeDelta::minutes(45),
        };

        let block = ConfirmedBlock::from(row);
        assert_eq!(block.appointment_id, 7);
        assert_eq!(block.staff, StaffKey::Assigned(10));
        assert_eq!(block.title, "Ana Silva");
    }

    #[test]
    fn unassigned_row_maps_to_unassigned_key() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let row = CalendarRow {
            id: 1,
            staff_id: None,
            client_first_name: "Li".into(),
            client_last_name: "Wei".into(),
            start_time: start,
            end_time: start + chrono::TimeDelta::minutes(30),
        };
        assert_eq!(ConfirmedBlock::from(row).staff, StaffKey::Unassigned);
    }
}
