//! Service catalog model and DTOs.

use salon_core::booking::ServiceRef;
use salon_core::types::{DbId, Price, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub price: Price,
    pub duration_mins: Option<i32>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Service {
    pub fn to_service_ref(&self) -> ServiceRef {
        ServiceRef {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            duration_mins: self.duration_mins,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateService {
    pub name: String,
    pub price: Price,
    pub duration_mins: Option<i32>,
}

/// DTO for updating a service. `None` leaves the column unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateService {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub duration_mins: Option<i32>,
    pub is_active: Option<bool>,
}
