//! Staff entity model and DTOs.

use salon_core::booking::StaffRef;
use salon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full staff row from the `staff` table.
///
/// `password_hash` is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Staff {
    pub id: DbId,
    pub display_name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Staff {
    /// The name/id pair a cart item carries.
    pub fn to_staff_ref(&self) -> StaffRef {
        StaffRef {
            id: self.id,
            name: self.display_name.clone(),
        }
    }
}

/// Request body for creating a staff member.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaff {
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    #[validate(email)]
    pub email: String,
    pub role: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Repository input: a staff row with the password already hashed.
#[derive(Debug)]
pub struct NewStaff {
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use validator::Validate;

    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let staff = Staff {
            id: 3,
            display_name: "Rita".into(),
            email: "rita@salon.test".into(),
            role: "stylist".into(),
            password_hash: "$argon2id$secret".into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&staff).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["display_name"], "Rita");
    }

    #[test]
    fn create_staff_rejects_short_password() {
        let input = CreateStaff {
            display_name: "Rita".into(),
            email: "rita@salon.test".into(),
            role: "stylist".into(),
            password: "short".into(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn create_staff_rejects_bad_email() {
        let input = CreateStaff {
            display_name: "Rita".into(),
            email: "not-an-email".into(),
            role: "stylist".into(),
            password: "long-enough-password".into(),
        };
        assert!(input.validate().is_err());
    }
}
