//! Staff roles and the permissions each role grants.
//!
//! Role names must match the `ck_staff_role` check constraint in the
//! `create_staff` migration.

use crate::error::CoreError;

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_RECEPTIONIST: &str = "receptionist";
pub const ROLE_STYLIST: &str = "stylist";

pub const VALID_ROLES: &[&str] = &[ROLE_OWNER, ROLE_MANAGER, ROLE_RECEPTIONIST, ROLE_STYLIST];

pub const PERM_ALL: &str = "all";
pub const PERM_BOOKINGS_CREATE: &str = "bookings:create";
pub const PERM_APPOINTMENTS_MANAGE: &str = "appointments:manage";
pub const PERM_CALENDAR_VIEW: &str = "calendar:view";
pub const PERM_CLIENTS_MANAGE: &str = "clients:manage";
pub const PERM_CATALOG_MANAGE: &str = "catalog:manage";
pub const PERM_STAFF_MANAGE: &str = "staff:manage";

const OWNER_PERMISSIONS: &[&str] = &[PERM_ALL];

const MANAGER_PERMISSIONS: &[&str] = &[
    PERM_BOOKINGS_CREATE,
    PERM_APPOINTMENTS_MANAGE,
    PERM_CALENDAR_VIEW,
    PERM_CLIENTS_MANAGE,
    PERM_CATALOG_MANAGE,
];

const RECEPTIONIST_PERMISSIONS: &[&str] = &[
    PERM_BOOKINGS_CREATE,
    PERM_APPOINTMENTS_MANAGE,
    PERM_CALENDAR_VIEW,
    PERM_CLIENTS_MANAGE,
];

const STYLIST_PERMISSIONS: &[&str] = &[PERM_BOOKINGS_CREATE, PERM_CALENDAR_VIEW];

/// Permissions granted to `role`. Unknown roles get nothing.
pub fn role_permissions(role: &str) -> &'static [&'static str] {
    match role {
        ROLE_OWNER => OWNER_PERMISSIONS,
        ROLE_MANAGER => MANAGER_PERMISSIONS,
        ROLE_RECEPTIONIST => RECEPTIONIST_PERMISSIONS,
        ROLE_STYLIST => STYLIST_PERMISSIONS,
        _ => &[],
    }
}

pub fn has_permission(role: &str, permission: &str) -> bool {
    let granted = role_permissions(role);
    granted.contains(&PERM_ALL) || granted.contains(&permission)
}

pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
