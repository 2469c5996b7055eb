//! Permission-based access control.
//!
//! [`Authorized<P>`] wraps [`AuthUser`] and rejects with 403 unless the
//! user's role grants `P::NAME` (see `salon_core::permissions`).
//!
//! ```ignore
//! async fn create(Authorized(user, ..): Authorized<CanBook>) -> AppResult<Json<()>> {
//!     Ok(Json(()))
//! }
//! ```

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use salon_core::error::CoreError;
use salon_core::permissions::{
    has_permission, PERM_APPOINTMENTS_MANAGE, PERM_BOOKINGS_CREATE, PERM_CALENDAR_VIEW,
    PERM_CATALOG_MANAGE, PERM_CLIENTS_MANAGE, PERM_STAFF_MANAGE,
};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// A permission string checked at extraction time.
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

pub struct CanBook;

impl Permission for CanBook {
    const NAME: &'static str = PERM_BOOKINGS_CREATE;
}

pub struct ManageAppointments;

impl Permission for ManageAppointments {
    const NAME: &'static str = PERM_APPOINTMENTS_MANAGE;
}

pub struct ViewCalendar;

impl Permission for ViewCalendar {
    const NAME: &'static str = PERM_CALENDAR_VIEW;
}

pub struct ManageClients;

impl Permission for ManageClients {
    const NAME: &'static str = PERM_CLIENTS_MANAGE;
}

pub struct ManageCatalog;

impl Permission for ManageCatalog {
    const NAME: &'static str = PERM_CATALOG_MANAGE;
}

pub struct ManageStaff;

impl Permission for ManageStaff {
    const NAME: &'static str = PERM_STAFF_MANAGE;
}

pub struct Authorized<P: Permission>(pub AuthUser, pub PhantomData<P>);

impl<P: Permission> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !has_permission(&user.role, P::NAME) {
            tracing::debug!(
                staff_id = user.staff_id,
                role = %user.role,
                permission = P::NAME,
                "Permission denied",
            );
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "Permission '{}' required",
                P::NAME
            ))));
        }
        Ok(Authorized(user, PhantomData))
    }
}
