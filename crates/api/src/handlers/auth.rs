//! Handlers for `/auth` (login, current user).

use axum::extract::State;
use axum::Json;
use salon_core::error::CoreError;
use salon_core::permissions::role_permissions;
use salon_db::models::staff::Staff;
use salon_db::repositories::StaffRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub staff: Staff,
}

#[derive(Debug, Serialize)]
pub struct CurrentStaff {
    #[serde(flatten)]
    pub staff: Staff,
    pub permissions: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let staff = StaffRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !staff.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &staff.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(staff_id = staff.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(staff.id, &staff.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(staff_id = staff.id, role = %staff.role, "Staff logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        staff,
    }))
}

/// GET /api/v1/auth/me
///
/// The authenticated staff member and the permissions their role grants.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<CurrentStaff>>> {
    let staff = StaffRepo::find_by_id(&state.pool, user.staff_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Staff",
            id: user.staff_id,
        }))?;

    let permissions = role_permissions(&staff.role);
    Ok(Json(DataResponse {
        data: CurrentStaff { staff, permissions },
    }))
}
