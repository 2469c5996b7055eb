//! Handlers for the `/staff` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use salon_core::error::CoreError;
use salon_core::permissions::validate_role;
use salon_core::types::DbId;
use salon_db::models::staff::{CreateStaff, NewStaff};
use salon_db::repositories::StaffRepo;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{Authorized, ManageStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/staff
///
/// Active staff only.
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<impl IntoResponse> {
    let staff = StaffRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: staff }))
}

/// GET /api/v1/staff/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let staff = StaffRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Staff",
            id,
        }))?;
    Ok(Json(DataResponse { data: staff }))
}

/// POST /api/v1/staff
pub async fn create(
    State(state): State<AppState>,
    Authorized(admin, _): Authorized<ManageStaff>,
    Json(input): Json<CreateStaff>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_role(&input.role)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let staff = StaffRepo::create(
        &state.pool,
        &NewStaff {
            display_name: input.display_name,
            email: input.email.trim().to_string(),
            role: input.role,
            password_hash,
        },
    )
    .await?;

    tracing::info!(
        staff_id = staff.id,
        role = %staff.role,
        created_by = admin.staff_id,
        "Staff member created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: staff })))
}

/// DELETE /api/v1/staff/{id}
///
/// Soft-deactivates; existing appointments keep their staff reference.
pub async fn deactivate(
    State(state): State<AppState>,
    Authorized(admin, _): Authorized<ManageStaff>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.staff_id {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".into(),
        ));
    }

    if StaffRepo::deactivate(&state.pool, id).await? {
        tracing::info!(staff_id = id, deactivated_by = admin.staff_id, "Staff member deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Staff",
            id,
        }))
    }
}
