//! Handlers for the `/appointments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use salon_core::appointments::validate_transition;
use salon_core::error::CoreError;
use salon_core::types::{DbId, Timestamp};
use salon_db::models::appointment::UpdateAppointmentStatus;
use salon_db::repositories::AppointmentRepo;
use salon_events::{PlatformEvent, EVENT_APPOINTMENT_STATUS_CHANGED};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, ManageAppointments, ViewCalendar};
use crate::response::DataResponse;
use crate::state::AppState;

/// `?from=&to=&staff_id=`; `from` inclusive, `to` exclusive.
#[derive(Debug, Deserialize)]
pub struct AppointmentRangeParams {
    pub from: Timestamp,
    pub to: Timestamp,
    pub staff_id: Option<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Appointment",
        id,
    })
}

/// GET /api/v1/appointments?from=&to=&staff_id=
pub async fn list(
    State(state): State<AppState>,
    _auth: Authorized<ViewCalendar>,
    Query(params): Query<AppointmentRangeParams>,
) -> AppResult<impl IntoResponse> {
    if params.to <= params.from {
        return Err(AppError::BadRequest("'to' must be after 'from'".into()));
    }
    let appointments =
        AppointmentRepo::list_in_range(&state.pool, params.from, params.to, params.staff_id)
            .await?;
    Ok(Json(DataResponse { data: appointments }))
}

/// GET /api/v1/appointments/{id}
///
/// The appointment together with its service lines.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: Authorized<ViewCalendar>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = AppointmentRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/v1/appointments/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Authorized(user, _): Authorized<ManageAppointments>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppointmentStatus>,
) -> AppResult<impl IntoResponse> {
    let current = AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    validate_transition(&current.status, &input.status)?;

    let updated = AppointmentRepo::update_status(&state.pool, id, &current.status, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Appointment status changed concurrently; reload and retry".into(),
            ))
        })?;

    tracing::info!(
        appointment_id = id,
        from = %current.status,
        to = %updated.status,
        staff_id = user.staff_id,
        "Appointment status changed",
    );
    state.event_bus.publish(
        PlatformEvent::new(EVENT_APPOINTMENT_STATUS_CHANGED)
            .with_source("appointment", id)
            .with_actor(user.staff_id)
            .with_payload(serde_json::json!({
                "from": current.status,
                "to": updated.status,
            })),
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/appointments/{id}
pub async fn delete(
    State(state): State<AppState>,
    Authorized(user, _): Authorized<ManageAppointments>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AppointmentRepo::delete(&state.pool, id).await? {
        tracing::info!(appointment_id = id, staff_id = user.staff_id, "Appointment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
