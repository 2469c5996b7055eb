//! Handlers for the `/services` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use salon_core::catalog::{validate_duration, validate_price, validate_service_name};
use salon_core::error::CoreError;
use salon_core::types::DbId;
use salon_db::models::service::{CreateService, UpdateService};
use salon_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{Authorized, ManageCatalog};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services?include_inactive=false
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let services = ServiceRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    Ok(Json(DataResponse { data: service }))
}

/// POST /api/v1/services
pub async fn create(
    State(state): State<AppState>,
    _auth: Authorized<ManageCatalog>,
    Json(input): Json<CreateService>,
) -> AppResult<impl IntoResponse> {
    validate_service_name(&input.name)?;
    validate_price(input.price)?;
    validate_duration(input.duration_mins)?;

    let service = ServiceRepo::create(&state.pool, &input).await?;
    tracing::info!(service_id = service.id, name = %service.name, "Service created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// PUT /api/v1/services/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: Authorized<ManageCatalog>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_service_name(name)?;
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }
    validate_duration(input.duration_mins)?;

    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/v1/services/{id}
///
/// Services referenced by past appointments cannot be deleted; deactivate
/// them instead.
pub async fn delete(
    State(state): State<AppState>,
    _auth: Authorized<ManageCatalog>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ServiceRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))
    }
}
