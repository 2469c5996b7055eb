//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use salon_core::clients::{search_pattern, validate_name, validate_notes, validate_phone};
use salon_core::error::CoreError;
use salon_core::types::DbId;
use salon_db::models::client::{CreateClient, UpdateClient};
use salon_db::repositories::ClientRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, ManageClients};
use crate::response::DataResponse;
use crate::state::AppState;

/// `?q=&limit=&offset=`
#[derive(Debug, Deserialize)]
pub struct ClientListParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn validate_contact(phone: Option<&str>, notes: Option<&str>) -> Result<(), CoreError> {
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }
    if let Some(notes) = notes {
        validate_notes(notes)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/clients?q=&limit=&offset=
///
/// Search matches first name, last name, full name, e-mail and phone.
pub async fn list(
    State(state): State<AppState>,
    _auth: Authorized<ManageClients>,
    Query(params): Query<ClientListParams>,
) -> AppResult<impl IntoResponse> {
    let pattern = params.q.as_deref().and_then(search_pattern);
    let clients =
        ClientRepo::list(&state.pool, pattern.as_deref(), params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: Authorized<ManageClients>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    _auth: Authorized<ManageClients>,
    Json(input): Json<CreateClient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_name("first_name", &input.first_name)?;
    validate_name("last_name", &input.last_name)?;
    validate_contact(input.phone.as_deref(), input.notes.as_deref())?;

    let client = ClientRepo::create(&state.pool, &input).await?;
    tracing::info!(client_id = client.id, "Client created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: Authorized<ManageClients>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(first_name) = &input.first_name {
        validate_name("first_name", first_name)?;
    }
    if let Some(last_name) = &input.last_name {
        validate_name("last_name", last_name)?;
    }
    validate_contact(input.phone.as_deref(), input.notes.as_deref())?;

    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clients/{id}
///
/// Clients with appointments cannot be deleted (400 from the foreign key).
pub async fn delete(
    State(state): State<AppState>,
    _auth: Authorized<ManageClients>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ClientRepo::delete(&state.pool, id).await? {
        tracing::info!(client_id = id, "Client deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))
    }
}
