use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET    /              -> list
/// GET    /{id}          -> get_by_id
/// DELETE /{id}          -> delete
/// PATCH  /{id}/status   -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointments::list))
        .route(
            "/{id}",
            get(appointments::get_by_id).delete(appointments::delete),
        )
        .route("/{id}/status", patch(appointments::update_status))
}
