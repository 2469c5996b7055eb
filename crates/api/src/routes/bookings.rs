use axum::routing::post;
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// POST /          -> create
/// POST /preview   -> preview
/// POST /calendar  -> calendar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::create))
        .route("/preview", post(bookings::preview))
        .route("/calendar", post(bookings::calendar))
}
