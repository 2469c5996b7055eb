pub mod appointments;
pub mod auth;
pub mod bookings;
pub mod clients;
pub mod health;
pub mod services;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                       login (public)
/// /auth/me                          current staff member
///
/// /bookings                         submit a booking (POST)
/// /bookings/preview                 lay out a cart (POST, no persistence)
/// /bookings/calendar                cart vs. the day's appointments (POST)
///
/// /appointments                     list by range (GET)
/// /appointments/{id}                get, delete
/// /appointments/{id}/status         lifecycle transition (PATCH)
///
/// /clients                          list/search, create
/// /clients/{id}                     get, update, delete
///
/// /services                         list, create
/// /services/{id}                    get, update, delete
///
/// /staff                            list active, create
/// /staff/{id}                       get, deactivate
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/bookings", bookings::router())
        .nest("/appointments", appointments::router())
        .nest("/clients", clients::router())
        .nest("/services", services::router())
        .nest("/staff", staff::router())
}
