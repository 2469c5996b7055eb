use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything inside is either `Arc` or already a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: salon_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Booking and status events are published here.
    pub event_bus: Arc<salon_events::EventBus>,
}
