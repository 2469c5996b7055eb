//! Query parameter types shared by several handler modules.

use serde::Deserialize;

/// `?limit=&offset=`. Clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?include_inactive=` for entities with soft-deactivation.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
