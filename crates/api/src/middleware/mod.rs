//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the staff member behind a JWT Bearer token.
//! - [`rbac::Authorized`] -- an [`auth::AuthUser`] whose role grants a given
//!   permission.

pub mod auth;
pub mod rbac;
