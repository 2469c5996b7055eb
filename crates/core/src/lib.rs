//! Domain logic for the salon backend.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! repository layer, the HTTP API and the notification services.

pub mod appointments;
pub mod booking;
pub mod catalog;
pub mod clients;
pub mod error;
pub mod permissions;
pub mod search;
pub mod types;
