//! Row structs and request DTOs, one module per table group.

pub mod appointment;
pub mod client;
pub mod service;
pub mod staff;
