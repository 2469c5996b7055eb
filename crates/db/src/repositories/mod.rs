//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod appointment_repo;
pub mod client_repo;
pub mod service_repo;
pub mod staff_repo;

pub use appointment_repo::AppointmentRepo;
pub use client_repo::ClientRepo;
pub use service_repo::ServiceRepo;
pub use staff_repo::StaffRepo;
