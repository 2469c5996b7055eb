pub mod appointments;
pub mod auth;
pub mod bookings;
pub mod clients;
pub mod services;
pub mod staff;
