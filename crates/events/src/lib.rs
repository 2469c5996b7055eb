//! Salon event bus and booking notifications.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the domain event envelope.
//! - [`AppointmentBooked`] -- typed payload for `appointment.booked`.
//! - [`delivery`] -- outbound channels (e-mail).
//! - [`BookingNotifier`] -- background service that e-mails clients about
//!   new bookings.

pub mod bus;
pub mod delivery;
pub mod notifier;

pub use bus::{
    AppointmentBooked, EventBus, PlatformEvent, EVENT_APPOINTMENT_BOOKED,
    EVENT_APPOINTMENT_STATUS_CHANGED,
};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use notifier::{BookingNotifier, NotifyError, Outcome};
