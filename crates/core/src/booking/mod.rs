//! Booking flow: cart, slot anchoring, per-staff layout, calendar
//! reconciliation and submission.
//!
//! ```text
//! BookingCart ──► layout_cart(anchor) ──► AppointmentDraft (one per staff)
//!                        │                        │
//!                        ▼                        ▼
//!               reconcile(confirmed)     AppointmentPayload ──► AppointmentWriter
//! ```

pub mod calendar;
pub mod cart;
pub mod layout;
pub mod slot;
pub mod submission;

pub use calendar::{reconcile, CalendarEvent, ConfirmedBlock, EventKind};
pub use cart::{BookingCart, CartItem, ServiceRef, StaffRef, DEFAULT_SERVICE_DURATION_MINS};
pub use layout::{
    check_layout_bounds, layout_cart, AppointmentDraft, BookingLayout, DraftService,
    PendingBlock, StaffKey, MAX_CART_ITEMS,
};
pub use slot::SelectedSlot;
pub use submission::{
    check_required, submit_booking, validate_request, AppointmentPayload, AppointmentWriter,
    BookingRequest, SubmitError, ValidatedBooking,
};
