//! Appointment status constants and the status state machine.
//!
//! Statuses are stored as text in `appointments.status`; the DB check
//! constraint mirrors [`VALID_STATUSES`].

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Statuses
-------------------------------------------------------------------------- */

/// Freshly created by the booking flow.
pub const STATUS_BOOKED: &str = "booked";

/// Confirmed with the client.
pub const STATUS_CONFIRMED: &str = "confirmed";

/// Service delivered.
pub const STATUS_COMPLETED: &str = "completed";

/// Cancelled by the salon or the client.
pub const STATUS_CANCELLED: &str = "cancelled";

/// Client did not show up.
pub const STATUS_NO_SHOW: &str = "no_show";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_BOOKED,
    STATUS_CONFIRMED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
    STATUS_NO_SHOW,
];

/// Statuses that still occupy a calendar slot.
pub const ACTIVE_STATUSES: &[&str] = &[STATUS_BOOKED, STATUS_CONFIRMED, STATUS_COMPLETED];

/* --------------------------------------------------------------------------
State machine
-------------------------------------------------------------------------- */

/// Statuses reachable from `from`. Terminal and unknown statuses return an
/// empty slice.
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_BOOKED => &[STATUS_CONFIRMED, STATUS_CANCELLED, STATUS_NO_SHOW],
        STATUS_CONFIRMED => &[STATUS_COMPLETED, STATUS_CANCELLED, STATUS_NO_SHOW],
        _ => &[],
    }
}

pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid appointment status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a status change, naming both ends on failure.
pub fn validate_transition(from: &str, to: &str) -> Result<(), CoreError> {
    validate_status(to)?;
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid transition: {from} -> {to}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booked_can_be_confirmed_cancelled_or_no_show() {
        assert!(can_transition(STATUS_BOOKED, STATUS_CONFIRMED));
        assert!(can_transition(STATUS_BOOKED, STATUS_CANCELLED));
        assert!(can_transition(STATUS_BOOKED, STATUS_NO_SHOW));
    }

    #[test]
    fn booked_cannot_jump_to_completed() {
        assert!(!can_transition(STATUS_BOOKED, STATUS_COMPLETED));
    }

    #[test]
    fn confirmed_can_complete() {
        assert!(can_transition(STATUS_CONFIRMED, STATUS_COMPLETED));
    }

    #[test]
    fn terminal_statuses_have_no_transitions() {
        assert!(valid_transitions(STATUS_COMPLETED).is_empty());
        assert!(valid_transitions(STATUS_CANCELLED).is_empty());
        assert!(valid_transitions(STATUS_NO_SHOW).is_empty());
    }

    #[test]
    fn unknown_status_has_no_transitions() {
        assert!(valid_transitions("archived").is_empty());
    }

    #[test]
    fn validate_transition_names_both_ends() {
        let err = validate_transition(STATUS_CANCELLED, STATUS_CONFIRMED).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("cancelled"));
        assert!(msg.contains("confirmed"));
    }

    #[test]
    fn validate_transition_rejects_unknown_target() {
        let err = validate_transition(STATUS_BOOKED, "paid").unwrap_err();
        assert!(err.to_string().contains("Invalid appointment status"));
    }

    #[test]
    fn validate_transition_ok() {
        assert!(validate_transition(STATUS_CONFIRMED, STATUS_NO_SHOW).is_ok());
    }
}
