//! The user-picked slot that anchors a booking.

use serde::Serialize;

use crate::booking::cart::CartItem;
use crate::booking::layout::layout_cart;
use crate::types::Timestamp;

/// A booking's anchor plus its derived end.
///
/// The end is never chosen independently: it is the latest end among the
/// per-staff blocks laid out from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectedSlot {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl SelectedSlot {
    pub fn anchored(start: Timestamp, items: &[CartItem]) -> Self {
        Self {
            start,
            end: layout_cart(items, start).end(),
        }
    }

    /// Build a slot from a calendar selection. The picked end is ignored;
    /// only the start anchors the layout.
    pub fn from_picker(
        start: Timestamp,
        _picked_end: Option<Timestamp>,
        items: &[CartItem],
    ) -> Self {
        Self::anchored(start, items)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::booking::cart::{ServiceRef, StaffRef};

    fn item(duration: i32, staff: Option<i64>) -> CartItem {
        CartItem::new(
            ServiceRef {
                id: 1,
                name: "Colour".into(),
                price: 0,
                duration_mins: Some(duration),
            },
            staff.map(|id| StaffRef {
                id,
                name: "S".into(),
            }),
        )
    }

    #[test]
    fn end_is_latest_staff_end() {
        let start = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();
        let items = vec![item(30, Some(1)), item(45, Some(1)), item(60, Some(2))];

        let slot = SelectedSlot::anchored(start, &items);
        assert_eq!(slot.end, Utc.with_ymd_and_hms(2026, 5, 2, 10, 15, 0).unwrap());
    }

    #[test]
    fn picked_end_is_ignored() {
        let start = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();
        let picked_end = Utc.with_ymd_and_hms(2026, 5, 2, 17, 0, 0).unwrap();
        let items = vec![item(30, None)];

        let slot = SelectedSlot::from_picker(start, Some(picked_end), &items);
        assert_eq!(slot, SelectedSlot::anchored(start, &items));
        assert_eq!(slot.end, Utc.with_ymd_and_hms(2026, 5, 2, 9, 30, 0).unwrap());
    }

    #[test]
    fn empty_cart_slot_has_zero_length() {
        let start = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();
        let slot = SelectedSlot::anchored(start, &[]);
        assert_eq!(slot.start, slot.end);
    }
}
