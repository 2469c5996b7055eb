//! Display-only merge of confirmed appointments with pending blocks.
//!
//! Nothing here rejects a booking. Overlaps between a pending block and a
//! confirmed appointment of the same staff member are only flagged so the
//! calendar can highlight them.

use serde::Serialize;

use crate::booking::layout::{PendingBlock, StaffKey};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Confirmed,
    Pending,
}

/// A block already persisted in the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedBlock {
    pub appointment_id: DbId,
    pub staff: StaffKey,
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// One entry of the merged calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub kind: EventKind,
    #[serde(rename = "staff_id")]
    pub staff: StaffKey,
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub appointment_id: Option<DbId>,
    pub conflict: bool,
}

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`.
pub fn overlaps(
    a_start: Timestamp,
    a_end: Timestamp,
    b_start: Timestamp,
    b_end: Timestamp,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Merge confirmed and pending blocks into one sorted calendar.
///
/// Events are ordered by start, confirmed before pending at equal starts.
/// A pending event is flagged when it overlaps a confirmed block of the same
/// assigned staff member.
pub fn reconcile(confirmed: &[ConfirmedBlock], pending: &[PendingBlock]) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = confirmed
        .iter()
        .map(|c| CalendarEvent {
            kind: EventKind::Confirmed,
            staff: c.staff,
            title: c.title.clone(),
            start: c.start,
            end: c.end,
            appointment_id: Some(c.appointment_id),
            conflict: false,
        })
        .collect();

    events.extend(pending.iter().map(|p| CalendarEvent {
        kind: EventKind::Pending,
        staff: p.staff,
        title: p.service_name.clone(),
        start: p.start,
        end: p.end,
        appointment_id: None,
        conflict: conflicts_with_confirmed(p, confirmed),
    }));

    events.sort_by(|a, b| a.start.cmp(&b.start).then(a.kind.cmp(&b.kind)));
    events
}

fn conflicts_with_confirmed(block: &PendingBlock, confirmed: &[ConfirmedBlock]) -> bool {
    if block.staff == StaffKey::Unassigned {
        return false;
    }

    confirmed
        .iter()
        .any(|c| c.staff == block.staff && overlaps(block.start, block.end, c.start, c.end))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(hour: u32, minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 6, 1, hour, minute, 0).unwrap()
    }

    fn confirmed(
        id: DbId,
        staff: Option<DbId>,
        start: Timestamp,
        end: Timestamp,
    ) -> ConfirmedBlock {
        ConfirmedBlock {
            appointment_id: id,
            staff: staff.into(),
            title: format!("Appointment {id}"),
            start,
            end,
        }
    }

    fn pending(staff: Option<DbId>, start: Timestamp, end: Timestamp) -> PendingBlock {
        PendingBlock {
            staff: staff.into(),
            service_id: 1,
            service_name: "Blow dry".into(),
            start,
            end,
        }
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(overlaps(at(9, 0), at(10, 0), at(9, 30), at(10, 30)));
        assert!(!overlaps(at(9, 0), at(10, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(10, 0), at(11, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn pending_overlapping_same_staff_is_flagged() {
        let events = reconcile(
            &[confirmed(1, Some(5), at(9, 0), at(10, 0))],
            &[pending(Some(5), at(9, 30), at(10, 0))],
        );

        let p = events.iter().find(|e| e.kind == EventKind::Pending).unwrap();
        assert!(p.conflict);
    }

    #[test]
    fn pending_for_other_staff_is_not_flagged() {
        let events = reconcile(
            &[confirmed(1, Some(5), at(9, 0), at(10, 0))],
            &[pending(Some(6), at(9, 0), at(10, 0))],
        );

        assert!(events.iter().all(|e| !e.conflict));
    }

    #[test]
    fn unassigned_pending_never_conflicts() {
        let events = reconcile(
            &[confirmed(1, None, at(9, 0), at(10, 0))],
            &[pending(None, at(9, 0), at(10, 0))],
        );

        assert!(events.iter().all(|e| !e.conflict));
    }

    #[test]
    fn adjacent_blocks_do_not_conflict() {
        let events = reconcile(
            &[confirmed(1, Some(5), at(9, 0), at(10, 0))],
            &[pending(Some(5), at(10, 0), at(10, 30))],
        );

        assert!(events.iter().all(|e| !e.conflict));
    }

    #[test]
    fn events_sorted_by_start_confirmed_first() {
        let events = reconcile(
            &[
                confirmed(2, Some(1), at(11, 0), at(12, 0)),
                confirmed(1, Some(2), at(9, 0), at(9, 30)),
            ],
            &[pending(Some(3), at(9, 0), at(9, 45)), pending(None, at(8, 0), at(8, 30))],
        );

        let order: Vec<(Timestamp, EventKind)> = events.iter().map(|e| (e.start, e.kind)).collect();
        assert_eq!(
            order,
            vec![
                (at(8, 0), EventKind::Pending),
                (at(9, 0), EventKind::Confirmed),
                (at(9, 0), EventKind::Pending),
                (at(11, 0), EventKind::Confirmed),
            ]
        );
        assert_eq!(events[1].appointment_id, Some(1));
        assert_eq!(events[2].appointment_id, None);
    }
}
