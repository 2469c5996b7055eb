//! Sequential per-staff layout of a booking cart.
//!
//! Given an ordered cart and a single anchor instant, items are grouped by
//! staff (first-seen order) and each group is packed back-to-back starting
//! at the anchor. Different staff therefore start in parallel, while the
//! services of one staff member never overlap.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::booking::cart::CartItem;
use crate::catalog::MAX_SERVICE_DURATION_MINS;
use crate::error::CoreError;
use crate::types::{DbId, Price, Timestamp};

/// Most services one booking may hold.
pub const MAX_CART_ITEMS: usize = 50;

// ---------------------------------------------------------------------------
// Staff grouping
// ---------------------------------------------------------------------------

/// Grouping key for cart items: a concrete staff member or the shared
/// "unassigned" bucket.
///
/// Serializes as a nullable staff id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<DbId>", into = "Option<DbId>")]
pub enum StaffKey {
    Assigned(DbId),
    Unassigned,
}

impl StaffKey {
    pub fn of(item: &CartItem) -> Self {
        item.staff_id().into()
    }

    pub fn staff_id(self) -> Option<DbId> {
        match self {
            Self::Assigned(id) => Some(id),
            Self::Unassigned => None,
        }
    }
}

impl From<Option<DbId>> for StaffKey {
    fn from(value: Option<DbId>) -> Self {
        match value {
            Some(id) => Self::Assigned(id),
            None => Self::Unassigned,
        }
    }
}

impl From<StaffKey> for Option<DbId> {
    fn from(value: StaffKey) -> Self {
        value.staff_id()
    }
}

/// Cart items sharing one [`StaffKey`], in cart order.
#[derive(Debug, Clone)]
pub struct StaffGroup<'a> {
    pub key: StaffKey,
    pub items: Vec<&'a CartItem>,
}

impl StaffGroup<'_> {
    /// Display name of the group's staff member, taken from the first item.
    pub fn staff_name(&self) -> Option<&str> {
        self.items
            .iter()
            .find_map(|item| item.staff.as_ref().map(|s| s.name.as_str()))
    }
}

/// Partition items by staff, preserving the first-seen order of keys and the
/// cart order within each group.
pub fn group_by_staff(items: &[CartItem]) -> Vec<StaffGroup<'_>> {
    let mut groups: Vec<StaffGroup<'_>> = Vec::new();

    for item in items {
        let key = StaffKey::of(item);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.items.push(item),
            None => groups.push(StaffGroup {
                key,
                items: vec![item],
            }),
        }
    }

    groups
}

// ---------------------------------------------------------------------------
// Layout output
// ---------------------------------------------------------------------------

/// A locally computed, not-yet-saved calendar block for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingBlock {
    #[serde(rename = "staff_id")]
    pub staff: StaffKey,
    pub service_id: DbId,
    pub service_name: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// One booked service inside a draft, with the price it was sold at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftService {
    pub service_id: DbId,
    pub price: Price,
}

/// The appointment derived for one staff group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentDraft {
    #[serde(rename = "staff_id")]
    pub staff: StaffKey,
    pub staff_name: Option<String>,
    pub services: Vec<DraftService>,
    pub blocks: Vec<PendingBlock>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub date: NaiveDate,
}

impl AppointmentDraft {
    pub fn total_price(&self) -> Price {
        self.services.iter().map(|s| s.price).sum()
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }
}

/// Every draft produced from one cart and anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingLayout {
    pub anchor: Timestamp,
    pub appointments: Vec<AppointmentDraft>,
}

impl BookingLayout {
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// All pending blocks, draft by draft.
    pub fn pending_blocks(&self) -> impl Iterator<Item = &PendingBlock> + '_ {
        self.appointments.iter().flat_map(|a| a.blocks.iter())
    }

    /// Latest end among the drafts; the anchor itself for an empty layout.
    pub fn end(&self) -> Timestamp {
        self.appointments
            .iter()
            .map(|a| a.end_time)
            .max()
            .unwrap_or(self.anchor)
    }

    pub fn total_price(&self) -> Price {
        self.appointments.iter().map(AppointmentDraft::total_price).sum()
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Reject carts that cannot be laid out from `anchor`: too many items, a
/// duration above [`MAX_SERVICE_DURATION_MINS`], or an end past the
/// representable range. Run this before [`layout_cart`] on untrusted input.
pub fn check_layout_bounds(items: &[CartItem], anchor: Timestamp) -> Result<(), CoreError> {
    if items.len() > MAX_CART_ITEMS {
        return Err(CoreError::Validation(format!(
            "A booking may hold at most {MAX_CART_ITEMS} services, got {}",
            items.len()
        )));
    }

    if let Some(item) = items
        .iter()
        .find(|i| i.service.duration_mins.is_some_and(|m| m > MAX_SERVICE_DURATION_MINS))
    {
        return Err(CoreError::Validation(format!(
            "Service {} lasts longer than {MAX_SERVICE_DURATION_MINS} minutes",
            item.service.id
        )));
    }

    let total = items
        .iter()
        .fold(TimeDelta::zero(), |acc, item| acc + item.duration());
    if anchor.checked_add_signed(total).is_none() {
        return Err(CoreError::Validation(
            "Booking would end outside the supported date range".to_string(),
        ));
    }

    Ok(())
}

/// Lay out `items` from `anchor`: one draft per staff group, each group's
/// services packed back-to-back from the anchor.
pub fn layout_cart(items: &[CartItem], anchor: Timestamp) -> BookingLayout {
    let appointments = group_by_staff(items)
        .into_iter()
        .map(|group| layout_group(&group, anchor))
        .collect();

    BookingLayout {
        anchor,
        appointments,
    }
}

fn layout_group(group: &StaffGroup<'_>, anchor: Timestamp) -> AppointmentDraft {
    let (blocks, end_time) = group.items.iter().fold(
        (Vec::with_capacity(group.items.len()), anchor),
        |(mut blocks, cursor), item| {
            let end = cursor + item.duration();
            blocks.push(PendingBlock {
                staff: group.key,
                service_id: item.service.id,
                service_name: item.service.name.clone(),
                start: cursor,
                end,
            });
            (blocks, end)
        },
    );

    AppointmentDraft {
        staff: group.key,
        staff_name: group.staff_name().map(str::to_owned),
        services: group
            .items
            .iter()
            .map(|item| DraftService {
                service_id: item.service.id,
                price: item.service.price,
            })
            .collect(),
        blocks,
        start_time: anchor,
        end_time,
        date: anchor.date_naive(),
    }
}
