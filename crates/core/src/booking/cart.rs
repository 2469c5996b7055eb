//! In-memory booking cart.
//!
//! A cart is the ordered list of services picked during one booking session,
//! each optionally tied to a preferred staff member. Insertion order is the
//! service order used by the layout, so the cart never reorders its items.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Price};

/// Block length used when a service carries no usable duration.
pub const DEFAULT_SERVICE_DURATION_MINS: i32 = 30;

/// The service half of a cart item, as shown in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub id: DbId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub duration_mins: Option<i32>,
}

/// The staff member a service was booked with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRef {
    pub id: DbId,
    pub name: String,
}

/// A pending service selection, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub service: ServiceRef,
    #[serde(default)]
    pub staff: Option<StaffRef>,
}

impl CartItem {
    pub fn new(service: ServiceRef, staff: Option<StaffRef>) -> Self {
        Self { service, staff }
    }

    /// Effective duration in minutes. Missing or non-positive durations fall
    /// back to [`DEFAULT_SERVICE_DURATION_MINS`].
    pub fn duration_mins(&self) -> i32 {
        match self.service.duration_mins {
            Some(mins) if mins > 0 => mins,
            _ => DEFAULT_SERVICE_DURATION_MINS,
        }
    }

    pub fn duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.duration_mins()))
    }

    pub fn staff_id(&self) -> Option<DbId> {
        self.staff.as_ref().map(|s| s.id)
    }
}

/// Ordered collection of [`CartItem`]s for one booking session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingCart {
    items: Vec<CartItem>,
}

impl BookingCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. The same service may be added more than once.
    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Remove the item at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Drop every item (submit or cancel).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_price(&self) -> Price {
        self.items.iter().map(|i| i.service.price).sum()
    }

    /// Sum of every item's duration, regardless of staff.
    pub fn total_duration(&self) -> TimeDelta {
        self.items
            .iter()
            .fold(TimeDelta::zero(), |acc, item| acc + item.duration())
    }
}

impl From<Vec<CartItem>> for BookingCart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}

impl FromIterator<CartItem> for BookingCart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: DbId, price: Price, duration: Option<i32>) -> CartItem {
        CartItem::new(
            ServiceRef {
                id,
                name: format!("Service {id}"),
                price,
                duration_mins: duration,
            },
            None,
        )
    }

    #[test]
    fn missing_duration_defaults_to_thirty_minutes() {
        assert_eq!(item(1, 0, None).duration_mins(), 30);
        assert_eq!(item(1, 0, None).duration(), TimeDelta::minutes(30));
    }

    #[test]
    fn non_positive_duration_defaults_to_thirty_minutes() {
        assert_eq!(item(1, 0, Some(0)).duration_mins(), 30);
        assert_eq!(item(1, 0, Some(-15)).duration_mins(), 30);
    }

    #[test]
    fn explicit_duration_is_kept() {
        assert_eq!(item(1, 0, Some(45)).duration_mins(), 45);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut cart = BookingCart::new();
        cart.add(item(3, 100, None));
        cart.add(item(1, 200, None));
        cart.add(item(2, 300, None));

        let ids: Vec<DbId> = cart.items().iter().map(|i| i.service.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn same_service_can_be_added_twice() {
        let mut cart = BookingCart::new();
        cart.add(item(1, 100, None));
        cart.add(item(1, 100, None));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn remove_returns_item_and_keeps_order() {
        let mut cart: BookingCart =
            vec![item(1, 0, None), item(2, 0, None), item(3, 0, None)].into();

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.service.id, 2);

        let ids: Vec<DbId> = cart.items().iter().map(|i| i.service.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut cart: BookingCart = vec![item(1, 0, None)].into();
        assert!(cart.remove(5).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart: BookingCart = vec![item(1, 0, None), item(2, 0, None)].into();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn totals_sum_all_items() {
        let cart: BookingCart = vec![
            item(1, 2500, Some(30)),
            item(2, 4000, Some(45)),
            item(3, 1000, None),
        ]
        .into();

        assert_eq!(cart.total_price(), 7500);
        assert_eq!(cart.total_duration(), TimeDelta::minutes(105));
    }

    #[test]
    fn cart_deserializes_from_plain_array() {
        let json = r#"[
            {"service": {"id": 1, "name": "Cut", "price": 2500, "duration_mins": 45},
             "staff": {"id": 7, "name": "Ana"}},
            {"service": {"id": 2, "name": "Wash", "price": 800}}
        ]"#;

        let cart: BookingCart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].staff_id(), Some(7));
        assert_eq!(cart.items()[1].staff_id(), None);
        assert_eq!(cart.items()[1].duration_mins(), 30);
    }
}
