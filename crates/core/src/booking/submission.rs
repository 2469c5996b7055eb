//! Booking submission: validation, payload derivation and the sequential
//! creation loop.
//!
//! Drafts are written one at a time in layout order. The batch is not
//! atomic: when a write fails, the appointments created before it stay
//! created and are handed back inside [`SubmitError::Partial`].

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::booking::cart::{BookingCart, CartItem};
use crate::booking::layout::{
    check_layout_bounds, layout_cart, AppointmentDraft, BookingLayout, DraftService,
};
use crate::booking::slot::SelectedSlot;
use crate::error::CoreError;
use crate::types::{DbId, Price, Timestamp};

pub const MSG_MISSING_SLOT: &str = "Please select a time slot";
pub const MSG_EMPTY_CART: &str = "Please add at least one service";
pub const MSG_MISSING_CLIENT: &str = "Please select a client";

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything collected during one booking session: client, anchor and cart.
#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub client_id: Option<DbId>,
    pub slot: Option<Timestamp>,
    pub cart: BookingCart,
}

impl BookingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_client(&mut self, client_id: DbId) {
        self.client_id = Some(client_id);
    }

    pub fn select_slot(&mut self, start: Timestamp) {
        self.slot = Some(start);
    }

    pub fn add_item(&mut self, item: CartItem) {
        self.cart.add(item);
    }

    /// The slot as it would be booked right now, if one is selected.
    pub fn selected_slot(&self) -> Option<SelectedSlot> {
        self.slot
            .map(|start| SelectedSlot::anchored(start, self.cart.items()))
    }

    /// Abandon the session: drops the cart and the picked slot.
    pub fn cancel(&mut self) {
        self.cart.clear();
        self.slot = None;
    }

    /// Submit through `writer`, clearing the cart and slot once every
    /// appointment has been created.
    pub async fn submit<W>(
        &mut self,
        writer: &W,
    ) -> Result<Vec<W::Record>, SubmitError<W::Record, W::Error>>
    where
        W: AppointmentWriter + ?Sized,
    {
        let created = submit_booking(writer, self).await?;
        self.cancel();
        Ok(created)
    }
}

/// A session that passed validation, with its layout computed.
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub client_id: DbId,
    pub layout: BookingLayout,
}

impl ValidatedBooking {
    /// One payload per staff draft, in layout order.
    pub fn payloads(&self) -> Vec<AppointmentPayload> {
        self.layout
            .appointments
            .iter()
            .map(|draft| AppointmentPayload::from_draft(self.client_id, draft))
            .collect()
    }
}

/// Check that slot, cart and client are present, in that order.
///
/// Returns the anchor and client id when all three are there.
pub fn check_required(
    slot: Option<Timestamp>,
    has_items: bool,
    client_id: Option<DbId>,
) -> Result<(Timestamp, DbId), CoreError> {
    let anchor = slot.ok_or_else(|| CoreError::Validation(MSG_MISSING_SLOT.to_string()))?;

    if !has_items {
        return Err(CoreError::Validation(MSG_EMPTY_CART.to_string()));
    }

    let client_id =
        client_id.ok_or_else(|| CoreError::Validation(MSG_MISSING_CLIENT.to_string()))?;

    Ok((anchor, client_id))
}

/// Validate `session` and compute its layout.
pub fn validate_request(session: &BookingRequest) -> Result<ValidatedBooking, CoreError> {
    let (anchor, client_id) =
        check_required(session.slot, !session.cart.is_empty(), session.client_id)?;
    check_layout_bounds(session.cart.items(), anchor)?;

    Ok(ValidatedBooking {
        client_id,
        layout: layout_cart(session.cart.items(), anchor),
    })
}

// ---------------------------------------------------------------------------
// Persistence seam
// ---------------------------------------------------------------------------

/// The record handed to persistence for one staff group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentPayload {
    pub customer_id: DbId,
    pub staff_id: Option<DbId>,
    pub services: Vec<DraftService>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub date: NaiveDate,
}

impl AppointmentPayload {
    pub fn from_draft(customer_id: DbId, draft: &AppointmentDraft) -> Self {
        Self {
            customer_id,
            staff_id: draft.staff.staff_id(),
            services: draft.services.clone(),
            start_time: draft.start_time,
            end_time: draft.end_time,
            date: draft.date,
        }
    }

    pub fn total_price(&self) -> Price {
        self.services.iter().map(|s| s.price).sum()
    }
}

/// Creates one appointment per call.
#[async_trait]
pub trait AppointmentWriter: Send + Sync {
    type Record: Send + fmt::Debug;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create_appointment(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<Self::Record, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError<R, E>
where
    R: fmt::Debug,
    E: std::error::Error + 'static,
{
    /// Rejected before any write.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// A write failed; `created` holds the records written before it.
    #[error("booking failed at appointment {failed_index} of {total}: {source}")]
    Partial {
        created: Vec<R>,
        failed_index: usize,
        total: usize,
        #[source]
        source: E,
    },
}

/// Validate `session`, lay it out and write each draft sequentially.
///
/// Returns the created records in layout order.
pub async fn submit_booking<W>(
    writer: &W,
    session: &BookingRequest,
) -> Result<Vec<W::Record>, SubmitError<W::Record, W::Error>>
where
    W: AppointmentWriter + ?Sized,
{
    let booking = validate_request(session)?;
    let payloads = booking.payloads();
    let total = payloads.len();
    let mut created = Vec::with_capacity(total);

    for (index, payload) in payloads.iter().enumerate() {
        match writer.create_appointment(payload).await {
            Ok(record) => created.push(record),
            Err(source) => {
                tracing::error!(
                    error = %source,
                    client_id = booking.client_id,
                    failed_index = index,
                    created = created.len(),
                    total,
                    "Booking batch stopped; earlier appointments were kept"
                );
                return Err(SubmitError::Partial {
                    created,
                    failed_index: index,
                    total,
                    source,
                });
            }
        }
    }

    tracing::info!(
        client_id = booking.client_id,
        appointments = total,
        "Booking submitted"
    );

    Ok(created)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::booking::cart::{ServiceRef, StaffRef};

    #[derive(Debug, thiserror::Error)]
    #[error("write rejected")]
    struct WriteRejected;

    /// Records every payload; fails on the call at `fail_at` (0-based).
    #[derive(Default)]
    struct RecordingWriter {
        calls: Mutex<Vec<AppointmentPayload>>,
        fail_at: Option<usize>,
    }

    impl RecordingWriter {
        fn failing_at(index: usize) -> Self {
            Self {
                calls: Mutex::default(),
                fail_at: Some(index),
            }
        }

        fn calls(&self) -> Vec<AppointmentPayload> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AppointmentWriter for RecordingWriter {
        type Record = DbId;
        type Error = WriteRejected;

        async fn create_appointment(
            &self,
            payload: &AppointmentPayload,
        ) -> Result<DbId, WriteRejected> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(payload.clone());
            if self.fail_at == Some(index) {
                return Err(WriteRejected);
            }
            Ok(100 + index as DbId)
        }
    }

    fn nine_am() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 4, 20, 9, 0, 0).unwrap()
    }

    fn item(service_id: DbId, duration: i32, staff: Option<DbId>) -> CartItem {
        CartItem::new(
            ServiceRef {
                id: service_id,
                name: format!("Service {service_id}"),
                price: 1500,
                duration_mins: Some(duration),
            },
            staff.map(|id| StaffRef {
                id,
                name: format!("Staff {id}"),
            }),
        )
    }

    fn full_session() -> BookingRequest {
        let mut session = BookingRequest::new();
        session.select_client(42);
        session.select_slot(nine_am());
        session.add_item(item(1, 30, Some(10)));
        session.add_item(item(2, 45, Some(10)));
        session.add_item(item(3, 60, Some(20)));
        session
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn missing_slot_is_reported_first() {
        let session = BookingRequest::new();
        let err = validate_request(&session).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == MSG_MISSING_SLOT);
    }

    #[test]
    fn empty_cart_is_rejected() {
        let mut session = BookingRequest::new();
        session.select_slot(nine_am());
        session.select_client(1);
        let err = validate_request(&session).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == MSG_EMPTY_CART);
    }

    #[test]
    fn missing_client_is_rejected() {
        let mut session = BookingRequest::new();
        session.select_slot(nine_am());
        session.add_item(item(1, 30, None));
        let err = validate_request(&session).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == MSG_MISSING_CLIENT);
    }

    #[test]
    fn check_required_reports_slot_before_client() {
        let err = check_required(None, false, None).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == MSG_MISSING_SLOT);

        let err = check_required(Some(nine_am()), true, None).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == MSG_MISSING_CLIENT);

        assert_eq!(check_required(Some(nine_am()), true, Some(7)).unwrap(), (nine_am(), 7));
    }

    #[test]
    fn payloads_follow_layout() {
        let booking = validate_request(&full_session()).unwrap();
        let payloads = booking.payloads();

        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0].customer_id, 42);
        assert_eq!(payloads[0].staff_id, Some(10));
        assert_eq!(payloads[0].services.len(), 2);
        assert_eq!(payloads[0].total_price(), 3000);
        assert_eq!(payloads[1].staff_id, Some(20));
        assert_eq!(payloads[1].start_time, nine_am());
    }

    // -----------------------------------------------------------------------
    // Submission loop
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn empty_cart_makes_no_writes() {
        let writer = RecordingWriter::default();
        let mut session = BookingRequest::new();
        session.select_client(1);
        session.select_slot(nine_am());

        let result = submit_booking(&writer, &session).await;

        assert_matches!(result, Err(SubmitError::Invalid(CoreError::Validation(_))));
        assert!(writer.calls().is_empty());
    }

    #[tokio::test]
    async fn oversized_duration_makes_no_writes() {
        let writer = RecordingWriter::default();
        let mut session = full_session();
        session.add_item(item(9, i32::MAX, Some(20)));

        let result = submit_booking(&writer, &session).await;

        assert_matches!(result, Err(SubmitError::Invalid(CoreError::Validation(_))));
        assert!(writer.calls().is_empty());
    }

    #[tokio::test]
    async fn writes_one_payload_per_staff_in_order() {
        let writer = RecordingWriter::default();

        let created = submit_booking(&writer, &full_session()).await.unwrap();

        assert_eq!(created, vec![100, 101]);
        let calls = writer.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].staff_id, Some(10));
        assert_eq!(calls[1].staff_id, Some(20));
    }

    #[tokio::test]
    async fn failure_mid_batch_keeps_earlier_records() {
        let writer = RecordingWriter::failing_at(1);

        let result = submit_booking(&writer, &full_session()).await;

        assert_matches!(
            result,
            Err(SubmitError::Partial { created, failed_index: 1, total: 2, .. }) if created == vec![100]
        );
        assert_eq!(writer.calls().len(), 2);
    }

    #[tokio::test]
    async fn failure_on_first_write_stops_batch() {
        let mut session = full_session();
        session.add_item(item(4, 15, None));
        let writer = RecordingWriter::failing_at(0);

        let result = submit_booking(&writer, &session).await;

        assert_matches!(
            result,
            Err(SubmitError::Partial { created, failed_index: 0, total: 3, .. }) if created.is_empty()
        );
        assert_eq!(writer.calls().len(), 1);
    }

    #[tokio::test]
    async fn successful_submit_clears_session() {
        let writer = RecordingWriter::default();
        let mut session = full_session();

        session.submit(&writer).await.unwrap();

        assert!(session.cart.is_empty());
        assert!(session.slot.is_none());
        assert_eq!(session.client_id, Some(42));
    }

    #[tokio::test]
    async fn failed_submit_keeps_cart() {
        let writer = RecordingWriter::failing_at(0);
        let mut session = full_session();

        assert!(session.submit(&writer).await.is_err());

        assert_eq!(session.cart.len(), 3);
        assert!(session.slot.is_some());
    }

    #[test]
    fn selected_slot_follows_cart() {
        let session = full_session();
        let slot = session.selected_slot().unwrap();
        assert_eq!(slot.start, nine_am());
        assert_eq!(slot.end, Utc.with_ymd_and_hms(2026, 4, 20, 10, 15, 0).unwrap());
    }
}
