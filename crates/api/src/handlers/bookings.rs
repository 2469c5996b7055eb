//! Handlers for `/bookings`: layout preview, calendar reconciliation and
//! submission.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use salon_core::booking::{
    check_layout_bounds, check_required, layout_cart, reconcile, AppointmentDraft, BookingCart,
    BookingLayout, BookingRequest, CalendarEvent, CartItem, ConfirmedBlock, EventKind,
    PendingBlock, SelectedSlot, SubmitError,
};
use salon_core::error::CoreError;
use salon_core::types::{DbId, Price, Timestamp};
use salon_db::models::appointment::Appointment;
use salon_db::repositories::{AppointmentRepo, ClientRepo, ServiceRepo, StaffRepo};
use salon_db::{DbPool, PgAppointmentWriter};
use salon_events::AppointmentBooked;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, CanBook, ViewCalendar};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A cart as the booking screen holds it: full service and staff details
/// per item, plus the picked start.
#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub start: Timestamp,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub slot: SelectedSlot,
    pub total_price: Price,
    pub appointments: Vec<AppointmentDraft>,
    pub pending: Vec<PendingBlock>,
}

impl From<BookingLayout> for PreviewResponse {
    fn from(layout: BookingLayout) -> Self {
        Self {
            slot: SelectedSlot {
                start: layout.anchor,
                end: layout.end(),
            },
            total_price: layout.total_price(),
            pending: layout.pending_blocks().cloned().collect(),
            appointments: layout.appointments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub slot: SelectedSlot,
    pub events: Vec<CalendarEvent>,
    /// Pending blocks overlapping a confirmed appointment of the same staff.
    pub conflicts: usize,
}

#[derive(Debug, Deserialize)]
pub struct BookingItemInput {
    pub service_id: DbId,
    pub staff_id: Option<DbId>,
}

/// Body of `POST /bookings`. Missing fields are reported in the order
/// slot, cart, client.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub client_id: Option<DbId>,
    pub start: Option<Timestamp>,
    #[serde(default)]
    pub items: Vec<BookingItemInput>,
}

#[derive(Debug, Serialize)]
pub struct BookingCreated {
    pub slot: SelectedSlot,
    pub appointments: Vec<Appointment>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings/preview
///
/// Lay out the cart from `start` without touching the database.
pub async fn preview(
    _auth: Authorized<CanBook>,
    Json(input): Json<LayoutRequest>,
) -> AppResult<impl IntoResponse> {
    check_layout_bounds(&input.items, input.start)?;
    let layout = layout_cart(&input.items, input.start);
    Ok(Json(DataResponse {
        data: PreviewResponse::from(layout),
    }))
}

/// POST /api/v1/bookings/calendar
///
/// Merge the cart's pending blocks with the appointments already on the
/// anchor's day, flagging overlaps for the same staff member.
///
/// Only appointments dated on the anchor's UTC day are loaded. Pending
/// blocks running past midnight are not checked against the next day.
pub async fn calendar(
    State(state): State<AppState>,
    _auth: Authorized<ViewCalendar>,
    Json(input): Json<LayoutRequest>,
) -> AppResult<impl IntoResponse> {
    check_layout_bounds(&input.items, input.start)?;
    let layout = layout_cart(&input.items, input.start);

    let confirmed: Vec<ConfirmedBlock> =
        AppointmentRepo::calendar_for_date(&state.pool, input.start.date_naive())
            .await?
            .into_iter()
            .map(ConfirmedBlock::from)
            .collect();

    let pending: Vec<PendingBlock> = layout.pending_blocks().cloned().collect();
    let events = reconcile(&confirmed, &pending);
    let conflicts = events
        .iter()
        .filter(|e| e.kind == EventKind::Pending && e.conflict)
        .count();

    Ok(Json(DataResponse {
        data: CalendarResponse {
            slot: SelectedSlot {
                start: layout.anchor,
                end: layout.end(),
            },
            events,
            conflicts,
        },
    }))
}

/// POST /api/v1/bookings
///
/// Resolve the cart against the catalog, then create one appointment per
/// staff member, one after another. A failure part-way keeps the
/// appointments already written and answers with a generic 500.
pub async fn create(
    State(state): State<AppState>,
    Authorized(user, _): Authorized<CanBook>,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<impl IntoResponse> {
    let (anchor, client_id) =
        check_required(input.start, !input.items.is_empty(), input.client_id)?;

    if ClientRepo::find_by_id(&state.pool, client_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Client {client_id} does not exist"
        ))));
    }

    let (cart, staff_names) = resolve_cart(&state.pool, &input.items).await?;
    check_layout_bounds(cart.items(), anchor)?;

    let mut session = BookingRequest {
        client_id: Some(client_id),
        slot: Some(anchor),
        cart,
    };
    let slot = session
        .selected_slot()
        .ok_or_else(|| AppError::InternalError("Booking slot vanished".into()))?;

    let writer = PgAppointmentWriter::new(state.pool.clone(), Some(user.staff_id));
    match session.submit(&writer).await {
        Ok(appointments) => {
            publish_booked(&state, &appointments, &staff_names, user.staff_id);
            Ok((
                StatusCode::CREATED,
                Json(DataResponse {
                    data: BookingCreated { slot, appointments },
                }),
            ))
        }
        Err(SubmitError::Invalid(err)) => Err(AppError::Core(err)),
        Err(SubmitError::Partial {
            created,
            failed_index,
            total,
            source,
        }) => {
            publish_booked(&state, &created, &staff_names, user.staff_id);
            let created_ids: Vec<DbId> = created.iter().map(|a| a.id).collect();
            Err(AppError::InternalError(format!(
                "Booking for client {client_id} stopped at appointment {} of {total}; \
                 kept {created_ids:?}: {source}",
                failed_index + 1
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn `(service_id, staff_id)` pairs into cart items using active catalog
/// rows, preserving input order. Also returns staff display names by id.
async fn resolve_cart(
    pool: &DbPool,
    items: &[BookingItemInput],
) -> AppResult<(BookingCart, HashMap<DbId, String>)> {
    let mut service_ids: Vec<DbId> = items.iter().map(|i| i.service_id).collect();
    service_ids.sort_unstable();
    service_ids.dedup();

    let mut staff_ids: Vec<DbId> = items.iter().filter_map(|i| i.staff_id).collect();
    staff_ids.sort_unstable();
    staff_ids.dedup();

    let services: HashMap<DbId, _> = ServiceRepo::find_active_by_ids(pool, &service_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    let staff: HashMap<DbId, _> = StaffRepo::find_active_by_ids(pool, &staff_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let cart = items
        .iter()
        .map(|item| {
            let service = services.get(&item.service_id).ok_or_else(|| {
                CoreError::Validation(format!("Service {} is not available", item.service_id))
            })?;
            let staff_ref = match item.staff_id {
                Some(id) => Some(
                    staff
                        .get(&id)
                        .ok_or_else(|| {
                            CoreError::Validation(format!("Staff member {id} is not available"))
                        })?
                        .to_staff_ref(),
                ),
                None => None,
            };
            Ok(CartItem::new(service.to_service_ref(), staff_ref))
        })
        .collect::<Result<BookingCart, CoreError>>()?;

    let names = staff
        .into_iter()
        .map(|(id, s)| (id, s.display_name))
        .collect();

    Ok((cart, names))
}

fn publish_booked(
    state: &AppState,
    appointments: &[Appointment],
    staff_names: &HashMap<DbId, String>,
    actor: DbId,
) {
    for appointment in appointments {
        let booked = AppointmentBooked {
            appointment_id: appointment.id,
            client_id: appointment.client_id,
            staff_id: appointment.staff_id,
            staff_name: appointment
                .staff_id
                .and_then(|id| staff_names.get(&id).cloned()),
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            total_price: appointment.total_price,
        };
        state.event_bus.publish(booked.into_event(Some(actor)));
    }
}
