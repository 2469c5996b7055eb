//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use salon_core::types::{DbId, Price, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Published once per appointment created by the booking flow.
pub const EVENT_APPOINTMENT_BOOKED: &str = "appointment.booked";

/// Published when staff move an appointment through its lifecycle.
pub const EVENT_APPOINTMENT_STATUS_CHANGED: &str = "appointment.status_changed";

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// A domain event.
///
/// Constructed via [`PlatformEvent::new`] and enriched with the builder
/// methods [`with_source`](PlatformEvent::with_source),
/// [`with_actor`](PlatformEvent::with_actor), and
/// [`with_payload`](PlatformEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"appointment.booked"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"appointment"`).
    pub source_entity_type: Option<String>,

    pub source_entity_id: Option<DbId>,

    /// Staff member whose request triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Event-specific JSON payload.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// Typed payloads
// ---------------------------------------------------------------------------

/// Payload of an [`EVENT_APPOINTMENT_BOOKED`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentBooked {
    pub appointment_id: DbId,
    pub client_id: DbId,
    pub staff_id: Option<DbId>,
    pub staff_name: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total_price: Price,
}

impl AppointmentBooked {
    /// Wrap this payload in a [`PlatformEvent`] sourced from the appointment.
    pub fn into_event(self, actor: Option<DbId>) -> PlatformEvent {
        let mut event = PlatformEvent::new(EVENT_APPOINTMENT_BOOKED)
            .with_source("appointment", self.appointment_id);
        if let Some(actor) = actor {
            event = event.with_actor(actor);
        }
        // Serializing plain fields into a `Value` cannot fail.
        event.with_payload(serde_json::to_value(&self).unwrap_or_default())
    }

    /// Read the payload back out of a booked event. Returns `None` for
    /// other event types or malformed payloads.
    pub fn from_event(event: &PlatformEvent) -> Option<Self> {
        if event.event_type != EVENT_APPOINTMENT_BOOKED {
            return None;
        }
        serde_json::from_value(event.payload.clone()).ok()
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// When the buffer is full the oldest un-consumed messages are dropped and
/// slow receivers observe `RecvError::Lagged`.
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Dropped silently when
    /// nobody is subscribed.
    pub fn publish(&self, event: PlatformEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
