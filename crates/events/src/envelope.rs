use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Event;

/// Envelope for a dispatched event.
///
/// The envelope gives every occurrence a unique id so handler logs for one
/// dispatch can be correlated; `payload` carries the domain event itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    payload: E,
}

impl<E> EventEnvelope<E> {
    /// Wrap a payload under a fresh time-ordered id.
    pub fn new(payload: E) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}

impl<E: Event> EventEnvelope<E> {
    /// Routing tag of the wrapped event.
    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}
