//! Static subscription tables.
//!
//! A subscriber declares, once, which event kinds it reacts to, which of its
//! methods handles each kind, and at which priority. The dispatcher turns
//! these declarations into its routing table; nothing is looked up by name
//! at dispatch time.

use crate::{Event, EventEnvelope};

/// Handler reference: a plain method of the subscriber.
pub type Handler<S, E, Err> = fn(&S, &EventEnvelope<E>) -> Result<(), Err>;

/// One row of a subscriber's table: event kind → (handler, priority).
pub struct Subscription<S, E, Err> {
    event_type: &'static str,
    handler: Handler<S, E, Err>,
    priority: i32,
}

impl<S, E, Err> Subscription<S, E, Err> {
    pub fn new(event_type: &'static str, handler: Handler<S, E, Err>, priority: i32) -> Self {
        Self {
            event_type,
            handler,
            priority,
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    pub fn handler(&self) -> Handler<S, E, Err> {
        self.handler
    }

    /// Higher priorities run first.
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

impl<S, E, Err> core::fmt::Debug for Subscription<S, E, Err> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("event_type", &self.event_type)
            .field("priority", &self.priority)
            .finish()
    }
}

/// A component that reacts to events of type `E`.
///
/// Subscribers are shared by the dispatcher (`Arc`), so they must be
/// `Send + Sync` and hold no per-dispatch state.
pub trait EventSubscriber<E: Event>: Send + Sync + Sized + 'static {
    type Error;

    /// The subscriber's routing table.
    fn subscribed_events(&self) -> Vec<Subscription<Self, E, Self::Error>>;
}
