//! Synchronous, priority-ordered event dispatch.
//!
//! The dispatcher owns a routing table keyed by event kind. Each entry lists
//! the registered handlers sorted by descending priority; handlers with equal
//! priority keep their registration order. Dispatch is single-threaded and
//! runs inside the caller's own error boundary: the first handler error stops
//! the dispatch and is returned unchanged.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{Event, EventEnvelope, EventSubscriber};

type BoxedHandler<E, Err> = Box<dyn Fn(&EventEnvelope<E>) -> Result<(), Err> + Send + Sync>;

struct Registered<E, Err> {
    subscriber: &'static str,
    priority: i32,
    handler: BoxedHandler<E, Err>,
}

/// Routes events of type `E` to subscribers whose handlers fail with `Err`.
pub struct EventDispatcher<E, Err> {
    table: HashMap<&'static str, Vec<Registered<E, Err>>>,
}

impl<E, Err> Default for EventDispatcher<E, Err> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<E, Err> core::fmt::Debug for EventDispatcher<E, Err> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut kinds: Vec<_> = self.table.iter().map(|(k, v)| (*k, v.len())).collect();
        kinds.sort_unstable();
        f.debug_struct("EventDispatcher").field("kinds", &kinds).finish()
    }
}

impl<E, Err> EventDispatcher<E, Err>
where
    E: Event,
    Err: core::fmt::Display + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every subscription declared by `subscriber`.
    pub fn add_subscriber<S>(&mut self, subscriber: Arc<S>)
    where
        S: EventSubscriber<E, Error = Err>,
    {
        for subscription in subscriber.subscribed_events() {
            let target = Arc::clone(&subscriber);
            let handler = subscription.handler();
            let entry = self.table.entry(subscription.event_type()).or_default();
            entry.push(Registered {
                subscriber: core::any::type_name::<S>(),
                priority: subscription.priority(),
                handler: Box::new(move |envelope: &EventEnvelope<E>| handler(&*target, envelope)),
            });
            // `sort_by_key` is stable: equal priorities keep registration order.
            entry.sort_by_key(|r| Reverse(r.priority));

            tracing::debug!(
                event_type = subscription.event_type(),
                priority = subscription.priority(),
                subscriber = core::any::type_name::<S>(),
                "registered event handler"
            );
        }
    }

    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.table.get(event_type).is_some_and(|handlers| !handlers.is_empty())
    }

    /// Priorities of the handlers for `event_type`, in dispatch order.
    pub fn priorities(&self, event_type: &str) -> Vec<i32> {
        self.table
            .get(event_type)
            .map(|handlers| handlers.iter().map(|r| r.priority).collect())
            .unwrap_or_default()
    }

    /// Run every handler registered for the envelope's event kind.
    ///
    /// Returns how many handlers ran. Unknown kinds are not an error.
    pub fn dispatch(&self, envelope: &EventEnvelope<E>) -> Result<usize, Err> {
        let event_type = envelope.event_type();
        let Some(handlers) = self.table.get(event_type) else {
            tracing::debug!(event_type, event_id = %envelope.event_id(), "no handlers registered");
            return Ok(0);
        };

        for registered in handlers {
            if let Err(err) = (registered.handler)(envelope) {
                tracing::warn!(
                    event_type,
                    event_id = %envelope.event_id(),
                    subscriber = registered.subscriber,
                    error = %err,
                    "event handler failed"
                );
                return Err(err);
            }
        }

        tracing::debug!(
            event_type,
            event_id = %envelope.event_id(),
            handlers = handlers.len(),
            "event dispatched"
        );
        Ok(handlers.len())
    }
}
