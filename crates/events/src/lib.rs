//! Event mechanics: event contract, envelopes, subscriptions and synchronous dispatch.
//!
//! Nothing here knows about products or options; domain crates define their
//! event enums and listeners on top of these building blocks.

pub mod dispatcher;
pub mod envelope;
pub mod event;
pub mod subscriber;

pub use dispatcher::EventDispatcher;
pub use envelope::EventEnvelope;
pub use event::Event;
pub use subscriber::{EventSubscriber, Handler, Subscription};
