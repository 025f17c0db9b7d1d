//! Infrastructure layer: in-memory stores, the store-backed option service,
//! the product update listener and its configuration.

pub mod config;
pub mod listeners;
pub mod service;
pub mod store;

pub use config::ListenerConfig;
pub use listeners::ProductUpdateListener;
pub use service::StoreOptionProductService;
pub use store::{InMemoryCatalog, InMemoryOptionStore};

#[cfg(test)]
mod integration_tests;
