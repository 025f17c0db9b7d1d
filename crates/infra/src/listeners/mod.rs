//! Event listeners wired into the product event dispatcher.

pub mod product_update;

pub use product_update::ProductUpdateListener;
