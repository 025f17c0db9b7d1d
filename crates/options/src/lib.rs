//! Product options domain module.
//!
//! Options reach a product from three sources: added by hand, inherited from
//! one of the product's categories, or inherited from the product's template.
//! Each association remembers its sources as a set of provenance tags. This
//! crate holds the types, events and collaborator contracts; storage and the
//! event listener live in `productopts-infra`.

pub mod available;
pub mod catalog;
pub mod error;
pub mod event;
pub mod provenance;
pub mod query;
pub mod service;

pub use available::{
    AvailableOption, CategoryAvailableOption, ProductAvailableOption, TemplateAvailableOption,
};
pub use catalog::{Category, Product, Template};
pub use error::{OptionError, OptionResult};
pub use event::{
    ProductCategoryAdded, ProductCategoryRemoved, ProductCloned, ProductEvent, ProductTemplateSet,
    kinds,
};
pub use provenance::{AddedBy, ProvenanceSet};
pub use query::{CatalogQuery, ProductOptionStore};
pub use service::OptionProductService;
