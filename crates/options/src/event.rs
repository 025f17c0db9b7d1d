use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use productopts_core::{CategoryId, ProductId, TemplateId};
use productopts_events::Event;

/// Routing tags of the product events this module reacts to.
pub mod kinds {
    pub const PRODUCT_ADD_CATEGORY: &str = "products.product.category_added";
    pub const PRODUCT_REMOVE_CATEGORY: &str = "products.product.category_removed";
    pub const PRODUCT_SET_TEMPLATE: &str = "products.product.template_set";
    pub const PRODUCT_CLONE: &str = "products.product.cloned";
}

/// Event: a category was attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategoryAdded {
    pub product_id: ProductId,
    pub category_id: CategoryId,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
}

/// Event: a category was detached from a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategoryRemoved {
    pub product_id: ProductId,
    pub category_id: CategoryId,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
}

/// Event: a product's template was set (or cleared with `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTemplateSet {
    pub product_id: ProductId,
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
}

/// Event: a product was cloned into a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCloned {
    pub original_product_id: ProductId,
    pub cloned_product_id: ProductId,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    CategoryAdded(ProductCategoryAdded),
    CategoryRemoved(ProductCategoryRemoved),
    TemplateSet(ProductTemplateSet),
    Cloned(ProductCloned),
}

impl ProductEvent {
    /// The product whose options the event changes.
    pub fn target_product_id(&self) -> ProductId {
        match self {
            ProductEvent::CategoryAdded(e) => e.product_id,
            ProductEvent::CategoryRemoved(e) => e.product_id,
            ProductEvent::TemplateSet(e) => e.product_id,
            ProductEvent::Cloned(e) => e.cloned_product_id,
        }
    }
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::CategoryAdded(_) => kinds::PRODUCT_ADD_CATEGORY,
            ProductEvent::CategoryRemoved(_) => kinds::PRODUCT_REMOVE_CATEGORY,
            ProductEvent::TemplateSet(_) => kinds::PRODUCT_SET_TEMPLATE,
            ProductEvent::Cloned(_) => kinds::PRODUCT_CLONE,
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::CategoryAdded(e) => e.occurred_at,
            ProductEvent::CategoryRemoved(e) => e.occurred_at,
            ProductEvent::TemplateSet(e) => e.occurred_at,
            ProductEvent::Cloned(e) => e.occurred_at,
        }
    }
}
