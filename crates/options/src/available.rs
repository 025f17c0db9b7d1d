//! Option links: what categories and templates offer, and what a product carries.

use serde::{Deserialize, Serialize};

use productopts_core::{CategoryId, OptionId, ProductId, TemplateId, ValueObject};

use crate::{AddedBy, ProvenanceSet};

/// Anything that points at an option.
pub trait AvailableOption {
    fn option_id(&self) -> OptionId;
}

/// An option offered to every product of a category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryAvailableOption {
    pub category_id: CategoryId,
    pub option_id: OptionId,
}

impl ValueObject for CategoryAvailableOption {}

impl AvailableOption for CategoryAvailableOption {
    fn option_id(&self) -> OptionId {
        self.option_id
    }
}

/// An option offered to every product using a template.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateAvailableOption {
    pub template_id: TemplateId,
    pub option_id: OptionId,
}

impl ValueObject for TemplateAvailableOption {}

impl AvailableOption for TemplateAvailableOption {
    fn option_id(&self) -> OptionId {
        self.option_id
    }
}

/// A product ↔ option association and the reasons it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAvailableOption {
    product_id: ProductId,
    option_id: OptionId,
    added_by: ProvenanceSet,
}

impl ProductAvailableOption {
    pub fn new(product_id: ProductId, option_id: OptionId, added_by: ProvenanceSet) -> Self {
        Self {
            product_id,
            option_id,
            added_by,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn added_by(&self) -> &ProvenanceSet {
        &self.added_by
    }

    pub fn has_provenance(&self, tag: AddedBy) -> bool {
        self.added_by.contains(tag)
    }

    /// Returns `false` when the tag was already recorded.
    pub fn add_provenance(&mut self, tag: AddedBy) -> bool {
        self.added_by.insert(tag)
    }

    /// Returns `false` when the tag was not recorded.
    pub fn remove_provenance(&mut self, tag: AddedBy) -> bool {
        self.added_by.remove(tag)
    }

    /// An association with no remaining reason to exist.
    pub fn is_orphaned(&self) -> bool {
        self.added_by.is_empty()
    }

    /// The same association, re-keyed to another product (cloning).
    pub fn reassigned_to(&self, product_id: ProductId) -> Self {
        Self {
            product_id,
            option_id: self.option_id,
            added_by: self.added_by.clone(),
        }
    }
}

impl AvailableOption for ProductAvailableOption {
    fn option_id(&self) -> OptionId {
        self.option_id
    }
}
