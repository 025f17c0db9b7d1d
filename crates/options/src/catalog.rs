//! Read views of the host catalog entities the listener traverses.

use serde::{Deserialize, Serialize};

use productopts_core::{CategoryId, Entity, ProductId, TemplateId};

/// A product as seen by the options module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    #[serde(default)]
    pub template_id: Option<TemplateId>,
}

impl Product {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            reference: String::new(),
            category_ids: Vec::new(),
            template_id: None,
        }
    }

    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = category_ids.into_iter().collect();
        self
    }

    pub fn with_template(mut self, template_id: TemplateId) -> Self {
        self.template_id = Some(template_id);
        self
    }

    /// The product's categories other than `removed`.
    ///
    /// Works whether or not the host has already detached `removed`.
    pub fn remaining_categories(&self, removed: CategoryId) -> Vec<CategoryId> {
        self.category_ids
            .iter()
            .copied()
            .filter(|id| *id != removed)
            .collect()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub title: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    #[serde(default)]
    pub name: String,
}

impl Entity for Template {
    type Id = TemplateId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
