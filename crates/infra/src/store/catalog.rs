use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use productopts_core::{CategoryId, Entity, OptionId, ProductId, TemplateId};
use productopts_options::{
    CatalogQuery, Category, CategoryAvailableOption, OptionResult, Product, ProductEvent, Template,
    TemplateAvailableOption,
};

use super::poisoned;

#[derive(Debug, Default)]
struct CatalogState {
    products: HashMap<ProductId, Product>,
    categories: HashMap<CategoryId, Category>,
    templates: HashMap<TemplateId, Template>,
    category_options: HashMap<CategoryId, Vec<CategoryAvailableOption>>,
    template_options: HashMap<TemplateId, Vec<TemplateAvailableOption>>,
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> OptionResult<RwLockReadGuard<'_, CatalogState>> {
        self.inner.read().map_err(|_| poisoned("catalog"))
    }

    fn write(&self) -> OptionResult<RwLockWriteGuard<'_, CatalogState>> {
        self.inner.write().map_err(|_| poisoned("catalog"))
    }

    pub fn upsert_product(&self, product: Product) -> OptionResult<()> {
        self.write()?.products.insert(*product.id(), product);
        Ok(())
    }

    /// Insert a category together with the options it offers, in order.
    pub fn upsert_category(
        &self,
        category: Category,
        options: impl IntoIterator<Item = OptionId>,
    ) -> OptionResult<()> {
        let category_id = *category.id();
        let options = options
            .into_iter()
            .map(|option_id| CategoryAvailableOption {
                category_id,
                option_id,
            })
            .collect();

        let mut state = self.write()?;
        state.categories.insert(category_id, category);
        state.category_options.insert(category_id, options);
        Ok(())
    }

    /// Insert a template together with the options it offers, in order.
    pub fn upsert_template(
        &self,
        template: Template,
        options: impl IntoIterator<Item = OptionId>,
    ) -> OptionResult<()> {
        let template_id = *template.id();
        let options = options
            .into_iter()
            .map(|option_id| TemplateAvailableOption {
                template_id,
                option_id,
            })
            .collect();

        let mut state = self.write()?;
        state.templates.insert(template_id, template);
        state.template_options.insert(template_id, options);
        Ok(())
    }

    /// Apply the catalog side of a product event, as the host does before dispatching it.
    ///
    /// Category removal is left to the listener's "remaining categories"
    /// computation either way, so both orders are safe.
    pub fn record(&self, event: &ProductEvent) -> OptionResult<()> {
        let mut state = self.write()?;
        match event {
            ProductEvent::CategoryAdded(e) => {
                if let Some(product) = state.products.get_mut(&e.product_id) {
                    if !product.category_ids.contains(&e.category_id) {
                        product.category_ids.push(e.category_id);
                    }
                }
            }
            ProductEvent::CategoryRemoved(e) => {
                if let Some(product) = state.products.get_mut(&e.product_id) {
                    product.category_ids.retain(|id| *id != e.category_id);
                }
            }
            ProductEvent::TemplateSet(e) => {
                if let Some(product) = state.products.get_mut(&e.product_id) {
                    product.template_id = e.template_id;
                }
            }
            ProductEvent::Cloned(e) => {
                if state.products.contains_key(&e.cloned_product_id) {
                    return Ok(());
                }
                let clone = state.products.get(&e.original_product_id).map(|original| Product {
                    id: e.cloned_product_id,
                    ..original.clone()
                });
                if let Some(clone) = clone {
                    state.products.insert(*clone.id(), clone);
                }
            }
        }
        Ok(())
    }
}

impl CatalogQuery for InMemoryCatalog {
    fn find_product(&self, id: ProductId) -> OptionResult<Option<Product>> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    fn find_category(&self, id: CategoryId) -> OptionResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    fn find_template(&self, id: TemplateId) -> OptionResult<Option<Template>> {
        Ok(self.read()?.templates.get(&id).cloned())
    }

    fn category_available_options(
        &self,
        id: CategoryId,
    ) -> OptionResult<Vec<CategoryAvailableOption>> {
        Ok(self
            .read()?
            .category_options
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    fn template_available_options(
        &self,
        id: TemplateId,
    ) -> OptionResult<Vec<TemplateAvailableOption>> {
        Ok(self
            .read()?
            .template_options
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }
}
