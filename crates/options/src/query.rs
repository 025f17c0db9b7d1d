//! Read-only catalog queries and the association store.
//!
//! These traits are views over storage owned by the host platform. Sequences
//! come back in a stable order: category/template options in the order the
//! catalog lists them, product options by option id.

use std::sync::Arc;

use productopts_core::{CategoryId, DomainError, OptionId, ProductId, TemplateId};

use crate::{
    Category, CategoryAvailableOption, OptionResult, Product, ProductAvailableOption, Template,
    TemplateAvailableOption,
};

pub trait CatalogQuery: Send + Sync {
    fn find_product(&self, id: ProductId) -> OptionResult<Option<Product>>;

    fn find_category(&self, id: CategoryId) -> OptionResult<Option<Category>>;

    fn find_template(&self, id: TemplateId) -> OptionResult<Option<Template>>;

    /// Options offered by a category. Unknown categories offer nothing.
    fn category_available_options(&self, id: CategoryId)
    -> OptionResult<Vec<CategoryAvailableOption>>;

    /// Options offered by a template. Unknown templates offer nothing.
    fn template_available_options(&self, id: TemplateId)
    -> OptionResult<Vec<TemplateAvailableOption>>;

    fn require_product(&self, id: ProductId) -> OptionResult<Product> {
        self.find_product(id)?
            .ok_or_else(|| DomainError::not_found("product", id).into())
    }

    fn require_category(&self, id: CategoryId) -> OptionResult<Category> {
        self.find_category(id)?
            .ok_or_else(|| DomainError::not_found("category", id).into())
    }
}

impl<Q> CatalogQuery for Arc<Q>
where
    Q: CatalogQuery + ?Sized,
{
    fn find_product(&self, id: ProductId) -> OptionResult<Option<Product>> {
        (**self).find_product(id)
    }

    fn find_category(&self, id: CategoryId) -> OptionResult<Option<Category>> {
        (**self).find_category(id)
    }

    fn find_template(&self, id: TemplateId) -> OptionResult<Option<Template>> {
        (**self).find_template(id)
    }

    fn category_available_options(
        &self,
        id: CategoryId,
    ) -> OptionResult<Vec<CategoryAvailableOption>> {
        (**self).category_available_options(id)
    }

    fn template_available_options(
        &self,
        id: TemplateId,
    ) -> OptionResult<Vec<TemplateAvailableOption>> {
        (**self).template_available_options(id)
    }
}

/// Persistence of product ↔ option associations.
pub trait ProductOptionStore: Send + Sync {
    /// All associations of a product, ordered by option id.
    fn product_available_options(&self, product_id: ProductId)
    -> OptionResult<Vec<ProductAvailableOption>>;

    fn find_product_option(
        &self,
        product_id: ProductId,
        option_id: OptionId,
    ) -> OptionResult<Option<ProductAvailableOption>>;

    /// Insert or overwrite one association.
    fn save_product_option(&self, option: &ProductAvailableOption) -> OptionResult<()>;

    /// Returns `false` when there was nothing to delete.
    fn delete_product_option(&self, product_id: ProductId, option_id: OptionId)
    -> OptionResult<bool>;

    /// Atomically replace every association of `product_id` with `options`.
    ///
    /// Entries whose product id differs from `product_id` are rejected.
    fn replace_product_options(
        &self,
        product_id: ProductId,
        options: Vec<ProductAvailableOption>,
    ) -> OptionResult<()>;
}

impl<S> ProductOptionStore for Arc<S>
where
    S: ProductOptionStore + ?Sized,
{
    fn product_available_options(
        &self,
        product_id: ProductId,
    ) -> OptionResult<Vec<ProductAvailableOption>> {
        (**self).product_available_options(product_id)
    }

    fn find_product_option(
        &self,
        product_id: ProductId,
        option_id: OptionId,
    ) -> OptionResult<Option<ProductAvailableOption>> {
        (**self).find_product_option(product_id, option_id)
    }

    fn save_product_option(&self, option: &ProductAvailableOption) -> OptionResult<()> {
        (**self).save_product_option(option)
    }

    fn delete_product_option(
        &self,
        product_id: ProductId,
        option_id: OptionId,
    ) -> OptionResult<bool> {
        (**self).delete_product_option(product_id, option_id)
    }

    fn replace_product_options(
        &self,
        product_id: ProductId,
        options: Vec<ProductAvailableOption>,
    ) -> OptionResult<()> {
        (**self).replace_product_options(product_id, options)
    }
}
