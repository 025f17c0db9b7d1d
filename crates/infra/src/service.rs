//! Option service backed by a `ProductOptionStore`.

use productopts_core::{OptionId, ProductId};
use productopts_options::{
    AddedBy, OptionProductService, OptionResult, ProductAvailableOption, ProductOptionStore,
    ProvenanceSet,
};

/// Adds/removes provenance tags; an association lives as long as it has a tag.
#[derive(Debug)]
pub struct StoreOptionProductService<S> {
    store: S,
}

impl<S> StoreOptionProductService<S>
where
    S: ProductOptionStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> OptionProductService for StoreOptionProductService<S>
where
    S: ProductOptionStore,
{
    fn set_option_on_product(
        &self,
        product_id: ProductId,
        option_id: OptionId,
        added_by: AddedBy,
    ) -> OptionResult<()> {
        let mut association = self
            .store
            .find_product_option(product_id, option_id)?
            .unwrap_or_else(|| ProductAvailableOption::new(product_id, option_id, ProvenanceSet::new()));

        if !association.add_provenance(added_by) {
            tracing::debug!(%product_id, %option_id, %added_by, "option already tagged");
            return Ok(());
        }

        self.store.save_product_option(&association)?;
        tracing::debug!(%product_id, %option_id, %added_by, "option tagged");
        Ok(())
    }

    fn delete_option_on_product(
        &self,
        option_id: OptionId,
        product_id: ProductId,
        added_by: AddedBy,
    ) -> OptionResult<()> {
        let Some(mut association) = self.store.find_product_option(product_id, option_id)? else {
            tracing::debug!(%product_id, %option_id, %added_by, "no association to untag");
            return Ok(());
        };

        if !association.remove_provenance(added_by) {
            tracing::debug!(%product_id, %option_id, %added_by, "option was not tagged");
            return Ok(());
        }

        if association.is_orphaned() {
            self.store.delete_product_option(product_id, option_id)?;
            tracing::debug!(%product_id, %option_id, %added_by, "last tag removed; association deleted");
        } else {
            self.store.save_product_option(&association)?;
            tracing::debug!(%product_id, %option_id, %added_by, "option untagged");
        }
        Ok(())
    }
}
