//! Option service contract (the collaborator that owns association writes).

use std::sync::Arc;

use productopts_core::{OptionId, ProductId};

use crate::{AddedBy, OptionResult};

/// Creates and removes provenance tags on product ↔ option associations.
///
/// Both operations must be safe to repeat: setting a tag that is already
/// present and deleting one that is absent are no-ops.
pub trait OptionProductService: Send + Sync {
    fn set_option_on_product(
        &self,
        product_id: ProductId,
        option_id: OptionId,
        added_by: AddedBy,
    ) -> OptionResult<()>;

    fn delete_option_on_product(
        &self,
        option_id: OptionId,
        product_id: ProductId,
        added_by: AddedBy,
    ) -> OptionResult<()>;
}

impl<S> OptionProductService for Arc<S>
where
    S: OptionProductService + ?Sized,
{
    fn set_option_on_product(
        &self,
        product_id: ProductId,
        option_id: OptionId,
        added_by: AddedBy,
    ) -> OptionResult<()> {
        (**self).set_option_on_product(product_id, option_id, added_by)
    }

    fn delete_option_on_product(
        &self,
        option_id: OptionId,
        product_id: ProductId,
        added_by: AddedBy,
    ) -> OptionResult<()> {
        (**self).delete_option_on_product(option_id, product_id, added_by)
    }
}
