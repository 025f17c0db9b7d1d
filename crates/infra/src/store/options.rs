use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use productopts_core::{DomainError, OptionId, ProductId};
use productopts_options::{
    AvailableOption, OptionResult, ProductAvailableOption, ProductOptionStore, ProvenanceSet,
};

use super::poisoned;

type Key = (ProductId, OptionId);

/// In-memory association table for tests/dev.
///
/// Rows keep `added_by` JSON-encoded, the way the host table stores it, so
/// every read decodes and every write encodes.
#[derive(Debug, Default)]
pub struct InMemoryOptionStore {
    rows: RwLock<BTreeMap<Key, String>>,
}

impl InMemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> OptionResult<RwLockReadGuard<'_, BTreeMap<Key, String>>> {
        self.rows.read().map_err(|_| poisoned("option store"))
    }

    fn write(&self) -> OptionResult<RwLockWriteGuard<'_, BTreeMap<Key, String>>> {
        self.rows.write().map_err(|_| poisoned("option store"))
    }

    fn product_range(product_id: ProductId) -> std::ops::RangeInclusive<Key> {
        (product_id, OptionId::from_u128(0))..=(product_id, OptionId::from_u128(u128::MAX))
    }

    /// Number of associations across all products.
    pub fn len(&self) -> OptionResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> OptionResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Store a raw `added_by` value, bypassing encoding.
    #[cfg(test)]
    pub(crate) fn put_raw(&self, product_id: ProductId, option_id: OptionId, raw: &str) {
        self.rows
            .write()
            .unwrap()
            .insert((product_id, option_id), raw.to_string());
    }
}

impl ProductOptionStore for InMemoryOptionStore {
    fn product_available_options(
        &self,
        product_id: ProductId,
    ) -> OptionResult<Vec<ProductAvailableOption>> {
        let rows = self.read()?;
        rows.range(Self::product_range(product_id))
            .map(|((product_id, option_id), raw)| -> OptionResult<ProductAvailableOption> {
                Ok(ProductAvailableOption::new(
                    *product_id,
                    *option_id,
                    ProvenanceSet::from_json(raw)?,
                ))
            })
            .collect()
    }

    fn find_product_option(
        &self,
        product_id: ProductId,
        option_id: OptionId,
    ) -> OptionResult<Option<ProductAvailableOption>> {
        let rows = self.read()?;
        rows.get(&(product_id, option_id))
            .map(|raw| -> OptionResult<ProductAvailableOption> {
                Ok(ProductAvailableOption::new(
                    product_id,
                    option_id,
                    ProvenanceSet::from_json(raw)?,
                ))
            })
            .transpose()
    }

    fn save_product_option(&self, option: &ProductAvailableOption) -> OptionResult<()> {
        let raw = option.added_by().to_json()?;
        self.write()?
            .insert((option.product_id(), option.option_id()), raw);
        Ok(())
    }

    fn delete_product_option(
        &self,
        product_id: ProductId,
        option_id: OptionId,
    ) -> OptionResult<bool> {
        Ok(self.write()?.remove(&(product_id, option_id)).is_some())
    }

    fn replace_product_options(
        &self,
        product_id: ProductId,
        options: Vec<ProductAvailableOption>,
    ) -> OptionResult<()> {
        // Encode everything up front so a failure leaves the table untouched.
        let mut encoded = Vec::with_capacity(options.len());
        for option in &options {
            if option.product_id() != product_id {
                return Err(DomainError::validation(format!(
                    "association for product {} cannot be saved on product {product_id}",
                    option.product_id()
                ))
                .into());
            }
            encoded.push(((product_id, option.option_id()), option.added_by().to_json()?));
        }

        let mut rows = self.write()?;
        let stale: Vec<Key> = rows
            .range(Self::product_range(product_id))
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            rows.remove(&key);
        }
        rows.extend(encoded);
        Ok(())
    }
}
