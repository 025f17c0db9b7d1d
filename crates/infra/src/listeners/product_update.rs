//! Keeps category- and template-inherited options in sync with product changes.
//!
//! Four product events are handled:
//!
//! - category added → tag the category's options with `Category`
//! - category removed → untag the options no remaining category offers
//! - template set → drop every `Template` tag, then tag the new template's options
//! - product cloned → copy every association onto the clone in one save
//!
//! The listener owns no state. Lookups and writes go through the injected
//! catalog query, option store and option service, and their errors are
//! returned to the dispatcher untouched.

use std::collections::HashSet;

use productopts_core::{Entity, OptionId};
use productopts_events::{EventEnvelope, EventSubscriber, Subscription};
use productopts_options::{
    AddedBy, AvailableOption, CatalogQuery, OptionError, OptionProductService, OptionResult,
    ProductEvent, ProductOptionStore, kinds,
};

use crate::ListenerConfig;

#[derive(Debug)]
pub struct ProductUpdateListener<C, P, S> {
    catalog: C,
    options: P,
    service: S,
    priority: i32,
}

impl<C, P, S> ProductUpdateListener<C, P, S>
where
    C: CatalogQuery,
    P: ProductOptionStore,
    S: OptionProductService,
{
    pub fn new(catalog: C, options: P, service: S) -> Self {
        Self::with_config(catalog, options, service, ListenerConfig::default())
    }

    pub fn with_config(catalog: C, options: P, service: S, config: ListenerConfig) -> Self {
        Self {
            catalog,
            options,
            service,
            priority: config.priority,
        }
    }

    pub fn on_category_added(&self, envelope: &EventEnvelope<ProductEvent>) -> OptionResult<()> {
        let ProductEvent::CategoryAdded(event) = envelope.payload() else {
            return Ok(());
        };

        let product = self.catalog.require_product(event.product_id)?;
        let category = self.catalog.require_category(event.category_id)?;
        let offered = self.catalog.category_available_options(*category.id())?;

        for option in &offered {
            self.service
                .set_option_on_product(*product.id(), option.option_id(), AddedBy::Category)?;
        }

        tracing::info!(
            event_id = %envelope.event_id(),
            product_id = %product.id(),
            category_id = %category.id(),
            options = offered.len(),
            "category options attached"
        );
        Ok(())
    }

    pub fn on_category_removed(&self, envelope: &EventEnvelope<ProductEvent>) -> OptionResult<()> {
        let ProductEvent::CategoryRemoved(event) = envelope.payload() else {
            return Ok(());
        };

        let removed = self.catalog.require_category(event.category_id)?;
        let product = self.catalog.require_product(event.product_id)?;
        let remaining = product.remaining_categories(*removed.id());

        let still_offered: HashSet<OptionId> = if remaining.is_empty() {
            tracing::debug!(
                product_id = %product.id(),
                "no remaining categories; every option of the removed category is dropped"
            );
            HashSet::new()
        } else {
            let mut offered = HashSet::new();
            for category_id in &remaining {
                offered.extend(
                    self.catalog
                        .category_available_options(*category_id)?
                        .iter()
                        .map(AvailableOption::option_id),
                );
            }
            offered
        };

        let mut dropped = HashSet::new();
        let mut kept = 0usize;
        for option in self.catalog.category_available_options(*removed.id())? {
            let option_id = option.option_id();
            if still_offered.contains(&option_id) {
                tracing::debug!(
                    product_id = %product.id(),
                    %option_id,
                    "option still offered by a remaining category"
                );
                kept += 1;
                continue;
            }
            if !dropped.insert(option_id) {
                continue;
            }
            self.service
                .delete_option_on_product(option_id, *product.id(), AddedBy::Category)?;
        }

        tracing::info!(
            event_id = %envelope.event_id(),
            product_id = %product.id(),
            category_id = %removed.id(),
            remaining_categories = remaining.len(),
            dropped = dropped.len(),
            kept,
            "category options detached"
        );
        Ok(())
    }

    pub fn on_template_set(&self, envelope: &EventEnvelope<ProductEvent>) -> OptionResult<()> {
        let ProductEvent::TemplateSet(event) = envelope.payload() else {
            return Ok(());
        };

        let product = self.catalog.require_product(event.product_id)?;

        let mut cleared = 0usize;
        for association in self.options.product_available_options(*product.id())? {
            if association.has_provenance(AddedBy::Template) {
                self.service.delete_option_on_product(
                    association.option_id(),
                    *product.id(),
                    AddedBy::Template,
                )?;
                cleared += 1;
            }
        }

        let template = match event.template_id {
            Some(template_id) => self.catalog.find_template(template_id)?,
            None => None,
        };
        let Some(template) = template else {
            tracing::info!(
                event_id = %envelope.event_id(),
                product_id = %product.id(),
                cleared,
                "template options cleared; no template to apply"
            );
            return Ok(());
        };

        let offered = self.catalog.template_available_options(*template.id())?;
        for option in &offered {
            self.service
                .set_option_on_product(*product.id(), option.option_id(), AddedBy::Template)?;
        }

        tracing::info!(
            event_id = %envelope.event_id(),
            product_id = %product.id(),
            template_id = %template.id(),
            cleared,
            added = offered.len(),
            "template options applied"
        );
        Ok(())
    }

    pub fn on_product_cloned(&self, envelope: &EventEnvelope<ProductEvent>) -> OptionResult<()> {
        let ProductEvent::Cloned(event) = envelope.payload() else {
            return Ok(());
        };

        let originals = self
            .options
            .product_available_options(event.original_product_id)?;
        if originals.is_empty() {
            tracing::debug!(
                original_product_id = %event.original_product_id,
                "source product has no options; nothing to copy"
            );
            return Ok(());
        }

        let clone = self.catalog.require_product(event.cloned_product_id)?;
        let copies: Vec<_> = originals
            .iter()
            .map(|association| association.reassigned_to(*clone.id()))
            .collect();
        let copied = copies.len();
        self.options.replace_product_options(*clone.id(), copies)?;

        tracing::info!(
            event_id = %envelope.event_id(),
            original_product_id = %event.original_product_id,
            cloned_product_id = %clone.id(),
            copied,
            "product options copied to clone"
        );
        Ok(())
    }
}

impl<C, P, S> EventSubscriber<ProductEvent> for ProductUpdateListener<C, P, S>
where
    C: CatalogQuery + 'static,
    P: ProductOptionStore + 'static,
    S: OptionProductService + 'static,
{
    type Error = OptionError;

    fn subscribed_events(&self) -> Vec<Subscription<Self, ProductEvent, OptionError>> {
        vec![
            Subscription::new(kinds::PRODUCT_ADD_CATEGORY, Self::on_category_added, self.priority),
            Subscription::new(kinds::PRODUCT_SET_TEMPLATE, Self::on_template_set, self.priority),
            Subscription::new(kinds::PRODUCT_REMOVE_CATEGORY, Self::on_category_removed, self.priority),
            Subscription::new(kinds::PRODUCT_CLONE, Self::on_product_cloned, self.priority),
        ]
    }
}
