//! Scenario replay: load catalog fixtures, push product events through the
//! dispatcher, report the resulting option associations.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use productopts_core::{CategoryId, OptionId, ProductId, TemplateId};
use productopts_events::{Event, EventDispatcher, EventEnvelope};
use productopts_infra::{
    InMemoryCatalog, InMemoryOptionStore, ListenerConfig, ProductUpdateListener,
    StoreOptionProductService,
};
use productopts_options::{
    AddedBy, CatalogQuery, Category, OptionError, OptionProductService, OptionResult, Product,
    ProductAvailableOption, ProductEvent, ProductOptionStore, Template,
};

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFixture {
    pub id: CategoryId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub options: Vec<OptionId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateFixture {
    pub id: TemplateId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub options: Vec<OptionId>,
}

/// An option attached by hand before the events are replayed.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualOption {
    pub product_id: ProductId,
    pub option_id: OptionId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,
    #[serde(default)]
    pub templates: Vec<TemplateFixture>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub manual_options: Vec<ManualOption>,
    #[serde(default)]
    pub events: Vec<ProductEvent>,
}

/// One product's catalog placement and its final associations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductReport {
    pub reference: String,
    pub categories: Vec<String>,
    pub template: Option<String>,
    pub options: Vec<ProductAvailableOption>,
}

impl ProductReport {
    fn collect(
        catalog: &InMemoryCatalog,
        store: &InMemoryOptionStore,
        product_id: ProductId,
    ) -> OptionResult<Self> {
        let options = store.product_available_options(product_id)?;
        let Some(product) = catalog.find_product(product_id)? else {
            return Ok(Self {
                options,
                ..Self::default()
            });
        };

        let mut categories = Vec::with_capacity(product.category_ids.len());
        for category_id in &product.category_ids {
            if let Some(category) = catalog.find_category(*category_id)? {
                categories.push(category.title);
            }
        }
        let template = match product.template_id {
            Some(template_id) => catalog.find_template(template_id)?.map(|t| t.name),
            None => None,
        };

        Ok(Self {
            reference: product.reference,
            categories,
            template,
            options,
        })
    }
}

/// Final state per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report(pub BTreeMap<ProductId, ProductReport>);

pub fn replay(scenario: &Scenario, config: ListenerConfig) -> anyhow::Result<Report> {
    let catalog = Arc::new(InMemoryCatalog::new());
    let store = Arc::new(InMemoryOptionStore::new());
    let service = Arc::new(StoreOptionProductService::new(store.clone()));

    for fixture in &scenario.categories {
        let category = Category {
            id: fixture.id,
            title: fixture.title.clone(),
        };
        catalog.upsert_category(category, fixture.options.iter().copied())?;
    }
    for fixture in &scenario.templates {
        let template = Template {
            id: fixture.id,
            name: fixture.name.clone(),
        };
        catalog.upsert_template(template, fixture.options.iter().copied())?;
    }
    for product in &scenario.products {
        catalog.upsert_product(product.clone())?;
    }
    for manual in &scenario.manual_options {
        service.set_option_on_product(manual.product_id, manual.option_id, AddedBy::Manual)?;
    }

    let listener = ProductUpdateListener::with_config(catalog.clone(), store.clone(), service, config);
    let mut dispatcher: EventDispatcher<ProductEvent, OptionError> = EventDispatcher::new();
    dispatcher.add_subscriber(Arc::new(listener));

    let mut products: BTreeSet<ProductId> = scenario.products.iter().map(|p| p.id).collect();
    for (index, event) in scenario.events.iter().enumerate() {
        catalog.record(event)?;
        products.insert(event.target_product_id());
        dispatcher
            .dispatch(&EventEnvelope::new(event.clone()))
            .with_context(|| format!("event #{index} ({}) failed", event.event_type()))?;
    }
    tracing::info!(events = scenario.events.len(), products = products.len(), "scenario replayed");

    let mut report = Report::default();
    for product_id in products {
        report
            .0
            .insert(product_id, ProductReport::collect(&catalog, &store, product_id)?);
    }
    Ok(report)
}
