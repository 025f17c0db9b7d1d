//! End-to-end tests: ProductEvent → EventDispatcher → ProductUpdateListener → option store.
//!
//! Verifies:
//! - category/template provenance is added and removed per event
//! - an option keeps a tag while any other source still justifies it
//! - clone copies associations in one save, or not at all
//! - collaborator errors reach the dispatch caller unchanged

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use productopts_core::{CategoryId, DomainError, OptionId, ProductId, TemplateId};
    use productopts_events::{EventDispatcher, EventEnvelope};
    use productopts_options::{
        AddedBy, CatalogQuery, Category, OptionError, OptionProductService, OptionResult, Product,
        ProductAvailableOption, ProductCategoryAdded, ProductCategoryRemoved, ProductCloned,
        ProductEvent, ProductOptionStore, ProductTemplateSet, ProvenanceSet, Template, kinds,
    };

    use crate::{
        InMemoryCatalog, InMemoryOptionStore, ListenerConfig, ProductUpdateListener,
        StoreOptionProductService,
    };

    const P: ProductId = ProductId::from_u128(1);

    fn option(n: u128) -> OptionId {
        OptionId::from_u128(n)
    }

    fn category(n: u128) -> CategoryId {
        CategoryId::from_u128(n)
    }

    fn template(n: u128) -> TemplateId {
        TemplateId::from_u128(n)
    }

    fn tags(list: &[AddedBy]) -> ProvenanceSet {
        list.iter().copied().collect()
    }

    struct Harness {
        catalog: Arc<InMemoryCatalog>,
        store: Arc<InMemoryOptionStore>,
        dispatcher: EventDispatcher<ProductEvent, OptionError>,
    }

    impl Harness {
        fn new() -> Self {
            let catalog = Arc::new(InMemoryCatalog::new());
            let store = Arc::new(InMemoryOptionStore::new());
            let service = StoreOptionProductService::new(store.clone());
            let listener = ProductUpdateListener::new(catalog.clone(), store.clone(), service);

            let mut dispatcher = EventDispatcher::new();
            dispatcher.add_subscriber(Arc::new(listener));

            catalog.upsert_product(Product::new(P)).unwrap();
            Self {
                catalog,
                store,
                dispatcher,
            }
        }

        fn category(&self, id: u128, options: &[u128]) {
            self.catalog
                .upsert_category(
                    Category {
                        id: category(id),
                        title: format!("category {id}"),
                    },
                    options.iter().copied().map(option),
                )
                .unwrap();
        }

        fn template(&self, id: u128, options: &[u128]) {
            self.catalog
                .upsert_template(
                    Template {
                        id: template(id),
                        name: format!("template {id}"),
                    },
                    options.iter().copied().map(option),
                )
                .unwrap();
        }

        /// Host behavior: update the catalog, then dispatch.
        fn emit(&self, event: ProductEvent) -> OptionResult<usize> {
            self.catalog.record(&event)?;
            self.dispatcher.dispatch(&EventEnvelope::new(event))
        }

        fn add_category(&self, id: u128) {
            self.emit(ProductEvent::CategoryAdded(ProductCategoryAdded {
                product_id: P,
                category_id: category(id),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        }

        fn remove_category(&self, id: u128) {
            self.emit(ProductEvent::CategoryRemoved(ProductCategoryRemoved {
                product_id: P,
                category_id: category(id),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        }

        fn set_template(&self, id: Option<u128>) {
            self.emit(ProductEvent::TemplateSet(ProductTemplateSet {
                product_id: P,
                template_id: id.map(template),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        }

        fn tags_of(&self, product_id: ProductId, n: u128) -> Option<ProvenanceSet> {
            self.store
                .find_product_option(product_id, option(n))
                .unwrap()
                .map(|a| a.added_by().clone())
        }

        fn service(&self) -> StoreOptionProductService<Arc<InMemoryOptionStore>> {
            StoreOptionProductService::new(self.store.clone())
        }
    }

    #[test]
    fn listener_subscribes_to_four_product_events_at_priority_50() {
        let harness = Harness::new();
        for kind in [
            kinds::PRODUCT_ADD_CATEGORY,
            kinds::PRODUCT_REMOVE_CATEGORY,
            kinds::PRODUCT_SET_TEMPLATE,
            kinds::PRODUCT_CLONE,
        ] {
            assert_eq!(harness.dispatcher.priorities(kind), vec![50], "{kind}");
        }
    }

    #[test]
    fn configured_priority_is_used_for_every_subscription() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let store = Arc::new(InMemoryOptionStore::new());
        let listener = ProductUpdateListener::with_config(
            catalog,
            store.clone(),
            StoreOptionProductService::new(store),
            ListenerConfig { priority: -5 },
        );
        let mut dispatcher: EventDispatcher<ProductEvent, OptionError> = EventDispatcher::new();
        dispatcher.add_subscriber(Arc::new(listener));

        assert_eq!(dispatcher.priorities(kinds::PRODUCT_CLONE), vec![-5]);
    }

    #[test]
    fn adding_a_category_tags_each_of_its_options_idempotently() {
        let harness = Harness::new();
        harness.category(1, &[10, 11]);

        harness.add_category(1);
        harness.add_category(1);

        let category_only = Some(tags(&[AddedBy::Category]));
        assert_eq!(harness.tags_of(P, 10), category_only);
        assert_eq!(harness.tags_of(P, 11), category_only);
        assert_eq!(harness.store.len().unwrap(), 2);
    }

    #[test]
    fn shared_option_survives_until_its_last_category_goes() {
        let harness = Harness::new();
        harness.category(1, &[10, 11]);
        harness.category(2, &[11, 12]);
        harness.add_category(1);
        harness.add_category(2);

        harness.remove_category(1);
        assert_eq!(harness.tags_of(P, 10), None);
        assert_eq!(harness.tags_of(P, 11), Some(tags(&[AddedBy::Category])));
        assert_eq!(harness.tags_of(P, 12), Some(tags(&[AddedBy::Category])));

        harness.remove_category(2);
        assert_eq!(harness.tags_of(P, 11), None);
        assert_eq!(harness.tags_of(P, 12), None);
    }

    #[test]
    fn every_remaining_category_counts_not_only_the_first() {
        let harness = Harness::new();
        harness.category(1, &[10]);
        harness.category(2, &[20]);
        harness.category(3, &[10, 20]);
        harness.add_category(1);
        harness.add_category(2);
        harness.add_category(3);

        harness.remove_category(3);

        assert_eq!(harness.tags_of(P, 10), Some(tags(&[AddedBy::Category])));
        assert_eq!(harness.tags_of(P, 20), Some(tags(&[AddedBy::Category])));
    }

    #[test]
    fn removing_the_last_category_keeps_other_provenance() {
        let harness = Harness::new();
        harness.category(1, &[10, 11]);
        harness.add_category(1);
        harness.service().set_option_on_product(P, option(11), AddedBy::Manual).unwrap();

        harness.remove_category(1);

        assert!(harness.catalog.find_product(P).unwrap().unwrap().category_ids.is_empty());
        assert_eq!(harness.tags_of(P, 10), None);
        assert_eq!(harness.tags_of(P, 11), Some(tags(&[AddedBy::Manual])));
    }

    #[test]
    fn removal_works_before_the_host_detaches_the_category() {
        let harness = Harness::new();
        harness.category(1, &[10, 11]);
        harness.category(2, &[11]);
        harness.add_category(1);
        harness.add_category(2);

        // Dispatch without updating the catalog first.
        harness
            .dispatcher
            .dispatch(&EventEnvelope::new(ProductEvent::CategoryRemoved(
                ProductCategoryRemoved {
                    product_id: P,
                    category_id: category(1),
                    occurred_at: Utc::now(),
                },
            )))
            .unwrap();

        assert_eq!(harness.tags_of(P, 10), None);
        assert_eq!(harness.tags_of(P, 11), Some(tags(&[AddedBy::Category])));
    }

    #[test]
    fn setting_a_template_replaces_template_provenance() {
        let harness = Harness::new();
        harness.template(1, &[10, 11]);
        harness.template(2, &[11, 12]);

        harness.set_template(Some(1));
        harness.set_template(Some(2));

        assert_eq!(harness.tags_of(P, 10), None);
        assert_eq!(harness.tags_of(P, 11), Some(tags(&[AddedBy::Template])));
        assert_eq!(harness.tags_of(P, 12), Some(tags(&[AddedBy::Template])));
    }

    #[test]
    fn unknown_or_missing_template_clears_without_adding() {
        let harness = Harness::new();
        harness.template(1, &[10, 11]);
        harness.set_template(Some(1));
        harness.service().set_option_on_product(P, option(11), AddedBy::Manual).unwrap();

        harness.set_template(Some(99));
        assert_eq!(harness.tags_of(P, 10), None);
        assert_eq!(harness.tags_of(P, 11), Some(tags(&[AddedBy::Manual])));

        harness.set_template(Some(1));
        harness.set_template(None);
        assert_eq!(harness.tags_of(P, 10), None);
        assert_eq!(harness.tags_of(P, 11), Some(tags(&[AddedBy::Manual])));
    }

    #[test]
    fn category_and_template_provenance_combine() {
        let harness = Harness::new();
        harness.category(1, &[1, 2]);
        harness.template(1, &[2, 3]);
        harness.add_category(1);

        harness.set_template(Some(1));

        let options = harness.store.product_available_options(P).unwrap();
        let expected = vec![
            ProductAvailableOption::new(P, option(1), tags(&[AddedBy::Category])),
            ProductAvailableOption::new(P, option(2), tags(&[AddedBy::Category, AddedBy::Template])),
            ProductAvailableOption::new(P, option(3), tags(&[AddedBy::Template])),
        ];
        assert_eq!(options, expected);
    }

    #[test]
    fn cloning_copies_every_association_with_its_tags() {
        let harness = Harness::new();
        harness.category(1, &[1, 2]);
        harness.template(1, &[2, 3]);
        harness.add_category(1);
        harness.set_template(Some(1));

        let clone = ProductId::from_u128(2);
        harness
            .emit(ProductEvent::Cloned(ProductCloned {
                original_product_id: P,
                cloned_product_id: clone,
                occurred_at: Utc::now(),
            }))
            .unwrap();

        let originals = harness.store.product_available_options(P).unwrap();
        let copies = harness.store.product_available_options(clone).unwrap();
        let rekeyed: Vec<_> = originals.iter().map(|a| a.reassigned_to(clone)).collect();
        assert_eq!(copies, rekeyed);
        assert_eq!(originals.len(), 3);
    }

    /// Wraps the in-memory store and counts clone saves.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryOptionStore,
        replaces: AtomicUsize,
    }

    impl ProductOptionStore for CountingStore {
        fn product_available_options(
            &self,
            product_id: ProductId,
        ) -> OptionResult<Vec<ProductAvailableOption>> {
            self.inner.product_available_options(product_id)
        }

        fn find_product_option(
            &self,
            product_id: ProductId,
            option_id: OptionId,
        ) -> OptionResult<Option<ProductAvailableOption>> {
            self.inner.find_product_option(product_id, option_id)
        }

        fn save_product_option(&self, option: &ProductAvailableOption) -> OptionResult<()> {
            self.inner.save_product_option(option)
        }

        fn delete_product_option(
            &self,
            product_id: ProductId,
            option_id: OptionId,
        ) -> OptionResult<bool> {
            self.inner.delete_product_option(product_id, option_id)
        }

        fn replace_product_options(
            &self,
            product_id: ProductId,
            options: Vec<ProductAvailableOption>,
        ) -> OptionResult<()> {
            self.replaces.fetch_add(1, Ordering::SeqCst);
            self.inner.replace_product_options(product_id, options)
        }
    }

    #[test]
    fn cloning_a_product_without_options_saves_nothing() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let store = Arc::new(CountingStore::default());
        let listener = ProductUpdateListener::new(
            catalog.clone(),
            store.clone(),
            StoreOptionProductService::new(store.clone()),
        );
        let mut dispatcher: EventDispatcher<ProductEvent, OptionError> = EventDispatcher::new();
        dispatcher.add_subscriber(Arc::new(listener));

        let clone = ProductId::from_u128(2);
        catalog.upsert_product(Product::new(P)).unwrap();
        catalog.upsert_product(Product::new(clone)).unwrap();

        let ran = dispatcher
            .dispatch(&EventEnvelope::new(ProductEvent::Cloned(ProductCloned {
                original_product_id: P,
                cloned_product_id: clone,
                occurred_at: Utc::now(),
            })))
            .unwrap();

        assert_eq!(ran, 1);
        assert_eq!(store.replaces.load(Ordering::SeqCst), 0);
        assert!(store.product_available_options(clone).unwrap().is_empty());
    }

    #[test]
    fn unknown_category_is_reported_and_nothing_is_written() {
        let harness = Harness::new();

        let err = harness
            .emit(ProductEvent::CategoryAdded(ProductCategoryAdded {
                product_id: P,
                category_id: category(404),
                occurred_at: Utc::now(),
            }))
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(harness.store.is_empty().unwrap());
    }

    #[test]
    fn unknown_product_is_reported() {
        let harness = Harness::new();
        harness.category(1, &[10]);

        let err = harness
            .dispatcher
            .dispatch(&EventEnvelope::new(ProductEvent::CategoryAdded(
                ProductCategoryAdded {
                    product_id: ProductId::from_u128(404),
                    category_id: category(1),
                    occurred_at: Utc::now(),
                },
            )))
            .unwrap_err();

        match err {
            OptionError::Domain(DomainError::NotFound { entity, .. }) => assert_eq!(entity, "product"),
            other => panic!("expected product not found, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_provenance_propagates_from_template_handler() {
        let harness = Harness::new();
        harness.template(1, &[10]);
        harness.store.put_raw(P, option(10), "not json");

        let err = harness
            .emit(ProductEvent::TemplateSet(ProductTemplateSet {
                product_id: P,
                template_id: Some(template(1)),
                occurred_at: Utc::now(),
            }))
            .unwrap_err();

        assert!(matches!(err, OptionError::Serialization(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: after a removal, an option keeps `Category` provenance
            /// iff some remaining category still offers it.
            #[test]
            fn category_tag_tracks_remaining_categories(
                offers in prop::collection::vec(prop::collection::btree_set(0u128..8, 0..6), 1..5),
                removed in any::<prop::sample::Index>(),
            ) {
                let harness = Harness::new();
                for (i, options) in offers.iter().enumerate() {
                    let options: Vec<u128> = options.iter().copied().collect();
                    harness.category(i as u128, &options);
                    harness.add_category(i as u128);
                }

                let removed = removed.index(offers.len());
                harness.remove_category(removed as u128);

                for n in 0u128..8 {
                    let offered_elsewhere = offers
                        .iter()
                        .enumerate()
                        .any(|(i, options)| i != removed && options.contains(&n));
                    let tagged = harness
                        .tags_of(P, n)
                        .is_some_and(|t| t.contains(AddedBy::Category));
                    prop_assert_eq!(tagged, offered_elsewhere, "option {}", n);
                }
            }
        }
    }
}
