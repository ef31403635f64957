//! Integration tests for the product lifecycle.
//!
//! Tests: ProductService → InMemoryProductRepository
//!
//! Verifies:
//! - Created products are readable by id and listed
//! - Mutations are refused for unknown ids
//! - Full update and stock update only touch their own fields
//! - Category filtering is exactly a subset of the full listing

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use catalog_core::ProductId;
    use catalog_products::{
        Category, ProductInput, ProductRepository, ProductService, ServiceError, StockInput,
    };

    use crate::repository::InMemoryProductRepository;

    fn setup() -> ProductService<Arc<dyn ProductRepository>> {
        let repo: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());
        ProductService::new(repo)
    }

    fn keyboard() -> ProductInput {
        ProductInput {
            name: Some("Teclado Mecánico".to_string()),
            description: Some("Teclado con switches Cherry MX Red".to_string()),
            price: Some(Decimal::new(15099, 2)),
            stock: Some(50),
            category: Some(Category::Electronica),
        }
    }

    fn input(name: &str, category: Category) -> ProductInput {
        ProductInput {
            name: Some(name.to_string()),
            description: None,
            price: Some(Decimal::new(1999, 2)),
            stock: Some(7),
            category: Some(category),
        }
    }

    #[tokio::test]
    async fn create_then_get_by_id_returns_the_same_product() {
        let service = setup();

        let created = service.create(keyboard()).await.unwrap();
        let fetched = service.get_by_id(created.id_typed()).await.unwrap();

        assert_eq!(fetched, Some(created.clone()));
        assert_eq!(created.name(), "Teclado Mecánico");
        assert_eq!(created.price(), Decimal::new(15099, 2));
        assert_eq!(created.stock(), 50);
        assert_eq!(created.category(), Category::Electronica);
    }

    #[tokio::test]
    async fn get_by_id_of_unknown_product_is_none() {
        let service = setup();
        service.create(keyboard()).await.unwrap();

        assert_eq!(service.get_by_id(ProductId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_all_lists_every_created_product() {
        let service = setup();
        assert!(service.get_all().await.unwrap().is_empty());

        let a = service.create(input("Camiseta", Category::Ropa)).await.unwrap();
        let b = service.create(input("Balón", Category::Deportes)).await.unwrap();

        assert_eq!(service.get_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn delete_removes_the_product() {
        let service = setup();
        let created = service.create(keyboard()).await.unwrap();

        service.delete(created.id_typed()).await.unwrap();

        assert_eq!(service.get_by_id(created.id_typed()).await.unwrap(), None);
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_product_is_not_found() {
        let service = setup();
        let id = ProductId::new();

        let err = service.delete(id).await.unwrap_err();
        match err {
            ServiceError::NotFound { id: missing, .. } => assert_eq!(missing, id),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_full_replaces_only_name_and_description() {
        let service = setup();
        let created = service.create(keyboard()).await.unwrap();

        let replacement = ProductInput {
            name: Some("Teclado Compacto".to_string()),
            description: Some("60%".to_string()),
            price: Some(Decimal::new(1, 2)),
            stock: Some(0),
            category: Some(Category::Juguetes),
        }
        .validate()
        .unwrap();

        let updated = service.update_full(created.id_typed(), replacement).await.unwrap();
        assert_eq!(updated.name(), "Teclado Compacto");
        assert_eq!(updated.description(), Some("60%"));
        assert_eq!(updated.price(), created.price());
        assert_eq!(updated.stock(), created.stock());
        assert_eq!(updated.category(), created.category());

        let stored = service.get_by_id(created.id_typed()).await.unwrap();
        assert_eq!(stored, Some(updated));
    }

    #[tokio::test]
    async fn update_full_of_unknown_product_is_not_found() {
        let service = setup();
        let valid = keyboard().validate().unwrap();

        let err = service.update_full(ProductId::new(), valid).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_stock_to_zero_keeps_other_fields() {
        let service = setup();
        let created = service.create(keyboard()).await.unwrap();

        let updated = service.update_stock(created.id_typed(), 0).await.unwrap();
        assert_eq!(updated.stock(), 0);
        assert_eq!(updated.name(), created.name());
        assert_eq!(updated.description(), created.description());
        assert_eq!(updated.price(), created.price());
        assert_eq!(updated.category(), created.category());
    }

    #[tokio::test]
    async fn negative_stock_is_stopped_at_the_boundary_shape() {
        let service = setup();
        let created = service.create(keyboard()).await.unwrap();

        assert!(StockInput { stock: Some(-1) }.validate().is_err());

        let stored = service.get_by_id(created.id_typed()).await.unwrap().unwrap();
        assert_eq!(stored.stock(), 50);
    }

    #[tokio::test]
    async fn get_by_category_with_no_matches_is_empty() {
        let service = setup();
        service.create(keyboard()).await.unwrap();

        assert!(service.get_by_category(Category::Libros).await.unwrap().is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn block_on<F: std::future::Future>(f: F) -> F::Output {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
                .block_on(f)
        }

        fn category() -> impl Strategy<Value = Category> {
            prop::sample::select(Category::ALL.to_vec())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: get_by_category(c) is exactly the c-subset of get_all(), in order.
            #[test]
            fn category_filter_is_subset_of_all(
                categories in prop::collection::vec(category(), 0..20),
                wanted in category(),
            ) {
                let (all, filtered) = block_on(async {
                    let service = setup();
                    for (idx, c) in categories.iter().enumerate() {
                        service.create(input(&format!("Producto {idx}"), *c)).await.unwrap();
                    }
                    (
                        service.get_all().await.unwrap(),
                        service.get_by_category(wanted).await.unwrap(),
                    )
                });

                let expected: Vec<_> = all.into_iter().filter(|p| p.category() == wanted).collect();
                prop_assert_eq!(filtered, expected);
            }

            /// Property: update_stock(id, n) sets stock to exactly n and nothing else.
            #[test]
            fn update_stock_sets_exact_value(n in any::<u32>()) {
                let (before, after) = block_on(async {
                    let service = setup();
                    let created = service.create(keyboard()).await.unwrap();
                    let updated = service.update_stock(created.id_typed(), n).await.unwrap();
                    (created, updated)
                });

                prop_assert_eq!(after.stock(), n);
                prop_assert_eq!(after.id_typed(), before.id_typed());
                prop_assert_eq!(after.name(), before.name());
                prop_assert_eq!(after.price(), before.price());
                prop_assert_eq!(after.category(), before.category());
            }

            /// Property: create followed by get_by_id round-trips any valid input.
            #[test]
            fn create_then_get_by_id_round_trips(
                name in "[A-Za-z][A-Za-z0-9 ]{2,99}",
                cents in 1i64..=100_000_000,
                stock in any::<u32>(),
                c in category(),
            ) {
                let (created, fetched) = block_on(async {
                    let service = setup();
                    let created = service
                        .create(ProductInput {
                            name: Some(name.clone()),
                            description: None,
                            price: Some(Decimal::new(cents, 2)),
                            stock: Some(i64::from(stock)),
                            category: Some(c),
                        })
                        .await
                        .unwrap();
                    let fetched = service.get_by_id(created.id_typed()).await.unwrap();
                    (created, fetched)
                });

                prop_assert_eq!(fetched, Some(created.clone()));
                prop_assert_eq!(created.name(), name.as_str());
                prop_assert_eq!(created.stock(), stock);
            }
        }
    }
}
