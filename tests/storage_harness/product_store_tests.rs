//! Macro-generated test suite for `ProductStore` contract validation.
//!
//! The `product_store_tests!` macro generates a test module that validates any
//! `ProductStore` implementation against the full contract: point lookups,
//! conflict and absence reporting, scan filtering and ordering, windowed
//! fetches and concurrent writes.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use catalog::storage::InMemoryProductStore;
//!
//! product_store_tests!(InMemoryProductStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Writes
//! - `test_insert_and_find`: every field round-trips, including a null description
//! - `test_find_missing`: unknown code returns None
//! - `test_insert_duplicate_conflicts`: second insert reports Conflict, first record kept
//! - `test_update_existing` / `test_update_missing`
//! - `test_remove_existing` / `test_remove_missing`
//!
//! ## Scan
//! - `test_scan_empty_store`
//! - `test_scan_default_orders_by_code`
//! - `test_scan_search_name_and_description`: case-insensitive, code not searched
//! - `test_scan_search_wildcards_are_literal`
//! - `test_scan_sort_ties_break_on_code`
//! - `test_scan_text_sorts_by_code_point`: upper case before lower case
//! - `test_scan_missing_description_order`
//! - `test_scan_sort_by_price_desc`
//! - `test_scan_paginates_windows`
//!
//! ## Concurrency
//! - `test_concurrent_duplicate_inserts`: exactly one of N racing inserts wins
//! - `test_concurrent_distinct_inserts`

/// Generate a full `ProductStore` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty store
/// implementing `ProductStore + 'static`. It is re-evaluated for each test to
/// ensure isolation.
#[macro_export]
macro_rules! product_store_tests {
    ($factory:expr) => {
        mod product_store_contract_tests {
            use super::*;
            use catalog::core::error::StoreError;
            use catalog::core::query::{PageRequest, SortColumn, paginate};
            use catalog::core::store::{ProductScan, ProductStore};
            use std::sync::Arc;

            // ==================================================================
            // Writes
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_find() {
                let store = $factory;
                let laptop = product("1234-5678", "Laptop", Some("For work"), "1200.00");
                let headphones = product("2468-1357", "Headphones", None, "150.50");

                store.insert(laptop.clone()).await.unwrap();
                store.insert(headphones.clone()).await.unwrap();

                assert_eq!(store.find_by_code("1234-5678").await.unwrap(), Some(laptop));
                let found = store.find_by_code("2468-1357").await.unwrap().unwrap();
                assert_eq!(found.description, None);
                assert_eq!(found.price, price("150.50"));
            }

            #[tokio::test]
            async fn test_find_missing() {
                let store = $factory;
                assert!(store.find_by_code("0000-0000").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_insert_duplicate_conflicts() {
                let store = $factory;
                store
                    .insert(product("1234-5678", "Laptop", None, "1200.00"))
                    .await
                    .unwrap();

                let err = store
                    .insert(product("1234-5678", "Imposter", None, "1.00"))
                    .await
                    .unwrap_err();
                assert!(
                    matches!(err, StoreError::Conflict { ref code } if code == "1234-5678"),
                    "expected Conflict, got {:?}",
                    err
                );

                let kept = store.find_by_code("1234-5678").await.unwrap().unwrap();
                assert_eq!(kept.name, "Laptop");
                assert_eq!(store.scan(ProductScan::default()).count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                store
                    .insert(product("1234-5678", "Laptop", Some("Old"), "1200.00"))
                    .await
                    .unwrap();

                let changed = product("1234-5678", "Laptop Pro", None, "1499.99");
                store.update(changed.clone()).await.unwrap();

                assert_eq!(store.find_by_code("1234-5678").await.unwrap(), Some(changed));
            }

            #[tokio::test]
            async fn test_update_missing() {
                let store = $factory;
                let err = store
                    .update(product("1234-5678", "Laptop", None, "1.00"))
                    .await
                    .unwrap_err();
                assert!(matches!(err, StoreError::Absent { .. }), "got {:?}", err);
                assert!(store.find_by_code("1234-5678").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_remove_existing() {
                let store = $factory;
                insert_all(&store, seeded_products()).await;

                store.remove("9876-5432").await.unwrap();

                assert!(store.find_by_code("9876-5432").await.unwrap().is_none());
                assert_eq!(store.scan(ProductScan::default()).count().await.unwrap(), 2);
            }

            #[tokio::test]
            async fn test_remove_missing() {
                let store = $factory;
                let err = store.remove("1234-5678").await.unwrap_err();
                assert!(matches!(err, StoreError::Absent { .. }), "got {:?}", err);
            }

            // ==================================================================
            // Scan
            // ==================================================================

            #[tokio::test]
            async fn test_scan_empty_store() {
                let store = $factory;
                let view = store.scan(ProductScan::default());
                assert_eq!(view.count().await.unwrap(), 0);
                assert!(view.fetch(0, 10).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_scan_default_orders_by_code() {
                let store = $factory;
                insert_all(&store, seeded_products()).await;

                let view = store.scan(ProductScan::default());
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["1234-5678", "2468-1357", "9876-5432"],
                );

                let view = store.scan(ProductScan::new(None, SortColumn::Code, true));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["9876-5432", "2468-1357", "1234-5678"],
                );
            }

            #[tokio::test]
            async fn test_scan_search_name_and_description() {
                let store = $factory;
                insert_all(&store, seeded_products()).await;

                // Name, any case
                let view = store.scan(ProductScan::new(Some("LAPTOP"), SortColumn::Code, false));
                assert_eq!(view.count().await.unwrap(), 1);
                assert_codes(&view.fetch(0, 10).await.unwrap(), &["1234-5678"]);

                // Description only
                let view = store.scan(ProductScan::new(Some("camera"), SortColumn::Code, false));
                assert_codes(&view.fetch(0, 10).await.unwrap(), &["9876-5432"]);

                // Matches a description word in the middle of the text
                let view = store.scan(ProductScan::new(Some("powerful"), SortColumn::Code, false));
                assert_eq!(view.count().await.unwrap(), 1);

                // Codes are not searched
                let view = store.scan(ProductScan::new(Some("5678"), SortColumn::Code, false));
                assert_eq!(view.count().await.unwrap(), 0);
                assert!(view.fetch(0, 10).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_scan_search_wildcards_are_literal() {
                let store = $factory;
                insert_all(
                    &store,
                    vec![
                        product("1111-0001", "Cable 50% off", None, "5.00"),
                        product("1111-0002", "Cable 500", None, "6.00"),
                        product("1111-0003", "Cable_x", None, "7.00"),
                        product("1111-0004", "Cablex", None, "8.00"),
                    ],
                )
                .await;

                let view = store.scan(ProductScan::new(Some("0%"), SortColumn::Code, false));
                assert_codes(&view.fetch(0, 10).await.unwrap(), &["1111-0001"]);

                let view = store.scan(ProductScan::new(Some("e_x"), SortColumn::Code, false));
                assert_codes(&view.fetch(0, 10).await.unwrap(), &["1111-0003"]);
            }

            #[tokio::test]
            async fn test_scan_sort_ties_break_on_code() {
                let store = $factory;
                insert_all(
                    &store,
                    vec![
                        product("5555-0002", "Cable", None, "5.00"),
                        product("5555-0003", "Adapter", None, "5.00"),
                        product("5555-0001", "Cable", None, "5.00"),
                    ],
                )
                .await;

                let view = store.scan(ProductScan::new(None, SortColumn::Name, false));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["5555-0003", "5555-0001", "5555-0002"],
                );

                let view = store.scan(ProductScan::new(None, SortColumn::Name, true));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["5555-0002", "5555-0001", "5555-0003"],
                );
            }

            #[tokio::test]
            async fn test_scan_text_sorts_by_code_point() {
                let store = $factory;
                insert_all(
                    &store,
                    vec![
                        product("6666-0001", "apple", Some("bolt"), "1.00"),
                        product("6666-0002", "Zebra", Some("Anchor"), "2.00"),
                        product("6666-0003", "Banana", Some("axle"), "3.00"),
                        product("6666-0004", "avocado", Some("Bracket"), "4.00"),
                    ],
                )
                .await;

                let view = store.scan(ProductScan::new(None, SortColumn::Name, false));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["6666-0003", "6666-0002", "6666-0001", "6666-0004"],
                );

                let view = store.scan(ProductScan::new(None, SortColumn::Name, true));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["6666-0004", "6666-0001", "6666-0002", "6666-0003"],
                );

                let view = store.scan(ProductScan::new(None, SortColumn::Description, false));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["6666-0002", "6666-0004", "6666-0003", "6666-0001"],
                );
            }

            #[tokio::test]
            async fn test_scan_missing_description_order() {
                let store = $factory;
                insert_all(&store, seeded_products()).await;

                let view = store.scan(ProductScan::new(None, SortColumn::Description, false));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["2468-1357", "1234-5678", "9876-5432"],
                );

                let view = store.scan(ProductScan::new(None, SortColumn::Description, true));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["9876-5432", "1234-5678", "2468-1357"],
                );
            }

            #[tokio::test]
            async fn test_scan_sort_by_price_desc() {
                let store = $factory;
                insert_all(&store, seeded_products()).await;

                let view = store.scan(ProductScan::new(None, SortColumn::Price, true));
                assert_codes(
                    &view.fetch(0, 10).await.unwrap(),
                    &["1234-5678", "9876-5432", "2468-1357"],
                );
            }

            #[tokio::test]
            async fn test_scan_paginates_windows() {
                let store = $factory;
                insert_all(&store, sample_batch(25)).await;

                let view = store.scan(ProductScan::default());
                let page = paginate(view.as_ref(), PageRequest::new(3, 10).unwrap())
                    .await
                    .unwrap();

                assert_eq!(page.pagination.total, 25);
                assert_eq!(page.pagination.total_pages, 3);
                assert!(page.pagination.has_previous_page);
                assert!(!page.pagination.has_next_page);
                assert_eq!(page.items.len(), 5);
                assert_eq!(page.items[0].code, "1000-0020");

                let beyond = paginate(view.as_ref(), PageRequest::new(9, 10).unwrap())
                    .await
                    .unwrap();
                assert!(beyond.items.is_empty());
                assert_eq!(beyond.pagination.total, 25);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn test_concurrent_duplicate_inserts() {
                let store = Arc::new($factory);
                let mut handles = Vec::new();

                for i in 0..8 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(product("4242-4242", &format!("Racer {}", i), None, "1.00"))
                            .await
                    }));
                }

                let mut wins = 0;
                for handle in handles {
                    match handle.await.unwrap() {
                        Ok(()) => wins += 1,
                        Err(StoreError::Conflict { .. }) => {}
                        Err(other) => panic!("unexpected store error: {:?}", other),
                    }
                }

                assert_eq!(wins, 1);
                assert_eq!(store.scan(ProductScan::default()).count().await.unwrap(), 1);
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn test_concurrent_distinct_inserts() {
                let store = Arc::new($factory);
                let mut handles = Vec::new();

                for product in sample_batch(10) {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move { store.insert(product).await }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_eq!(store.scan(ProductScan::default()).count().await.unwrap(), 10);
            }
        }
    };
}
