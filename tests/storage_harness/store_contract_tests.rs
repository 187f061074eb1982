//! Macro-generated test suite for `InvoiceStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use invoice_tracker::storage::InMemoryInvoiceStore;
//!
//! invoice_store_tests!(InMemoryInvoiceStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_insert_and_get`: insert then retrieve, all fields intact
//! - `test_insert_bare`: optional fields stay absent
//! - `test_get_nonexistent`: unknown and malformed ids return None
//! - `test_list_empty`: empty store lists nothing
//! - `test_list_in_insertion_order`: retrieval order matches inserts
//! - `test_save_toggles_done`: done flag persisted
//! - `test_save_nonexistent`: save on a deleted record errors
//! - `test_delete_existing`: record gone afterwards
//! - `test_delete_nonexistent`: no error, other records untouched
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate a full `InvoiceStore` conformance test suite.
///
/// `$factory` is re-evaluated for each test. For the concurrent test the
/// store must also be `Clone + 'static`.
#[macro_export]
macro_rules! invoice_store_tests {
    ($factory:expr) => {
        mod invoice_store_contract_tests {
            use super::*;
            use chrono::{Duration, TimeZone, Utc};
            use invoice_tracker::core::{InvoiceId, InvoiceStore};

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory;
                let expiry = Utc.with_ymd_and_hms(2024, 3, 1, 15, 30, 0).unwrap();

                let created = store.insert(new_invoice("INV1", expiry)).await.unwrap();
                assert!(!created.id.as_str().is_empty());
                assert!(!created.done);
                assert_eq!(created.invoice_number.as_deref(), Some("INV1"));
                assert_eq!(created.invoice_date, Some(invoice_date()));
                assert_eq!(created.expiry_date, Some(expiry));

                let fetched = store.get(&created.id).await.unwrap().unwrap();
                assert_eq!(fetched, created);
            }

            #[tokio::test]
            async fn test_insert_bare() {
                let store = $factory;
                let created = store.insert(bare_invoice()).await.unwrap();

                let fetched = store.get(&created.id).await.unwrap().unwrap();
                assert_eq!(fetched.invoice_number, None);
                assert_eq!(fetched.item_name, None);
                assert_eq!(fetched.price, None);
                assert!(fetched.invoice_date.is_some());
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                store.insert(bare_invoice()).await.unwrap();

                assert!(store.get(&InvoiceId::from("not-an-id")).await.unwrap().is_none());
                assert!(
                    store
                        .get(&InvoiceId::from("0123456789abcdef01234567"))
                        .await
                        .unwrap()
                        .is_none()
                );
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_in_insertion_order() {
                let store = $factory;
                let base = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
                for (i, number) in ["A", "B", "C", "D", "E"].iter().enumerate() {
                    store
                        .insert(new_invoice(number, base + Duration::days(5 - i as i64)))
                        .await
                        .unwrap();
                }

                let numbers: Vec<String> = store
                    .list()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|invoice| invoice.invoice_number.unwrap())
                    .collect();
                assert_eq!(numbers, vec!["A", "B", "C", "D", "E"]);
            }

            #[tokio::test]
            async fn test_save_toggles_done() {
                let store = $factory;
                let mut invoice = store.insert(bare_invoice()).await.unwrap();

                invoice.toggle_done();
                let saved = store.save(&invoice).await.unwrap();
                assert!(saved.done);
                assert!(store.get(&invoice.id).await.unwrap().unwrap().done);

                invoice.toggle_done();
                let saved = store.save(&invoice).await.unwrap();
                assert!(!saved.done);
            }

            #[tokio::test]
            async fn test_save_nonexistent() {
                let store = $factory;
                let mut invoice = store.insert(bare_invoice()).await.unwrap();
                store.delete(&invoice.id).await.unwrap();

                invoice.toggle_done();
                assert!(store.save(&invoice).await.is_err());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let invoice = store.insert(bare_invoice()).await.unwrap();

                store.delete(&invoice.id).await.unwrap();
                assert!(store.get(&invoice.id).await.unwrap().is_none());
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                store.insert(bare_invoice()).await.unwrap();

                store.delete(&InvoiceId::from("not-an-id")).await.unwrap();
                store
                    .delete(&InvoiceId::from("0123456789abcdef01234567"))
                    .await
                    .unwrap();
                assert_eq!(store.list().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(new_invoice(&format!("INV{}", i), invoice_date()))
                            .await
                            .unwrap()
                    }));
                }

                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(store.list().await.unwrap().len(), 10);
            }
        }
    };
}
