use super::*;
use crate::db::{MemoryDocumentStore, StoreError};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;

fn record(total: i64, timestamp: &str) -> PaymentRecord {
    PaymentRecord {
        original_cost: Decimal::from(total),
        tip: Decimal::ZERO,
        rounded_up: false,
        total_amount: Decimal::from(total),
        timestamp: timestamp.to_string(),
    }
}

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

fn service() -> (Arc<MemoryDocumentStore>, PaymentHistoryService) {
    let store = Arc::new(MemoryDocumentStore::new());
    (store.clone(), PaymentHistoryService::new(store))
}

fn totals(records: &[PaymentRecord]) -> Vec<Decimal> {
    records.iter().map(|r| r.total_amount).collect()
}

struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn set(&self, _: &str, _: &str, _: Document) -> StoreResult<()> {
        Err(StoreError::Database("connection refused".into()))
    }

    async fn query(&self, _: &str, _: &Query) -> StoreResult<Vec<Document>> {
        Err(StoreError::Database("connection refused".into()))
    }
}

#[tokio::test]
async fn test_every_save_is_a_new_document() {
    let (store, history) = service();
    let first = history.save(&record(10, "2024-06-14 10:00:00")).await.unwrap();
    let second = history.save(&record(10, "2024-06-14 10:00:00")).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(store.len(PAYMENTS_COLLECTION), 2);

    let recent: Vec<_> = history.fetch_recent(5).await.unwrap().collect();
    assert_eq!(recent.len(), 2);
}

#[tokio::test]
async fn test_saved_document_layout() {
    let (store, history) = service();
    let id = history.save(&record(120, "2024-06-14 19:42:07")).await.unwrap();

    let stored = store.get(PAYMENTS_COLLECTION, &id).unwrap();
    assert_eq!(stored[fields::TOTAL_AMOUNT], json!(120.0));
    assert_eq!(stored[fields::ROUNDED_UP], json!(false));
    assert_eq!(stored[fields::TIMESTAMP], json!("2024-06-14 19:42:07"));
    assert!(stored.contains_key(fields::ORIGINAL_COST));
    assert!(stored.contains_key(fields::TIP));
}

#[tokio::test]
async fn test_fetch_recent_newest_first_with_limit() {
    let (_, history) = service();
    for (total, ts) in [
        (1, "2024-06-14 10:00:01"),
        (2, "2024-06-14 10:00:02"),
        (3, "2024-06-14 10:00:03"),
        (4, "2024-06-14 10:00:04"),
    ] {
        history.save(&record(total, ts)).await.unwrap();
    }

    let recent: Vec<_> = history.fetch_recent(3).await.unwrap().collect();
    assert_eq!(totals(&recent), vec![Decimal::from(4), Decimal::from(3), Decimal::from(2)]);
}

#[tokio::test]
async fn test_record_without_total_is_skipped() {
    let (store, history) = service();
    for (total, ts) in [
        (1, "2024-06-14 10:00:01"),
        (2, "2024-06-14 10:00:02"),
        (3, "2024-06-14 10:00:03"),
    ] {
        history.save(&record(total, ts)).await.unwrap();
    }
    store
        .set(
            PAYMENTS_COLLECTION,
            "legacy",
            doc(json!({
                "original_cost": 50.0,
                "tip": 5.0,
                "rounded_up": false,
                "timestamp": "2024-06-14 10:00:04"
            })),
        )
        .await
        .unwrap();

    let recent: Vec<_> = history.fetch_recent(5).await.unwrap().collect();
    assert_eq!(totals(&recent), vec![Decimal::from(3), Decimal::from(2), Decimal::from(1)]);
}

#[tokio::test]
async fn test_null_total_and_malformed_documents_are_skipped() {
    let (store, history) = service();
    history.save(&record(7, "2024-06-14 10:00:01")).await.unwrap();
    store
        .set(
            PAYMENTS_COLLECTION,
            "null-total",
            doc(json!({"total_amount": null, "timestamp": "2024-06-14 10:00:02"})),
        )
        .await
        .unwrap();
    store
        .set(
            PAYMENTS_COLLECTION,
            "bad-types",
            doc(json!({"total_amount": "lots", "timestamp": "2024-06-14 10:00:03"})),
        )
        .await
        .unwrap();

    let recent: Vec<_> = history.fetch_recent(5).await.unwrap().collect();
    assert_eq!(totals(&recent), vec![Decimal::from(7)]);
}

#[tokio::test]
async fn test_fetch_recent_is_single_pass() {
    let (_, history) = service();
    history.save(&record(1, "2024-06-14 10:00:01")).await.unwrap();

    let mut recent = history.fetch_recent(5).await.unwrap();
    assert!(recent.next().is_some());
    assert!(recent.next().is_none());
    assert!(recent.next().is_none());
}

#[tokio::test]
async fn test_empty_history() {
    let (_, history) = service();
    assert_eq!(history.fetch_recent(5).await.unwrap().count(), 0);
}

#[tokio::test]
async fn test_store_failures_surface() {
    let history = PaymentHistoryService::new(Arc::new(FailingStore));
    assert!(matches!(
        history.save(&record(1, "2024-06-14 10:00:01")).await,
        Err(StoreError::Database(_))
    ));
    assert!(history.fetch_recent(5).await.is_err());
}

#[test]
fn test_format_recent() {
    let records = [record(120, "b"), record(39, "a")];
    assert_eq!(format_recent(5, &records), "Last 5 payments: 120.00, 39.00");
    assert_eq!(format_recent(5, &[]), "Last 5 payments: ");
}

#[test]
fn test_format_recent_keeps_two_places() {
    let mut r = record(0, "a");
    r.total_amount = Decimal::new(4_9995, 4);
    assert_eq!(format_recent(1, &[r]), "Last 1 payments: 5.00");
}

#[tokio::test]
async fn test_stored_amounts_read_back_exactly() {
    use crate::calculator::TipCalculator;
    use shared::TipRate;

    let calculator = TipCalculator::new();
    let inputs = [
        ("33.33", TipRate::FifteenPercent),
        ("19.99", TipRate::TwentyFivePercent),
        ("12345678901.23", TipRate::ThirtyPercent),
        ("0.07", TipRate::FivePercent),
    ];
    for (cost, rate) in inputs {
        let (_, history) = service();
        let result = calculator.compute_input(cost, Some(rate), false).unwrap();
        history.save(&result.to_record()).await.unwrap();

        let stored = history.fetch_recent(1).await.unwrap().next().unwrap();
        assert_eq!(stored.original_cost, result.cost);
        assert_eq!(stored.tip, result.tip);
        assert_eq!(stored.total_amount, result.total);
        assert_eq!(stored.tip, stored.original_cost * rate.fraction());
    }
}
