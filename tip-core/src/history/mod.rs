//! Payment History
//!
//! Writes computed payments to the `payments` collection and reads back the
//! most recent ones. Every save gets a fresh UUID document id, so records
//! accumulate instead of replacing each other.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde_json::Value;
use shared::models::payment::{PAYMENTS_COLLECTION, fields};
use shared::PaymentRecord;

use crate::db::{Direction, Document, DocumentStore, Query, StoreResult};

/// History over an injected document store
#[derive(Clone)]
pub struct PaymentHistoryService {
    store: Arc<dyn DocumentStore>,
}

impl PaymentHistoryService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Write one payment record, returning its document id
    ///
    /// Single attempt; a failure is returned as-is.
    pub async fn save(&self, record: &PaymentRecord) -> StoreResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let document = record.to_document()?;

        self.store.set(PAYMENTS_COLLECTION, &id, document).await?;

        tracing::debug!(
            payment_id = %id,
            total = %record.total_amount,
            "Payment saved"
        );
        Ok(id)
    }

    /// Up to `limit` records, newest first
    ///
    /// Documents without `total_amount` are skipped. The returned iterator
    /// decodes lazily and can be consumed once.
    pub async fn fetch_recent(&self, limit: usize) -> StoreResult<RecentPayments> {
        let query = Query::order_by(fields::TIMESTAMP, Direction::Descending).limit(limit);
        let documents = self.store.query(PAYMENTS_COLLECTION, &query).await?;
        Ok(RecentPayments {
            documents: documents.into_iter(),
        })
    }
}

/// Lazily decoded result of [`PaymentHistoryService::fetch_recent`]
pub struct RecentPayments {
    documents: std::vec::IntoIter<Document>,
}

impl Iterator for RecentPayments {
    type Item = PaymentRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for document in self.documents.by_ref() {
            if matches!(document.get(fields::TOTAL_AMOUNT), None | Some(Value::Null)) {
                continue;
            }
            match PaymentRecord::from_document(document) {
                Ok(record) => return Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed payment document");
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.documents.size_hint().1)
    }
}

/// Display line for the recent-payments panel
///
/// `format_recent(5, &records)` → `"Last 5 payments: 120.00, 39.00"`
pub fn format_recent(limit: usize, records: &[PaymentRecord]) -> String {
    let totals: Vec<String> = records
        .iter()
        .map(|r| format!("{:.2}", r.total_amount))
        .collect();
    format!("Last {} payments: {}", limit, totals.join(", "))
}
