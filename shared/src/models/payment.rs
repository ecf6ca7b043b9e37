//! Payment Models
//!
//! [`PaymentResult`] is what the calculator hands back; [`PaymentRecord`]
//! is the document written to the `payments` collection. Decimal amounts
//! are stored as JSON numbers so documents stay readable by other clients
//! of the same collection.

use super::tip_rate::TipRate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection holding payment history documents
pub const PAYMENTS_COLLECTION: &str = "payments";

/// Field names of a payment document
pub mod fields {
    pub const ORIGINAL_COST: &str = "original_cost";
    pub const TIP: &str = "tip";
    pub const ROUNDED_UP: &str = "rounded_up";
    pub const TOTAL_AMOUNT: &str = "total_amount";
    pub const TIMESTAMP: &str = "timestamp";
}

/// Output of a tip calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Cost of service before tip
    pub cost: Decimal,
    /// Selected tip rate
    pub tip_rate: TipRate,
    /// `cost * tip_rate`, never rounded
    pub tip: Decimal,
    /// `cost + tip`, ceiling-rounded when `rounded_up`
    pub total: Decimal,
    pub rounded_up: bool,
    /// `yyyy-MM-dd HH:mm:ss`, local time
    pub timestamp: String,
}

impl PaymentResult {
    /// Build the history document for this result
    pub fn to_record(&self) -> PaymentRecord {
        PaymentRecord {
            original_cost: self.cost,
            tip: self.tip,
            rounded_up: self.rounded_up,
            total_amount: self.total,
            timestamp: self.timestamp.clone(),
        }
    }
}

/// A persisted payment, immutable once written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(with = "rust_decimal::serde::float")]
    pub original_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tip: Decimal,
    pub rounded_up: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub timestamp: String,
}

impl From<&PaymentResult> for PaymentRecord {
    fn from(result: &PaymentResult) -> Self {
        result.to_record()
    }
}

impl PaymentRecord {
    /// Encode as a key/value document
    pub fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            // A struct always serializes to an object
            other => Err(serde::ser::Error::custom(format!(
                "payment record encoded as non-object: {other}"
            ))),
        }
    }

    /// Decode a key/value document; unknown fields are ignored
    pub fn from_document(document: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(document))
    }

    /// Whether every amount reads back unchanged from a stored document
    pub fn survives_document(&self) -> bool {
        [self.original_cost, self.tip, self.total_amount]
            .into_iter()
            .all(amount_survives_document)
    }
}

/// Whether `amount` is unchanged after being written as a JSON number and
/// read back
///
/// Amounts with more significant digits than an `f64` holds come back
/// rounded.
pub fn amount_survives_document(amount: Decimal) -> bool {
    rust_decimal::serde::float::serialize(&amount, serde_json::value::Serializer)
        .and_then(rust_decimal::serde::float::deserialize)
        .is_ok_and(|stored| stored == amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_result() -> PaymentResult {
        PaymentResult {
            cost: dec("100"),
            tip_rate: TipRate::TwentyPercent,
            tip: dec("20.00"),
            total: dec("120.00"),
            rounded_up: false,
            timestamp: "2024-05-01 12:30:00".to_string(),
        }
    }

    #[test]
    fn test_to_record_copies_amounts() {
        let record = sample_result().to_record();
        assert_eq!(record.original_cost, dec("100"));
        assert_eq!(record.tip, dec("20"));
        assert_eq!(record.total_amount, dec("120"));
        assert!(!record.rounded_up);
        assert_eq!(record.timestamp, "2024-05-01 12:30:00");
    }

    #[test]
    fn test_document_uses_store_field_names() {
        let doc = PaymentRecord::from(&sample_result()).to_document().unwrap();
        assert_eq!(doc.len(), 5);
        assert_eq!(doc[fields::ORIGINAL_COST], json!(100.0));
        assert_eq!(doc[fields::TIP], json!(20.0));
        assert_eq!(doc[fields::ROUNDED_UP], json!(false));
        assert_eq!(doc[fields::TOTAL_AMOUNT], json!(120.0));
        assert_eq!(doc[fields::TIMESTAMP], json!("2024-05-01 12:30:00"));
    }

    #[test]
    fn test_from_document_reads_numbers() {
        let doc = json!({
            "original_cost": 33.33,
            "tip": 4.9995,
            "rounded_up": true,
            "total_amount": 39,
            "timestamp": "2024-05-01 12:30:00",
            "written_by": "another client"
        });
        let Value::Object(map) = doc else { unreachable!() };
        let record = PaymentRecord::from_document(map).unwrap();
        assert_eq!(record.original_cost, dec("33.33"));
        assert_eq!(record.tip, dec("4.9995"));
        assert_eq!(record.total_amount, dec("39"));
        assert!(record.rounded_up);
    }

    #[test]
    fn test_amount_survives_document() {
        for ok in ["0", "33.33", "4.9995", "12345678901234.56", "0.0000000000000000000000000005"] {
            assert!(amount_survives_document(dec(ok)), "{ok} should survive");
        }
        for lossy in ["98765432109876.54321", "113580246926358.0315"] {
            assert!(!amount_survives_document(dec(lossy)), "{lossy} should not survive");
        }
    }

    #[test]
    fn test_record_survives_only_if_every_amount_does() {
        let mut record = sample_result().to_record();
        assert!(record.survives_document());

        record.tip = dec("14814814816481.4815815");
        assert!(!record.survives_document());
    }

    #[test]
    fn test_from_document_missing_field_fails() {
        let Value::Object(map) = json!({ "original_cost": 10.0 }) else {
            unreachable!()
        };
        assert!(PaymentRecord::from_document(map).is_err());
    }
}
