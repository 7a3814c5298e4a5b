//! Records exchanged with the order data store.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::{BackendError, BackendResult};

/// Fulfilment status of an order.
///
/// Unknown statuses are kept verbatim so replies can echo them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Created,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    /// Refunds are only offered once the order has left the warehouse.
    pub fn is_refundable(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "created" => OrderStatus::Created,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Missing or null prices count as zero.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl OrderItem {
    pub fn new(price: Decimal) -> Self {
        Self { price: Some(price) }
    }

    pub fn price(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// When the order was placed. Absent or unreadable values are `None`
    /// so one odd record does not fail the whole lookup.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub placed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_event: String,
}

impl Order {
    /// Sum of item prices.
    pub fn total(&self) -> BackendResult<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.price()))
            .ok_or_else(|| {
                BackendError::Malformed(format!("item total of {} overflows", self.order_id))
            })
    }

    /// Tracking number, treating an empty string as absent.
    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (taken as
/// UTC) or a bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub tracking_id: String,
    /// Free-text carrier status.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub eta_iso: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub refund_id: String,
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub sla_days: u32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub ticket_id: String,
    pub order_id: String,
    #[serde(default)]
    pub description: String,
    pub priority: String,
    pub sla_hours: u32,
    pub created_at: DateTime<Utc>,
}

/// A scheduled return pickup. Stored in the `returns` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub return_id: String,
    pub order_id: String,
    pub reason: String,
    pub pickup_window: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    #[test]
    fn test_order_status_roundtrip_known_and_unknown() {
        let status: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Shipped);
        assert!(status.is_refundable());

        let status: OrderStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status, OrderStatus::Other("on_hold".into()));
        assert!(!status.is_refundable());
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"on_hold\"");
    }

    #[test]
    fn test_order_from_json_server_record() {
        let json = r#"{
            "id": 1,
            "order_id": "ORD1001",
            "status": "delivered",
            "tracking_id": "TRK9001",
            "items": [{"sku": "A", "price": 499.5}, {"sku": "B", "price": 1000}, {"sku": "C"}],
            "placed_at": "2025-09-01T10:00:00Z",
            "last_event": "Delivered to customer"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, "ORD1001");
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.tracking_id(), Some("TRK9001"));
        assert_eq!(order.total().unwrap(), Decimal::from_str("1499.5").unwrap());
        assert_eq!(order.placed_at, parse_timestamp("2025-09-01T10:00:00Z"));
    }

    #[test]
    fn test_order_without_tracking() {
        let json = r#"{
            "order_id": "ORD1002",
            "status": "created",
            "tracking_id": "",
            "placed_at": "2025-09-01T10:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.tracking_id().is_none());
        assert!(order.items.is_empty());
        assert_eq!(order.total().unwrap(), Decimal::ZERO);
        assert_eq!(order.last_event, "");
    }

    #[test]
    fn test_order_with_date_only_placed_at() {
        let json = r#"{"order_id": "ORD7", "status": "shipped", "placed_at": "2025-09-01"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(
            order.placed_at,
            Some(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_order_with_missing_or_odd_placed_at() {
        let missing: Order =
            serde_json::from_str(r#"{"order_id": "ORD7", "status": "shipped"}"#).unwrap();
        assert!(missing.placed_at.is_none());

        let garbage: Order = serde_json::from_str(
            r#"{"order_id": "ORD7", "status": "shipped", "placed_at": "last tuesday"}"#,
        )
        .unwrap();
        assert!(garbage.placed_at.is_none());

        let number: Order = serde_json::from_str(
            r#"{"order_id": "ORD7", "status": "shipped", "placed_at": 1757000000}"#,
        )
        .unwrap();
        assert!(number.placed_at.is_none());
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let midnight = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-09-01"), Some(midnight));
        assert_eq!(parse_timestamp("2025-09-01T00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2025-09-01T05:30:00+05:30"), Some(midnight));
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2025-13-01"), None);
    }

    #[test]
    fn test_total_overflow_is_malformed() {
        let huge = Decimal::MAX;
        let order = Order {
            order_id: "ORD8".into(),
            status: OrderStatus::Delivered,
            tracking_id: None,
            items: vec![OrderItem::new(huge), OrderItem::new(huge)],
            placed_at: None,
            last_event: String::new(),
        };
        assert!(matches!(order.total(), Err(BackendError::Malformed(_))));
    }

    #[test]
    fn test_refund_amount_serializes_as_number() {
        let refund = Refund {
            refund_id: "RFD-ABC".into(),
            order_id: "ORD1".into(),
            amount: Decimal::from_str("1299.99").unwrap(),
            sla_days: 5,
            status: "initiated".into(),
            created_at: DateTime::parse_from_rfc3339("2025-09-10T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let value = serde_json::to_value(&refund).unwrap();
        assert!(value["amount"].is_number());
        assert_eq!(value["sla_days"], 5);
        assert_eq!(value["created_at"], "2025-09-10T00:00:00Z");
    }
}
