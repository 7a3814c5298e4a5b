//! In-process data store.

use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use super::{
    Backend, BackendError, BackendResult, Complaint, Order, OrderItem, OrderStatus, Refund,
    ReturnRequest, Shipment,
};

#[derive(Debug, Default)]
struct Records {
    orders: Vec<Order>,
    shipments: Vec<Shipment>,
    refunds: Vec<Refund>,
    complaints: Vec<Complaint>,
    returns: Vec<ReturnRequest>,
}

/// Backend that keeps every collection in memory.
///
/// Behaves like the REST store: lookups filter by exact key match and
/// inserts append.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    records: RwLock<Records>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with a handful of demo orders.
    ///
    /// - `ORD1001` delivered, tracked, out for delivery
    /// - `ORD1002` just created, no tracking
    /// - `ORD1003` shipped, no tracking yet
    /// - `ORD1004` shipped, tracking number unknown to the carrier
    /// - `ORD1005` delivered 30 days ago, outside the return window
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        let price = |s: &str| OrderItem::new(Decimal::from_str(s).unwrap_or_default());

        let mut records = Records::default();
        records.orders.push(Order {
            order_id: "ORD1001".into(),
            status: OrderStatus::Delivered,
            tracking_id: Some("TRK9001".into()),
            items: vec![price("799"), price("500")],
            placed_at: Some(now - Duration::days(3)),
            last_event: "Delivered to customer".into(),
        });
        records.orders.push(Order {
            order_id: "ORD1002".into(),
            status: OrderStatus::Created,
            tracking_id: None,
            items: vec![price("1299")],
            placed_at: Some(now - Duration::days(1)),
            last_event: "Order placed".into(),
        });
        records.orders.push(Order {
            order_id: "ORD1003".into(),
            status: OrderStatus::Shipped,
            tracking_id: None,
            items: vec![price("249.50"), price("150")],
            placed_at: Some(now - Duration::days(5)),
            last_event: "Packed at warehouse".into(),
        });
        records.orders.push(Order {
            order_id: "ORD1004".into(),
            status: OrderStatus::Shipped,
            tracking_id: Some("TRK9004".into()),
            items: vec![price("999")],
            placed_at: Some(now - Duration::days(2)),
            last_event: "Handed over to carrier".into(),
        });
        records.orders.push(Order {
            order_id: "ORD1005".into(),
            status: OrderStatus::Delivered,
            tracking_id: Some("TRK9005".into()),
            items: vec![price("349")],
            placed_at: Some(now - Duration::days(30)),
            last_event: "Delivered to customer".into(),
        });
        records.shipments.push(Shipment {
            tracking_id: "TRK9001".into(),
            status: "Out for Delivery".into(),
            eta_iso: Some((now + Duration::hours(6)).to_rfc3339()),
        });
        records.shipments.push(Shipment {
            tracking_id: "TRK9005".into(),
            status: "Delivered".into(),
            eta_iso: None,
        });
        Self {
            records: RwLock::new(records),
        }
    }

    fn read(&self) -> BackendResult<RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|_| BackendError::Unavailable("in-memory store lock poisoned".into()))
    }

    fn write(&self) -> BackendResult<RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|_| BackendError::Unavailable("in-memory store lock poisoned".into()))
    }

    pub fn insert_order(&self, order: Order) -> BackendResult<()> {
        self.write()?.orders.push(order);
        Ok(())
    }

    pub fn insert_shipment(&self, shipment: Shipment) -> BackendResult<()> {
        self.write()?.shipments.push(shipment);
        Ok(())
    }

    pub fn refunds(&self) -> Vec<Refund> {
        self.read().map(|r| r.refunds.clone()).unwrap_or_default()
    }

    pub fn complaints(&self) -> Vec<Complaint> {
        self.read().map(|r| r.complaints.clone()).unwrap_or_default()
    }

    pub fn returns(&self) -> Vec<ReturnRequest> {
        self.read().map(|r| r.returns.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn find_orders_by_id(&self, order_id: &str) -> BackendResult<Vec<Order>> {
        let records = self.read()?;
        Ok(records
            .orders
            .iter()
            .filter(|o| o.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn find_shipment_by_tracking(&self, tracking_id: &str) -> BackendResult<Vec<Shipment>> {
        let records = self.read()?;
        Ok(records
            .shipments
            .iter()
            .filter(|s| s.tracking_id == tracking_id)
            .cloned()
            .collect())
    }

    async fn find_refund_by_id(&self, refund_id: &str) -> BackendResult<Vec<Refund>> {
        let records = self.read()?;
        Ok(records
            .refunds
            .iter()
            .filter(|r| r.refund_id == refund_id)
            .cloned()
            .collect())
    }

    async fn find_complaints_by_order(&self, order_id: &str) -> BackendResult<Vec<Complaint>> {
        let records = self.read()?;
        Ok(records
            .complaints
            .iter()
            .filter(|c| c.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn create_refund(&self, refund: &Refund) -> BackendResult<()> {
        self.write()?.refunds.push(refund.clone());
        Ok(())
    }

    async fn create_complaint(&self, complaint: &Complaint) -> BackendResult<()> {
        self.write()?.complaints.push(complaint.clone());
        Ok(())
    }

    async fn create_return(&self, request: &ReturnRequest) -> BackendResult<()> {
        self.write()?.returns.push(request.clone());
        Ok(())
    }
}
