//! Backend gateway: the order data store the dialogue engine reads from
//! and writes to.
//!
//! Lookups return a sequence; empty means not found and callers take the
//! first element otherwise. Every failure is a [`BackendError`], which the
//! engine treats as "backend unavailable".
//!
//! Two adapters ship with the crate:
//!
//! - [`HttpBackend`] talks to a json-server style REST store.
//! - [`InMemoryBackend`] keeps records in process, for tests and demos.

mod http;
mod memory;
mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use http::{HttpBackend, DEFAULT_BASE_URL};
pub use memory::InMemoryBackend;
pub use models::{Complaint, Order, OrderItem, OrderStatus, Refund, ReturnRequest, Shipment};

/// Failure talking to the data store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The call did not complete in time.
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("backend returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The store answered with something we could not decode.
    #[error("malformed backend response: {0}")]
    Malformed(String),

    /// The store is unusable for another reason.
    #[error("{0}")]
    Unavailable(String),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Operations the dialogue engine needs from the data store.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn find_orders_by_id(&self, order_id: &str) -> BackendResult<Vec<Order>>;

    async fn find_shipment_by_tracking(&self, tracking_id: &str) -> BackendResult<Vec<Shipment>>;

    async fn find_refund_by_id(&self, refund_id: &str) -> BackendResult<Vec<Refund>>;

    async fn find_complaints_by_order(&self, order_id: &str) -> BackendResult<Vec<Complaint>>;

    async fn create_refund(&self, refund: &Refund) -> BackendResult<()>;

    async fn create_complaint(&self, complaint: &Complaint) -> BackendResult<()>;

    async fn create_return(&self, request: &ReturnRequest) -> BackendResult<()>;
}
