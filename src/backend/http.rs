//! REST adapter for a json-server style data store.
//!
//! Collections are plain resources filtered by query string:
//! `GET /orders?order_id=ORD1001` returns a JSON array, `POST /refunds`
//! appends a record.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{
    Backend, BackendError, BackendResult, Complaint, Order, Refund, ReturnRequest, Shipment,
};

/// Default store location (json-server's usual mock port).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout {
                operation: "http request",
                timeout_ms: 0,
            }
        } else if e.is_decode() {
            BackendError::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            BackendError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}

/// HTTP client for the order data store.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    async fn query<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> BackendResult<Vec<T>> {
        let url = self.collection_url(collection);
        debug!(%url, field, value, "querying backend");

        let response = self
            .client
            .get(&url)
            .query(&[(field, value)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| BackendError::Malformed(format!("{}: {}", collection, e)))
    }

    async fn insert<T: Serialize + Sync>(&self, collection: &str, record: &T) -> BackendResult<()> {
        let url = self.collection_url(collection);
        debug!(%url, "inserting backend record");

        self.client
            .post(&url)
            .json(record)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn find_orders_by_id(&self, order_id: &str) -> BackendResult<Vec<Order>> {
        self.query("orders", "order_id", order_id).await
    }

    async fn find_shipment_by_tracking(&self, tracking_id: &str) -> BackendResult<Vec<Shipment>> {
        self.query("shipments", "tracking_id", tracking_id).await
    }

    async fn find_refund_by_id(&self, refund_id: &str) -> BackendResult<Vec<Refund>> {
        self.query("refunds", "refund_id", refund_id).await
    }

    async fn find_complaints_by_order(&self, order_id: &str) -> BackendResult<Vec<Complaint>> {
        self.query("complaints", "order_id", order_id).await
    }

    async fn create_refund(&self, refund: &Refund) -> BackendResult<()> {
        self.insert("refunds", refund).await
    }

    async fn create_complaint(&self, complaint: &Complaint) -> BackendResult<()> {
        self.insert("complaints", complaint).await
    }

    async fn create_return(&self, request: &ReturnRequest) -> BackendResult<()> {
        self.insert("returns", request).await
    }
}
