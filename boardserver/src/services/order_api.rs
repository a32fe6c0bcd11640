//! Order-management API client
//!
//! Thin reqwest adapter over the external order endpoint: POST with an empty
//! JSON body, `x-api-key` header plus HTTP basic auth, and a
//! `{ Result: { Results: [...] } }` response envelope. Credentials come from
//! the environment (or a `.env` file), never from source.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{BoardError, BoardResult};
use crate::traits::OrderSource;
use shared::{parse_order_timestamp, Order, SharedError};

/// Connection settings for the order-management API.
#[derive(Debug, Clone)]
pub struct OrderApiConfig {
    pub url: String,
    pub api_key: String,
    pub username: String,
    pub password: String,
}

impl OrderApiConfig {
    /// Environment variables holding the API credentials.
    const ENV_API_KEY: &'static str = "ORDER_API_KEY";
    const ENV_USERNAME: &'static str = "ORDER_API_USER";
    const ENV_PASSWORD: &'static str = "ORDER_API_PASSWORD";

    /// Build a config from the environment, loading `.env` if present.
    pub fn from_env(url: String) -> BoardResult<Self> {
        // Safe to call repeatedly; already-set variables win over the file.
        let _ = dotenv::dotenv();

        Ok(Self {
            url,
            api_key: Self::require_env(Self::ENV_API_KEY)?,
            username: Self::require_env(Self::ENV_USERNAME)?,
            password: Self::require_env(Self::ENV_PASSWORD)?,
        })
    }

    fn require_env(name: &str) -> BoardResult<String> {
        std::env::var(name).map_err(|_| {
            BoardError::Shared(SharedError::MissingEnvVar {
                name: name.to_string(),
            })
        })
    }
}

/// Real order source backed by the REST endpoint.
#[derive(Clone)]
pub struct RestOrderSource {
    client: reqwest::Client,
    config: Arc<OrderApiConfig>,
}

/// Response envelope as the API emits it.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(rename = "Result")]
    result: ApiResult,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(rename = "Results", default)]
    results: Vec<serde_json::Value>,
}

/// Wire shape of one order record, field names per the API.
#[derive(Debug, Deserialize)]
struct ApiOrderRecord {
    #[serde(rename = "OrderNum")]
    order_num: i64,
    #[serde(rename = "CustomerID", default)]
    customer_id: String,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "PONum", default)]
    po_num: Option<String>,
    #[serde(rename = "CreateDate", default)]
    create_date: Option<String>,
    #[serde(rename = "OrderDate", default)]
    order_date: Option<String>,
    #[serde(rename = "NeedByDate", default)]
    need_by_date: Option<String>,
    #[serde(rename = "Status", default)]
    status: String,
}

impl ApiOrderRecord {
    fn into_order(self) -> Order {
        Order {
            order_number: self.order_num,
            customer_id: self.customer_id,
            customer_name: self.name,
            po_number: self
                .po_num
                .map(|po| po.trim().to_string())
                .filter(|po| !po.is_empty()),
            // Unparseable timestamps silently degrade to "no date".
            created_at: self.create_date.as_deref().and_then(parse_order_timestamp),
            order_date: self.order_date.as_deref().and_then(parse_order_timestamp),
            need_by_date: self.need_by_date.as_deref().and_then(parse_order_timestamp),
            status: self.status,
        }
    }
}

impl RestOrderSource {
    pub fn new(config: OrderApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    /// Decode a response body into orders.
    ///
    /// A record that fails to decode is skipped with a warning; one bad
    /// record never aborts the batch. A missing envelope is an error.
    pub fn parse_response(body: &str) -> BoardResult<Vec<Order>> {
        let envelope: ApiEnvelope =
            serde_json::from_str(body).map_err(|e| BoardError::payload(e.to_string()))?;

        let mut orders = Vec::with_capacity(envelope.result.results.len());
        for value in envelope.result.results {
            match serde_json::from_value::<ApiOrderRecord>(value) {
                Ok(record) => orders.push(record.into_order()),
                Err(e) => warn!("Skipping malformed order record: {e}"),
            }
        }

        Ok(orders)
    }
}

#[async_trait]
impl OrderSource for RestOrderSource {
    async fn fetch_orders(&self) -> BoardResult<Vec<Order>> {
        debug!("Fetching order snapshot from {}", self.config.url);

        let response = self
            .client
            .post(&self.config.url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("x-api-key", &self.config.api_key)
            .json(&serde_json::json!({}))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let orders = Self::parse_response(&body)?;

        debug!("Fetched {} orders", orders.len());
        Ok(orders)
    }
}
