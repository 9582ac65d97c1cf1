//! Destination delivery
//!
//! Routes transformed payloads to webhooks over HTTP or into buckets of the
//! object store.

use crate::adapters::traits::{DestinationSink, ObjectStore};
use crate::config::SecretString;
use crate::domain::errors::DeliveryError;
use crate::domain::partnership::{DestinationTarget, WebhookVerb};
use crate::domain::{EdiError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Delivers payloads to webhook and bucket destinations
pub struct DeliveryRouter {
    client: Client,
    object_store: Arc<dyn ObjectStore + Send + Sync>,
    api_key: Option<SecretString>,
}

impl DeliveryRouter {
    /// Creates a router
    ///
    /// # Arguments
    ///
    /// * `object_store` - Store receiving bucket deliveries
    /// * `timeout_seconds` - Per-request timeout for webhooks
    /// * `api_key` - Sent as `Authorization: Key <api key>` on webhook calls when set
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        object_store: Arc<dyn ObjectStore + Send + Sync>,
        timeout_seconds: u64,
        api_key: Option<SecretString>,
    ) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(timeout_seconds.min(30)))
            .build()
            .map_err(|e| EdiError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            object_store,
            api_key,
        })
    }

    async fn deliver_webhook(
        &self,
        destination: &DestinationTarget,
        url: &str,
        verb: WebhookVerb,
        headers: &std::collections::BTreeMap<String, String>,
        payload: &Value,
    ) -> Result<()> {
        let method = match verb {
            WebhookVerb::Post => Method::POST,
            WebhookVerb::Put => Method::PUT,
            WebhookVerb::Patch => Method::PATCH,
        };

        let mut request = self.client.request(method, url).json(payload);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Key {}", api_key.expose_secret()));
        }
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| DeliveryError::Unreachable {
            destination: destination.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                destination: destination.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        tracing::info!(url = %url, status = status.as_u16(), "Delivered payload to webhook");
        Ok(())
    }

    async fn deliver_bucket(&self, bucket_name: &str, path: &str, payload: &Value) -> Result<()> {
        let key = bucket_object_key(path);
        let body = serde_json::to_vec(payload)?;
        self.object_store.put(bucket_name, &key, body).await?;

        tracing::info!(bucket = %bucket_name, key = %key, "Delivered payload to bucket");
        Ok(())
    }
}

/// Object key for a bucket delivery: a fresh UUID under the configured path
pub fn bucket_object_key(path: &str) -> String {
    let name = format!("{}.json", uuid::Uuid::new_v4());
    let prefix = path.trim_matches('/');
    if prefix.is_empty() {
        name
    } else {
        format!("{prefix}/{name}")
    }
}

#[async_trait]
impl DestinationSink for DeliveryRouter {
    async fn deliver(&self, destination: &DestinationTarget, payload: &Value) -> Result<()> {
        destination
            .validate()
            .map_err(DeliveryError::InvalidDestination)?;

        match destination {
            DestinationTarget::Webhook { url, verb, headers } => {
                self.deliver_webhook(destination, url, *verb, headers, payload)
                    .await
            }
            DestinationTarget::Bucket { bucket_name, path } => {
                self.deliver_bucket(bucket_name, path, payload).await
            }
        }
    }
}

impl std::fmt::Debug for DeliveryRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryRouter")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}
