use crate::{error::BridgeError, payload::Payload};
use axum::async_trait;
use reqwest::header::ACCEPT;
use std::sync::Arc;

/// Read-only JSON GET against an external endpoint.
#[async_trait]
pub trait JsonFetcher: Send + Sync + 'static {
    async fn get_json(&self, url: &str) -> Result<Payload, BridgeError>;
}

#[async_trait]
impl<T: JsonFetcher> JsonFetcher for Arc<T> {
    async fn get_json(&self, url: &str) -> Result<Payload, BridgeError> {
        (**self).get_json(url).await
    }
}

#[derive(Clone, Debug, Default)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonFetcher for ReqwestFetcher {
    async fn get_json(&self, url: &str) -> Result<Payload, BridgeError> {
        let res = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(BridgeError::Status(status));
        }

        let body = res.bytes().await?;
        let value = serde_json::from_slice::<serde_json::Value>(&body)?;

        Payload::try_from(value)
    }
}
