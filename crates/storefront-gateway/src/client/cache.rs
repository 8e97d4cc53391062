//! Scratch-cache endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StorefrontClient;
use crate::error::GatewayError;
use crate::gateway::ScratchCache;

#[derive(Serialize)]
struct PutBody<'a> {
    value: &'a str,
}

#[derive(Deserialize)]
struct GetBody {
    #[serde(default)]
    value: Option<String>,
}

#[async_trait]
impl ScratchCache for StorefrontClient {
    async fn put(&self, key: &str, value: &str) -> Result<(), GatewayError> {
        let url = self.endpoint(&["scratch-cache", key], None);
        let response = self
            .client
            .put(url.clone())
            .json(&PutBody { value })
            .send()
            .await?;
        Self::check_status(&response, &url)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, GatewayError> {
        let url = self.endpoint(&["scratch-cache", key], None);
        let response = self.client.get(url.clone()).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: GetBody = Self::read_json(response, &url, "scratch-cache get").await?;
        Ok(body.value)
    }

    async fn clear(&self) -> Result<(), GatewayError> {
        let url = self.endpoint(&["scratch-cache"], None);
        let response = self.client.delete(url.clone()).send().await?;
        Self::check_status(&response, &url)
    }
}
