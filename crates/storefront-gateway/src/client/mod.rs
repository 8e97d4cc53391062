//! HTTP client for the storefront backend.
//!
//! Wraps `reqwest` with storefront-specific URL building, status handling,
//! and typed response deserialization. Nothing here retries: a failed call
//! is terminal for that request and the caller decides what the user sees.

mod cache;
mod catalog;

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// Client for the storefront REST backend.
///
/// Implements both [`crate::CatalogGateway`] and [`crate::ScratchCache`].
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
}

impl StorefrontClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GatewayError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute URL that can carry a path.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Ensure exactly one trailing slash so joined paths append rather
        // than replace the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GatewayError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds an endpoint URL from percent-encoded path segments and the
    /// optional effective account.
    fn endpoint(&self, segments: &[&str], effective_account_id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some(account) = effective_account_id {
            url.query_pairs_mut()
                .append_pair("effectiveAccountId", account);
        }
        url
    }

    /// Fails on any non-2xx status.
    fn check_status(response: &Response, url: &Url) -> Result<(), GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(GatewayError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }

    /// Asserts a 2xx status and parses the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnexpectedStatus`] on a non-2xx status,
    /// [`GatewayError::Http`] if the body cannot be read, and
    /// [`GatewayError::Deserialize`] if it does not match `T`.
    async fn read_json<T: DeserializeOwned>(
        response: Response,
        url: &Url,
        context: &str,
    ) -> Result<T, GatewayError> {
        Self::check_status(&response, url)?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
