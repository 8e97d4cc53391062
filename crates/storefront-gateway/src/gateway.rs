//! Backend seams consumed by the session layer.
//!
//! Every catalog call carries the community id and the resolved effective
//! account explicitly; nothing is looked up from ambient state.

use async_trait::async_trait;
use storefront_core::{CartSummary, RawProduct, ResultPage, SearchRequest};

use crate::error::GatewayError;

/// Search, cart, and comparison endpoints of the storefront backend.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn search(
        &self,
        community_id: &str,
        request: &SearchRequest,
        effective_account_id: Option<&str>,
    ) -> Result<ResultPage, GatewayError>;

    async fn cart_summary(
        &self,
        community_id: &str,
        effective_account_id: Option<&str>,
    ) -> Result<CartSummary, GatewayError>;

    async fn add_to_cart(
        &self,
        community_id: &str,
        product_id: &str,
        quantity: u32,
        effective_account_id: Option<&str>,
    ) -> Result<(), GatewayError>;

    /// Full product records for the staged comparison set.
    async fn comparison_products(
        &self,
        community_id: &str,
        effective_account_id: Option<&str>,
    ) -> Result<Vec<RawProduct>, GatewayError>;
}

/// Small external key/value store for transient cross-request state.
#[async_trait]
pub trait ScratchCache: Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<(), GatewayError>;

    /// Returns `None` when the key is not present.
    async fn get(&self, key: &str) -> Result<Option<String>, GatewayError>;

    /// Drops every entry.
    async fn clear(&self) -> Result<(), GatewayError>;
}
