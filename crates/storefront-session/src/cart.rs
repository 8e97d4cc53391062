//! Cart state tracking.
//!
//! The summary is refetched whole, never merged. A failed refresh keeps the
//! last known summary so cart errors never block the results view.

use std::sync::Arc;

use storefront_core::CartSummary;
use storefront_gateway::CatalogGateway;
use tokio::sync::Mutex;

use crate::account::AccountScope;
use crate::error::SessionError;
use crate::events::{EventSink, StorefrontEvent, Toast};

pub struct CartTracker {
    gateway: Arc<dyn CatalogGateway>,
    community_id: String,
    account: AccountScope,
    events: EventSink,
    summary: Mutex<Option<CartSummary>>,
}

impl CartTracker {
    pub fn new(
        gateway: Arc<dyn CatalogGateway>,
        community_id: impl Into<String>,
        account: AccountScope,
        events: EventSink,
    ) -> Self {
        Self {
            gateway,
            community_id: community_id.into(),
            account,
            events,
            summary: Mutex::new(None),
        }
    }

    /// Fetches the cart summary and replaces the stored one.
    ///
    /// On failure the error is logged and the previous summary is kept.
    /// Returns whatever summary is current afterwards.
    pub async fn refresh(&self) -> Option<CartSummary> {
        let account = self.account.current();
        match self
            .gateway
            .cart_summary(&self.community_id, account.as_deref())
            .await
        {
            Ok(summary) => {
                tracing::debug!(status = %summary.status, "cart summary refreshed");
                let mut current = self.summary.lock().await;
                *current = Some(summary.clone());
                Some(summary)
            }
            Err(e) => {
                tracing::warn!(error = %e, "cart summary refresh failed; keeping last known summary");
                self.summary.lock().await.clone()
            }
        }
    }

    pub async fn summary(&self) -> Option<CartSummary> {
        self.summary.lock().await.clone()
    }

    /// `true` while the known cart is processing or in checkout. An unknown
    /// cart is not locked.
    pub async fn is_locked(&self) -> bool {
        self.summary
            .lock()
            .await
            .as_ref()
            .is_some_and(CartSummary::is_locked)
    }

    /// Adds `quantity` of a product to the cart.
    ///
    /// On success emits `cartchanged` and a success toast, then refreshes the
    /// summary. On failure emits an error toast naming the product. Never
    /// retries.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Gateway`] if the backend rejects the add.
    pub async fn add_to_cart(
        &self,
        product_id: &str,
        product_name: &str,
        quantity: u32,
    ) -> Result<(), SessionError> {
        let account = self.account.current();
        match self
            .gateway
            .add_to_cart(&self.community_id, product_id, quantity, account.as_deref())
            .await
        {
            Ok(()) => {
                tracing::info!(product_id, quantity, "added product to cart");
                self.events.emit(StorefrontEvent::CartChanged);
                self.events
                    .emit(StorefrontEvent::Toast(Toast::cart_updated()));
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(product_id, error = %e, "add to cart failed");
                self.events
                    .emit(StorefrontEvent::Toast(Toast::add_to_cart_failed(product_name)));
                Err(e.into())
            }
        }
    }
}
