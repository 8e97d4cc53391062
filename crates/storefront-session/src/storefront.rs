//! Wires the session components to one gateway and one account scope.

use std::sync::Arc;

use serde::Serialize;
use storefront_core::{AppConfig, FieldMapping, ResultsLayout};
use storefront_gateway::{CatalogGateway, ScratchCache};

use crate::account::AccountScope;
use crate::cart::CartTracker;
use crate::comparison::ComparisonSession;
use crate::coordinator::{SearchCoordinator, SearchOutcome};
use crate::error::SessionError;
use crate::events::{EventSink, StorefrontEvent};
use crate::view_model::{card_class, container_class, DisplayPage};

/// Construction parameters for a [`Storefront`].
#[derive(Debug, Clone)]
pub struct StorefrontSettings {
    pub community_id: String,
    /// Raw account id; normalized on construction.
    pub effective_account_id: Option<String>,
    pub landing_category_id: Option<String>,
    pub field_mapping: Option<FieldMapping>,
    pub layout: ResultsLayout,
    pub comparison_cap: usize,
}

impl StorefrontSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig, field_mapping: Option<FieldMapping>) -> Self {
        Self {
            community_id: config.community_id.clone(),
            effective_account_id: config.effective_account_id.clone(),
            landing_category_id: config.landing_category_id.clone(),
            field_mapping,
            layout: config.results_layout,
            comparison_cap: config.comparison_cap,
        }
    }
}

/// Everything a results view renders, read consistently from each owner.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub page: Option<DisplayPage>,
    pub header_text: String,
    pub has_more_pages: bool,
    pub has_previous_page: bool,
    pub loading: bool,
    /// Add-to-cart buttons are disabled while the cart is locked.
    pub actions_disabled: bool,
    pub container_class: &'static str,
    pub card_class: &'static str,
}

pub struct Storefront {
    account: AccountScope,
    layout: ResultsLayout,
    events: EventSink,
    search: SearchCoordinator,
    cart: CartTracker,
    comparison: ComparisonSession,
}

impl Storefront {
    pub fn new<G>(gateway: Arc<G>, settings: StorefrontSettings, events: EventSink) -> Self
    where
        G: CatalogGateway + ScratchCache + 'static,
    {
        let account = AccountScope::new(settings.effective_account_id.as_deref());
        let catalog: Arc<dyn CatalogGateway> = gateway.clone();
        let cache: Arc<dyn ScratchCache> = gateway;

        let search = SearchCoordinator::new(
            Arc::clone(&catalog),
            settings.community_id.clone(),
            account.clone(),
            settings.field_mapping.clone(),
            settings.landing_category_id,
        );
        let cart = CartTracker::new(
            Arc::clone(&catalog),
            settings.community_id.clone(),
            account.clone(),
            events.clone(),
        );
        let comparison = ComparisonSession::new(
            catalog,
            cache,
            settings.community_id,
            account.clone(),
            settings.comparison_cap,
            settings.field_mapping,
        );

        Self {
            account,
            layout: settings.layout,
            events,
            search,
            cart,
            comparison,
        }
    }

    /// Initial load: the cart summary, then the first search.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Gateway`] if the first search fails. Cart
    /// summary failures are logged only.
    pub async fn mount(&self) -> Result<SearchOutcome, SessionError> {
        self.cart.refresh().await;
        self.search.search().await
    }

    /// Updates the effective account from the raw host value. Refreshes the
    /// cart summary when the resolved account changes; returns whether it did.
    pub async fn set_effective_account(&self, raw: Option<&str>) -> bool {
        if !self.account.set_raw(raw) {
            return false;
        }
        tracing::info!(
            has_account = self.account.current().is_some(),
            "effective account changed"
        );
        self.cart.refresh().await;
        true
    }

    #[must_use]
    pub fn account(&self) -> &AccountScope {
        &self.account
    }

    #[must_use]
    pub fn search(&self) -> &SearchCoordinator {
        &self.search
    }

    #[must_use]
    pub fn cart(&self) -> &CartTracker {
        &self.cart
    }

    #[must_use]
    pub fn comparison(&self) -> &ComparisonSession {
        &self.comparison
    }

    /// A card asked to show its product detail.
    pub fn show_detail(&self, product_id: &str) {
        self.events.emit(StorefrontEvent::ShowDetail {
            product_id: product_id.to_owned(),
        });
    }

    /// A card's call-to-action was pressed: announce it, then add one unit
    /// to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::CartLocked`] without calling the backend while
    /// the cart is locked, or [`SessionError::Gateway`] if the add fails.
    pub async fn call_to_action(
        &self,
        product_id: &str,
        product_name: &str,
    ) -> Result<(), SessionError> {
        self.events.emit(StorefrontEvent::CallToAction {
            product_id: product_id.to_owned(),
            product_name: product_name.to_owned(),
        });
        if self.cart.is_locked().await {
            tracing::warn!(product_id, "cart is locked; ignoring add to cart");
            return Err(SessionError::CartLocked);
        }
        self.cart.add_to_cart(product_id, product_name, 1).await
    }

    pub async fn results_view(&self) -> ResultsView {
        let snapshot = self.search.snapshot().await;
        let actions_disabled = self.cart.is_locked().await;
        ResultsView {
            header_text: snapshot.header_text(),
            has_more_pages: snapshot.has_more_pages(),
            has_previous_page: snapshot.has_previous_page(),
            loading: snapshot.loading,
            actions_disabled,
            container_class: container_class(self.layout),
            card_class: card_class(self.layout),
            page: snapshot.display,
        }
    }
}
