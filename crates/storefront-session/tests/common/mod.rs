//! Scripted in-memory gateway shared by the session integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use storefront_core::{CartStatus, CartSummary, RawField, RawPrices, RawProduct, ResultPage, SearchRequest};
use storefront_gateway::{CatalogGateway, GatewayError, ScratchCache};
use tokio::sync::oneshot;

pub const COMMUNITY: &str = "0DB1";

pub fn backend_down() -> GatewayError {
    GatewayError::UnexpectedStatus {
        status: 503,
        url: "mock://storefront".to_owned(),
    }
}

pub fn summary(status: &str) -> CartSummary {
    CartSummary {
        status: CartStatus::from(status.to_owned()),
        cart_id: Some("0a6xx01".to_owned()),
        total_product_count: None,
    }
}

pub fn product(id: &str) -> RawProduct {
    RawProduct {
        id: id.to_owned(),
        name: format!("Product {id}"),
        fields: vec![RawField {
            name: "Name".to_owned(),
            value: format!("Product {id}"),
        }],
        image: None,
        prices: Some(RawPrices {
            listing_price: Some("20.00".to_owned()),
            negotiated_price: Some("15.00".to_owned()),
            currency_iso_code: Some("USD".to_owned()),
        }),
    }
}

/// The page the fake returns for a zero-based request page: one product
/// whose id names the page.
pub fn page_for(request_page: i32) -> ResultPage {
    ResultPage {
        total: 100,
        page_size: 10,
        results: vec![product(&format!("page-{request_page}"))],
    }
}

pub struct HeldSearch {
    pub request: SearchRequest,
    pub reply: oneshot::Sender<Result<ResultPage, GatewayError>>,
}

/// Gateway whose every answer is scripted by the test.
///
/// Searches answer immediately with [`page_for`] unless `hold_searches` is
/// set, in which case each call parks until the test replies through
/// [`FakeGateway::take_held`].
#[derive(Default)]
pub struct FakeGateway {
    pub hold_searches: AtomicBool,
    held: Mutex<Vec<HeldSearch>>,
    held_total: AtomicUsize,
    pub search_requests: Mutex<Vec<SearchRequest>>,

    /// Replies for successive cart-summary calls; `Active` once exhausted.
    pub cart_replies: Mutex<VecDeque<Result<CartSummary, GatewayError>>>,
    pub cart_calls: Mutex<Vec<Option<String>>>,

    pub add_to_cart_fails: AtomicBool,
    pub added: Mutex<Vec<(String, u32, Option<String>)>>,

    /// `None` makes the comparison load fail.
    pub comparison: Mutex<Option<Vec<RawProduct>>>,

    pub cache: Mutex<HashMap<String, String>>,
    pub cache_get_fails: AtomicBool,
    pub cache_put_fails: AtomicBool,
    pub cache_clear_fails: AtomicBool,
    pub cache_clears: AtomicUsize,
}

impl FakeGateway {
    pub fn holding() -> Self {
        let gateway = Self::default();
        gateway.hold_searches.store(true, Ordering::SeqCst);
        gateway
    }

    pub fn push_cart_reply(&self, reply: Result<CartSummary, GatewayError>) {
        self.cart_replies.lock().unwrap().push_back(reply);
    }

    pub fn cart_call_count(&self) -> usize {
        self.cart_calls.lock().unwrap().len()
    }

    /// Waits until `count` searches have been parked in total.
    pub async fn wait_for_held(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.held_total.load(Ordering::SeqCst) < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("searches were never issued");
    }

    /// Removes and returns every parked search, in issue order.
    pub fn take_held(&self) -> Vec<HeldSearch> {
        std::mem::take(&mut *self.held.lock().unwrap())
    }
}

#[async_trait]
impl CatalogGateway for FakeGateway {
    async fn search(
        &self,
        _community_id: &str,
        request: &SearchRequest,
        _effective_account_id: Option<&str>,
    ) -> Result<ResultPage, GatewayError> {
        self.search_requests.lock().unwrap().push(request.clone());
        if !self.hold_searches.load(Ordering::SeqCst) {
            return Ok(page_for(request.page));
        }

        let (reply, rx) = oneshot::channel();
        self.held.lock().unwrap().push(HeldSearch {
            request: request.clone(),
            reply,
        });
        self.held_total.fetch_add(1, Ordering::SeqCst);
        rx.await.unwrap_or_else(|_| Err(backend_down()))
    }

    async fn cart_summary(
        &self,
        _community_id: &str,
        effective_account_id: Option<&str>,
    ) -> Result<CartSummary, GatewayError> {
        self.cart_calls
            .lock()
            .unwrap()
            .push(effective_account_id.map(str::to_owned));
        self.cart_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(summary("Active")))
    }

    async fn add_to_cart(
        &self,
        _community_id: &str,
        product_id: &str,
        quantity: u32,
        effective_account_id: Option<&str>,
    ) -> Result<(), GatewayError> {
        if self.add_to_cart_fails.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        self.added.lock().unwrap().push((
            product_id.to_owned(),
            quantity,
            effective_account_id.map(str::to_owned),
        ));
        Ok(())
    }

    async fn comparison_products(
        &self,
        _community_id: &str,
        _effective_account_id: Option<&str>,
    ) -> Result<Vec<RawProduct>, GatewayError> {
        self.comparison.lock().unwrap().clone().ok_or_else(backend_down)
    }
}

#[async_trait]
impl ScratchCache for FakeGateway {
    async fn put(&self, key: &str, value: &str) -> Result<(), GatewayError> {
        if self.cache_put_fails.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        self.cache
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, GatewayError> {
        if self.cache_get_fails.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        Ok(self.cache.lock().unwrap().get(key).cloned())
    }

    async fn clear(&self) -> Result<(), GatewayError> {
        self.cache_clears.fetch_add(1, Ordering::SeqCst);
        if self.cache_clear_fails.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        self.cache.lock().unwrap().clear();
        Ok(())
    }
}
