//! Catalog endpoints: search, cart summary, add-to-cart, comparison set.

use async_trait::async_trait;
use serde::Serialize;
use storefront_core::{CartSummary, ComparisonProducts, RawProduct, ResultPage, SearchRequest};

use super::StorefrontClient;
use crate::error::GatewayError;
use crate::gateway::CatalogGateway;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartBody<'a> {
    product_id: &'a str,
    quantity: u32,
}

/// Rejects pages that break the invariants the view layer relies on.
fn validate_result_page(page: &ResultPage, context: &str) -> Result<(), GatewayError> {
    if page.page_size > 0 && page.results.len() as u64 > page.page_size {
        return Err(GatewayError::InvalidPayload {
            context: context.to_owned(),
            reason: format!(
                "{} results exceed page size {}",
                page.results.len(),
                page.page_size
            ),
        });
    }
    validate_products(&page.results, context)
}

fn validate_products(products: &[RawProduct], context: &str) -> Result<(), GatewayError> {
    if let Some(idx) = products.iter().position(|p| p.id.trim().is_empty()) {
        return Err(GatewayError::InvalidPayload {
            context: context.to_owned(),
            reason: format!("product at index {idx} has an empty id"),
        });
    }
    Ok(())
}

#[async_trait]
impl CatalogGateway for StorefrontClient {
    async fn search(
        &self,
        community_id: &str,
        request: &SearchRequest,
        effective_account_id: Option<&str>,
    ) -> Result<ResultPage, GatewayError> {
        let url = self.endpoint(
            &["communities", community_id, "search"],
            effective_account_id,
        );
        let context = format!("search(page={})", request.page);
        tracing::debug!(%url, page = request.page, "storefront search");

        let response = self.client.post(url.clone()).json(request).send().await?;
        let page: ResultPage = Self::read_json(response, &url, &context).await?;
        validate_result_page(&page, &context)?;
        Ok(page)
    }

    async fn cart_summary(
        &self,
        community_id: &str,
        effective_account_id: Option<&str>,
    ) -> Result<CartSummary, GatewayError> {
        let url = self.endpoint(
            &["communities", community_id, "cart-summary"],
            effective_account_id,
        );
        let response = self.client.get(url.clone()).send().await?;
        Self::read_json(response, &url, "cart-summary").await
    }

    async fn add_to_cart(
        &self,
        community_id: &str,
        product_id: &str,
        quantity: u32,
        effective_account_id: Option<&str>,
    ) -> Result<(), GatewayError> {
        let url = self.endpoint(
            &["communities", community_id, "cart", "items"],
            effective_account_id,
        );
        let body = AddToCartBody {
            product_id,
            quantity,
        };
        let response = self.client.post(url.clone()).json(&body).send().await?;
        Self::check_status(&response, &url)
    }

    async fn comparison_products(
        &self,
        community_id: &str,
        effective_account_id: Option<&str>,
    ) -> Result<Vec<RawProduct>, GatewayError> {
        let url = self.endpoint(
            &["communities", community_id, "comparison-products"],
            effective_account_id,
        );
        let response = self.client.get(url.clone()).send().await?;
        let payload: ComparisonProducts =
            Self::read_json(response, &url, "comparison-products").await?;
        validate_products(&payload.products, "comparison-products")?;
        Ok(payload.products)
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::RawProduct;

    use super::*;

    fn product(id: &str) -> RawProduct {
        RawProduct {
            id: id.to_owned(),
            ..RawProduct::default()
        }
    }

    #[test]
    fn page_within_page_size_is_valid() {
        let page = ResultPage {
            total: 2,
            page_size: 2,
            results: vec![product("a"), product("b")],
        };
        assert!(validate_result_page(&page, "test").is_ok());
    }

    #[test]
    fn page_exceeding_page_size_is_rejected() {
        let page = ResultPage {
            total: 3,
            page_size: 2,
            results: vec![product("a"), product("b"), product("c")],
        };
        let err = validate_result_page(&page, "test").unwrap_err();
        assert!(
            matches!(err, GatewayError::InvalidPayload { ref reason, .. } if reason.contains("exceed page size 2")),
            "expected InvalidPayload, got: {err:?}"
        );
    }

    #[test]
    fn zero_page_size_skips_the_length_check() {
        let page = ResultPage {
            total: 1,
            page_size: 0,
            results: vec![product("a")],
        };
        assert!(validate_result_page(&page, "test").is_ok());
    }

    #[test]
    fn blank_product_id_is_rejected() {
        let err = validate_products(&[product("a"), product(" ")], "test").unwrap_err();
        assert!(
            matches!(err, GatewayError::InvalidPayload { ref reason, .. } if reason.contains("index 1")),
            "expected InvalidPayload, got: {err:?}"
        );
    }
}
