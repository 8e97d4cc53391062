//! Search query state and raw catalog payload types.
//!
//! ## Observed payload shape
//!
//! ### Results
//! The search endpoint has shipped the product list both as `results` and as
//! `products`; both are accepted. `total` counts every match across pages,
//! `pageSize` is the page length the backend applied.
//!
//! ### Fields
//! Card fields arrive as an ordered list of `{name, value}` pairs. Values are
//! usually strings but numeric and boolean custom fields come back as bare
//! JSON scalars, so every value is read as text.
//!
//! ### Prices
//! Present only when the query asked for prices. `listingPrice` and
//! `negotiatedPrice` are decimal strings (`"12.00"`) on current backends and
//! bare numbers on older ones. Either may be absent or empty.
//!
//! ### Image
//! Sent as `image` or `defaultImage`; absent for products without media.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A single facet filter applied to a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refinement {
    /// Facet name or id, e.g. `"Color__c"`.
    pub name_or_id: String,
    /// Facet kind as reported by the backend (e.g. `"DistinctValue"`).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
    /// Selected values for this facet.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Query parameters owned by the search coordinator.
///
/// `page` is 1-based and never clamped by the coordinator; callers gate
/// navigation on `page > 1` and `has_more_pages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub term: Option<String>,
    pub category_id: Option<String>,
    pub refinements: Vec<Refinement>,
    pub page: i32,
    pub include_prices: bool,
    pub include_quantity_rule: bool,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            term: None,
            category_id: None,
            refinements: Vec::new(),
            page: 1,
            include_prices: true,
            include_quantity_rule: true,
        }
    }
}

impl Query {
    /// A first-page query scoped to the category the results view landed on.
    #[must_use]
    pub fn landing(category_id: Option<String>) -> Self {
        Self {
            category_id,
            ..Self::default()
        }
    }

    /// Builds the wire request. The backend pages from zero.
    #[must_use]
    pub fn to_search_request(&self) -> SearchRequest {
        SearchRequest {
            search_term: self.term.clone(),
            category_id: self.category_id.clone(),
            refinements: self.refinements.clone(),
            page: self.page.saturating_sub(1),
            include_prices: self.include_prices,
            include_quantity_rule: self.include_quantity_rule,
        }
    }
}

/// JSON body sent to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub refinements: Vec<Refinement>,
    /// Zero-based page index.
    pub page: i32,
    pub include_prices: bool,
    pub include_quantity_rule: bool,
}

/// One page of search results exactly as the backend returned it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page_size: u64,
    #[serde(default, alias = "products")]
    pub results: Vec<RawProduct>,
}

/// Response of the comparison-products endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonProducts {
    #[serde(default)]
    pub products: Vec<RawProduct>,
}

/// A product as returned by search or comparison endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<RawField>,
    #[serde(default, alias = "defaultImage")]
    pub image: Option<RawImage>,
    #[serde(default)]
    pub prices: Option<RawPrices>,
}

/// A named card field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawField {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub alternative_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrices {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub listing_price: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub negotiated_price: Option<String>,
    #[serde(default)]
    pub currency_iso_code: Option<String>,
}

/// Parses a backend price string into a decimal, ignoring surrounding
/// whitespace. Returns `None` for empty or non-numeric input.
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Decimal>().ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarText {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl From<ScalarText> for String {
    fn from(value: ScalarText) -> Self {
        match value {
            ScalarText::Text(s) => s,
            ScalarText::Number(n) => n.to_string(),
            ScalarText::Bool(b) => b.to_string(),
        }
    }
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ScalarText>::deserialize(deserializer)?.map(String::from))
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn search_request_is_zero_based() {
        let query = Query {
            page: 3,
            ..Query::default()
        };
        assert_eq!(query.to_search_request().page, 2);
    }

    #[test]
    fn search_request_page_saturates_at_extremes() {
        let lowest = Query {
            page: i32::MIN,
            ..Query::default()
        };
        assert_eq!(lowest.to_search_request().page, i32::MIN);

        let highest = Query {
            page: i32::MAX,
            ..Query::default()
        };
        assert_eq!(highest.to_search_request().page, i32::MAX - 1);
    }

    #[test]
    fn search_request_serializes_camel_case_and_omits_empty_term() {
        let query = Query {
            category_id: Some("0ZGxx01".to_owned()),
            refinements: vec![Refinement {
                name_or_id: "Color__c".to_owned(),
                kind: "DistinctValue".to_owned(),
                attribute_type: None,
                values: vec!["Red".to_owned()],
            }],
            ..Query::default()
        };
        let body = serde_json::to_value(query.to_search_request()).unwrap();
        assert_eq!(
            body,
            json!({
                "categoryId": "0ZGxx01",
                "refinements": [{
                    "nameOrId": "Color__c",
                    "type": "DistinctValue",
                    "values": ["Red"]
                }],
                "page": 0,
                "includePrices": true,
                "includeQuantityRule": true
            })
        );
    }

    #[test]
    fn result_page_accepts_products_alias() {
        let page: ResultPage = serde_json::from_value(json!({
            "total": 1,
            "pageSize": 20,
            "products": [{ "id": "01t1", "name": "Widget" }]
        }))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, "01t1");
    }

    #[test]
    fn raw_product_defaults_missing_optionals() {
        let product: RawProduct = serde_json::from_value(json!({ "id": "01t2" })).unwrap();
        assert!(product.name.is_empty());
        assert!(product.fields.is_empty());
        assert!(product.image.is_none());
        assert!(product.prices.is_none());
    }

    #[test]
    fn raw_product_reads_default_image_alias() {
        let product: RawProduct = serde_json::from_value(json!({
            "id": "01t3",
            "defaultImage": { "url": "/img/a.png", "alternativeText": "A" }
        }))
        .unwrap();
        let image = product.image.unwrap();
        assert_eq!(image.url, "/img/a.png");
        assert_eq!(image.alternative_text, "A");
        assert!(image.title.is_empty());
    }

    #[test]
    fn scalar_field_values_are_read_as_text() {
        let product: RawProduct = serde_json::from_value(json!({
            "id": "01t4",
            "fields": [
                { "name": "Weight", "value": 12.5 },
                { "name": "Active", "value": true },
                { "name": "Notes", "value": null }
            ]
        }))
        .unwrap();
        assert_eq!(product.fields[0].value, "12.5");
        assert_eq!(product.fields[1].value, "true");
        assert_eq!(product.fields[2].value, "");
    }

    #[test]
    fn numeric_prices_are_read_as_text() {
        let prices: RawPrices = serde_json::from_value(json!({
            "listingPrice": 20,
            "negotiatedPrice": "15.50",
            "currencyIsoCode": "USD"
        }))
        .unwrap();
        assert_eq!(prices.listing_price.as_deref(), Some("20"));
        assert_eq!(prices.negotiated_price.as_deref(), Some("15.50"));
    }

    #[test]
    fn parse_price_handles_blank_and_garbage() {
        assert_eq!(parse_price("  "), None);
        assert_eq!(parse_price("n/a"), None);
        assert_eq!(parse_price(" 12.00 "), Some(Decimal::new(1200, 2)));
    }
}
