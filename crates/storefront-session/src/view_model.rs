//! Reshapes raw search payloads into view-ready cards.
//!
//! Everything in this module is a total function over its input: missing
//! optional payload parts become empty structures, never errors.

use serde::Serialize;
use storefront_core::{
    parse_price, FieldMapping, RawField, RawImage, RawPrices, RawProduct, ResultPage,
    ResultsLayout,
};

/// Emphasis class of a card's first field.
pub const MEDIUM_HEADING_CLASS: &str = "slds-text-heading_medium";
/// Emphasis class of every field after the first.
pub const SMALL_HEADING_CLASS: &str = "slds-text-heading_small";

/// Fields whose value is shown without a `"{name}: "` label.
const UNLABELLED_FIELDS: [&str; 2] = ["Name", "Description"];

/// A page of cards ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayPage {
    pub total: u64,
    pub page_size: u64,
    pub cards: Vec<DisplayCard>,
}

impl DisplayPage {
    /// `true` when the result set spans more than one page.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        self.total > self.page_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCard {
    pub id: String,
    pub name: String,
    pub image: DisplayImage,
    pub fields: Vec<DisplayField>,
    pub price: DisplayPrice,
    pub has_price: bool,
    pub can_show_listing_price: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayImage {
    pub url: String,
    pub title: String,
    pub alternative_text: String,
}

impl From<RawImage> for DisplayImage {
    fn from(image: RawImage) -> Self {
        Self {
            url: image.url,
            title: image.title,
            alternative_text: image.alternative_text,
        }
    }
}

/// A card field. Only the first field of a card is a tab stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayField {
    /// 1-based position within the card.
    pub id: usize,
    pub tab_index: i8,
    pub emphasis_class: &'static str,
    pub formatted_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayPrice {
    pub listing_price: Option<String>,
    pub negotiated_price: Option<String>,
    pub currency_iso_code: Option<String>,
}

impl DisplayPrice {
    /// The price to show: the negotiated price when set, else the listing price.
    #[must_use]
    pub fn displayed(&self) -> Option<&str> {
        non_empty(self.negotiated_price.as_deref()).or(non_empty(self.listing_price.as_deref()))
    }
}

impl From<RawPrices> for DisplayPrice {
    fn from(prices: RawPrices) -> Self {
        Self {
            listing_price: prices.listing_price,
            negotiated_price: prices.negotiated_price,
            currency_iso_code: prices.currency_iso_code,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Builds the displayed page from a raw result page.
///
/// With a non-empty `field_mapping`, cards show the mapped fields in mapping
/// order; otherwise every product field in payload order. Cards never exceed
/// a positive `page_size`.
#[must_use]
pub fn build(raw: ResultPage, field_mapping: Option<&FieldMapping>) -> DisplayPage {
    let limit = if raw.page_size > 0 {
        usize::try_from(raw.page_size).unwrap_or(usize::MAX)
    } else {
        usize::MAX
    };

    let cards = raw
        .results
        .into_iter()
        .take(limit)
        .map(|product| build_card(product, field_mapping))
        .collect();

    DisplayPage {
        total: raw.total,
        page_size: raw.page_size,
        cards,
    }
}

/// Builds a single card.
#[must_use]
pub fn build_card(product: RawProduct, field_mapping: Option<&FieldMapping>) -> DisplayCard {
    let fields = select_fields(product.fields, field_mapping)
        .into_iter()
        .enumerate()
        .map(|(idx, field)| DisplayField {
            id: idx + 1,
            tab_index: if idx == 0 { 0 } else { -1 },
            emphasis_class: if idx == 0 {
                MEDIUM_HEADING_CLASS
            } else {
                SMALL_HEADING_CLASS
            },
            formatted_value: format_field_value(&field.name, &field.value),
        })
        .collect();

    let price = product.prices.map(DisplayPrice::from).unwrap_or_default();
    let has_price = price.displayed().is_some();
    let can_show_listing_price = can_show_listing_price(
        price.listing_price.as_deref(),
        price.negotiated_price.as_deref(),
    );

    DisplayCard {
        id: product.id,
        name: product.name,
        image: product.image.map(DisplayImage::from).unwrap_or_default(),
        fields,
        price,
        has_price,
        can_show_listing_price,
    }
}

fn select_fields(fields: Vec<RawField>, field_mapping: Option<&FieldMapping>) -> Vec<RawField> {
    match field_mapping.filter(|m| !m.is_empty()) {
        None => fields,
        Some(mapping) => mapping
            .fields
            .iter()
            .filter_map(|mapped| {
                fields
                    .iter()
                    .find(|f| f.name.eq_ignore_ascii_case(&mapped.name))
                    .cloned()
            })
            .collect(),
    }
}

/// `Name` and `Description` show their value alone; everything else is
/// labelled `"{name}: {value}"`.
#[must_use]
pub fn format_field_value(name: &str, value: &str) -> String {
    if UNLABELLED_FIELDS.contains(&name) {
        value.to_owned()
    } else {
        format!("{name}: {value}")
    }
}

/// A struck-through listing price is shown only for a real discount: both
/// prices must parse and the listing price must be strictly higher.
#[must_use]
pub fn can_show_listing_price(listing: Option<&str>, negotiated: Option<&str>) -> bool {
    match (listing.and_then(parse_price), negotiated.and_then(parse_price)) {
        (Some(listing), Some(negotiated)) => listing > negotiated,
        _ => false,
    }
}

/// Summary line above the results, e.g. `"26 - 45 of 45 Items"`.
#[must_use]
pub fn header_text(total: u64, page_size: u64, page: i32) -> String {
    match total {
        0 => String::new(),
        1 => "1 Result".to_owned(),
        _ => {
            let total_i = i64::try_from(total).unwrap_or(i64::MAX);
            let size = i64::try_from(page_size).unwrap_or(i64::MAX);
            let start = (i64::from(page) - 1).saturating_mul(size).saturating_add(1);
            let end = start.saturating_add(size).saturating_sub(1).min(total_i);
            format!("{start} - {end} of {total} Items")
        }
    }
}

/// Class of the element wrapping all cards.
#[must_use]
pub fn container_class(layout: ResultsLayout) -> &'static str {
    match layout {
        ResultsLayout::Grid => "slds-grid slds-wrap slds-gutters layout-grid",
        ResultsLayout::List => "slds-grid slds-grid_vertical layout-list",
    }
}

/// Class of each card.
#[must_use]
pub fn card_class(layout: ResultsLayout) -> &'static str {
    match layout {
        ResultsLayout::Grid => "slds-box card-layout-grid",
        ResultsLayout::List => "card-layout-list",
    }
}
