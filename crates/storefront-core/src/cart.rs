use serde::{Deserialize, Serialize};

/// Lifecycle status of the buyer's active cart.
///
/// Only the two states that lock the cart are modelled explicitly; every
/// other backend status is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CartStatus {
    Processing,
    Checkout,
    Other(String),
}

impl From<String> for CartStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Processing" => Self::Processing,
            "Checkout" => Self::Checkout,
            _ => Self::Other(value),
        }
    }
}

impl From<CartStatus> for String {
    fn from(value: CartStatus) -> Self {
        match value {
            CartStatus::Processing => "Processing".to_owned(),
            CartStatus::Checkout => "Checkout".to_owned(),
            CartStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartStatus::Processing => write!(f, "Processing"),
            CartStatus::Checkout => write!(f, "Checkout"),
            CartStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Summary of the buyer's active cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub status: CartStatus,
    #[serde(default)]
    pub cart_id: Option<String>,
    /// Item count as the backend formats it.
    #[serde(default)]
    pub total_product_count: Option<String>,
}

impl CartSummary {
    /// `true` while the cart is being processed or is in checkout; add-to-cart
    /// actions must be disabled in that window.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.status, CartStatus::Processing | CartStatus::Checkout)
    }
}
