use storefront_gateway::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The cart is processing or in checkout; cart mutations are disabled.
    #[error("cart is locked while processing or in checkout")]
    CartLocked,
}
