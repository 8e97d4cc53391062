pub mod client;
pub mod error;
pub mod gateway;

pub use client::StorefrontClient;
pub use error::GatewayError;
pub use gateway::{CatalogGateway, ScratchCache};
