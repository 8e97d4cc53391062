//! Cart command handlers.

use storefront_session::Storefront;

pub(crate) async fn run_cart(storefront: &Storefront) -> anyhow::Result<()> {
    match storefront.cart().refresh().await {
        Some(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        None => anyhow::bail!("cart summary is unavailable"),
    }
}

/// Adds `quantity` units of a product, refusing while the cart is locked.
///
/// # Errors
///
/// Returns an error if the cart is locked or the backend rejects the add.
pub(crate) async fn run_add_to_cart(
    storefront: &Storefront,
    product_id: &str,
    product_name: &str,
    quantity: u32,
) -> anyhow::Result<()> {
    let cart = storefront.cart();
    cart.refresh().await;
    if cart.is_locked().await {
        anyhow::bail!("cart is locked; cannot add {product_id}");
    }
    cart.add_to_cart(product_id, product_name, quantity).await?;
    Ok(())
}
