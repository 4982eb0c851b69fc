//! # Cart Commands
//!
//! Cart manipulation for the shop page and cart drawer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  increase_item  ┌──────────┐  decrease_item (qty 1)      │
//! │  │  Empty   │────────────────►│ In Cart  │─────────────────────┐       │
//! │  │  Cart    │                 │          │  remove_item         │       │
//! │  └──────────┘                 └──────────┘─────────────────────┤       │
//! │       ▲                         │    ▲                          │       │
//! │       │                increase_item / decrease_item            │       │
//! │       │                         └────┘                          │       │
//! │       │                                                         │       │
//! │       └──────────────── clear_cart / last line gone ◄───────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command answers with the whole cart so the caller can re-render
//! from a single value.

use lkh_core::{CartSummary, Catalog, ProductId, SummaryLine};
use serde::Serialize;
use tracing::debug;

use crate::cart::SharedCart;
use crate::error::ApiError;

/// One rendered cart line.
///
/// Everything but `product_id` and `quantity` is absent when the product id
/// is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub product_id: String,
    pub quantity: u32,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub condition: Option<String>,
    pub unit_price_cents: Option<i64>,
    pub subtotal_cents: Option<i64>,
}

impl From<&SummaryLine> for CartItemDto {
    fn from(line: &SummaryLine) -> Self {
        match line {
            SummaryLine::Resolved {
                product,
                quantity,
                subtotal,
            } => CartItemDto {
                product_id: product.id.to_string(),
                quantity: *quantity,
                name: Some(product.name.clone()),
                image_url: Some(product.image_url.clone()),
                condition: Some(product.condition.label().to_string()),
                unit_price_cents: Some(product.price.cents()),
                subtotal_cents: Some(subtotal.cents()),
            },
            SummaryLine::Unresolved {
                product_id,
                quantity,
            } => CartItemDto {
                product_id: product_id.to_string(),
                quantity: *quantity,
                name: None,
                image_url: None,
                condition: None,
                unit_price_cents: None,
                subtotal_cents: None,
            },
        }
    }
}

/// Cart totals for the header badge and checkout footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines.
    pub item_count: usize,

    /// Units across all lines; drives the cart badge.
    pub total_quantity: u64,

    /// Sum of resolved subtotals.
    pub total_price_cents: i64,

    /// Lines with no product behind them.
    pub unresolved_count: usize,
}

impl From<&CartSummary> for CartTotals {
    fn from(summary: &CartSummary) -> Self {
        CartTotals {
            item_count: summary.lines().len(),
            total_quantity: summary.total_quantity(),
            total_price_cents: summary.total_price().cents(),
            unresolved_count: summary.unresolved().count(),
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItemDto>,
    pub totals: CartTotals,
}

impl From<&CartSummary> for CartResponse {
    fn from(summary: &CartSummary) -> Self {
        CartResponse {
            items: summary.lines().iter().map(CartItemDto::from).collect(),
            totals: CartTotals::from(summary),
        }
    }
}

fn respond(cart: &SharedCart, catalog: &Catalog) -> Result<CartResponse, ApiError> {
    let summary = cart.summary(catalog)?;
    Ok(CartResponse::from(&summary))
}

/// Gets the current cart contents.
pub fn get_cart(cart: &SharedCart, catalog: &Catalog) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    respond(cart, catalog)
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Product already in cart: quantity goes up by one
/// - Product not in cart: appended as a new line with quantity 1
/// - Configured ceilings refuse the increase with `CART_LIMIT`
pub fn increase_item(
    cart: &SharedCart,
    catalog: &Catalog,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "increase_item command");
    cart.increase(&ProductId::from(product_id))?;
    respond(cart, catalog)
}

/// Takes one unit away; the line disappears when it reaches zero.
pub fn decrease_item(
    cart: &SharedCart,
    catalog: &Catalog,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "decrease_item command");
    cart.decrease(&ProductId::from(product_id))?;
    respond(cart, catalog)
}

/// Drops a line whatever its quantity.
pub fn remove_item(
    cart: &SharedCart,
    catalog: &Catalog,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_item command");
    cart.remove(&ProductId::from(product_id))?;
    respond(cart, catalog)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &SharedCart, catalog: &Catalog) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    cart.clear()?;
    respond(cart, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use lkh_core::CartLimits;

    fn setup() -> (SharedCart, Catalog) {
        (SharedCart::default(), Catalog::builtin())
    }

    #[test]
    fn test_empty_cart() {
        let (cart, catalog) = setup();
        let response = get_cart(&cart, &catalog).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(
            response.totals,
            CartTotals {
                item_count: 0,
                total_quantity: 0,
                total_price_cents: 0,
                unresolved_count: 0,
            }
        );
    }

    #[test]
    fn test_increase_and_totals() {
        let (cart, catalog) = setup();
        increase_item(&cart, &catalog, "3").unwrap();
        increase_item(&cart, &catalog, "3").unwrap();
        let response = increase_item(&cart, &catalog, "16").unwrap();

        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].name.as_deref(), Some("Airpods Pro"));
        assert_eq!(response.items[0].quantity, 2);
        assert_eq!(response.items[0].subtotal_cents, Some(60_000));
        assert_eq!(response.items[0].condition.as_deref(), Some("Good"));
        assert_eq!(response.items[1].condition.as_deref(), Some("New"));
        assert_eq!(response.totals.total_quantity, 3);
        assert_eq!(response.totals.total_price_cents, 66_700);
    }

    #[test]
    fn test_decrease_to_zero_drops_line() {
        let (cart, catalog) = setup();
        increase_item(&cart, &catalog, "5").unwrap();
        let response = decrease_item(&cart, &catalog, "5").unwrap();
        assert!(response.items.is_empty());

        // Absent id is a no-op, not an error
        let response = decrease_item(&cart, &catalog, "5").unwrap();
        assert_eq!(response.totals.total_quantity, 0);
    }

    #[test]
    fn test_remove_and_clear() {
        let (cart, catalog) = setup();
        increase_item(&cart, &catalog, "1").unwrap();
        increase_item(&cart, &catalog, "1").unwrap();
        increase_item(&cart, &catalog, "2").unwrap();

        let response = remove_item(&cart, &catalog, "1").unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].product_id, "2");

        let response = clear_cart(&cart, &catalog).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_unknown_product_is_unresolved() {
        let (cart, catalog) = setup();
        let response = increase_item(&cart, &catalog, "sku-404").unwrap();

        assert_eq!(response.totals.unresolved_count, 1);
        assert_eq!(response.totals.total_quantity, 1);
        assert_eq!(response.totals.total_price_cents, 0);
        assert_eq!(response.items[0].name, None);
        assert_eq!(response.items[0].condition, None);
    }

    #[test]
    fn test_limit_maps_to_cart_limit_code() {
        let limits = CartLimits {
            max_line_quantity: None,
            max_lines: Some(1),
        };
        let cart = SharedCart::new(limits, 8);
        let catalog = Catalog::builtin();

        increase_item(&cart, &catalog, "1").unwrap();
        let err = increase_item(&cart, &catalog, "2").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartLimit);
        assert_eq!(get_cart(&cart, &catalog).unwrap().totals.item_count, 1);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let (cart, catalog) = setup();
        let response = increase_item(&cart, &catalog, "4").unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totals"]["totalPriceCents"], 19_000);
        assert_eq!(json["items"][0]["unitPriceCents"], 19_000);
        assert_eq!(json["items"][0]["productId"], "4");
        assert_eq!(json["items"][0]["condition"], "Fair");
    }
}
