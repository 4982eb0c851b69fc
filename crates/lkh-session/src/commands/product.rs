//! # Product Commands
//!
//! Catalog listing and search for the shop page.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  User types "air" and picks "Good"                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search_products(&cart, &catalog, "air", "Good")                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  1. Trim + length check on the term       │──► too long? VALIDATION │
//! │  │  2. "All" / "" filter ──► no condition    │                         │
//! │  │  3. Unknown condition ──► VALIDATION      │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Case-insensitive name match, catalog order                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Return Vec<ProductDto> (with "N in cart") for the product grid         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lkh_core::validation::{parse_condition_filter, validate_search_query};
use lkh_core::{Catalog, Product, ProductId, ProductQuery};
use serde::Serialize;
use tracing::debug;

use crate::cart::SharedCart;
use crate::error::ApiError;

/// Product card as rendered by the shop page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub image_url: String,
    pub condition: String,

    /// Units of this product in the session cart; drives the +/- controls.
    pub in_cart: u32,
}

impl ProductDto {
    fn new(product: &Product, in_cart: u32) -> Self {
        ProductDto {
            id: product.id.to_string(),
            name: product.name.clone(),
            price_cents: product.price.cents(),
            image_url: product.image_url.clone(),
            condition: product.condition.label().to_string(),
            in_cart,
        }
    }
}

fn cards<'a>(
    cart: &SharedCart,
    products: impl IntoIterator<Item = &'a Product>,
) -> Result<Vec<ProductDto>, ApiError> {
    products
        .into_iter()
        .map(|p| -> Result<ProductDto, ApiError> {
            Ok(ProductDto::new(p, cart.get_quantity(&p.id)?))
        })
        .collect()
}

/// Every product, in catalog order.
pub fn list_products(cart: &SharedCart, catalog: &Catalog) -> Result<Vec<ProductDto>, ApiError> {
    debug!(count = catalog.len(), "list_products command");
    cards(cart, catalog.products())
}

/// Options for the condition dropdown, starting with "All".
pub fn list_conditions(catalog: &Catalog) -> Vec<String> {
    std::iter::once("All".to_string())
        .chain(catalog.conditions().iter().map(|c| c.label().to_string()))
        .collect()
}

/// Searches the catalog by name and condition.
///
/// ## Arguments
/// * `query` - Name fragment, case-insensitive; empty matches everything
/// * `condition` - Condition label, or `"All"` / empty for no filter
pub fn search_products(
    cart: &SharedCart,
    catalog: &Catalog,
    query: &str,
    condition: &str,
) -> Result<Vec<ProductDto>, ApiError> {
    let term = validate_search_query(query)?;
    let condition = parse_condition_filter(condition)?;

    debug!(query = %term, condition = ?condition, "search_products command");

    let mut product_query = ProductQuery::new(term);
    if let Some(condition) = condition {
        product_query = product_query.with_condition(condition);
    }

    let results = cards(cart, catalog.search(&product_query))?;

    debug!(count = results.len(), "search_products complete");
    Ok(results)
}

/// Gets a single product by id.
///
/// ## Returns
/// The product if found, or a `NOT_FOUND` error
pub fn get_product(
    cart: &SharedCart,
    catalog: &Catalog,
    id: &str,
) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "get_product command");
    let product_id = ProductId::from(id);
    let product = catalog.get(&product_id)?;
    Ok(ProductDto::new(product, cart.get_quantity(&product_id)?))
}

/// Units of one product in the cart; 0 when it is not there.
pub fn get_item_quantity(cart: &SharedCart, product_id: &str) -> Result<u32, ApiError> {
    debug!(product_id = %product_id, "get_item_quantity command");
    Ok(cart.get_quantity(&ProductId::from(product_id))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{decrease_item, increase_item, remove_item};
    use crate::error::ErrorCode;

    fn setup() -> (SharedCart, Catalog) {
        (SharedCart::default(), Catalog::builtin())
    }

    #[test]
    fn test_list_products_keeps_catalog_order() {
        let (cart, catalog) = setup();
        let products = list_products(&cart, &catalog).unwrap();
        assert_eq!(products.len(), 20);
        assert_eq!(products[0].id, "1");
        assert_eq!(products[0].name, "iPhone 14 Pro");
        assert_eq!(products[0].price_cents, 99_900);
        assert!(products.iter().all(|p| p.in_cart == 0));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (cart, catalog) = setup();
        let names: Vec<_> = search_products(&cart, &catalog, "  MACBOOK ", "All")
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Macbook Air 2020",
                "Macbook Air 2017",
                "Macbook Pro 16",
                "Macbook Pro 2020"
            ]
        );
    }

    #[test]
    fn test_search_with_condition_filter() {
        let (cart, catalog) = setup();
        let results = search_products(&cart, &catalog, "macbook", "good").unwrap();
        assert!(results.iter().all(|p| p.condition == "Good"));
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_search_rejects_bad_input() {
        let (cart, catalog) = setup();

        let err = search_products(&cart, &catalog, "", "Refurbished").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let long = "x".repeat(101);
        let err = search_products(&cart, &catalog, &long, "").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_get_product() {
        let (cart, catalog) = setup();
        assert_eq!(get_product(&cart, &catalog, "3").unwrap().name, "Airpods Pro");

        let err = get_product(&cart, &catalog, "999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 999");
    }

    #[test]
    fn test_in_cart_count_follows_cart_changes() {
        let (cart, catalog) = setup();
        let in_cart = |id: &str| get_product(&cart, &catalog, id).unwrap().in_cart;

        increase_item(&cart, &catalog, "3").unwrap();
        increase_item(&cart, &catalog, "3").unwrap();
        increase_item(&cart, &catalog, "16").unwrap();
        assert_eq!(in_cart("3"), 2);
        assert_eq!(get_item_quantity(&cart, "3").unwrap(), 2);

        decrease_item(&cart, &catalog, "3").unwrap();
        assert_eq!(in_cart("3"), 1);

        let airpods = search_products(&cart, &catalog, "airpods pro", "").unwrap();
        assert_eq!(airpods[0].in_cart, 1);

        remove_item(&cart, &catalog, "3").unwrap();
        assert_eq!(in_cart("3"), 0);
        assert_eq!(get_item_quantity(&cart, "3").unwrap(), 0);
        assert_eq!(in_cart("16"), 1);
    }

    #[test]
    fn test_list_conditions_starts_with_all() {
        let conditions = list_conditions(&Catalog::builtin());
        assert_eq!(conditions[0], "All");
        assert!(conditions.contains(&"Fair".to_string()));
    }
}
