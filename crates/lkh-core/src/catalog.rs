//! # Catalog
//!
//! The static, read-only product list the store sells from.
//!
//! ## Who Uses What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Consumers                               │
//! │                                                                         │
//! │  Shop page ────────► search(term, condition) ──► product cards         │
//! │  Best sellers ─────► products()              ──► full list, in order   │
//! │  Cart page ────────► find_product(id)        ──► CartSummary join      │
//! │                                                                         │
//! │  The cart ledger itself never calls into the catalog.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Condition, Product, ProductId};

/// Shop page search input.
///
/// An empty term matches every product; `condition: None` is the "All"
/// filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub term: String,
    pub condition: Option<Condition>,
}

impl ProductQuery {
    pub fn new(term: impl Into<String>) -> Self {
        ProductQuery {
            term: term.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    fn matches(&self, product: &Product, needle: &str) -> bool {
        product.name.to_lowercase().contains(needle)
            && self.condition.map_or(true, |c| product.condition == c)
    }
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The store's built-in product list.
    pub fn builtin() -> Self {
        let products = BUILTIN
            .iter()
            .map(|&(id, name, condition, price, image)| Product {
                id: ProductId::from(id),
                name: name.to_string(),
                price: Money::from_major(price),
                image_url: image.to_string(),
                condition,
            })
            .collect();
        Catalog { products }
    }

    /// Looks a product up by id.
    pub fn find_product(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == product_id)
    }

    /// Like [`find_product`](Self::find_product), but a miss is an error.
    pub fn get(&self, product_id: &ProductId) -> CoreResult<&Product> {
        self.find_product(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.clone()))
    }

    /// Every product, in list order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose name contains the term (case-insensitive) and whose
    /// condition matches the filter, in list order.
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let needle = query.term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| query.matches(p, &needle))
            .collect()
    }

    /// Distinct conditions in first-seen order, for the filter menu.
    pub fn conditions(&self) -> Vec<Condition> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.condition) {
                seen.push(product.condition);
            }
        }
        seen
    }
}

// (id, name, condition, price in dollars, image)
const BUILTIN: &[(u32, &str, Condition, i64, &str)] = &[
    (1, "iPhone 14 Pro", Condition::New, 999, "/images/iphone14pro.jpg"),
    (2, "Macbook Air 2020", Condition::Fair, 1222, "/images/macbookblack.jpg"),
    (3, "Airpods Pro", Condition::Good, 300, "/images/airpodspro.jpg"),
    (4, "Apple Watch Series 3", Condition::Fair, 190, "/images/applewatch3.jpg"),
    (5, "Macbook Air 2017", Condition::Good, 300, "/images/macbook2017.jpg"),
    (6, "Airpods 3", Condition::Fair, 120, "/images/airpods3.jpg"),
    (7, "Macbook Pro 16", Condition::Good, 2200, "/images/mbp16.jpg"),
    (8, "Air Jordan 1", Condition::New, 356, "/images/aj1blue.jpg"),
    (9, "AP Royal Oak", Condition::New, 120_000, "/images/apgold.jpg"),
    (10, "AP Classic", Condition::Good, 300_000, "/images/apsilver.jpg"),
    (11, "AJ 14", Condition::New, 300, "/images/aj14yellow.jpg"),
    (12, "Apple Watch Ultra", Condition::Fair, 459, "/images/applewatchultra.jpg"),
    (13, "Classic Watch", Condition::Good, 300, "/images/classicwatch.jpg"),
    (14, "iPhone 14 Pro Max", Condition::Good, 1099, "/images/iphone14promaxgold.jpg"),
    (15, "Macbook Pro 2020", Condition::Good, 1099, "/images/macbookpro2020.jpg"),
    (16, "Hoodie", Condition::New, 67, "/images/navyhoodie.jpg"),
    (17, "AJ 23", Condition::Fair, 87, "/images/nikeboot.jpg"),
    (18, "Samsung S23 Ultra", Condition::Excellent, 1200, "/images/samsungs23ultra.jpg"),
    (19, "Samsung Galaxy Watch", Condition::Good, 156, "/images/samsungwatch.jpg"),
    (20, "iPhone 15 Pro Max", Condition::New, 1199, "/images/iphone15promax.jpg"),
];

// =============================================================================
// Unit Tests
// =============================================================================
