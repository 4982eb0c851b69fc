//! # Domain Types
//!
//! Identifiers and catalog records shared by the cart and the catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductId     │   │    Product      │   │   Condition     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  opaque string  │◄──│  id             │   │  New            │       │
//! │  │  "3", "sku-1"   │   │  name           │   │  Excellent      │       │
//! │  │                 │   │  price (Money)  │   │  Good           │       │
//! │  │                 │   │  image_url      │   │  Fair           │       │
//! │  │                 │   │  condition ─────┼──►│                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Opaque Identity
//! The cart keys its ledger by [`ProductId`] and never looks inside it. The
//! catalog happens to use small integers, so `ProductId::from(3u32)` is the
//! id `"3"`, but any string is a valid id as far as the cart is concerned.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Opaque product identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

/// Catalog ids are small integers.
impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id.to_string())
    }
}

// =============================================================================
// Condition
// =============================================================================

/// Condition label shown on each product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Condition {
    New,
    Excellent,
    Good,
    Fair,
}

impl Condition {
    /// All conditions, for building filter menus.
    pub const ALL: [Condition; 4] = [
        Condition::New,
        Condition::Excellent,
        Condition::Good,
        Condition::Fair,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "condition".to_string(),
                allowed: Condition::ALL.iter().map(|c| c.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the store catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier, referenced by cart lines.
    pub id: ProductId,

    /// Display name shown on cards and in the cart.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Image reference, relative to the front end's asset root.
    pub image_url: String,

    /// Condition label.
    pub condition: Condition,
}

impl Product {
    /// Price of `quantity` units of this product.
    #[inline]
    pub fn line_total(&self, quantity: u32) -> Money {
        self.price.multiply_quantity(quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_from_number_is_decimal_text() {
        assert_eq!(ProductId::from(14u32).as_str(), "14");
        assert_eq!(ProductId::from(14u32), ProductId::from("14"));
    }

    #[test]
    fn test_product_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::from("sku-1")).unwrap();
        assert_eq!(json, "\"sku-1\"");
    }

    #[test]
    fn test_condition_parsing() {
        assert_eq!("new".parse::<Condition>().unwrap(), Condition::New);
        assert_eq!(" Fair ".parse::<Condition>().unwrap(), Condition::Fair);
        assert!("mint".parse::<Condition>().is_err());
    }

    #[test]
    fn test_line_total() {
        let product = Product {
            id: ProductId::from(16u32),
            name: "Hoodie".to_string(),
            price: Money::from_major(67),
            image_url: "/images/navyhoodie.jpg".to_string(),
            condition: Condition::New,
        };
        assert_eq!(product.line_total(3).cents(), 20_100);
    }
}
