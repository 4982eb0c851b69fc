//! # Cart Summary
//!
//! Joins the cart ledger against the catalog for display and totals.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartLine { "3", qty 2 } ──► find_product("3") ──► Resolved            │
//! │                                  │                  subtotal = 2 × $300 │
//! │                                  │                                      │
//! │  CartLine { "sku-1", qty 1 } ────┴─── not found ──► Unresolved          │
//! │                                                     counted in qty,     │
//! │                                                     not in price        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger accepts ids without checking the catalog, so a line may have
//! no product behind it. That line is reported as [`SummaryLine::Unresolved`]
//! rather than silently dropped. Front ends decide how to show it.

use serde::Serialize;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::{Product, ProductId};

/// One cart line after the catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SummaryLine {
    Resolved {
        product: Product,
        quantity: u32,
        subtotal: Money,
    },
    #[serde(rename_all = "camelCase")]
    Unresolved { product_id: ProductId, quantity: u32 },
}

impl SummaryLine {
    pub fn product_id(&self) -> &ProductId {
        match self {
            SummaryLine::Resolved { product, .. } => &product.id,
            SummaryLine::Unresolved { product_id, .. } => product_id,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            SummaryLine::Resolved { quantity, .. } | SummaryLine::Unresolved { quantity, .. } => {
                *quantity
            }
        }
    }

    /// Line subtotal; `None` when the product is unknown.
    pub fn subtotal(&self) -> Option<Money> {
        match self {
            SummaryLine::Resolved { subtotal, .. } => Some(*subtotal),
            SummaryLine::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, SummaryLine::Resolved { .. })
    }
}

/// Snapshot of the cart joined against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    lines: Vec<SummaryLine>,
}

impl CartSummary {
    /// Resolves every cart line, keeping cart order.
    pub fn resolve(cart: &CartStore, catalog: &Catalog) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| match catalog.find_product(line.product_id()) {
                Some(product) => SummaryLine::Resolved {
                    product: product.clone(),
                    quantity: line.quantity(),
                    subtotal: product.line_total(line.quantity()),
                },
                None => SummaryLine::Unresolved {
                    product_id: line.product_id().clone(),
                    quantity: line.quantity(),
                },
            })
            .collect();
        CartSummary { lines }
    }

    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units across every line, resolved or not.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity())).sum()
    }

    /// Sum of resolved subtotals.
    pub fn total_price(&self) -> Money {
        self.lines.iter().filter_map(SummaryLine::subtotal).sum()
    }

    /// Lines whose product id is not in the catalog.
    pub fn unresolved(&self) -> impl Iterator<Item = &SummaryLine> {
        self.lines.iter().filter(|l| !l.is_resolved())
    }
}
