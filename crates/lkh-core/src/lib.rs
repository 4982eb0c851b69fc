//! # lkh-core: Pure Business Logic for LKH Store
//!
//! This crate is the **heart** of LKH Store. It holds the cart ledger, the
//! static catalog and the join between them, all as plain data with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LKH Store Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front End                                    │   │
//! │  │    Shop page ──► Product card ──► Cart page ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    lkh-session                                  │   │
//! │  │    SharedCart (lock + change events), config, commands         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lkh-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │   cart    │  │  summary  │  │   │
//! │  │   │  Product  │  │   Money   │  │ CartStore │  │ resolved/ │  │   │
//! │  │   │  search   │  │           │  │ CartLine  │  │ unresolved│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO CHANNELS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Identifiers and catalog records (ProductId, Product, Condition)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The static product list with lookup and search
//! - [`cart`] - The id → quantity ledger
//! - [`summary`] - Cart joined against the catalog for display and totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use lkh_core::{Catalog, CartStore, CartSummary, ProductId};
//!
//! let catalog = Catalog::builtin();
//! let mut cart = CartStore::new();
//!
//! let airpods = ProductId::from(3u32);
//! cart.increase(&airpods);
//! cart.increase(&airpods);
//!
//! assert_eq!(cart.get_quantity(&airpods), 2);
//!
//! let summary = CartSummary::resolve(&cart, &catalog);
//! assert_eq!(summary.total_price().cents(), 60_000); // 2 × $300.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartChange, CartLimits, CartLine, CartStore};
pub use catalog::{Catalog, ProductQuery};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use summary::{CartSummary, SummaryLine};
pub use types::*;
