//! # Commands Module
//!
//! Functions a front end calls to read and change the cart.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Catalog listing, search, lookup
//! └── cart.rs     ◄─── Cart manipulation
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front end (shop page, cart drawer, CLI)                                │
//! │  ───────────────────────────────────────                                │
//! │  increase_item(&cart, &catalog, "3")                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn increase_item(                                                      │
//! │      cart: &SharedCart,   ◄── Session cart                              │
//! │      catalog: &Catalog,   ◄── Read-only product list                    │
//! │      product_id: &str,    ◄── From the clicked card                     │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (serde, camelCase)                                            │
//! │         ▼                                                               │
//! │  Front end receives: { items: [...], totals: {...} }                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs: catalog queries never
//! touch the cart lock.

pub mod cart;
pub mod product;

pub use cart::{
    clear_cart, decrease_item, get_cart, increase_item, remove_item, CartItemDto, CartResponse,
    CartTotals,
};
pub use product::{
    get_item_quantity, get_product, list_conditions, list_products, search_products, ProductDto,
};
