//! # LKH Session
//!
//! Shareable cart state, store configuration and the command surface that
//! front ends call.
//!
//! ## Module Organization
//! ```text
//! lkh_session/
//! ├── lib.rs          ◄─── You are here (Session + exports)
//! ├── cart.rs         ◄─── SharedCart, CartEvent
//! ├── config.rs       ◄─── StoreConfig (toml + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog listing and search
//! │   └── cart.rs     ◄─── Cart manipulation
//! └── error.rs        ◄─── SessionError, ApiError
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State                                        │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │   SharedCart     │ │    Catalog       │ │    StoreConfig       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • Cart ledger   │ │  • Products      │ │  • Store name        │   │
//! │  │  • Change events │ │  • Search        │ │  • Currency          │   │
//! │  │                  │ │                  │ │  • Cart ceilings     │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Commands take only the pieces they need.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lkh_session::{commands, Session, StoreConfig};
//!
//! let session = Session::new(StoreConfig::default());
//! let response = commands::increase_item(&session.cart, &session.catalog, "3").unwrap();
//! assert_eq!(response.totals.total_quantity, 1);
//! ```

pub mod cart;
pub mod commands;
pub mod config;
pub mod error;

pub use cart::{CartEvent, SharedCart};
pub use config::{CartSettings, StoreConfig, StoreSettings};
pub use error::{ApiError, ErrorCode, SessionError, SessionResult};

use lkh_core::Catalog;
use tracing::info;

/// Everything one shopper's front end needs.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: StoreConfig,
    pub catalog: Catalog,
    pub cart: SharedCart,
}

impl Session {
    /// Starts a session over the built-in catalog.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_catalog(config, Catalog::builtin())
    }

    pub fn with_catalog(config: StoreConfig, catalog: Catalog) -> Self {
        let cart = SharedCart::new(config.limits(), config.cart.event_capacity);
        info!(
            session_id = %cart.session_id(),
            store = %config.store.name,
            products = catalog.len(),
            "Session started"
        );
        Session {
            config,
            catalog,
            cart,
        }
    }
}
