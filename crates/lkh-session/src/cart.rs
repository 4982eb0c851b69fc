//! # Shared Cart
//!
//! Session-scoped handle around the cart ledger.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several front-end handlers may hold the same cart
//! 2. Only one mutation may run at a time to keep the ledger invariants
//! 3. Handlers can run on different threads
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shared Cart Operations                               │
//! │                                                                         │
//! │  Front-end Action      SharedCart              Ledger + Event           │
//! │  ────────────────      ──────────              ──────────────           │
//! │                                                                         │
//! │  Click "+" ──────────► increase() ───────────► qty+1, send Increased   │
//! │                                                                         │
//! │  Click "-" ──────────► decrease() ───────────► qty-1 or drop line,     │
//! │                                                send Decreased/Removed  │
//! │                                                                         │
//! │  Click trash ────────► remove() ─────────────► drop line, send Removed │
//! │                                                                         │
//! │  Checkout ───────────► clear() ──────────────► empty, send Cleared     │
//! │                                                                         │
//! │  Render ─────────────► get_quantity() / summary() (read only)          │
//! │                                                                         │
//! │  NOTE: Events are sent while the lock is held, so subscribers see      │
//! │        changes in exactly the order they were applied. No-ops send     │
//! │        nothing.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use lkh_core::{CartChange, CartLimits, CartStore, CartSummary, Catalog, ProductId};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

use crate::error::{SessionError, SessionResult};

/// Notification sent after every state-changing cart mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEvent {
    /// Session the cart belongs to.
    pub session_id: Uuid,

    /// What happened.
    pub change: CartChange,

    /// Cart-wide quantity right after the change.
    pub total_quantity: u64,

    pub occurred_at: DateTime<Utc>,
}

/// Shareable cart handle.
///
/// Cloning is cheap; every clone drives the same ledger and the same
/// subscribers.
#[derive(Debug, Clone)]
pub struct SharedCart {
    session_id: Uuid,
    limits: CartLimits,
    cart: Arc<Mutex<CartStore>>,
    events: broadcast::Sender<CartEvent>,
}

impl SharedCart {
    /// Creates an empty cart for a new session.
    pub fn new(limits: CartLimits, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        SharedCart {
            session_id: Uuid::new_v4(),
            limits,
            cart: Arc::new(Mutex::new(CartStore::new())),
            events,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Receives every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> SessionResult<MutexGuard<'_, CartStore>> {
        self.cart.lock().map_err(|_| SessionError::LockPoisoned)
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use lkh_core::CartLimits;
    /// use lkh_session::SharedCart;
    ///
    /// let cart = SharedCart::new(CartLimits::UNLIMITED, 16);
    /// let lines = cart.with_cart(|c| c.len()).unwrap();
    /// assert_eq!(lines, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> SessionResult<R>
    where
        F: FnOnce(&CartStore) -> R,
    {
        let cart = self.lock()?;
        Ok(f(&cart))
    }

    /// Runs a ledger mutation and announces the change it reports.
    fn with_cart_mut<F>(&self, f: F) -> SessionResult<Option<CartChange>>
    where
        F: FnOnce(&mut CartStore) -> Option<CartChange>,
    {
        let mut cart = self.lock()?;
        let change = f(&mut cart);
        if let Some(change) = &change {
            self.publish(change.clone(), cart.total_quantity());
        }
        Ok(change)
    }

    fn publish(&self, change: CartChange, total_quantity: u64) {
        let event = CartEvent {
            session_id: self.session_id,
            change,
            total_quantity,
            occurred_at: Utc::now(),
        };
        // No subscribers is fine
        let receivers = self.events.send(event).unwrap_or(0);
        trace!(receivers, "cart event published");
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn get_quantity(&self, product_id: &ProductId) -> SessionResult<u32> {
        self.with_cart(|c| c.get_quantity(product_id))
    }

    pub fn total_quantity(&self) -> SessionResult<u64> {
        self.with_cart(|c| c.total_quantity())
    }

    /// Joins the current ledger against `catalog`.
    pub fn summary(&self, catalog: &Catalog) -> SessionResult<CartSummary> {
        self.with_cart(|c| CartSummary::resolve(c, catalog))
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit, honoring the session's limits.
    pub fn increase(&self, product_id: &ProductId) -> SessionResult<CartChange> {
        let mut cart = self.lock()?;
        let change = cart.try_increase(product_id, &self.limits)?;
        self.publish(change.clone(), cart.total_quantity());
        Ok(change)
    }

    pub fn decrease(&self, product_id: &ProductId) -> SessionResult<Option<CartChange>> {
        self.with_cart_mut(|c| c.decrease(product_id))
    }

    pub fn remove(&self, product_id: &ProductId) -> SessionResult<Option<CartChange>> {
        self.with_cart_mut(|c| c.remove(product_id))
    }

    pub fn clear(&self) -> SessionResult<Option<CartChange>> {
        self.with_cart_mut(|c| c.clear())
    }
}

impl Default for SharedCart {
    fn default() -> Self {
        SharedCart::new(CartLimits::UNLIMITED, 64)
    }
}
