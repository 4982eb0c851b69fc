//! # Cart Ledger
//!
//! The id → quantity ledger behind the shopping cart.
//!
//! ## Slot State Machine
//! Every product id is in one of two states. There is no terminal state.
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Per-Product Slot                                    │
//! │                                                                         │
//! │                  increase                                               │
//! │   ┌──────────┐ ───────────► ┌──────────────┐ ──┐ increase (q+1)         │
//! │   │  absent  │              │  present(q)  │ ◄─┘                        │
//! │   │ (qty 0)  │ ◄─────────── │    q ≥ 1     │ ──┐ decrease (q>1 → q-1)   │
//! │   └──────────┘  decrease    └──────────────┘ ◄─┘                        │
//! │     │    ▲      (q = 1)                                                 │
//! │     └────┘      remove (any q)                                          │
//! │   decrease / remove: no-op                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has `quantity ≥ 1`; a line that would reach 0 is removed
//! - `total_quantity` is recomputed from the lines on every call
//! - Lines keep the order in which their ids were first added
//!
//! The ledger never consults the catalog. Any [`ProductId`] is accepted.

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::ProductId;

// =============================================================================
// Cart Line
// =============================================================================

/// One product's presence in the cart.
///
/// Only [`CartStore`] creates lines, so `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    product_id: ProductId,
    quantity: u32,
}

impl CartLine {
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

// =============================================================================
// Cart Change
// =============================================================================

/// The transition a mutation performed.
///
/// Mutations that change nothing report no change at all, so observers
/// are only told about real transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CartChange {
    /// Quantity went up by one. `quantity == 1` means the line is new.
    #[serde(rename_all = "camelCase")]
    Increased { product_id: ProductId, quantity: u32 },

    /// Quantity went down by one and the line is still present.
    #[serde(rename_all = "camelCase")]
    Decreased { product_id: ProductId, quantity: u32 },

    /// The line is gone. `previous` is the quantity it held.
    #[serde(rename_all = "camelCase")]
    Removed { product_id: ProductId, previous: u32 },

    /// Every line was dropped.
    Cleared { lines: usize },
}

// =============================================================================
// Cart Limits
// =============================================================================

/// Optional ceilings applied by [`CartStore::try_increase`].
///
/// The default has no ceilings, which matches the plain ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartLimits {
    /// Highest quantity a single line may reach.
    pub max_line_quantity: Option<u32>,

    /// Highest number of distinct lines.
    pub max_lines: Option<usize>,
}

impl CartLimits {
    /// No ceilings.
    pub const UNLIMITED: CartLimits = CartLimits {
        max_line_quantity: None,
        max_lines: None,
    };
}

// =============================================================================
// Cart Store
// =============================================================================

/// The cart ledger.
///
/// ## Example
/// ```rust
/// use lkh_core::{CartStore, ProductId};
///
/// let mut cart = CartStore::new();
/// let sku = ProductId::from("sku-1");
///
/// cart.increase(&sku);
/// cart.increase(&sku);
/// cart.decrease(&sku);
///
/// assert_eq!(cart.get_quantity(&sku), 1);
/// assert_eq!(cart.total_quantity(), 1);
///
/// cart.decrease(&sku);
/// assert!(!cart.contains(&sku));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartStore { lines: Vec::new() }
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product_id == product_id)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current quantity for `product_id`, or 0 when it is not in the cart.
    pub fn get_quantity(&self, product_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| &l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Sum of every line's quantity.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Whether `product_id` has a line.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Lines in the order their ids were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of `product_id`, creating its line if needed.
    ///
    /// Returns `None` only when the line already sits at `u32::MAX`.
    pub fn increase(&mut self, product_id: &ProductId) -> Option<CartChange> {
        match self.position(product_id) {
            Some(i) => {
                let line = &mut self.lines[i];
                line.quantity = line.quantity.checked_add(1)?;
                Some(CartChange::Increased {
                    product_id: product_id.clone(),
                    quantity: line.quantity,
                })
            }
            None => {
                self.lines.push(CartLine {
                    product_id: product_id.clone(),
                    quantity: 1,
                });
                Some(CartChange::Increased {
                    product_id: product_id.clone(),
                    quantity: 1,
                })
            }
        }
    }

    /// [`increase`](Self::increase) guarded by `limits`.
    ///
    /// ## Errors
    /// - `CartTooLarge` when a new line would exceed `max_lines`
    /// - `QuantityTooLarge` when the line would exceed `max_line_quantity`
    ///   (or `u32::MAX`)
    pub fn try_increase(
        &mut self,
        product_id: &ProductId,
        limits: &CartLimits,
    ) -> CoreResult<CartChange> {
        let current = self.get_quantity(product_id);
        let requested = u64::from(current) + 1;
        let max = limits.max_line_quantity.unwrap_or(u32::MAX);

        if requested > u64::from(max) {
            return Err(CoreError::QuantityTooLarge {
                product_id: product_id.clone(),
                requested,
                max,
            });
        }

        if current == 0 {
            if let Some(max_lines) = limits.max_lines {
                if self.lines.len() >= max_lines {
                    return Err(CoreError::CartTooLarge { max: max_lines });
                }
            }
        }

        // Both ceilings were checked above, so the ledger always moves.
        self.increase(product_id)
            .ok_or_else(|| CoreError::QuantityTooLarge {
                product_id: product_id.clone(),
                requested,
                max,
            })
    }

    /// Removes one unit of `product_id`.
    ///
    /// A line at quantity 1 is removed. Absent ids are left alone.
    pub fn decrease(&mut self, product_id: &ProductId) -> Option<CartChange> {
        let i = self.position(product_id)?;

        if self.lines[i].quantity == 1 {
            self.lines.remove(i);
            return Some(CartChange::Removed {
                product_id: product_id.clone(),
                previous: 1,
            });
        }

        let line = &mut self.lines[i];
        line.quantity -= 1;
        Some(CartChange::Decreased {
            product_id: product_id.clone(),
            quantity: line.quantity,
        })
    }

    /// Drops the line for `product_id` whatever its quantity.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartChange> {
        let i = self.position(product_id)?;
        let line = self.lines.remove(i);
        Some(CartChange::Removed {
            product_id: line.product_id,
            previous: line.quantity,
        })
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> Option<CartChange> {
        if self.lines.is_empty() {
            return None;
        }
        let lines = self.lines.len();
        self.lines.clear();
        Some(CartChange::Cleared { lines })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn id(s: &str) -> ProductId {
        ProductId::from(s)
    }

    // -------------------------------------------------------------------------
    // Scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_cart() {
        let cart = CartStore::new();
        assert_eq!(cart.get_quantity(&id("sku-1")), 0);
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increase_three_times() {
        let mut cart = CartStore::new();
        for _ in 0..3 {
            cart.increase(&id("sku-1"));
        }
        assert_eq!(cart.get_quantity(&id("sku-1")), 3);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_decrease_once_from_three() {
        let mut cart = CartStore::new();
        for _ in 0..3 {
            cart.increase(&id("sku-1"));
        }
        let change = cart.decrease(&id("sku-1"));

        assert_eq!(
            change,
            Some(CartChange::Decreased {
                product_id: id("sku-1"),
                quantity: 2
            })
        );
        assert_eq!(cart.get_quantity(&id("sku-1")), 2);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_remove_leaves_other_lines() {
        let mut cart = CartStore::new();
        for _ in 0..3 {
            cart.increase(&id("sku-1"));
        }
        cart.increase(&id("sku-2"));
        let change = cart.remove(&id("sku-1"));

        assert_eq!(
            change,
            Some(CartChange::Removed {
                product_id: id("sku-1"),
                previous: 3
            })
        );
        assert_eq!(cart.get_quantity(&id("sku-1")), 0);
        assert_eq!(cart.get_quantity(&id("sku-2")), 1);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_decrease_absent_is_noop() {
        let mut cart = CartStore::new();
        assert_eq!(cart.decrease(&id("sku-99")), None);
        assert_eq!(cart.get_quantity(&id("sku-99")), 0);
        assert_eq!(cart.total_quantity(), 0);
        assert!(!cart.contains(&id("sku-99")));
    }

    #[test]
    fn test_interleaved_sequence_ends_empty() {
        let mut cart = CartStore::new();
        cart.increase(&id("a"));
        cart.increase(&id("b"));
        cart.increase(&id("a"));
        cart.decrease(&id("b"));
        cart.remove(&id("a"));

        assert_eq!(cart.get_quantity(&id("a")), 0);
        assert_eq!(cart.get_quantity(&id("b")), 0);
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.is_empty());
    }

    // -------------------------------------------------------------------------
    // Boundaries
    // -------------------------------------------------------------------------

    #[test]
    fn test_increase_new_id_creates_single_line() {
        let mut cart = CartStore::new();
        let change = cart.increase(&id("sku-1"));

        assert_eq!(
            change,
            Some(CartChange::Increased {
                product_id: id("sku-1"),
                quantity: 1
            })
        );
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 1);
    }

    #[test]
    fn test_decrease_at_one_removes_line() {
        let mut cart = CartStore::new();
        cart.increase(&id("sku-1"));
        let change = cart.decrease(&id("sku-1"));

        assert_eq!(
            change,
            Some(CartChange::Removed {
                product_id: id("sku-1"),
                previous: 1
            })
        );
        assert!(!cart.contains(&id("sku-1")));
        assert_eq!(cart, CartStore::new());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartStore::new();
        cart.increase(&id("sku-1"));
        cart.increase(&id("sku-1"));

        assert!(cart.remove(&id("sku-1")).is_some());
        assert_eq!(cart.get_quantity(&id("sku-1")), 0);
        assert!(cart.remove(&id("sku-1")).is_none());
        assert_eq!(cart.get_quantity(&id("sku-1")), 0);
    }

    #[test]
    fn test_lines_keep_first_insertion_order() {
        let mut cart = CartStore::new();
        cart.increase(&id("c"));
        cart.increase(&id("a"));
        cart.increase(&id("b"));
        cart.increase(&id("c"));

        let order: Vec<&str> = cart.lines().iter().map(|l| l.product_id().as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::new();
        assert_eq!(cart.clear(), None);

        cart.increase(&id("a"));
        cart.increase(&id("b"));
        assert_eq!(cart.clear(), Some(CartChange::Cleared { lines: 2 }));
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }

    // -------------------------------------------------------------------------
    // Limits
    // -------------------------------------------------------------------------

    #[test]
    fn test_try_increase_unlimited_matches_increase() {
        let mut guarded = CartStore::new();
        let mut plain = CartStore::new();
        for _ in 0..5 {
            guarded.try_increase(&id("a"), &CartLimits::UNLIMITED).unwrap();
            plain.increase(&id("a"));
        }
        assert_eq!(guarded, plain);
    }

    #[test]
    fn test_try_increase_line_ceiling() {
        let limits = CartLimits {
            max_line_quantity: Some(2),
            max_lines: None,
        };
        let mut cart = CartStore::new();
        cart.try_increase(&id("a"), &limits).unwrap();
        cart.try_increase(&id("a"), &limits).unwrap();

        let err = cart.try_increase(&id("a"), &limits).unwrap_err();
        assert!(matches!(
            err,
            CoreError::QuantityTooLarge { requested: 3, max: 2, .. }
        ));
        assert_eq!(cart.get_quantity(&id("a")), 2);
    }

    #[test]
    fn test_try_increase_line_count_ceiling() {
        let limits = CartLimits {
            max_line_quantity: None,
            max_lines: Some(1),
        };
        let mut cart = CartStore::new();
        cart.try_increase(&id("a"), &limits).unwrap();

        // Existing line may still grow
        cart.try_increase(&id("a"), &limits).unwrap();

        let err = cart.try_increase(&id("b"), &limits).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { max: 1 }));
        assert!(!cart.contains(&id("b")));
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Op {
        Increase(u8),
        Decrease(u8),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..6).prop_map(Op::Increase),
            (0u8..6).prop_map(Op::Decrease),
            (0u8..6).prop_map(Op::Remove),
        ]
    }

    fn key(n: u8) -> ProductId {
        ProductId::from(format!("sku-{n}"))
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

        #[test]
        fn ledger_matches_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut cart = CartStore::new();
            let mut model: HashMap<ProductId, u32> = HashMap::new();

            for op in &ops {
                match op {
                    Op::Increase(n) => {
                        cart.increase(&key(*n));
                        *model.entry(key(*n)).or_insert(0) += 1;
                    }
                    Op::Decrease(n) => {
                        cart.decrease(&key(*n));
                        if let Some(q) = model.get_mut(&key(*n)) {
                            *q -= 1;
                            if *q == 0 {
                                model.remove(&key(*n));
                            }
                        }
                    }
                    Op::Remove(n) => {
                        cart.remove(&key(*n));
                        model.remove(&key(*n));
                    }
                }

                // Present iff quantity > 0, one line per id, no zero lines
                for n in 0u8..6 {
                    let q = cart.get_quantity(&key(n));
                    prop_assert_eq!(q, model.get(&key(n)).copied().unwrap_or(0));
                    prop_assert_eq!(cart.contains(&key(n)), q > 0);
                }
                prop_assert!(cart.lines().iter().all(|l| l.quantity() >= 1));
                prop_assert_eq!(cart.len(), model.len());
                prop_assert_eq!(
                    cart.total_quantity(),
                    model.values().map(|q| u64::from(*q)).sum::<u64>()
                );
            }
        }

        #[test]
        fn increase_then_decrease_round_trips(
            start in 0u32..20,
            n in 0usize..20,
        ) {
            let mut cart = CartStore::new();
            let p = key(0);
            for _ in 0..start {
                cart.increase(&p);
            }
            let before = cart.clone();

            for _ in 0..n {
                cart.increase(&p);
            }
            for _ in 0..n {
                cart.decrease(&p);
            }

            prop_assert_eq!(cart.get_quantity(&p), start);
            prop_assert_eq!(cart, before);
        }
    }
}
