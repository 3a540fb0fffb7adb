//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` is the FIFO queue of all orders resting at a single price
//! on one side, kept as a doubly-linked list over the shared slab:
//!
//! ```text
//! front (oldest) <-> order2 <-> order3 <-> back (newest)
//! ```
//!
//! New orders join at the back, matching consumes from the front, and any
//! order can be spliced out in O(1) by its slab key.
//!
//! ## Level Aggregate
//!
//! Alongside the queue the level carries its aggregate: `order_count` and the
//! remaining-quantity total across its orders. Pushes add the order's
//! remaining quantity, removals subtract it, and partial fills go through
//! [`PriceLevel::reduce_quantity`]. Full-fill feasibility checks read these
//! totals without touching individual orders.

use slab::Slab;

use crate::book::node::OrderNode;
use crate::types::{Price, Quantity};

/// The FIFO queue and aggregate for a single (side, price) level.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    total_quantity: Quantity,
    front: Option<usize>,
    back: Option<usize>,
    order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level.
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_quantity: 0,
            front: None,
            back: None,
            order_count: 0,
        }
    }

    /// The price shared by every order in this level.
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Sum of remaining quantities across the level's orders.
    #[inline]
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Number of orders in the level.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// The oldest order's slab key. This is the next order to match.
    #[inline]
    pub fn front(&self) -> Option<usize> {
        self.front
    }

    /// Append an order at the back of the queue, preserving time priority.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("invalid slab key");
        let quantity = node.remaining();

        node.prev = self.back;
        node.next = None;

        if let Some(back_key) = self.back {
            let back_node = slab.get_mut(back_key).expect("invalid back key");
            back_node.next = Some(key);
        } else {
            // Empty queue, so this is also the front.
            self.front = Some(key);
        }

        self.back = Some(key);
        self.order_count += 1;
        self.total_quantity = self.total_quantity.saturating_add(quantity);
    }

    /// Splice an order out of the queue by slab key.
    ///
    /// Returns the removed order's remaining quantity, which is also
    /// subtracted from the level total.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> Quantity {
        let node = slab.get(key).expect("invalid slab key");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            let prev_node = slab.get_mut(prev).expect("invalid prev key");
            prev_node.next = next_key;
        } else {
            // This was the front.
            self.front = next_key;
        }

        if let Some(next) = next_key {
            let next_node = slab.get_mut(next).expect("invalid next key");
            next_node.prev = prev_key;
        } else {
            // This was the back.
            self.back = prev_key;
        }

        let node = slab.get_mut(key).expect("invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity = self.total_quantity.saturating_sub(quantity);

        quantity
    }

    /// Shrink the level total after a partial fill of one of its orders.
    pub fn reduce_quantity(&mut self, matched: Quantity) {
        self.total_quantity = self.total_quantity.saturating_sub(matched);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
