//! Order types for the matching engine.
//!
//! ## Quantity Lifecycle
//!
//! An order is created with `initial == remaining`. Fills decrement the
//! remaining quantity and the order is complete once it reaches zero. The
//! filled quantity is always `initial - remaining`.
//!
//! ## Market Orders
//!
//! Market orders are constructed without a price. The book rewrites an
//! accepted market order into a good-till-cancel order at the opposite side's
//! best price, after which the price is set for the rest of its life.

use serde::{Deserialize, Serialize};

use crate::error::OrderError;
use crate::types::price::Price;

/// Order quantity in whole units.
pub type Quantity = u64;

/// Unique order identifier assigned by the submitter.
pub type OrderId = u64;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy order (bid).
    Buy,
    /// Sell order (ask).
    Sell,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// How an order behaves on submission and while resting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Rests until filled or cancelled.
    GoodTillCancel,
    /// Matches what it can immediately; any residual is dropped.
    FillAndKill,
    /// Takes the opposite best price at acceptance, then rests as
    /// good-till-cancel at that captured price.
    Market,
    /// Rests until filled, cancelled, or pruned at session close.
    GoodForDay,
    /// Matches in full immediately or is dropped entirely.
    FillOrKill,
}

// ============================================================================
// Order struct
// ============================================================================

/// A single order tracked by the book.
///
/// Identity (`id`, `side`, type, price) is fixed at construction; only the
/// remaining quantity changes as the order fills, plus the one-time
/// market-to-limit rewrite performed by the book.
///
/// ## Example
///
/// ```
/// use matchbook::types::{Order, OrderType, Side};
///
/// let order = Order::limit(OrderType::GoodTillCancel, 1, Side::Buy, 10_000, 10);
/// assert_eq!(order.remaining_quantity(), 10);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    order_type: OrderType,
    id: OrderId,
    side: Side,
    /// `None` only while `order_type` is [`OrderType::Market`].
    price: Option<Price>,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Create a priced order.
    ///
    /// Market orders have no price; construct them with [`Order::market`].
    pub fn limit(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        debug_assert!(
            order_type != OrderType::Market,
            "market orders are built with Order::market"
        );
        Self {
            order_type,
            id,
            side,
            price: Some(price),
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// Create a market order. The price stays unset until the book rewrites
    /// the order at the opposite best via [`Order::to_good_till_cancel`].
    pub fn market(id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self {
            order_type: OrderType::Market,
            id,
            side,
            price: None,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// The order's unique identifier.
    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// The order side.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The current order type.
    #[inline]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// The limit price, or `None` for a market order that has not been
    /// rewritten yet.
    #[inline]
    pub fn limit_price(&self) -> Option<Price> {
        self.price
    }

    /// Quantity at creation time.
    #[inline]
    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    /// Quantity not yet executed.
    #[inline]
    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Cumulative executed quantity.
    #[inline]
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// Whether the order is fully executed.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Execute `quantity` against this order.
    ///
    /// # Errors
    ///
    /// [`OrderError::FillExceedsRemaining`] if `quantity` exceeds the
    /// remaining quantity. The order is unchanged on error.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), OrderError> {
        if quantity > self.remaining_quantity {
            return Err(OrderError::FillExceedsRemaining {
                id: self.id,
                requested: quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }

    /// Rewrite a market order into a good-till-cancel order at `price`.
    ///
    /// # Errors
    ///
    /// [`OrderError::NotMarket`] if the order is not a market order.
    pub fn to_good_till_cancel(&mut self, price: Price) -> Result<(), OrderError> {
        if self.order_type != OrderType::Market {
            return Err(OrderError::NotMarket { id: self.id });
        }
        self.price = Some(price);
        self.order_type = OrderType::GoodTillCancel;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
