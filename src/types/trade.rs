//! Trade records produced by the matcher.
//!
//! Each matched pair of resting orders yields one [`Trade`] carrying a
//! [`TradeInfo`] leg per side. A leg is priced at that side's own resting
//! price, so the two legs of a trade can differ when the aggressor crossed
//! the spread.

use serde::{Deserialize, Serialize};

use crate::types::order::{OrderId, Quantity};
use crate::types::price::Price;

/// One side of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    /// Identifier of the order on this side.
    pub order_id: OrderId,
    /// The resting price of that order.
    pub price: Price,
    /// Executed quantity, identical on both legs.
    pub quantity: Quantity,
}

/// An executed match between a bid and an ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    bid: TradeInfo,
    ask: TradeInfo,
}

impl Trade {
    /// Pair up the two legs of a match.
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        Self { bid, ask }
    }

    /// The buy-side leg.
    #[inline]
    pub fn bid(&self) -> TradeInfo {
        self.bid
    }

    /// The sell-side leg.
    #[inline]
    pub fn ask(&self) -> TradeInfo {
        self.ask
    }

    /// Executed quantity (equal on both legs).
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

/// The trades produced by one book operation, in execution order.
pub type Trades = Vec<Trade>;

// ============================================================================
// Unit Tests
// ============================================================================
