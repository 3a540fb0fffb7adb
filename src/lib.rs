//! # Matchbook
//!
//! Limit-order matching engine for a single trading instrument.
//!
//! ## Architecture
//!
//! - **Types**: core data structures (`Order`, `Trade`, depth records)
//! - **Book**: slab-backed order book with price-time priority matching
//! - **Clock**: pluggable local-time source for the session-close pruner
//!
//! ## Design Principles
//!
//! 1. **Integer prices**: prices are fixed-point ticks, never floats
//! 2. **Cross-linked indices**: id index, price levels, and the order arena
//!    stay strictly consistent; cancel is O(1)
//! 3. **Policy before insertion**: a rejected order never touches the book
//! 4. **One lock**: all public operations serialize on a single mutex that
//!    the good-for-day pruner shares
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderType, Side};
//!
//! let book = OrderBook::new();
//! book.add(Order::limit(OrderType::GoodTillCancel, 1, Side::Sell, 10_050, 5));
//! let trades = book.add(Order::market(2, Side::Buy, 5));
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].ask().price, 10_050);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: orders, trades, depth records
pub mod types;

/// Order book: slab-backed sides, matcher, and the locked public surface
pub mod book;

/// Local-time source for the end-of-day pruner
pub mod clock;

/// Construction-time options
pub mod config;

/// Error taxonomy
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use book::{BookCore, OrderBook};
pub use clock::{Clock, SystemClock};
pub use config::BookConfig;
pub use error::OrderError;
pub use types::{
    BookSnapshot, LevelInfo, Order, OrderId, OrderModify, OrderType, Price, Quantity, Side, Trade,
    TradeInfo, Trades,
};
