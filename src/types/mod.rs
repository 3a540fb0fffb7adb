//! Core data types for the matching engine.
//!
//! ## Types
//!
//! - [`Order`]: a single order with its quantity lifecycle
//! - [`Side`] / [`OrderType`]: order classification
//! - [`OrderModify`]: cancel-then-add replacement request
//! - [`Trade`] / [`TradeInfo`]: executed match records, one leg per side
//! - [`LevelInfo`] / [`BookSnapshot`]: aggregated depth views
//!
//! ## Fixed-Point Prices
//!
//! Prices are signed integer ticks (cents); see [`price`].

mod level;
mod modify;
mod order;
mod trade;
pub mod price;

// Re-export all types at module level
pub use level::{BookSnapshot, LevelInfo};
pub use modify::OrderModify;
pub use order::{Order, OrderId, OrderType, Quantity, Side};
pub use price::Price;
pub use trade::{Trade, TradeInfo, Trades};
