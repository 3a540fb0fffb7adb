//! Error types for order operations.
//!
//! The book itself never fails: invalid submissions (duplicate ids, policy
//! rejections, cancels of unknown ids) are silent no-ops that leave the book
//! untouched. Errors exist only on the two fallible `Order` operations, both
//! of which are recoverable logic errors on the caller's side.

use thiserror::Error;

use crate::types::{OrderId, Quantity};

/// Errors raised by operations on an individual [`Order`](crate::types::Order).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    /// A fill was requested for more than the order's remaining quantity.
    #[error("order {id} cannot fill {requested}, only {remaining} remaining")]
    FillExceedsRemaining {
        id: OrderId,
        requested: Quantity,
        remaining: Quantity,
    },

    /// Only market orders may be repriced into good-till-cancel orders.
    #[error("order {id} is not a market order and cannot be repriced")]
    NotMarket { id: OrderId },
}
