//! Aggregated per-level depth records returned by snapshots.

use serde::{Deserialize, Serialize};

use crate::types::order::Quantity;
use crate::types::price::Price;

/// One price level's aggregated depth: the sum of remaining quantities of
/// every order resting at this price on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

/// A read-only view of both sides' per-level depth.
///
/// Bids are listed best-first in descending price, asks best-first in
/// ascending price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<LevelInfo>,
    pub asks: Vec<LevelInfo>,
}

impl BookSnapshot {
    pub fn new(bids: Vec<LevelInfo>, asks: Vec<LevelInfo>) -> Self {
        Self { bids, asks }
    }
}
