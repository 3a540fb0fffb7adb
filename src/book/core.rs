//! Single-threaded order book core.
//!
//! ## Architecture
//!
//! The core keeps three cross-linked structures:
//!
//! - **Slab**: arena holding every resting order as an [`OrderNode`]
//! - **BTreeMap sides**: price levels sorted best-first per side
//! - **HashMap index**: order id to slab key for O(1) cancel
//!
//! ## Price Ordering
//!
//! - **Bids** (buy orders): sorted high-to-low via `Reverse<Price>` keys
//! - **Asks** (sell orders): sorted low-to-high
//!
//! Within a level, orders queue in arrival order, giving strict price-time
//! priority. Every resting order appears in exactly one level queue and one
//! index entry; a price key exists only while its queue is non-empty.
//!
//! ## Submission Policy
//!
//! [`BookCore::add`] applies the order-type policy before inserting:
//! market orders are repriced at the opposite best (or dropped when that side
//! is empty), fill-and-kill orders must cross immediately, and fill-or-kill
//! orders must be fully fillable against the opposite side's level
//! aggregates. A rejected order leaves the book untouched.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use slab::Slab;
use tracing::{debug, trace, warn};

use crate::book::level::PriceLevel;
use crate::book::node::OrderNode;
use crate::types::{
    BookSnapshot, LevelInfo, Order, OrderId, OrderModify, OrderType, Price, Quantity, Side, Trade,
    TradeInfo, Trades,
};

/// The order book state and matching algorithm, without locking.
///
/// [`OrderBook`](crate::book::OrderBook) wraps this in a mutex and adds the
/// end-of-day pruner; use the core directly for single-threaded callers such
/// as benchmarks and simulations.
#[derive(Debug, Default)]
pub struct BookCore {
    /// Arena holding every resting order.
    orders: Slab<OrderNode>,

    /// Bid price levels, best (highest) price first.
    bids: BTreeMap<Reverse<Price>, PriceLevel>,

    /// Ask price levels, best (lowest) price first.
    asks: BTreeMap<Price, PriceLevel>,

    /// Order id to slab key, for O(1) cancel and duplicate detection.
    index: HashMap<OrderId, usize>,
}

impl BookCore {
    /// Create a new empty book core.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book core with pre-allocated order storage.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            index: HashMap::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of resting orders.
    #[inline]
    pub fn size(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether an order with this id is resting.
    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.index.contains_key(&id)
    }

    /// Highest resting buy price.
    #[inline]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Lowest resting sell price.
    #[inline]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Aggregated per-level depth for both sides, best-first.
    pub fn snapshot(&self) -> BookSnapshot {
        let level_info = |level: &PriceLevel| LevelInfo {
            price: level.price(),
            quantity: level.total_quantity(),
        };
        BookSnapshot::new(
            self.bids.values().map(level_info).collect(),
            self.asks.values().map(level_info).collect(),
        )
    }

    /// Ids of every resting good-for-day order, for the session-close pruner.
    pub fn good_for_day_ids(&self) -> Vec<OrderId> {
        self.orders
            .iter()
            .filter(|(_, node)| node.order_type() == OrderType::GoodForDay)
            .map(|(_, node)| node.order_id())
            .collect()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Submit an order: apply the order-type policy, insert, and match.
    ///
    /// Returns the trades produced, in execution order. A rejected order
    /// (duplicate id, unfillable policy, market order against an empty book)
    /// returns an empty list and changes nothing.
    pub fn add(&mut self, mut order: Order) -> Trades {
        if self.index.contains_key(&order.id()) {
            warn!(id = order.id(), "duplicate order id, ignoring");
            return Trades::new();
        }
        if order.initial_quantity() == 0 {
            warn!(id = order.id(), "zero quantity order, ignoring");
            return Trades::new();
        }

        // Market orders capture the opposite best and rest as GTC there.
        if order.order_type() == OrderType::Market {
            let best = match order.side() {
                Side::Buy => self.best_ask(),
                Side::Sell => self.best_bid(),
            };
            let Some(best) = best else {
                debug!(id = order.id(), "market order against empty book, dropping");
                return Trades::new();
            };
            if order.to_good_till_cancel(best).is_err() {
                return Trades::new();
            }
        }

        let Some(price) = order.limit_price() else {
            return Trades::new();
        };

        match order.order_type() {
            OrderType::FillAndKill if !self.can_match(order.side(), price) => {
                debug!(id = order.id(), "fill-and-kill does not cross, dropping");
                return Trades::new();
            }
            OrderType::FillOrKill
                if !self.can_fully_fill(order.side(), price, order.initial_quantity()) =>
            {
                debug!(id = order.id(), "fill-or-kill short of liquidity, dropping");
                return Trades::new();
            }
            _ => {}
        }

        let id = order.id();
        let side = order.side();
        let key = self.orders.insert(OrderNode::new(order));
        self.index.insert(id, key);
        match side {
            Side::Buy => self
                .bids
                .entry(Reverse(price))
                .or_insert_with(|| PriceLevel::new(price))
                .push_back(key, &mut self.orders),
            Side::Sell => self
                .asks
                .entry(price)
                .or_insert_with(|| PriceLevel::new(price))
                .push_back(key, &mut self.orders),
        }
        trace!(id, ?side, price, "order accepted");

        self.match_orders()
    }

    /// Cancel a resting order by id. Unknown ids are ignored.
    pub fn cancel(&mut self, id: OrderId) {
        let Some(&key) = self.index.get(&id) else {
            trace!(id, "cancel of unknown order id, ignoring");
            return;
        };
        self.remove_order(key);
        debug!(id, "order cancelled");
    }

    /// Replace a resting order with the request's side, price, and quantity,
    /// keeping the original order type.
    ///
    /// This is strictly cancel-then-add: the replacement loses its queue
    /// position and may match immediately. An unknown id returns no trades.
    pub fn modify(&mut self, modify: OrderModify) -> Trades {
        let Some(&key) = self.index.get(&modify.id()) else {
            trace!(id = modify.id(), "modify of unknown order id, ignoring");
            return Trades::new();
        };
        let order_type = self
            .orders
            .get(key)
            .expect("invalid slab key")
            .order_type();
        self.cancel(modify.id());
        self.add(modify.into_order(order_type))
    }

    /// Remove an order from all three structures by slab key.
    fn remove_order(&mut self, key: usize) {
        let (id, side, price) = {
            let node = self.orders.get(key).expect("invalid slab key");
            (node.order_id(), node.side(), node.price())
        };
        self.index.remove(&id);
        match side {
            Side::Buy => {
                if let Some(level) = self.bids.get_mut(&Reverse(price)) {
                    level.remove(key, &mut self.orders);
                    if level.is_empty() {
                        self.bids.remove(&Reverse(price));
                    }
                }
            }
            Side::Sell => {
                if let Some(level) = self.asks.get_mut(&price) {
                    level.remove(key, &mut self.orders);
                    if level.is_empty() {
                        self.asks.remove(&price);
                    }
                }
            }
        }
        self.orders.remove(key);
    }

    // ========================================================================
    // Feasibility Checks
    // ========================================================================

    /// Whether an order on `side` at `price` would cross the opposite best.
    fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.best_ask().map_or(false, |ask| price >= ask),
            Side::Sell => self.best_bid().map_or(false, |bid| price <= bid),
        }
    }

    /// Whether at least `quantity` can be taken from the opposite side at
    /// prices no worse than `price`.
    ///
    /// Walks the opposite side's level aggregates best-first. Totals track
    /// remaining quantity, so partially filled levels are not over-counted.
    fn can_fully_fill(&self, side: Side, price: Price, quantity: Quantity) -> bool {
        if !self.can_match(side, price) {
            return false;
        }

        let mut needed = quantity;
        match side {
            Side::Buy => {
                for (&level_price, level) in &self.asks {
                    if level_price > price {
                        break;
                    }
                    if needed <= level.total_quantity() {
                        return true;
                    }
                    needed -= level.total_quantity();
                }
            }
            Side::Sell => {
                for (&Reverse(level_price), level) in &self.bids {
                    if level_price < price {
                        break;
                    }
                    if needed <= level.total_quantity() {
                        return true;
                    }
                    needed -= level.total_quantity();
                }
            }
        }
        false
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Run the matching loop until the book no longer crosses.
    ///
    /// While the best bid reaches the best ask, the two front orders trade
    /// the smaller of their remaining quantities. Each trade carries one leg
    /// per side at that side's resting price. Filled orders leave all three
    /// structures immediately, and an emptied level gives up its price key
    /// before the next round.
    fn match_orders(&mut self) -> Trades {
        let mut trades = Trades::new();

        loop {
            let (Some(&Reverse(bid_price)), Some(&ask_price)) =
                (self.bids.keys().next(), self.asks.keys().next())
            else {
                break;
            };
            if bid_price < ask_price {
                break;
            }

            // Emptied levels are dropped eagerly, so both fronts exist.
            let (Some(bid_key), Some(ask_key)) = (
                self.bids.values().next().and_then(PriceLevel::front),
                self.asks.values().next().and_then(PriceLevel::front),
            ) else {
                break;
            };

            let matched = {
                let bid_node = self.orders.get(bid_key).expect("invalid slab key");
                let ask_node = self.orders.get(ask_key).expect("invalid slab key");
                bid_node.remaining().min(ask_node.remaining())
            };
            if matched == 0 {
                break;
            }

            let (bid_id, bid_filled) = self.fill_node(bid_key, matched);
            let (ask_id, ask_filled) = self.fill_node(ask_key, matched);

            trades.push(Trade::new(
                TradeInfo {
                    order_id: bid_id,
                    price: bid_price,
                    quantity: matched,
                },
                TradeInfo {
                    order_id: ask_id,
                    price: ask_price,
                    quantity: matched,
                },
            ));
            trace!(bid_id, ask_id, quantity = matched, "orders matched");

            // One level event per side, at that side's own price.
            if let Some(level) = self.bids.get_mut(&Reverse(bid_price)) {
                level.reduce_quantity(matched);
            }
            if let Some(level) = self.asks.get_mut(&ask_price) {
                level.reduce_quantity(matched);
            }

            if bid_filled {
                self.remove_order(bid_key);
            }
            if ask_filled {
                self.remove_order(ask_key);
            }
        }

        // A partially matched fill-and-kill never rests: drop a surviving
        // residual from either side's front.
        self.drop_fill_and_kill_front(Side::Buy);
        self.drop_fill_and_kill_front(Side::Sell);

        trades
    }

    /// Fill one node by `matched` and report `(id, fully_filled)`.
    fn fill_node(&mut self, key: usize, matched: Quantity) -> (OrderId, bool) {
        let node = self.orders.get_mut(key).expect("invalid slab key");
        node.order
            .fill(matched)
            .expect("matched quantity capped at the smaller remaining");
        (node.order_id(), node.is_filled())
    }

    /// Cancel the given side's best front if it is a fill-and-kill residual.
    fn drop_fill_and_kill_front(&mut self, side: Side) {
        let front = match side {
            Side::Buy => self.bids.values().next().and_then(PriceLevel::front),
            Side::Sell => self.asks.values().next().and_then(PriceLevel::front),
        };
        let Some(key) = front else {
            return;
        };
        let node = self.orders.get(key).expect("invalid slab key");
        if node.order_type() == OrderType::FillAndKill {
            let id = node.order_id();
            debug!(id, "dropping fill-and-kill residual");
            self.remove_order(key);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
