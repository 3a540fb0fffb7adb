//! End-to-end scenarios driven through the public book surface.
//!
//! Each test exercises the book the way a front end would: submit, cancel,
//! and modify orders, then observe trades, size, and the depth snapshot.

use std::thread;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use matchbook::{
    BookConfig, Clock, LevelInfo, Order, OrderBook, OrderModify, OrderType, Side,
};

fn gtc(id: u64, side: Side, price: i64, quantity: u64) -> Order {
    Order::limit(OrderType::GoodTillCancel, id, side, price, quantity)
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn basic_cross() {
    let book = OrderBook::new();

    let trades = book.add(gtc(1, Side::Buy, 10_000, 10));
    assert!(trades.is_empty());
    assert_eq!(book.size(), 1);

    let trades = book.add(gtc(2, Side::Sell, 10_000, 10));
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].bid().order_id, 1);
    assert_eq!(trades[0].ask().order_id, 2);
    assert_eq!(trades[0].bid().price, 10_000);
    assert_eq!(trades[0].quantity(), 10);
    assert_eq!(book.size(), 0);
}

#[test]
fn partial_fill_leaves_resting_bid() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Buy, 10_000, 10));
    let trades = book.add(gtc(2, Side::Sell, 10_000, 5));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity(), 5);
    assert_eq!(book.size(), 1);

    let snapshot = book.snapshot();
    assert_eq!(snapshot.bids, vec![LevelInfo { price: 10_000, quantity: 5 }]);
}

#[test]
fn fill_and_kill_partial() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Sell, 10_000, 5));
    let trades = book.add(Order::limit(OrderType::FillAndKill, 2, Side::Buy, 10_000, 10));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity(), 5);
    // The residual 5 of order 2 is dropped, not rested.
    assert_eq!(book.size(), 0);
}

#[test]
fn market_consumes_best_opposite() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Sell, 10_000, 10));
    let trades = book.add(Order::market(2, Side::Buy, 10));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity(), 10);
    assert_eq!(trades[0].ask().price, 10_000);
    assert_eq!(trades[0].bid().price, 10_000);
    assert_eq!(book.size(), 0);
}

#[test]
fn fill_or_kill_rejected_when_insufficient_depth() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Sell, 10_000, 10));
    let trades = book.add(Order::limit(OrderType::FillOrKill, 2, Side::Buy, 10_000, 20));

    assert!(trades.is_empty());
    assert_eq!(book.size(), 1);
    assert_eq!(book.snapshot().asks, vec![LevelInfo { price: 10_000, quantity: 10 }]);
}

#[test]
fn gtc_rests_when_not_crossing() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Sell, 10_000, 10));
    let trades = book.add(gtc(2, Side::Buy, 9_900, 10));

    assert!(trades.is_empty());
    assert_eq!(book.size(), 2);

    let snapshot = book.snapshot();
    assert_eq!(snapshot.bids, vec![LevelInfo { price: 9_900, quantity: 10 }]);
    assert_eq!(snapshot.asks, vec![LevelInfo { price: 10_000, quantity: 10 }]);
}

// ============================================================================
// Boundary behaviors
// ============================================================================

#[test]
fn duplicate_id_is_a_noop() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Buy, 10_000, 10));
    let trades = book.add(gtc(1, Side::Buy, 10_100, 99));

    assert!(trades.is_empty());
    assert_eq!(book.size(), 1);
    assert_eq!(book.snapshot().bids, vec![LevelInfo { price: 10_000, quantity: 10 }]);
}

#[test]
fn cancel_unknown_id_is_a_noop() {
    let book = OrderBook::new();

    book.cancel(999);
    assert_eq!(book.size(), 0);

    book.add(gtc(1, Side::Buy, 10_000, 10));
    book.cancel(999);
    assert_eq!(book.size(), 1);
}

#[test]
fn market_order_with_empty_opposite_is_dropped() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Buy, 10_000, 10));
    let trades = book.add(Order::market(2, Side::Buy, 10));

    // A buy market order needs asks; none exist, so nothing changes.
    assert!(trades.is_empty());
    assert_eq!(book.size(), 1);
}

#[test]
fn fill_or_kill_short_by_one_unit() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Sell, 10_000, 4));
    book.add(gtc(2, Side::Sell, 10_000, 5));

    let trades = book.add(Order::limit(OrderType::FillOrKill, 3, Side::Buy, 10_000, 10));

    assert!(trades.is_empty());
    assert_eq!(book.size(), 2);
}

// ============================================================================
// Laws
// ============================================================================

#[test]
fn add_then_cancel_restores_state() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Sell, 10_100, 10));
    book.add(gtc(2, Side::Buy, 9_900, 5));
    let before = book.snapshot();
    let size_before = book.size();

    book.add(gtc(3, Side::Buy, 10_000, 7));
    book.cancel(3);

    assert_eq!(book.size(), size_before);
    assert_eq!(book.snapshot(), before);
}

#[test]
fn modify_equals_cancel_then_add() {
    let modified = OrderBook::new();
    modified.add(gtc(1, Side::Sell, 10_100, 10));
    modified.add(gtc(2, Side::Buy, 9_900, 5));
    let trades_modified = modified.modify(OrderModify::new(2, Side::Buy, 10_100, 5));

    let rebuilt = OrderBook::new();
    rebuilt.add(gtc(1, Side::Sell, 10_100, 10));
    rebuilt.add(gtc(2, Side::Buy, 9_900, 5));
    rebuilt.cancel(2);
    let trades_rebuilt = rebuilt.add(gtc(2, Side::Buy, 10_100, 5));

    assert_eq!(trades_modified, trades_rebuilt);
    assert_eq!(modified.size(), rebuilt.size());
    assert_eq!(modified.snapshot(), rebuilt.snapshot());
}

#[test]
fn snapshot_is_pure() {
    let book = OrderBook::new();

    book.add(gtc(1, Side::Buy, 10_000, 10));
    book.add(gtc(2, Side::Sell, 10_100, 5));

    assert_eq!(book.snapshot(), book.snapshot());
}

// ============================================================================
// Good-for-day pruning
// ============================================================================

/// A clock frozen at a fixed local time.
#[derive(Debug, Clone, Copy)]
struct FixedClock(NaiveDateTime);

impl Clock for FixedClock {
    fn now_local(&self) -> NaiveDateTime {
        self.0
    }
}

fn just_before(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 8)
        .unwrap()
        .and_hms_milli_opt(hour - 1, 59, 59, 900)
        .unwrap()
}

#[test]
fn good_for_day_orders_are_pruned_at_close() {
    let config = BookConfig {
        session_close_hour: 16,
        prune_grace: Duration::from_millis(10),
    };
    // 100ms before the close: the pruner fires almost immediately.
    let book = OrderBook::with_clock(config, FixedClock(just_before(16)));

    book.add(Order::limit(OrderType::GoodForDay, 1, Side::Buy, 10_000, 10));
    book.add(Order::limit(OrderType::GoodForDay, 2, Side::Sell, 10_200, 10));
    book.add(gtc(3, Side::Sell, 10_300, 10));
    assert_eq!(book.size(), 3);

    thread::sleep(Duration::from_millis(600));

    // Both good-for-day orders are gone; the good-till-cancel one survives.
    assert_eq!(book.size(), 1);
    assert_eq!(book.snapshot().asks, vec![LevelInfo { price: 10_300, quantity: 10 }]);
}

#[test]
fn pruner_waits_for_close_before_scanning() {
    let config = BookConfig {
        session_close_hour: 16,
        prune_grace: Duration::from_millis(10),
    };
    // Mid-morning: the close is hours away.
    let now = NaiveDate::from_ymd_opt(2024, 3, 8)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let book = OrderBook::with_clock(config, FixedClock(now));

    book.add(Order::limit(OrderType::GoodForDay, 1, Side::Buy, 10_000, 10));
    thread::sleep(Duration::from_millis(200));

    assert_eq!(book.size(), 1);
}
