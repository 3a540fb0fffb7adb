//! Demo binary: drive the book through a short session and print the result.

use matchbook::types::price::from_ticks;
use matchbook::{Order, OrderBook, OrderType, Side};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let book = OrderBook::new();

    // Build a small resting book.
    book.add(Order::limit(OrderType::GoodTillCancel, 1, Side::Buy, 9_950, 10));
    book.add(Order::limit(OrderType::GoodTillCancel, 2, Side::Buy, 9_900, 20));
    book.add(Order::limit(OrderType::GoodTillCancel, 3, Side::Sell, 10_050, 10));
    book.add(Order::limit(OrderType::GoodForDay, 4, Side::Sell, 10_100, 15));

    // A market buy lifts the best ask.
    let trades = book.add(Order::market(5, Side::Buy, 6));
    for trade in &trades {
        println!(
            "trade: bid #{} / ask #{}  {} @ {}",
            trade.bid().order_id,
            trade.ask().order_id,
            trade.quantity(),
            from_ticks(trade.ask().price),
        );
    }

    let snapshot = book.snapshot();
    println!("\nbids:");
    for level in &snapshot.bids {
        println!("  {:>10} x {}", from_ticks(level.price), level.quantity);
    }
    println!("asks:");
    for level in &snapshot.asks {
        println!("  {:>10} x {}", from_ticks(level.price), level.quantity);
    }
    println!("\nresting orders: {}", book.size());
}
