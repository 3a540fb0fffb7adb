//! Thread-safe order book with the end-of-day pruner.
//!
//! ## Locking Model
//!
//! All book state lives in a single `Mutex<BookCore>`. Every public
//! operation holds the lock for its full duration, so observers see a
//! sequentially consistent history and the pruner's batch cancel appears
//! atomic with respect to foreground calls.
//!
//! ## Pruner Lifecycle
//!
//! Construction spawns one background thread that sleeps until the next
//! session close (plus a small grace period) on a condition variable paired
//! with the state lock. On expiry it collects every good-for-day order id
//! and cancels them without releasing the lock in between. Dropping the book
//! sets the shutdown flag, wakes the thread, and joins it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use parking_lot::{Condvar, Mutex};
use tracing::info;

use crate::book::core::BookCore;
use crate::clock::{Clock, SystemClock};
use crate::config::BookConfig;
use crate::types::{BookSnapshot, Order, OrderId, OrderModify, Trades};

/// A limit order book for one instrument, safe to share across threads.
///
/// ## Example
///
/// ```
/// use matchbook::{OrderBook, Order, OrderType, Side};
///
/// let book = OrderBook::new();
/// book.add(Order::limit(OrderType::GoodTillCancel, 1, Side::Buy, 10_000, 10));
/// let trades = book.add(Order::limit(OrderType::GoodTillCancel, 2, Side::Sell, 10_000, 10));
///
/// assert_eq!(trades.len(), 1);
/// assert_eq!(book.size(), 0);
/// ```
pub struct OrderBook {
    shared: Arc<Shared>,
    pruner: Option<JoinHandle<()>>,
}

struct Shared {
    core: Mutex<BookCore>,
    close_signal: Condvar,
    shutdown: AtomicBool,
    config: BookConfig,
    clock: Box<dyn Clock>,
}

impl OrderBook {
    /// Create a book with default options and the system clock, and start
    /// the pruner.
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create a book with the given options and the system clock.
    pub fn with_config(config: BookConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Create a book with the given options and clock. Tests substitute a
    /// virtual clock here to drive the pruner deterministically.
    pub fn with_clock(config: BookConfig, clock: impl Clock) -> Self {
        let shared = Arc::new(Shared {
            core: Mutex::new(BookCore::new()),
            close_signal: Condvar::new(),
            shutdown: AtomicBool::new(false),
            config,
            clock: Box::new(clock),
        });

        let worker = Arc::clone(&shared);
        let pruner = thread::Builder::new()
            .name("gfd-pruner".into())
            .spawn(move || prune_loop(&worker))
            .expect("failed to spawn pruner thread");

        Self {
            shared,
            pruner: Some(pruner),
        }
    }

    /// Submit an order. See [`BookCore::add`] for the order-type policy.
    pub fn add(&self, order: Order) -> Trades {
        self.shared.core.lock().add(order)
    }

    /// Cancel a resting order by id. Unknown ids are ignored.
    pub fn cancel(&self, id: OrderId) {
        self.shared.core.lock().cancel(id)
    }

    /// Replace a resting order; cancel-then-add semantics.
    pub fn modify(&self, modify: OrderModify) -> Trades {
        self.shared.core.lock().modify(modify)
    }

    /// Number of resting orders.
    pub fn size(&self) -> usize {
        self.shared.core.lock().size()
    }

    /// Aggregated per-level depth for both sides, best-first.
    pub fn snapshot(&self) -> BookSnapshot {
        self.shared.core.lock().snapshot()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for OrderBook {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        // Taking the lock pins the pruner either before its shutdown check
        // or inside the condvar wait, so the notification cannot be lost.
        drop(self.shared.core.lock());
        self.shared.close_signal.notify_one();
        if let Some(handle) = self.pruner.take() {
            let _ = handle.join();
        }
    }
}

// ============================================================================
// Pruner
// ============================================================================

fn prune_loop(shared: &Shared) {
    let close_hour = shared.config.session_close_hour.min(23);

    loop {
        if shared.shutdown.load(Ordering::Acquire) {
            return;
        }

        let now = shared.clock.now_local();
        let close = next_close(now, close_hour);
        let timeout = (close - now).to_std().unwrap_or(Duration::ZERO) + shared.config.prune_grace;

        let mut core = shared.core.lock();
        if shared.shutdown.load(Ordering::Acquire) {
            return;
        }
        let timed_out = shared.close_signal.wait_for(&mut core, timeout).timed_out();
        if shared.shutdown.load(Ordering::Acquire) {
            return;
        }
        if !timed_out {
            // Woken without shutdown; recompute the deadline.
            continue;
        }

        // Scan and batch-cancel under the single held lock.
        let ids = core.good_for_day_ids();
        if !ids.is_empty() {
            info!(count = ids.len(), "pruning good-for-day orders at session close");
        }
        for id in ids {
            core.cancel(id);
        }
    }
}

/// The next instant the local clock reads `close_hour:00:00`.
fn next_close(now: NaiveDateTime, close_hour: u32) -> NaiveDateTime {
    let mut date = now.date();
    if now.hour() >= close_hour {
        date = date.succ_opt().unwrap_or(date);
    }
    date.and_hms_opt(close_hour, 0, 0)
        .expect("close hour is clamped to 0..24")
}

// ============================================================================
// Unit Tests
// ============================================================================
