//! Local-time source for the end-of-day pruner.
//!
//! The book never reads the wall clock directly. The pruner asks a [`Clock`]
//! for the current local time when computing the next session close, so tests
//! can substitute a virtual clock and place "now" seconds before the close.

use chrono::{Local, NaiveDateTime};

/// Supplies the current local civil time.
pub trait Clock: Send + Sync + 'static {
    fn now_local(&self) -> NaiveDateTime;
}

/// The host system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
