//! Interrupt-context producer side of a time list
//!
//! `record` runs inside an interrupt handler (or an edge-waiting task) while
//! the UI loop calls `snapshot`. Both sides take a short critical section,
//! so an append can never interleave with a copy in progress.

use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use super::Tick;
use super::time_list::{DEFAULT_TIME_LIST_CAPACITY, InterruptTimeList};

/// Single-producer/single-consumer hand-off of interrupt timestamps
///
/// ```rust,ignore
/// static IRQ1: InterruptRecorder = InterruptRecorder::new();
///
/// // interrupt handler
/// IRQ1.record(now_ms());
///
/// // UI loop
/// screen.set_list(IRQ1.snapshot(), Lane::First);
/// ```
pub struct InterruptRecorder<const N: usize = DEFAULT_TIME_LIST_CAPACITY> {
    list: Mutex<CriticalSectionRawMutex, RefCell<InterruptTimeList<N>>>,
    /// Lifetime event count, not bounded by `N`
    total: AtomicU32,
}

impl<const N: usize> InterruptRecorder<N> {
    pub const fn new() -> Self {
        Self {
            list: Mutex::new(RefCell::new(InterruptTimeList::new())),
            total: AtomicU32::new(0),
        }
    }

    /// Record one interrupt occurrence
    pub fn record(&self, tick: Tick) {
        self.list.lock(|list| list.borrow_mut().push(tick));
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the retained events for the main loop
    pub fn snapshot(&self) -> InterruptTimeList<N> {
        self.list.lock(|list| list.borrow().clone())
    }

    /// Number of events recorded since creation or the last `clear`
    pub fn total(&self) -> u32 {
        self.total.load(Ordering::Relaxed)
    }

    /// Forget every recorded event
    pub fn clear(&self) {
        self.list.lock(|list| list.borrow_mut().clear());
        self.total.store(0, Ordering::Relaxed);
    }
}

impl<const N: usize> Default for InterruptRecorder<N> {
    fn default() -> Self {
        Self::new()
    }
}
