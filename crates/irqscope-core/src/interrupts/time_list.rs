//! Bounded chronological record of interrupt occurrences for one source

use heapless::Deque;

use super::Tick;

/// Default number of events retained per interrupt source
pub const DEFAULT_TIME_LIST_CAPACITY: usize = 64;

/// Ring buffer of interrupt timestamps, oldest first
///
/// Insertion order is chronological order. Once `N` events are held, each
/// new event evicts the oldest one.
#[derive(Debug, Clone)]
pub struct InterruptTimeList<const N: usize = DEFAULT_TIME_LIST_CAPACITY> {
    events: Deque<Tick, N>,
}

impl<const N: usize> InterruptTimeList<N> {
    /// Create an empty list
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Build a list from a chronological slice, keeping the newest `N` events
    pub fn from_ticks(ticks: &[Tick]) -> Self {
        let mut list = Self::new();
        for &tick in ticks {
            list.push(tick);
        }
        list
    }

    /// Record an event, evicting the oldest one when full
    pub fn push(&mut self, tick: Tick) {
        if self.events.is_full() {
            self.events.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.events.push_back(tick);
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.events.is_full()
    }

    /// Maximum number of retained events
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Iterate events from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Tick> + '_ {
        self.events.iter().copied()
    }

    /// Oldest retained event
    pub fn first(&self) -> Option<Tick> {
        self.events.front().copied()
    }

    /// Most recent event
    pub fn last(&self) -> Option<Tick> {
        self.events.back().copied()
    }

    /// Interval between the two most recent events
    pub fn last_interval(&self) -> Option<Tick> {
        let mut newest = self.events.iter().rev();
        let last = *newest.next()?;
        let previous = *newest.next()?;
        Some(last.wrapping_sub(previous))
    }

    /// Drop all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<const N: usize> Default for InterruptTimeList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for InterruptTimeList<N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<const N: usize> Eq for InterruptTimeList<N> {}
