//! Fire-and-forget timer queue
//!
//! Timers are kept in a min-heap ordered by due time, then by insertion
//! order, so two timers due at the same instant fire in the order they were
//! scheduled. There is no cancel; the session ignores stale ones.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::sim::{Scheduler, Timer};

#[derive(Debug, Clone, Copy)]
struct Pending {
    due_ms: u64,
    seq: u64,
    timer: Timer,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Reversed: BinaryHeap is a max-heap
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due_ms, other.seq).cmp(&(self.due_ms, self.seq))
    }
}

/// Timer queue keyed on host time
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Pending>,
    next_seq: u64,
    /// Base for relative delays passed to `after`
    now_ms: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the scheduling base forward (never backward)
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Remove and return the earliest timer due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, Timer)> {
        if self.heap.peek()?.due_ms > now_ms {
            return None;
        }
        self.heap.pop().map(|p| (p.due_ms, p.timer))
    }

    /// Due time of the next timer, if any
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|p| p.due_ms)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn after(&mut self, delay_ms: u64, timer: Timer) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Pending {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            timer,
        });
    }
}
