//! Single-threaded timer queue
//!
//! Stands in for browser timeouts. The host feeds the current time in
//! milliseconds; due events come back in (due time, insertion) order.
//! Cancelling a timer, or clearing the queue on reset, guarantees its event
//! is never delivered.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Handle to a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    due: u64,
    id: TimerId,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.id) == (other.due, other.id)
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.id).cmp(&(other.due, other.id))
    }
}

/// Ordered queue of pending events
#[derive(Debug)]
pub struct Scheduler<E> {
    queue: BinaryHeap<Reverse<Entry<E>>>,
    /// Ids still live; cancelled entries stay in the heap and are skipped
    live: Vec<TimerId>,
    next_id: u64,
    now: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            queue: BinaryHeap::new(),
            live: Vec::new(),
            next_id: 1,
            now: 0,
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last time passed to [`Scheduler::advance`]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `event` to fire `delay_ms` after the current time
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.schedule_at(self.now.saturating_add(delay_ms), event)
    }

    /// Schedule `event` at an absolute time
    pub fn schedule_at(&mut self, due: u64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Entry { due, id, event }));
        self.live.push(id);
        id
    }

    /// Returns false if the timer already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.live.iter().position(|&t| t == id) {
            Some(i) => {
                self.live.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Drop every pending event
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.live.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains(&id)
    }

    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Move the clock to `now` (never backwards) and pop the next due event.
    /// Call repeatedly until `None`; events scheduled while draining are seen
    /// if they are already due.
    pub fn pop_due(&mut self, now: u64) -> Option<E> {
        self.now = self.now.max(now);
        while let Some(Reverse(head)) = self.queue.peek() {
            if head.due > self.now {
                return None;
            }
            let Some(Reverse(entry)) = self.queue.pop() else {
                return None;
            };
            if self.cancel(entry.id) {
                return Some(entry.event);
            }
        }
        None
    }

    /// Collect every event due by `now`
    pub fn advance(&mut self, now: u64) -> Vec<E> {
        let mut due = Vec::new();
        while let Some(event) = self.pop_due(now) {
            due.push(event);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(300, "c");
        s.schedule(100, "a");
        s.schedule(100, "b");
        assert!(s.advance(99).is_empty());
        assert_eq!(s.advance(100), vec!["a", "b"]);
        assert_eq!(s.advance(1000), vec!["c"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let a = s.schedule(10, 1);
        s.schedule(20, 2);
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert!(!s.is_pending(a));
        assert_eq!(s.advance(50), vec![2]);
    }

    #[test]
    fn test_cancel_all_drops_everything() {
        let mut s = Scheduler::new();
        s.schedule(10, 1);
        s.schedule(20, 2);
        s.cancel_all();
        assert!(s.advance(100).is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut s = Scheduler::new();
        s.advance(1000);
        s.schedule(500, ());
        assert!(s.advance(1499).is_empty());
        assert_eq!(s.advance(1500).len(), 1);
        // Clock never runs backwards
        s.advance(10);
        assert_eq!(s.now(), 1500);
    }
}
