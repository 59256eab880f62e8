//! Bounded deque for records held in memory awaiting a retry
//!
//! Fixed capacity with oldest-first eviction. The evicted item is handed back
//! to the caller so it can report the loss.

use std::collections::VecDeque;

/// A bounded deque with FIFO eviction policy
#[derive(Clone, Debug)]
pub struct BoundedDeque<T> {
    cap: usize,
    buf: VecDeque<T>,
}

impl<T> BoundedDeque<T> {
    /// Create a deque holding at most `cap` items
    ///
    /// With a capacity of 0 nothing is ever kept.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            buf: VecDeque::with_capacity(cap.min(1024)),
        }
    }

    /// Push to the back; returns the item that did not fit, if any
    ///
    /// At capacity the oldest item is evicted. With a capacity of 0 the
    /// pushed value itself comes back.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.cap == 0 {
            return Some(value);
        }
        let evicted = if self.buf.len() == self.cap {
            self.buf.pop_front()
        } else {
            None
        };
        self.buf.push_back(value);
        evicted
    }

    /// Oldest item
    pub fn front(&self) -> Option<&T> {
        self.buf.front()
    }

    /// Remove and return the oldest item
    pub fn pop_front(&mut self) -> Option<T> {
        self.buf.pop_front()
    }

    /// Items from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_deque_basic() {
        let mut deque = BoundedDeque::new(3);
        assert_eq!(deque.push(1), None);
        assert_eq!(deque.push(2), None);
        assert_eq!(deque.push(3), None);
        assert_eq!(deque.len(), 3);
        assert_eq!(deque.front(), Some(&1));
        assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_bounded_deque_eviction() {
        let mut deque = BoundedDeque::new(3);
        deque.push(1);
        deque.push(2);
        deque.push(3);
        assert_eq!(deque.push(4), Some(1));
        assert_eq!(deque.len(), 3);
        assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_bounded_deque_pop_front() {
        let mut deque = BoundedDeque::new(2);
        deque.push("a");
        deque.push("b");
        assert_eq!(deque.pop_front(), Some("a"));
        assert_eq!(deque.pop_front(), Some("b"));
        assert_eq!(deque.pop_front(), None);
        assert!(deque.is_empty());
        assert_eq!(deque.capacity(), 2);
    }

    #[test]
    fn test_bounded_deque_zero_capacity() {
        let mut deque = BoundedDeque::new(0);
        assert_eq!(deque.push(1), Some(1));
        assert!(deque.is_empty());
    }
}
