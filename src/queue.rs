//! A priority queue that supports removing arbitrary entries.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::num::CheapOrderedFloat;
use crate::Error;

type Key = (CheapOrderedFloat, u64);

/// A min-queue of `T`s keyed by `f64`.
///
/// Entries with equal keys come out in the order they were pushed. Each item
/// can be queued at most once, and can be taken out of the queue again with
/// [`PriorityQueue::invalidate`].
#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    entries: BTreeMap<Key, T>,
    keys: HashMap<T, Key>,
    next_seq: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        PriorityQueue {
            entries: BTreeMap::new(),
            keys: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T: Copy + Eq + Hash> PriorityQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `item` with priority `key`.
    ///
    /// Returns `false` (and does nothing) if `item` is already queued.
    pub fn push(&mut self, item: T, key: f64) -> bool {
        if self.keys.contains_key(&item) {
            return false;
        }
        let k = (CheapOrderedFloat::from(key), self.next_seq);
        self.next_seq += 1;
        self.entries.insert(k, item);
        self.keys.insert(item, k);
        true
    }

    /// Removes and returns the item with the smallest key, along with its key.
    pub fn pop(&mut self) -> Result<(f64, T), Error> {
        let ((key, _), item) = self.entries.pop_first().ok_or(Error::EmptyQueue)?;
        self.keys.remove(&item);
        Ok((key.into_inner(), item))
    }

    /// The item that [`PriorityQueue::pop`] would return next.
    pub fn peek(&self) -> Result<(f64, T), Error> {
        self.entries
            .first_key_value()
            .map(|((key, _), item)| (key.into_inner(), *item))
            .ok_or(Error::EmptyQueue)
    }

    /// The smallest key in the queue.
    pub fn peek_key(&self) -> Option<f64> {
        self.entries
            .first_key_value()
            .map(|((key, _), _)| key.into_inner())
    }

    /// Takes `item` out of the queue, if it's there.
    ///
    /// Returns whether anything was removed.
    pub fn invalidate(&mut self, item: &T) -> bool {
        match self.keys.remove(item) {
            Some(k) => {
                self.entries.remove(&k);
                true
            }
            None => false,
        }
    }

    /// Is `item` currently queued?
    pub fn contains(&self, item: &T) -> bool {
        self.keys.contains_key(item)
    }

    /// The number of queued items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn empty() {
        let mut q = PriorityQueue::<u32>::new();
        assert_matches!(q.pop(), Err(Error::EmptyQueue));
        assert_matches!(q.peek(), Err(Error::EmptyQueue));
        assert_eq!(q.peek_key(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn ties_in_insertion_order() {
        let mut q = PriorityQueue::new();
        q.push('b', 1.0);
        q.push('a', 1.0);
        q.push('z', 0.5);
        q.push('c', 1.0);

        assert_eq!(q.peek_key(), Some(0.5));
        assert_eq!(q.peek().unwrap(), (0.5, 'z'));
        let order: Vec<_> = std::iter::from_fn(|| q.pop().ok()).map(|(_, c)| c).collect();
        assert_eq!(order, vec!['z', 'b', 'a', 'c']);
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut q = PriorityQueue::new();
        assert!(q.push(7, 3.0));
        assert!(!q.push(7, 1.0));
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop().unwrap(), (3.0, 7));

        // Once popped, it can be pushed again.
        assert!(q.push(7, 1.0));
    }

    #[test]
    fn invalidate() {
        let mut q = PriorityQueue::new();
        q.push(1, 1.0);
        q.push(2, 2.0);
        q.push(3, 3.0);

        assert!(q.invalidate(&1));
        assert!(!q.invalidate(&1));
        assert!(!q.contains(&1));
        assert_eq!(q.peek().unwrap(), (2.0, 2));

        assert!(q.invalidate(&3));
        assert_eq!(q.pop().unwrap(), (2.0, 2));
        assert_matches!(q.pop(), Err(Error::EmptyQueue));
    }

    proptest! {
    #[test]
    fn matches_stable_sort(
        keys in prop::collection::vec(0u8..8, 0..40),
        removed in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let mut q = PriorityQueue::new();
        for (item, &key) in keys.iter().enumerate() {
            q.push(item, key as f64);
        }

        let mut expected: Vec<(usize, u8)> = keys.iter().copied().enumerate().collect();
        if !expected.is_empty() {
            for idx in &removed {
                let item = idx.index(keys.len());
                if q.invalidate(&item) {
                    expected.retain(|(i, _)| *i != item);
                }
            }
        }
        expected.sort_by_key(|(_, key)| *key);

        let mut actual = Vec::new();
        while let Ok((key, item)) = q.pop() {
            actual.push((item, key as u8));
        }
        prop_assert_eq!(actual, expected);
    }
    }
}
