// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Bounded top-k result set
//!
//! `TopKSet` keeps the `k` best evaluated nodes seen so far in a size-capped
//! min-heap. The heap root is the current k-th best node; its value is the
//! pruning threshold once the set is full. Because a full set only ever
//! replaces its minimum with something strictly better, the threshold never
//! decreases during a run.
//!
//! Ties: among entries with equal value the most recently inserted one is
//! evicted first, and the drained result lists earlier insertions first.

use crate::node::SearchNode;
use opus_search::num::SearchValue;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct RankedEntry<N, T> {
    value: T,
    sequence: u64,
    node: SearchNode<N, T>,
}

impl<N, T> Ord for RankedEntry<N, T>
where
    T: SearchValue,
{
    // Greater means better: higher value, then earlier insertion.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp_value(&other.value)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<N, T> PartialOrd for RankedEntry<N, T>
where
    T: SearchValue,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, T> PartialEq for RankedEntry<N, T>
where
    T: SearchValue,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N, T> Eq for RankedEntry<N, T> where T: SearchValue {}

/// The `k` best nodes seen so far.
pub struct TopKSet<N, T> {
    heap: BinaryHeap<Reverse<RankedEntry<N, T>>>,
    capacity: usize,
    next_sequence: u64,
    best_so_far: Option<SearchNode<N, T>>,
}

impl<N, T> TopKSet<N, T>
where
    T: SearchValue,
{
    /// Creates an empty set holding at most `max(k, 1)` nodes.
    #[inline]
    pub fn new(k: usize) -> Self {
        let capacity = k.max(1);
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
            next_sequence: 0,
            best_so_far: None,
        }
    }

    /// Returns the maximum number of nodes held.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of nodes held.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no node is held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns `true` once `capacity()` nodes are held.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Returns the current k-th best node, if any.
    #[inline]
    pub fn peek(&self) -> Option<&SearchNode<N, T>> {
        self.heap.peek().map(|Reverse(entry)| &entry.node)
    }

    /// Returns the value a candidate must beat to enter the set.
    ///
    /// This is `-inf` while free slots remain, otherwise the value of the
    /// k-th best node.
    #[inline]
    pub fn threshold(&self) -> T {
        if !self.is_full() {
            return T::neg_infinity();
        }
        self.heap
            .peek()
            .map_or_else(T::neg_infinity, |Reverse(entry)| entry.value)
    }

    /// Returns the highest-valued node ever inserted, even if it was evicted
    /// since.
    #[inline]
    pub fn best_so_far(&self) -> Option<&SearchNode<N, T>> {
        self.best_so_far.as_ref()
    }

    /// Offers `node` to the set. Returns `true` if it was inserted.
    ///
    /// A full set accepts the node only if its value is strictly greater
    /// than the current k-th best, which is then evicted.
    pub fn try_insert(&mut self, node: &SearchNode<N, T>) -> bool {
        let value = node.value();
        if self.is_full() && value.cmp_value(&self.threshold()) != Ordering::Greater {
            return false;
        }
        if self.is_full() {
            self.heap.pop();
        }

        let better = self
            .best_so_far
            .as_ref()
            .is_none_or(|best| value.cmp_value(&best.value()) == Ordering::Greater);
        if better {
            self.best_so_far = Some(node.clone());
        }

        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.heap.push(Reverse(RankedEntry {
            value,
            sequence,
            node: node.clone(),
        }));
        true
    }

    /// Drains the set into a vector sorted by descending value, earlier
    /// insertions first among equal values.
    pub fn into_sorted_vec(self) -> Vec<SearchNode<N, T>> {
        // Ascending `Reverse` order is descending rank.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(entry)| entry.node)
            .collect()
    }
}

impl<N, T> std::fmt::Debug for TopKSet<N, T>
where
    T: SearchValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopKSet")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("threshold", &self.threshold())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Node = SearchNode<&'static str, f64>;

    fn evaluated(label: &'static str, value: f64) -> Node {
        let mut node = Node::root(label, None);
        node.set_value(value);
        node
    }

    fn labels(set: TopKSet<&'static str, f64>) -> Vec<&'static str> {
        set.into_sorted_vec().iter().map(|n| *n.content()).collect()
    }

    #[test]
    fn test_threshold_is_negative_infinity_until_full() {
        let mut set = TopKSet::new(2);
        assert_eq!(set.threshold(), f64::NEG_INFINITY);
        assert!(set.try_insert(&evaluated("a", 5.0)));
        assert_eq!(set.threshold(), f64::NEG_INFINITY);
        assert!(set.try_insert(&evaluated("b", 3.0)));
        assert_eq!(set.threshold(), 3.0);
    }

    #[test]
    fn test_full_set_requires_strict_improvement() {
        let mut set = TopKSet::new(1);
        assert!(set.try_insert(&evaluated("a", 1.0)));
        assert!(!set.try_insert(&evaluated("b", 1.0)));
        assert!(!set.try_insert(&evaluated("c", 0.5)));
        assert!(set.try_insert(&evaluated("d", 2.0)));
        assert_eq!(set.len(), 1);
        assert_eq!(labels(set), vec!["d"]);
    }

    #[test]
    fn test_most_recent_of_equal_values_is_evicted_first() {
        let mut set = TopKSet::new(2);
        set.try_insert(&evaluated("old", 1.0));
        set.try_insert(&evaluated("new", 1.0));
        assert!(set.try_insert(&evaluated("best", 2.0)));
        assert_eq!(labels(set), vec!["best", "old"]);
    }

    #[test]
    fn test_sorted_output_is_descending_with_stable_ties() {
        let mut set = TopKSet::new(4);
        for (label, value) in [("x", 1.0), ("y", 3.0), ("z", 1.0), ("w", 2.0)] {
            set.try_insert(&evaluated(label, value));
        }
        assert_eq!(labels(set), vec!["y", "w", "x", "z"]);
    }

    #[test]
    fn test_threshold_never_decreases() {
        let mut set = TopKSet::new(3);
        let mut last = set.threshold();
        for (i, value) in [4.0, 1.0, 7.0, 2.0, 2.0, 9.0, 0.0, 5.0].into_iter().enumerate() {
            let label: &'static str = ["a", "b", "c", "d", "e", "f", "g", "h"][i];
            set.try_insert(&evaluated(label, value));
            assert!(set.threshold() >= last);
            assert!(set.len() <= set.capacity());
            last = set.threshold();
        }
        assert_eq!(set.threshold(), 5.0);
    }

    #[test]
    fn test_best_so_far_tracks_highest_value() {
        let mut set = TopKSet::new(1);
        set.try_insert(&evaluated("a", 1.0));
        set.try_insert(&evaluated("b", 4.0));
        assert_eq!(set.best_so_far().map(|n| *n.content()), Some("b"));
        assert_eq!(set.peek().map(|n| n.value()), Some(4.0));
    }

    #[test]
    fn test_zero_capacity_is_clamped_to_one() {
        let set = TopKSet::<&'static str, f64>::new(0);
        assert_eq!(set.capacity(), 1);
        assert!(set.is_empty());
    }
}
