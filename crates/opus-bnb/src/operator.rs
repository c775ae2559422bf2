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

//! Refinement operators and active operator sets
//!
//! Operators are pure functions from a candidate to a strictly more specific
//! candidate. The engine keeps them in a table and refers to them by
//! `OperatorIndex`, which gives operators the identity that set membership
//! needs (closures themselves cannot be compared).
//!
//! `OperatorSet` is the per-node "active" set: the operators a node may
//! still apply. It is backed by a `FixedBitSet` sized to the operator table,
//! so iteration follows table order. Sets only ever shrink, which keeps the
//! insertion order of the root set intact for every descendant.

use fixedbitset::FixedBitSet;
use std::iter::FusedIterator;

/// A strongly typed index into the operator table of a search.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorIndex(usize);

impl OperatorIndex {
    /// Creates a new `OperatorIndex`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for OperatorIndex {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Debug for OperatorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OperatorIndex({})", self.0)
    }
}

impl std::fmt::Display for OperatorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OperatorIndex({})", self.0)
    }
}

/// A refinement operator: maps a candidate to a more specific candidate.
///
/// Implementations must be pure; the engine applies each operator at most
/// once per parent and never caches results.
pub trait RefinementOperator<N> {
    /// Returns the name of the operator.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Applies the operator to `candidate`.
    fn apply(&self, candidate: &N) -> N;
}

impl<N, F> RefinementOperator<N> for F
where
    F: Fn(&N) -> N,
{
    #[inline(always)]
    fn apply(&self, candidate: &N) -> N {
        self(candidate)
    }
}

/// The ordered set of operators a search node may still apply.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct OperatorSet {
    bits: FixedBitSet,
}

impl OperatorSet {
    /// Creates an empty set able to hold indices `0..num_operators`.
    #[inline]
    pub fn empty(num_operators: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(num_operators),
        }
    }

    /// Creates a set holding every index in `0..num_operators`.
    #[inline]
    pub fn full(num_operators: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(num_operators);
        bits.insert_range(..);
        Self { bits }
    }

    /// Returns the number of operators the set can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Returns the number of operators in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Returns `true` if the set contains no operators.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Returns `true` if `operator` is in the set.
    #[inline]
    pub fn contains(&self, operator: OperatorIndex) -> bool {
        self.bits.contains(operator.get())
    }

    /// Adds `operator` to the set.
    ///
    /// # Panics
    ///
    /// Panics if `operator` is not within `0..capacity()`.
    #[inline]
    pub fn insert(&mut self, operator: OperatorIndex) {
        assert!(
            operator.get() < self.capacity(),
            "called `OperatorSet::insert` with operator index out of bounds: the capacity is {} but the index is {}",
            self.capacity(),
            operator.get()
        );
        self.bits.insert(operator.get());
    }

    /// Removes `operator` from the set. Returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, operator: OperatorIndex) -> bool {
        if operator.get() >= self.capacity() {
            return false;
        }
        let present = self.bits.contains(operator.get());
        self.bits.set(operator.get(), false);
        present
    }

    /// Returns a copy of the set without `operator`.
    #[inline]
    pub fn without(&self, operator: OperatorIndex) -> Self {
        let mut next = self.clone();
        next.remove(operator);
        next
    }

    /// Returns `true` if every operator in `self` is also in `other`.
    #[inline]
    pub fn is_subset(&self, other: &OperatorSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    /// Iterates the operators in table order.
    #[inline]
    pub fn iter(&self) -> OperatorSetIter<'_> {
        OperatorSetIter {
            inner: self.bits.ones(),
        }
    }
}

impl std::fmt::Debug for OperatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.bits.ones()).finish()
    }
}

impl std::fmt::Display for OperatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items = self
            .bits
            .ones()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "OperatorSet{{{}}}", items)
    }
}

/// An iterator over the operators of an `OperatorSet` in table order.
pub struct OperatorSetIter<'a> {
    inner: fixedbitset::Ones<'a>,
}

impl Iterator for OperatorSetIter<'_> {
    type Item = OperatorIndex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(OperatorIndex::new)
    }
}

impl FusedIterator for OperatorSetIter<'_> {}

impl<'a> IntoIterator for &'a OperatorSet {
    type Item = OperatorIndex;
    type IntoIter = OperatorSetIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(i: usize) -> OperatorIndex {
        OperatorIndex::new(i)
    }

    #[test]
    fn test_full_set_iterates_in_table_order() {
        let set = OperatorSet::full(4);
        assert_eq!(set.len(), 4);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![op(0), op(1), op(2), op(3)]
        );
    }

    #[test]
    fn test_empty_set() {
        let set = OperatorSet::empty(3);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 3);
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_remove_preserves_order_of_remaining() {
        let mut set = OperatorSet::full(5);
        assert!(set.remove(op(2)));
        assert!(!set.remove(op(2)));
        assert!(!set.remove(op(99)));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![op(0), op(1), op(3), op(4)]
        );
    }

    #[test]
    fn test_without_leaves_original_untouched() {
        let set = OperatorSet::full(3);
        let smaller = set.without(op(0));
        assert!(set.contains(op(0)));
        assert!(!smaller.contains(op(0)));
        assert!(smaller.is_subset(&set));
        assert!(!set.is_subset(&smaller));
    }

    #[test]
    fn test_insert_and_display() {
        let mut set = OperatorSet::empty(4);
        set.insert(op(3));
        set.insert(op(1));
        assert_eq!(set.to_string(), "OperatorSet{1, 3}");
        assert_eq!(format!("{:?}", set), "{1, 3}");
    }

    #[test]
    #[should_panic(expected = "operator index out of bounds")]
    fn test_insert_out_of_bounds_panics() {
        let mut set = OperatorSet::empty(2);
        set.insert(op(2));
    }

    #[test]
    fn test_closure_is_an_operator() {
        let add_one = |v: &Vec<u8>| {
            let mut next = v.clone();
            next.push(1);
            next
        };
        assert_eq!(RefinementOperator::apply(&add_one, &vec![0]), vec![0, 1]);
    }
}
