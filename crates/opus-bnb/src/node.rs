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

//! Search nodes
//!
//! A `SearchNode` is the unit of search state: a candidate plus the
//! bookkeeping the engine needs to refine it non-redundantly. Candidates are
//! held behind `Rc` because the same node can live on the frontier and in
//! the top-k set at once; the engine never mutates a candidate.
//!
//! Lifecycle
//! - `root` / `child` create a node with value and potential uncomputed
//!   (value `NaN`, potential `+inf`).
//! - `set_value` is called exactly once, when the node is evaluated.
//! - `set_potential` caches the bound computed by the pruning pipeline.
//! - `assign_active` attaches the node's own snapshot of the operators it
//!   may still apply. The set is never changed afterwards; children receive
//!   copies, never shared references.

use crate::operator::{OperatorIndex, OperatorSet};
use opus_search::num::SearchValue;
use std::rc::Rc;

/// A node of the OPUS search tree.
pub struct SearchNode<N, T> {
    content: Rc<N>,
    producing_operator: Option<OperatorIndex>,
    depth: u32,
    potential: T,
    value: T,
    active: OperatorSet,
}

impl<N, T> SearchNode<N, T>
where
    T: SearchValue,
{
    /// Creates a root node at depth zero.
    ///
    /// `producing_operator` is `None` for a plain root and `Some` for a
    /// singleton root obtained by applying an operator to a base candidate.
    #[inline]
    pub fn root(content: N, producing_operator: Option<OperatorIndex>) -> Self {
        Self::root_shared(Rc::new(content), producing_operator)
    }

    /// Creates a root node at depth zero around an already shared candidate.
    #[inline]
    pub fn root_shared(content: Rc<N>, producing_operator: Option<OperatorIndex>) -> Self {
        Self {
            content,
            producing_operator,
            depth: 0,
            potential: T::infinity(),
            value: T::nan(),
            active: OperatorSet::default(),
        }
    }

    /// Creates the child obtained from `parent` by applying `operator`,
    /// which produced `content`.
    #[inline]
    pub fn child(parent: &SearchNode<N, T>, operator: OperatorIndex, content: N) -> Self {
        debug_assert!(
            parent.active.contains(operator),
            "called `SearchNode::child` with operator {} that is not active at the parent",
            operator
        );

        Self {
            content: Rc::new(content),
            producing_operator: Some(operator),
            depth: parent.depth.saturating_add(1),
            potential: T::infinity(),
            value: T::nan(),
            active: OperatorSet::default(),
        }
    }

    /// Returns the candidate.
    #[inline]
    pub fn content(&self) -> &N {
        &self.content
    }

    /// Returns a shared handle to the candidate.
    #[inline]
    pub fn shared_content(&self) -> Rc<N> {
        Rc::clone(&self.content)
    }

    /// Returns the operator that created this node, if any.
    #[inline]
    pub fn producing_operator(&self) -> Option<OperatorIndex> {
        self.producing_operator
    }

    /// Returns the refinement depth (root = 0).
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the cached optimistic bound (`+inf` until computed).
    #[inline]
    pub fn potential(&self) -> T {
        self.potential
    }

    /// Returns the target value (`NaN` until evaluated).
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns `true` once the target value has been set.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        !self.value.is_nan()
    }

    /// Returns the operators this node may apply when refined.
    #[inline]
    pub fn active(&self) -> &OperatorSet {
        &self.active
    }

    /// Records the target value. A `NaN` value is stored as `-inf`, so an
    /// undefined quality never outranks a defined one.
    #[inline]
    pub fn set_value(&mut self, value: T) {
        debug_assert!(
            !self.is_evaluated(),
            "called `SearchNode::set_value` on a node that was already evaluated"
        );
        self.value = if value.is_nan() {
            T::neg_infinity()
        } else {
            value
        };
    }

    /// Caches the optimistic bound of this node.
    #[inline]
    pub fn set_potential(&mut self, potential: T) {
        self.potential = potential;
    }

    /// Attaches the node's own snapshot of active operators.
    #[inline]
    pub fn assign_active(&mut self, operators: OperatorSet) {
        self.active = operators;
    }
}

impl<N, T> Clone for SearchNode<N, T>
where
    T: Copy,
{
    fn clone(&self) -> Self {
        Self {
            content: Rc::clone(&self.content),
            producing_operator: self.producing_operator,
            depth: self.depth,
            potential: self.potential,
            value: self.value,
            active: self.active.clone(),
        }
    }
}

impl<N, T> std::fmt::Debug for SearchNode<N, T>
where
    N: std::fmt::Debug,
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchNode")
            .field("content", &self.content)
            .field("producing_operator", &self.producing_operator)
            .field("depth", &self.depth)
            .field("potential", &self.potential)
            .field("value", &self.value)
            .field("active", &self.active)
            .finish()
    }
}

impl<N, T> std::fmt::Display for SearchNode<N, T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(depth: {}, value: {}, potential: {}, active: {})",
            self.depth,
            self.value,
            self.potential,
            self.active.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Node = SearchNode<Vec<u8>, f64>;

    fn root_with_all(num_operators: usize) -> Node {
        let mut root = Node::root(Vec::new(), None);
        root.assign_active(OperatorSet::full(num_operators));
        root
    }

    #[test]
    fn test_root_starts_unevaluated_with_infinite_potential() {
        let root = Node::root(vec![], None);
        assert_eq!(root.depth(), 0);
        assert!(root.producing_operator().is_none());
        assert!(root.potential().is_infinite() && root.potential() > 0.0);
        assert!(!root.is_evaluated());
        assert!(root.active().is_empty());
    }

    #[test]
    fn test_child_increments_depth_and_records_operator() {
        let root = root_with_all(3);
        let child = Node::child(&root, OperatorIndex::new(1), vec![1]);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.producing_operator(), Some(OperatorIndex::new(1)));
        assert_eq!(child.content(), &vec![1]);
        assert!(child.active().is_empty());
        assert!(!child.is_evaluated());
    }

    #[test]
    fn test_assign_active_is_an_owned_snapshot() {
        let root = root_with_all(3);
        let mut child = Node::child(&root, OperatorIndex::new(0), vec![0]);
        let remaining = root.active().without(OperatorIndex::new(0));
        child.assign_active(remaining.clone());

        drop(remaining);
        assert_eq!(child.active().len(), 2);
        assert_eq!(root.active().len(), 3);
        assert!(child.active().is_subset(root.active()));
    }

    #[test]
    fn test_nan_value_is_stored_as_negative_infinity() {
        let mut node = Node::root(vec![], None);
        node.set_value(f64::NAN);
        assert!(node.is_evaluated());
        assert_eq!(node.value(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_shared_content_does_not_copy() {
        let node = Node::root(vec![7, 8], None);
        let shared = node.shared_content();
        assert!(Rc::ptr_eq(&shared, &node.shared_content()));
    }
}
