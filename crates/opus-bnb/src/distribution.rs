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

//! Non-redundant operator distribution
//!
//! After a node is refined, its surviving children share the operators the
//! parent had left. `distribute` hands them out so that every candidate is
//! generated along exactly one path: children are walked in order, each one
//! spends its own producing operator and keeps what remains after that. A
//! candidate reachable through `{a, b}` is therefore built as `a` then `b`,
//! never also as `b` then `a`.
//!
//! The walk order matters. `OperatorOrder::OpusPaper` visits children by
//! ascending potential, so the most promising children receive the smallest
//! subtrees and the weakest children carry the large ones, where they are
//! pruned early.

use crate::node::SearchNode;
use crate::operator::OperatorSet;
use opus_search::num::SearchValue;

/// The order in which children receive their operator sets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum OperatorOrder {
    /// Ascending potential (stable).
    #[default]
    OpusPaper,
    /// Keep the order the children were produced in.
    Trivial,
}

impl std::fmt::Display for OperatorOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorOrder::OpusPaper => write!(f, "OpusPaper"),
            OperatorOrder::Trivial => write!(f, "Trivial"),
        }
    }
}

impl OperatorOrder {
    /// Reorders `children` for distribution.
    #[inline]
    pub fn arrange<N, T>(self, children: &mut [SearchNode<N, T>])
    where
        T: SearchValue,
    {
        match self {
            OperatorOrder::OpusPaper => {
                children.sort_by(|a, b| a.potential().cmp_value(&b.potential()))
            }
            OperatorOrder::Trivial => {}
        }
    }
}

/// Assigns every child its active set and returns the children in
/// distribution order.
///
/// `remaining` is the parent's active set after the operators of discarded
/// children were removed. Each child gets a snapshot of `remaining` taken
/// right after its own producing operator was removed from it.
pub fn distribute<N, T>(
    mut children: Vec<SearchNode<N, T>>,
    remaining: OperatorSet,
    order: OperatorOrder,
) -> Vec<SearchNode<N, T>>
where
    T: SearchValue,
{
    order.arrange(&mut children);
    children
        .into_iter()
        .scan(remaining, |remaining, mut child| {
            if let Some(op) = child.producing_operator() {
                remaining.remove(op);
            }
            child.assign_active(remaining.clone());
            Some(child)
        })
        .collect()
}
