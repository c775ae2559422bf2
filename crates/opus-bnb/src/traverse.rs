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

//! Traversal orders
//!
//! A `TraverseOrder` decides which frontier discipline the search uses. It is
//! a closed set of strategies; the driver loop builds the matching frontier
//! once per run and asks `early_abort_possible` on every dequeue.

use crate::frontier::{Frontier, PriorityFrontier, PriorityKey, QueueFrontier, StackFrontier};
use opus_search::num::SearchValue;

/// The order in which frontier nodes are refined.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum TraverseOrder {
    /// Highest potential first. The only order that may stop the whole
    /// search at the first stale node.
    #[default]
    BestFirstPotential,
    /// Highest value first.
    BestFirstValue,
    /// Shallowest first, then highest potential.
    BreadthFirstPotential,
    /// Shallowest first, then highest value.
    BreadthFirstValue,
    /// Last in, first out.
    DepthFirst,
    /// First in, first out.
    Fifo,
}

impl TraverseOrder {
    /// All traversal orders.
    pub const ALL: [TraverseOrder; 6] = [
        TraverseOrder::BestFirstPotential,
        TraverseOrder::BestFirstValue,
        TraverseOrder::BreadthFirstPotential,
        TraverseOrder::BreadthFirstValue,
        TraverseOrder::DepthFirst,
        TraverseOrder::Fifo,
    ];

    /// Returns `true` if a stale node at the head of the frontier proves that
    /// every remaining node is stale too.
    ///
    /// Only holds when nodes leave the frontier in order of non-increasing
    /// potential.
    #[inline]
    pub const fn early_abort_possible(self) -> bool {
        matches!(self, TraverseOrder::BestFirstPotential)
    }

    /// Builds an empty frontier implementing this order.
    pub fn frontier<'a, N, T>(self) -> Box<dyn Frontier<N, T> + 'a>
    where
        N: 'a,
        T: SearchValue,
    {
        match self {
            TraverseOrder::BestFirstPotential => {
                Box::new(PriorityFrontier::best_first(PriorityKey::Potential))
            }
            TraverseOrder::BestFirstValue => {
                Box::new(PriorityFrontier::best_first(PriorityKey::Value))
            }
            TraverseOrder::BreadthFirstPotential => {
                Box::new(PriorityFrontier::breadth_first(PriorityKey::Potential))
            }
            TraverseOrder::BreadthFirstValue => {
                Box::new(PriorityFrontier::breadth_first(PriorityKey::Value))
            }
            TraverseOrder::DepthFirst => Box::new(StackFrontier::new()),
            TraverseOrder::Fifo => Box::new(QueueFrontier::new()),
        }
    }
}

impl std::fmt::Display for TraverseOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TraverseOrder::BestFirstPotential => "BestFirstPotential",
            TraverseOrder::BestFirstValue => "BestFirstValue",
            TraverseOrder::BreadthFirstPotential => "BreadthFirstPotential",
            TraverseOrder::BreadthFirstValue => "BreadthFirstValue",
            TraverseOrder::DepthFirst => "DepthFirst",
            TraverseOrder::Fifo => "Fifo",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SearchNode;

    #[test]
    fn test_only_best_first_potential_aborts_early() {
        let aborting: Vec<_> = TraverseOrder::ALL
            .iter()
            .filter(|o| o.early_abort_possible())
            .collect();
        assert_eq!(aborting, vec![&TraverseOrder::BestFirstPotential]);
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(TraverseOrder::default(), TraverseOrder::BestFirstPotential);
        assert_eq!(TraverseOrder::Fifo.to_string(), "Fifo");
        assert_eq!(
            TraverseOrder::BreadthFirstValue.to_string(),
            "BreadthFirstValue"
        );
    }

    #[test]
    fn test_built_frontiers_follow_their_discipline() {
        for order in TraverseOrder::ALL {
            let mut frontier = order.frontier::<u32, f64>();
            for (label, potential) in [(1, 1.0), (2, 3.0), (3, 2.0)] {
                let mut node = SearchNode::root(label, None);
                node.set_value(potential);
                node.set_potential(potential);
                frontier.push(node);
            }
            let first = frontier.pop().map(|n| *n.content());
            let expected = match order {
                TraverseOrder::DepthFirst => Some(3),
                TraverseOrder::Fifo => Some(1),
                _ => Some(2),
            };
            assert_eq!(first, expected, "order {order}");
            assert_eq!(frontier.len(), 2);
        }
    }
}
