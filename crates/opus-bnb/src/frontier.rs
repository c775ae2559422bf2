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

//! Search frontier (the boundary of the search tree)
//!
//! The frontier holds evaluated, bounded nodes that wait to be refined. The
//! driver loop only talks to it through the `Frontier` trait; which node comes
//! out next is decided by the implementation:
//!
//! - `PriorityFrontier`: a binary heap keyed by potential or value, optionally
//!   grouped by depth first (breadth-first variants).
//! - `StackFrontier`: LIFO, depth-first.
//! - `QueueFrontier`: FIFO.
//!
//! Ties on equal keys are broken by insertion order, earlier first, so a run
//! is fully deterministic for a given operator table.

use crate::node::SearchNode;
use opus_search::num::SearchValue;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// A container of nodes awaiting refinement.
pub trait Frontier<N, T> {
    /// Adds a node.
    fn push(&mut self, node: SearchNode<N, T>);

    /// Removes and returns the node with the highest priority.
    fn pop(&mut self) -> Option<SearchNode<N, T>>;

    /// Returns the node that `pop` would return next.
    fn peek(&self) -> Option<&SearchNode<N, T>>;

    /// Returns the number of nodes held.
    fn len(&self) -> usize;

    /// Returns `true` if no node is held.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The node attribute a `PriorityFrontier` ranks by.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PriorityKey {
    /// Cached optimistic bound, highest first.
    Potential,
    /// Target value, highest first.
    Value,
}

impl std::fmt::Display for PriorityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityKey::Potential => write!(f, "Potential"),
            PriorityKey::Value => write!(f, "Value"),
        }
    }
}

struct PriorityEntry<N, T> {
    level: Option<u32>,
    score: T,
    sequence: u64,
    node: SearchNode<N, T>,
}

impl<N, T> Ord for PriorityEntry<N, T>
where
    T: SearchValue,
{
    // `BinaryHeap` pops the greatest entry: shallower level, then higher
    // score, then lower sequence number.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .level
            .cmp(&self.level)
            .then_with(|| self.score.cmp_value(&other.score))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<N, T> PartialOrd for PriorityEntry<N, T>
where
    T: SearchValue,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, T> PartialEq for PriorityEntry<N, T>
where
    T: SearchValue,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N, T> Eq for PriorityEntry<N, T> where T: SearchValue {}

/// A heap-backed frontier for the best-first and breadth-first orders.
pub struct PriorityFrontier<N, T> {
    heap: BinaryHeap<PriorityEntry<N, T>>,
    key: PriorityKey,
    by_depth: bool,
    next_sequence: u64,
}

impl<N, T> PriorityFrontier<N, T>
where
    T: SearchValue,
{
    /// Creates a best-first frontier ranking nodes by `key`.
    #[inline]
    pub fn best_first(key: PriorityKey) -> Self {
        Self {
            heap: BinaryHeap::new(),
            key,
            by_depth: false,
            next_sequence: 0,
        }
    }

    /// Creates a frontier that serves shallower nodes first and ranks nodes
    /// of equal depth by `key`.
    #[inline]
    pub fn breadth_first(key: PriorityKey) -> Self {
        Self {
            heap: BinaryHeap::new(),
            key,
            by_depth: true,
            next_sequence: 0,
        }
    }

    /// Returns the attribute this frontier ranks by.
    #[inline]
    pub fn key(&self) -> PriorityKey {
        self.key
    }

    /// Returns `true` if depth is the primary ranking criterion.
    #[inline]
    pub fn is_breadth_first(&self) -> bool {
        self.by_depth
    }
}

impl<N, T> Frontier<N, T> for PriorityFrontier<N, T>
where
    T: SearchValue,
{
    #[inline]
    fn push(&mut self, node: SearchNode<N, T>) {
        let score = match self.key {
            PriorityKey::Potential => node.potential(),
            PriorityKey::Value => node.value(),
        };
        let level = self.by_depth.then(|| node.depth());
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.heap.push(PriorityEntry {
            level,
            score,
            sequence,
            node,
        });
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<N, T>> {
        self.heap.pop().map(|entry| entry.node)
    }

    #[inline]
    fn peek(&self) -> Option<&SearchNode<N, T>> {
        self.heap.peek().map(|entry| &entry.node)
    }

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A last-in, first-out frontier.
pub struct StackFrontier<N, T> {
    nodes: Vec<SearchNode<N, T>>,
}

impl<N, T> Default for StackFrontier<N, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, T> StackFrontier<N, T> {
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<N, T> Frontier<N, T> for StackFrontier<N, T> {
    #[inline]
    fn push(&mut self, node: SearchNode<N, T>) {
        self.nodes.push(node);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<N, T>> {
        self.nodes.pop()
    }

    #[inline]
    fn peek(&self) -> Option<&SearchNode<N, T>> {
        self.nodes.last()
    }

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// A first-in, first-out frontier.
pub struct QueueFrontier<N, T> {
    nodes: VecDeque<SearchNode<N, T>>,
}

impl<N, T> Default for QueueFrontier<N, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, T> QueueFrontier<N, T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes: VecDeque::new(),
        }
    }
}

impl<N, T> Frontier<N, T> for QueueFrontier<N, T> {
    #[inline]
    fn push(&mut self, node: SearchNode<N, T>) {
        self.nodes.push_back(node);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<N, T>> {
        self.nodes.pop_front()
    }

    #[inline]
    fn peek(&self) -> Option<&SearchNode<N, T>> {
        self.nodes.front()
    }

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }
}
