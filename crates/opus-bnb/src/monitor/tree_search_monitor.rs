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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling an OPUS search. Callbacks follow the node lifecycle, and a
//! monitor can stop the search via `SearchCommand` (default: Continue).
//!
//! Lifecycle highlights
//! - enter → step → expand → {node created → prune | result inserted | enqueue} → exit
//! - `OpusStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are assumed single-threaded.
//! - Every callback except `name` has an empty default, so a monitor only
//!   implements what it observes.
//! - Keep callbacks lightweight; they run once per created node.

use crate::config::OpusConfig;
use crate::node::SearchNode;
use crate::stats::OpusStatistics;
use opus_search::monitor::search_monitor::SearchCommand;
use opus_search::num::SearchValue;

/// Reasons a node leaves the search without being refined.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PruneReason {
    /// A caller-supplied pruning rule matched.
    Rule,
    /// The optimistic bound cannot beat the threshold.
    Potential,
    /// The cached bound of a frontier node fell behind the threshold.
    Stale,
    /// The node lies below the depth limit; it was evaluated but is not
    /// refined further.
    DepthLimit,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Rule => write!(f, "Rule"),
            PruneReason::Potential => write!(f, "Potential"),
            PruneReason::Stale => write!(f, "Stale"),
            PruneReason::DepthLimit => write!(f, "DepthLimit"),
        }
    }
}

/// Trait for monitoring and controlling the OPUS search.
pub trait TreeSearchMonitor<N, T>
where
    T: SearchValue,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called when the search starts.
    fn on_enter_search(&mut self, _config: &OpusConfig<T>, _statistics: &OpusStatistics) {}

    /// Called when the search ends.
    fn on_exit_search(&mut self, _statistics: &OpusStatistics) {}

    /// Called at the top of every iteration to determine the next action.
    fn search_command(&mut self, _statistics: &OpusStatistics) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called at each step of the search.
    fn on_step(&mut self, _statistics: &OpusStatistics) {}

    /// Called when a dequeued node is about to be refined.
    fn on_expand(&mut self, _node: &SearchNode<N, T>, _statistics: &OpusStatistics) {}

    /// Called for every new node, before any pruning check.
    fn on_node_created(&mut self, _node: &SearchNode<N, T>, _statistics: &OpusStatistics) {}

    /// Called when an evaluated node enters the top-k set.
    /// `threshold` is the threshold after the insertion.
    fn on_result_inserted(
        &mut self,
        _node: &SearchNode<N, T>,
        _threshold: T,
        _statistics: &OpusStatistics,
    ) {
    }

    /// Called when a node is dropped from the search.
    fn on_prune(
        &mut self,
        _node: &SearchNode<N, T>,
        _reason: PruneReason,
        _statistics: &OpusStatistics,
    ) {
    }

    /// Called when a node is pushed onto the frontier.
    fn on_enqueue(&mut self, _node: &SearchNode<N, T>, _statistics: &OpusStatistics) {}
}

impl<N, T, M> TreeSearchMonitor<N, T> for &mut M
where
    T: SearchValue,
    M: TreeSearchMonitor<N, T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, config: &OpusConfig<T>, statistics: &OpusStatistics) {
        (**self).on_enter_search(config, statistics);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &OpusStatistics) {
        (**self).on_exit_search(statistics);
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &OpusStatistics) -> SearchCommand {
        (**self).search_command(statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, statistics: &OpusStatistics) {
        (**self).on_step(statistics);
    }

    #[inline(always)]
    fn on_expand(&mut self, node: &SearchNode<N, T>, statistics: &OpusStatistics) {
        (**self).on_expand(node, statistics);
    }

    #[inline(always)]
    fn on_node_created(&mut self, node: &SearchNode<N, T>, statistics: &OpusStatistics) {
        (**self).on_node_created(node, statistics);
    }

    #[inline(always)]
    fn on_result_inserted(
        &mut self,
        node: &SearchNode<N, T>,
        threshold: T,
        statistics: &OpusStatistics,
    ) {
        (**self).on_result_inserted(node, threshold, statistics);
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        node: &SearchNode<N, T>,
        reason: PruneReason,
        statistics: &OpusStatistics,
    ) {
        (**self).on_prune(node, reason, statistics);
    }

    #[inline(always)]
    fn on_enqueue(&mut self, node: &SearchNode<N, T>, statistics: &OpusStatistics) {
        (**self).on_enqueue(node, statistics);
    }
}

impl<N, T> std::fmt::Debug for dyn TreeSearchMonitor<N, T>
where
    T: SearchValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<N, T> std::fmt::Display for dyn TreeSearchMonitor<N, T>
where
    T: SearchValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
