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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children, so logging, budgets and test probes can be combined
//! without coupling them to the engine.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::config::OpusConfig;
use crate::monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor};
use crate::node::SearchNode;
use crate::stats::OpusStatistics;
use opus_search::monitor::search_monitor::SearchCommand;
use opus_search::num::SearchValue;

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeTreeSearchMonitor<'a, N, T>
where
    T: SearchValue,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<N, T> + 'a>>,
}

impl<'a, N, T> Default for CompositeTreeSearchMonitor<'a, N, T>
where
    T: SearchValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, N, T> CompositeTreeSearchMonitor<'a, N, T>
where
    T: SearchValue,
{
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with the specified capacity.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<N, T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<N, T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor<N, T> + 'a>] {
        &self.monitors
    }

    /// Clears all monitors from the composite monitor.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.monitors.clear();
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, N, T> FromIterator<Box<dyn TreeSearchMonitor<N, T> + 'a>>
    for CompositeTreeSearchMonitor<'a, N, T>
where
    T: SearchValue,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<N, T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, N, T> TreeSearchMonitor<N, T> for CompositeTreeSearchMonitor<'a, N, T>
where
    T: SearchValue,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, config: &OpusConfig<T>, statistics: &OpusStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(config, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &OpusStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &OpusStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if cmd.is_terminate() {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, statistics: &OpusStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(statistics);
        }
    }

    #[inline(always)]
    fn on_expand(&mut self, node: &SearchNode<N, T>, statistics: &OpusStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_expand(node, statistics);
        }
    }

    #[inline(always)]
    fn on_node_created(&mut self, node: &SearchNode<N, T>, statistics: &OpusStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_node_created(node, statistics);
        }
    }

    #[inline(always)]
    fn on_result_inserted(
        &mut self,
        node: &SearchNode<N, T>,
        threshold: T,
        statistics: &OpusStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_result_inserted(node, threshold, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        node: &SearchNode<N, T>,
        reason: PruneReason,
        statistics: &OpusStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(node, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_enqueue(&mut self, node: &SearchNode<N, T>, statistics: &OpusStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enqueue(node, statistics);
        }
    }
}
