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

//! Adapter for external search monitors
//!
//! `WrapperMonitor` bridges this crate's `TreeSearchMonitor` with a generic
//! `SearchMonitor` from `opus_search`. It forwards lifecycle events and
//! commands to the inner monitor while ignoring tree-specific callbacks.
//!
//! Behavior
//! - Delegates: enter, step, result inserted (as `on_result_found` with the
//!   node value), exit, and `search_command`.
//! - No-ops: expand, node created, prune and enqueue.
//! - `name()` is `WrapperMonitor(inner.name())`.
//! - Holds `&mut dyn SearchMonitor<T>`; lifetime-bound, single owner.

use crate::config::OpusConfig;
use crate::monitor::tree_search_monitor::TreeSearchMonitor;
use crate::node::SearchNode;
use crate::stats::OpusStatistics;
use opus_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
use opus_search::num::SearchValue;

/// A wrapper tree search monitor, that wraps a general
/// search monitor.
pub struct WrapperMonitor<'a, T> {
    inner: &'a mut dyn SearchMonitor<T>,
    name: String,
}

impl<'a, T> WrapperMonitor<'a, T>
where
    T: SearchValue,
{
    /// Creates a new `WrapperMonitor` that wraps the given
    /// search monitor.
    #[inline(always)]
    pub fn new(inner: &'a mut dyn SearchMonitor<T>) -> Self {
        let name = format!("WrapperMonitor({})", inner.name());
        Self { inner, name }
    }
}

impl<'a, N, T> TreeSearchMonitor<N, T> for WrapperMonitor<'a, T>
where
    T: SearchValue,
{
    #[inline(always)]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _config: &OpusConfig<T>, _statistics: &OpusStatistics) {
        self.inner.on_enter_search();
    }

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &OpusStatistics) {
        self.inner.on_exit_search();
    }

    #[inline(always)]
    fn search_command(&mut self, _statistics: &OpusStatistics) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline(always)]
    fn on_step(&mut self, _statistics: &OpusStatistics) {
        self.inner.on_step();
    }

    #[inline(always)]
    fn on_result_inserted(
        &mut self,
        node: &SearchNode<N, T>,
        _threshold: T,
        _statistics: &OpusStatistics,
    ) {
        self.inner.on_result_found(node.value());
    }
}
