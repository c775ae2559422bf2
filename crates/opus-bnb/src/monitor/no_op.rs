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

use crate::monitor::tree_search_monitor::TreeSearchMonitor;
use opus_search::num::SearchValue;

/// A no-operation monitor that implements the `TreeSearchMonitor` trait
/// but does nothing on any of the events, always returning `Continue` for the
/// search command.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl<N, T> TreeSearchMonitor<N, T> for NoOperationMonitor
where
    T: SearchValue,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::tree_search_monitor::PruneReason;
    use crate::node::SearchNode;
    use crate::stats::OpusStatistics;
    use opus_search::monitor::search_monitor::SearchCommand;

    #[test]
    fn test_no_op_monitor_always_continues() {
        let mut monitor = NoOperationMonitor::new();
        let stats = OpusStatistics::default();
        let node = SearchNode::<u8, f64>::root(0, None);

        TreeSearchMonitor::<u8, f64>::on_step(&mut monitor, &stats);
        monitor.on_node_created(&node, &stats);
        monitor.on_prune(&node, PruneReason::Stale, &stats);

        assert_eq!(
            TreeSearchMonitor::<u8, f64>::search_command(&mut monitor, &stats),
            SearchCommand::Continue
        );
        assert_eq!(
            TreeSearchMonitor::<u8, f64>::name(&monitor),
            "NoOperationMonitor"
        );
    }
}
