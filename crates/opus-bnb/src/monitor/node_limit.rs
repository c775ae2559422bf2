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

//! Node budget for tree search
//!
//! `NodeLimitMonitor` stops the search once the engine has created a given
//! number of nodes. It reads the counter from the statistics handed to
//! `search_command`, so it is checked once per iteration and the search may
//! overshoot by the children of a single expansion.

use crate::monitor::tree_search_monitor::TreeSearchMonitor;
use crate::stats::OpusStatistics;
use opus_search::monitor::search_monitor::SearchCommand;
use opus_search::num::SearchValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    node_limit: u64,
}

impl NodeLimitMonitor {
    /// Creates a new `NodeLimitMonitor` with the specified node limit.
    #[inline]
    pub fn new(node_limit: u64) -> Self {
        Self { node_limit }
    }

    /// Returns the configured limit.
    #[inline]
    pub fn node_limit(&self) -> u64 {
        self.node_limit
    }
}

impl<N, T> TreeSearchMonitor<N, T> for NodeLimitMonitor
where
    T: SearchValue,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn search_command(&mut self, statistics: &OpusStatistics) -> SearchCommand {
        if statistics.nodes_created >= self.node_limit {
            SearchCommand::Terminate("node limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(monitor: &mut NodeLimitMonitor, created: u64) -> SearchCommand {
        let stats = OpusStatistics {
            nodes_created: created,
            ..Default::default()
        };
        TreeSearchMonitor::<u8, f64>::search_command(monitor, &stats)
    }

    #[test]
    fn test_continues_below_limit() {
        let mut monitor = NodeLimitMonitor::new(10);
        assert_eq!(command(&mut monitor, 9), SearchCommand::Continue);
    }

    #[test]
    fn test_terminates_at_limit() {
        let mut monitor = NodeLimitMonitor::new(10);
        assert_eq!(
            command(&mut monitor, 10),
            SearchCommand::Terminate("node limit reached".to_string())
        );
        assert!(command(&mut monitor, 11).is_terminate());
        assert_eq!(monitor.node_limit(), 10);
    }
}
