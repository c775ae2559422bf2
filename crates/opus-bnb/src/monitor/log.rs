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

//! Periodic progress logging
//!
//! `LogTreeSearchMonitor` reports the live statistics through `tracing` at
//! `info` level every `log_every` created nodes, and once more when the
//! search ends. It never influences the search.

use crate::config::OpusConfig;
use crate::monitor::tree_search_monitor::TreeSearchMonitor;
use crate::node::SearchNode;
use crate::stats::OpusStatistics;
use opus_search::num::SearchValue;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    log_every: u64,
    next_log: u64,
    lines_logged: u64,
    best_value: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: SearchValue,
{
    /// Number of created nodes between two progress lines by default.
    pub const DEFAULT_LOG_EVERY: u64 = 10_000;

    /// Creates a monitor that logs every `log_every` created nodes.
    /// A value of zero is treated as one.
    pub fn new(log_every: u64) -> Self {
        let log_every = log_every.max(1);
        Self {
            start_time: Instant::now(),
            log_every,
            next_log: log_every,
            lines_logged: 0,
            best_value: None,
        }
    }

    /// Returns the number of progress lines emitted during the current run.
    #[inline]
    pub fn lines_logged(&self) -> u64 {
        self.lines_logged
    }

    fn log_line(&mut self, statistics: &OpusStatistics) {
        let best = self
            .best_value
            .map_or_else(|| "-inf".to_string(), |v| v.to_string());
        tracing::info!(
            elapsed_s = self.start_time.elapsed().as_secs_f32(),
            nodes = statistics.nodes_created,
            expanded = statistics.nodes_expanded,
            boundary = statistics.current_boundary_size,
            max_depth = statistics.max_attained_depth,
            pruned_potential = statistics.nodes_discarded_by_potential,
            pruned_rules = statistics.nodes_discarded_by_pruning_rules,
            best = %best,
            "OPUS search progress"
        );
        self.lines_logged = self.lines_logged.saturating_add(1);
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: SearchValue,
{
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOG_EVERY)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogTreeSearchMonitor(log_every: {})", self.log_every)
    }
}

impl<N, T> TreeSearchMonitor<N, T> for LogTreeSearchMonitor<T>
where
    T: SearchValue,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, config: &OpusConfig<T>, _statistics: &OpusStatistics) {
        self.start_time = Instant::now();
        self.next_log = self.log_every;
        self.lines_logged = 0;
        self.best_value = None;
        tracing::info!(config = %config, "OPUS search started");
    }

    fn on_node_created(&mut self, _node: &SearchNode<N, T>, statistics: &OpusStatistics) {
        if statistics.nodes_created >= self.next_log {
            self.log_line(statistics);
            self.next_log = statistics.nodes_created.saturating_add(self.log_every);
        }
    }

    fn on_result_inserted(
        &mut self,
        node: &SearchNode<N, T>,
        _threshold: T,
        _statistics: &OpusStatistics,
    ) {
        let value = node.value();
        if self.best_value.is_none_or(|best| value > best) {
            self.best_value = Some(value);
        }
    }

    fn on_exit_search(&mut self, statistics: &OpusStatistics) {
        self.log_line(statistics);
        tracing::info!(
            time_ms = statistics.time_total.as_millis() as u64,
            "OPUS search finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::INFO)
            .try_init();
    }

    fn created(n: u64) -> OpusStatistics {
        OpusStatistics {
            nodes_created: n,
            ..Default::default()
        }
    }

    #[test]
    fn test_logs_once_per_interval() {
        init_tracing();
        let mut monitor = LogTreeSearchMonitor::<f64>::new(3);
        let node = SearchNode::<u8, f64>::root(0, None);
        TreeSearchMonitor::<u8, f64>::on_enter_search(
            &mut monitor,
            &OpusConfig::default(),
            &created(0),
        );
        for n in 1..=10 {
            monitor.on_node_created(&node, &created(n));
        }
        assert_eq!(monitor.lines_logged(), 3);

        TreeSearchMonitor::<u8, f64>::on_exit_search(&mut monitor, &created(10));
        assert_eq!(monitor.lines_logged(), 4);
    }

    #[test]
    fn test_tracks_best_inserted_value() {
        let mut monitor = LogTreeSearchMonitor::<f64>::default();
        let stats = OpusStatistics::default();
        for value in [1.0, 3.0, 2.0] {
            let mut node = SearchNode::<u8, f64>::root(0, None);
            node.set_value(value);
            monitor.on_result_inserted(&node, value, &stats);
        }
        assert_eq!(monitor.best_value, Some(3.0));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let monitor = LogTreeSearchMonitor::<f64>::new(0);
        assert_eq!(monitor.to_string(), "LogTreeSearchMonitor(log_every: 1)");
    }
}
