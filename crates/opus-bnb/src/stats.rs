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

use std::time::Duration;

/// Statistics collected during an OPUS search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpusStatistics {
    /// Nodes created, roots included.
    pub nodes_created: u64,
    /// Nodes whose refinements were expanded (dequeued and refined).
    pub nodes_expanded: u64,
    /// Children discarded because their bound could not beat the threshold.
    pub nodes_discarded_by_potential: u64,
    /// Children discarded by a caller-supplied pruning rule.
    pub nodes_discarded_by_pruning_rules: u64,
    /// Frontier nodes discarded at dequeue because the threshold rose.
    pub stale_nodes_discarded: u64,
    /// Successful insertions into the top-k set.
    pub results_inserted: u64,
    /// Results held in the top-k set right now.
    pub results_held: usize,
    /// Frontier size right now.
    pub current_boundary_size: usize,
    /// Largest frontier size seen.
    pub max_attained_boundary_size: usize,
    /// Deepest node created.
    pub max_attained_depth: u32,
    /// Depth of the best node found so far.
    pub best_solution_depth: u32,
    /// Iterations of the driver loop.
    pub steps: u64,
    /// Total time spent in the search.
    pub time_total: Duration,
}

impl OpusStatistics {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_node_created(&mut self, depth: u32) {
        self.nodes_created = self.nodes_created.saturating_add(1);
        self.max_attained_depth = self.max_attained_depth.max(depth);
    }

    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_pruned_by_potential(&mut self) {
        self.nodes_discarded_by_potential = self.nodes_discarded_by_potential.saturating_add(1);
    }

    #[inline]
    pub fn on_pruned_by_rule(&mut self) {
        self.nodes_discarded_by_pruning_rules =
            self.nodes_discarded_by_pruning_rules.saturating_add(1);
    }

    #[inline]
    pub fn on_stale_node(&mut self) {
        self.stale_nodes_discarded = self.stale_nodes_discarded.saturating_add(1);
    }

    /// Records an insertion into the top-k set. `is_new_best` marks a node
    /// that beats every node inserted before it.
    #[inline]
    pub fn on_result_inserted(&mut self, depth: u32, is_new_best: bool) {
        self.results_inserted = self.results_inserted.saturating_add(1);
        if is_new_best {
            self.best_solution_depth = depth;
        }
    }

    #[inline]
    pub fn on_results_held(&mut self, held: usize) {
        self.results_held = held;
    }

    #[inline]
    pub fn on_boundary_size(&mut self, size: usize) {
        self.current_boundary_size = size;
        self.max_attained_boundary_size = self.max_attained_boundary_size.max(size);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for OpusStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "OPUS Search Statistics:")?;
        writeln!(f, "  Nodes created:          {}", self.nodes_created)?;
        writeln!(f, "  Nodes expanded:         {}", self.nodes_expanded)?;
        writeln!(f, "  Pruned (potential):     {}", self.nodes_discarded_by_potential)?;
        writeln!(f, "  Pruned (rules):         {}", self.nodes_discarded_by_pruning_rules)?;
        writeln!(f, "  Stale nodes discarded:  {}", self.stale_nodes_discarded)?;
        writeln!(f, "  Results inserted:       {}", self.results_inserted)?;
        writeln!(f, "  Results held:           {}", self.results_held)?;
        writeln!(f, "  Boundary size:          {}", self.current_boundary_size)?;
        writeln!(f, "  Max boundary size:      {}", self.max_attained_boundary_size)?;
        writeln!(f, "  Max depth reached:      {}", self.max_attained_depth)?;
        writeln!(f, "  Best solution depth:    {}", self.best_solution_depth)?;
        writeln!(f, "  Steps:                  {}", self.steps)?;
        writeln!(f, "  Total time:             {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = OpusStatistics::default();
        assert_eq!(stats.nodes_created, 0);
        assert_eq!(stats.max_attained_boundary_size, 0);
        assert_eq!(stats.time_total, Duration::ZERO);
    }

    #[test]
    fn test_node_created_tracks_max_depth() {
        let mut stats = OpusStatistics::default();
        stats.on_node_created(0);
        stats.on_node_created(3);
        stats.on_node_created(1);
        assert_eq!(stats.nodes_created, 3);
        assert_eq!(stats.max_attained_depth, 3);
    }

    #[test]
    fn test_boundary_size_keeps_running_maximum() {
        let mut stats = OpusStatistics::default();
        stats.on_boundary_size(4);
        stats.on_boundary_size(9);
        stats.on_boundary_size(2);
        assert_eq!(stats.current_boundary_size, 2);
        assert_eq!(stats.max_attained_boundary_size, 9);
    }

    #[test]
    fn test_results_held_is_overwritten() {
        let mut stats = OpusStatistics::default();
        stats.on_results_held(3);
        stats.on_results_held(2);
        assert_eq!(stats.results_held, 2);
    }

    #[test]
    fn test_best_solution_depth_follows_new_best_only() {
        let mut stats = OpusStatistics::default();
        stats.on_result_inserted(2, true);
        stats.on_result_inserted(5, false);
        assert_eq!(stats.results_inserted, 2);
        assert_eq!(stats.best_solution_depth, 2);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = OpusStatistics {
            steps: u64::MAX,
            ..Default::default()
        };
        stats.on_step();
        assert_eq!(stats.steps, u64::MAX);
    }

    #[test]
    fn test_display_lists_counters() {
        let mut stats = OpusStatistics::default();
        stats.on_pruned_by_rule();
        stats.on_pruned_by_potential();
        stats.on_stale_node();
        let text = stats.to_string();
        assert!(text.starts_with("OPUS Search Statistics:"));
        assert!(text.contains("Pruned (rules):         1"));
        assert!(text.contains("Stale nodes discarded:  1"));
    }
}
