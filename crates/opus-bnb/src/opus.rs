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

//! OPUS branch-and-bound top-k search.
//!
//! This module implements the search engine. An `OpusSearch` owns the
//! problem definition: the seed candidate(s), the operator table, the target
//! function, the chain of optimistic estimators and the pruning rules. Every
//! call to `solve` opens a fresh search session with its own frontier,
//! top-k set and statistics, so one search can be solved repeatedly.
//!
//! A session seeds the frontier with the evaluated root(s) and then runs the
//! driver loop. Each iteration asks the monitor whether to continue, pops the
//! next node and re-checks its cached potential against the current
//! threshold. A stale node is skipped, or ends the whole search when the
//! traversal order serves nodes by descending potential. Otherwise the node
//! is refined: every active operator is applied once, rule-pruned children
//! are dropped, the rest are evaluated and offered to the top-k set, bounded
//! against the updated threshold, and the promising ones receive their
//! operator sets and are pushed. Operators of dropped children are withheld
//! from their siblings, which keeps the search non-redundant.

use crate::config::OpusConfig;
use crate::distribution::{OperatorOrder, distribute};
use crate::error::OpusConfigError;
use crate::eval::{OptimisticEstimator, PruningRule, TargetFunction};
use crate::frontier::Frontier;
use crate::monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor};
use crate::node::SearchNode;
use crate::operator::{OperatorIndex, OperatorSet, RefinementOperator};
use crate::pruning::{has_top_potential, matching_rule, refinement_potential};
use crate::result::{OpusOutcome, RankedPattern};
use crate::stats::OpusStatistics;
use crate::top_k::TopKSet;
use opus_search::monitor::search_monitor::SearchCommand;
use opus_search::num::SearchValue;
use opus_search::result::TerminationReason;
use std::rc::Rc;
use std::time::Instant;

/// Where a search starts.
enum Seed<N> {
    /// A single root with every operator active.
    Root(Rc<N>),
    /// One root per operator, obtained by applying it to the base candidate.
    /// The base itself is not a result candidate.
    Singletons(Rc<N>),
}

/// Builder for `OpusSearch`.
pub struct OpusSearchBuilder<'a, N, T> {
    seed: Seed<N>,
    operators: Vec<Box<dyn RefinementOperator<N> + 'a>>,
    objective: Option<Box<dyn TargetFunction<N, T> + 'a>>,
    estimators: Vec<Box<dyn OptimisticEstimator<N, T> + 'a>>,
    rules: Vec<Box<dyn PruningRule<N> + 'a>>,
    config: OpusConfig<T>,
}

impl<'a, N, T> OpusSearchBuilder<'a, N, T>
where
    T: SearchValue,
{
    /// Starts a search from a single root candidate.
    #[inline]
    pub fn root(root: N) -> Self {
        Self::with_seed(Seed::Root(Rc::new(root)))
    }

    /// Starts a search from the singleton refinements of `base`.
    ///
    /// Every operator is applied to `base`; each result is a root at depth
    /// zero, and the operators are distributed over the roots in table order.
    #[inline]
    pub fn singleton_roots(base: N) -> Self {
        Self::with_seed(Seed::Singletons(Rc::new(base)))
    }

    fn with_seed(seed: Seed<N>) -> Self {
        Self {
            seed,
            operators: Vec::new(),
            objective: None,
            estimators: Vec::new(),
            rules: Vec::new(),
            config: OpusConfig::default(),
        }
    }

    /// Appends a refinement operator to the operator table.
    #[inline]
    pub fn operator<F>(mut self, operator: F) -> Self
    where
        F: Fn(&N) -> N + 'a,
    {
        self.operators.push(Box::new(operator));
        self
    }

    /// Appends a boxed refinement operator to the operator table.
    #[inline]
    pub fn operator_boxed(mut self, operator: Box<dyn RefinementOperator<N> + 'a>) -> Self {
        self.operators.push(operator);
        self
    }

    /// Sets the target function.
    #[inline]
    pub fn objective<F>(mut self, objective: F) -> Self
    where
        F: Fn(&N) -> T + 'a,
    {
        self.objective = Some(Box::new(objective));
        self
    }

    /// Sets a boxed target function.
    #[inline]
    pub fn objective_boxed(mut self, objective: Box<dyn TargetFunction<N, T> + 'a>) -> Self {
        self.objective = Some(objective);
        self
    }

    /// Appends an optimistic estimator to the chain. Estimators are
    /// consulted in insertion order.
    #[inline]
    pub fn estimator<F>(mut self, estimator: F) -> Self
    where
        F: Fn(&N) -> T + 'a,
    {
        self.estimators.push(Box::new(estimator));
        self
    }

    /// Appends a boxed optimistic estimator to the chain.
    #[inline]
    pub fn estimator_boxed(mut self, estimator: Box<dyn OptimisticEstimator<N, T> + 'a>) -> Self {
        self.estimators.push(estimator);
        self
    }

    /// Appends a pruning rule. Rules are consulted in insertion order.
    #[inline]
    pub fn pruning_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&N) -> bool + 'a,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends a boxed pruning rule.
    #[inline]
    pub fn pruning_rule_boxed(mut self, rule: Box<dyn PruningRule<N> + 'a>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the configuration.
    #[inline]
    pub fn config(mut self, config: OpusConfig<T>) -> Self {
        self.config = config;
        self
    }

    /// Validates the definition and builds the search.
    pub fn build(self) -> Result<OpusSearch<'a, N, T>, OpusConfigError> {
        self.config.validate()?;
        let objective = self.objective.ok_or(OpusConfigError::MissingObjective)?;
        if self.estimators.is_empty() {
            return Err(OpusConfigError::NoOptimisticEstimators);
        }

        Ok(OpusSearch {
            seed: self.seed,
            operators: self.operators,
            objective,
            estimators: self.estimators,
            rules: self.rules,
            config: self.config,
        })
    }
}

/// An OPUS top-k search over the refinement lattice spanned by its
/// operators.
pub struct OpusSearch<'a, N, T> {
    seed: Seed<N>,
    operators: Vec<Box<dyn RefinementOperator<N> + 'a>>,
    objective: Box<dyn TargetFunction<N, T> + 'a>,
    estimators: Vec<Box<dyn OptimisticEstimator<N, T> + 'a>>,
    rules: Vec<Box<dyn PruningRule<N> + 'a>>,
    config: OpusConfig<T>,
}

impl<'a, N, T> OpusSearch<'a, N, T>
where
    T: SearchValue,
{
    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &OpusConfig<T> {
        &self.config
    }

    /// Returns the number of operators in the operator table.
    #[inline]
    pub fn num_operators(&self) -> usize {
        self.operators.len()
    }

    /// Returns the number of optimistic estimators in the chain.
    #[inline]
    pub fn num_estimators(&self) -> usize {
        self.estimators.len()
    }

    /// Returns the number of pruning rules.
    #[inline]
    pub fn num_pruning_rules(&self) -> usize {
        self.rules.len()
    }

    /// Runs the search and returns the top-k candidates, best first.
    #[inline]
    pub fn solve<S>(&self, monitor: S) -> OpusOutcome<N, T>
    where
        N: Clone,
        S: TreeSearchMonitor<N, T>,
    {
        self.solve_with(monitor, N::clone)
    }

    /// Runs the search and maps the top-k candidates through `to_pattern`.
    pub fn solve_with<S, R, F>(&self, monitor: S, to_pattern: F) -> OpusOutcome<R, T>
    where
        S: TreeSearchMonitor<N, T>,
        F: FnMut(&N) -> R,
    {
        OpusSearchSession::new(self, monitor).run(to_pattern)
    }
}

impl<'a, N, T> std::fmt::Debug for OpusSearch<'a, N, T>
where
    T: SearchValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operators: Vec<&str> = self.operators.iter().map(|o| o.name()).collect();
        let estimators: Vec<&str> = self.estimators.iter().map(|e| e.name()).collect();
        let rules: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("OpusSearch")
            .field("objective", &self.objective.name())
            .field("operators", &operators)
            .field("estimators", &estimators)
            .field("rules", &rules)
            .field("config", &self.config)
            .finish()
    }
}

/// The per-run state of a search.
struct OpusSearchSession<'s, 'a, N, T, S> {
    search: &'s OpusSearch<'a, N, T>,
    monitor: S,
    frontier: Box<dyn Frontier<N, T> + 's>,
    top_k: TopKSet<N, T>,
    stats: OpusStatistics,
    start_time: Instant,
}

impl<'s, 'a, N, T, S> OpusSearchSession<'s, 'a, N, T, S>
where
    T: SearchValue,
    S: TreeSearchMonitor<N, T>,
{
    #[inline]
    fn new(search: &'s OpusSearch<'a, N, T>, monitor: S) -> Self {
        Self {
            search,
            monitor,
            frontier: search.config.traverse_order.frontier(),
            top_k: TopKSet::new(search.config.number_of_results),
            stats: OpusStatistics::default(),
            start_time: Instant::now(),
        }
    }

    /// Run the search session.
    fn run<R, F>(mut self, mut to_pattern: F) -> OpusOutcome<R, T>
    where
        F: FnMut(&N) -> R,
    {
        self.monitor
            .on_enter_search(&self.search.config, &self.stats);
        tracing::debug!(
            config = %self.search.config,
            operators = self.search.operators.len(),
            estimators = self.search.estimators.len(),
            rules = self.search.rules.len(),
            "OPUS search started"
        );

        self.seed();

        let alpha = self.search.config.alpha;
        let early_abort = self.search.config.traverse_order.early_abort_possible();

        let termination_reason = loop {
            self.monitor.on_step(&self.stats);
            self.stats.on_step();

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break TerminationReason::Aborted(msg);
            }

            let Some(node) = self.frontier.pop() else {
                break TerminationReason::SearchExhausted;
            };
            self.stats.on_boundary_size(self.frontier.len());

            if !has_top_potential(node.potential(), self.top_k.threshold(), alpha) {
                self.stats.on_stale_node();
                self.monitor.on_prune(&node, PruneReason::Stale, &self.stats);
                if early_abort {
                    break TerminationReason::BoundReached;
                }
                continue;
            }

            self.expand(node);
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        tracing::debug!(
            reason = %termination_reason,
            nodes_created = self.stats.nodes_created,
            nodes_expanded = self.stats.nodes_expanded,
            pruned_potential = self.stats.nodes_discarded_by_potential,
            pruned_rules = self.stats.nodes_discarded_by_pruning_rules,
            stale = self.stats.stale_nodes_discarded,
            boundary = self.stats.current_boundary_size,
            time_ms = self.stats.time_total.as_millis() as u64,
            open_bound = ?self.frontier.peek().map(|node| node.potential()),
            "OPUS search finished"
        );

        self.finalize(termination_reason, &mut to_pattern)
    }

    /// Build the sorted outcome.
    ///
    /// # Note
    ///
    /// This consumes self.
    fn finalize<R, F>(self, reason: TerminationReason, to_pattern: &mut F) -> OpusOutcome<R, T>
    where
        F: FnMut(&N) -> R,
    {
        let best_value = self.top_k.best_so_far().map(|best| best.value());
        let exact = self.search.config.is_exact();
        let results = self
            .top_k
            .into_sorted_vec()
            .into_iter()
            .map(|node| RankedPattern {
                pattern: to_pattern(node.content()),
                value: node.value(),
                depth: node.depth(),
            })
            .collect();

        OpusOutcome::new(results, reason, self.stats, best_value, exact)
    }

    /// Create, evaluate and enqueue the root node(s).
    fn seed(&mut self) {
        let num_operators = self.search.operators.len();
        let all_operators = OperatorSet::full(num_operators);

        // A plain root is always kept; singleton roots are refinements of
        // the base and face the pruning rules like any other child.
        let (roots, apply_rules) = match &self.search.seed {
            Seed::Root(root) => (vec![SearchNode::root_shared(Rc::clone(root), None)], false),
            Seed::Singletons(base) => {
                let roots = (0..num_operators)
                    .map(OperatorIndex::new)
                    .map(|op| {
                        let content = self.search.operators[op.get()].apply(base);
                        SearchNode::root(content, Some(op))
                    })
                    .collect();
                (roots, true)
            }
        };

        for root in &roots {
            self.stats.on_node_created(root.depth());
            self.monitor.on_node_created(root, &self.stats);
        }

        // Singleton roots split the operator table in table order.
        self.admit(all_operators, roots, OperatorOrder::Trivial, apply_rules);
    }

    /// Refine `parent` by applying each of its active operators once.
    fn expand(&mut self, parent: SearchNode<N, T>) {
        self.stats.on_node_expanded();
        self.monitor.on_expand(&parent, &self.stats);
        tracing::trace!(
            depth = parent.depth(),
            value = %parent.value(),
            potential = %parent.potential(),
            active = parent.active().len(),
            "expanding node"
        );

        let mut children = Vec::with_capacity(parent.active().len());
        for op in parent.active() {
            let content = self.search.operators[op.get()].apply(parent.content());
            let child = SearchNode::child(&parent, op, content);
            self.stats.on_node_created(child.depth());
            self.monitor.on_node_created(&child, &self.stats);
            children.push(child);
        }

        let order = self.search.config.operator_order;
        self.admit(parent.active().clone(), children, order, true);
    }

    /// Run freshly created siblings through the pruning pipeline and push
    /// the survivors.
    ///
    /// `remaining` is the operator set the siblings share. Operators of
    /// discarded siblings are removed from it before the survivors receive
    /// their own sets. Pruning rules are only consulted if `apply_rules`.
    fn admit(
        &mut self,
        mut remaining: OperatorSet,
        created: Vec<SearchNode<N, T>>,
        order: OperatorOrder,
        apply_rules: bool,
    ) {
        let mut survivors = Vec::with_capacity(created.len());
        for mut node in created {
            if apply_rules && matching_rule(&self.search.rules, node.content()).is_some() {
                self.discard(&node, &mut remaining, PruneReason::Rule);
                continue;
            }
            node.set_value(self.search.objective.evaluate(node.content()));
            self.offer(&node);
            survivors.push(node);
        }

        // Siblings share a depth.
        let Some(depth) = survivors.first().map(|node| node.depth()) else {
            return;
        };
        if !self.search.config.allows_depth(depth) {
            for node in &survivors {
                self.monitor
                    .on_prune(node, PruneReason::DepthLimit, &self.stats);
            }
            return;
        }

        let threshold = self.top_k.threshold();
        let alpha = self.search.config.alpha;
        let mut promising = Vec::with_capacity(survivors.len());
        for mut node in survivors {
            let bound =
                refinement_potential(&self.search.estimators, node.content(), threshold, alpha);
            node.set_potential(bound.potential());
            if bound.is_promising() {
                promising.push(node);
            } else {
                self.discard(&node, &mut remaining, PruneReason::Potential);
            }
        }

        for node in distribute(promising, remaining, order) {
            self.monitor.on_enqueue(&node, &self.stats);
            self.frontier.push(node);
        }
        self.stats.on_boundary_size(self.frontier.len());
    }

    /// Offer an evaluated node to the top-k set.
    fn offer(&mut self, node: &SearchNode<N, T>) {
        let previous_best = self.top_k.best_so_far().map(|best| best.value());
        if self.top_k.try_insert(node) {
            let is_new_best = previous_best.is_none_or(|best| node.value() > best);
            self.stats.on_result_inserted(node.depth(), is_new_best);
            self.stats.on_results_held(self.top_k.len());
            self.monitor
                .on_result_inserted(node, self.top_k.threshold(), &self.stats);
        }
    }

    /// Drop `node` and withhold its producing operator from its siblings.
    fn discard(&mut self, node: &SearchNode<N, T>, remaining: &mut OperatorSet, reason: PruneReason) {
        if let Some(op) = node.producing_operator() {
            remaining.remove(op);
        }
        match reason {
            PruneReason::Rule => self.stats.on_pruned_by_rule(),
            PruneReason::Potential => self.stats.on_pruned_by_potential(),
            PruneReason::Stale | PruneReason::DepthLimit => {}
        }
        self.monitor.on_prune(node, reason, &self.stats);
    }
}
