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

//! Search configuration
//!
//! `OpusConfig` carries the tuning knobs of a search. The defaults describe
//! an exact best-first search for the single best candidate without a depth
//! limit. `OpusConfigBuilder` builds a validated configuration.

use crate::distribution::OperatorOrder;
use crate::error::OpusConfigError;
use crate::traverse::TraverseOrder;
use opus_search::num::SearchValue;

/// Configuration of an OPUS search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpusConfig<T> {
    /// Number of results to return (`k`).
    pub number_of_results: usize,
    /// Approximation factor in `(0, 1]`; `1` gives an exact search.
    pub alpha: T,
    /// Maximum depth of nodes pushed onto the frontier.
    pub depth_limit: Option<u32>,
    /// Order in which children receive their operator sets.
    pub operator_order: OperatorOrder,
    /// Frontier discipline.
    pub traverse_order: TraverseOrder,
}

impl<T> Default for OpusConfig<T>
where
    T: SearchValue,
{
    fn default() -> Self {
        Self {
            number_of_results: 1,
            alpha: T::one(),
            depth_limit: None,
            operator_order: OperatorOrder::default(),
            traverse_order: TraverseOrder::default(),
        }
    }
}

impl<T> OpusConfig<T>
where
    T: SearchValue,
{
    /// Checks the configuration.
    pub fn validate(&self) -> Result<(), OpusConfigError> {
        if self.number_of_results == 0 {
            return Err(OpusConfigError::ZeroResults);
        }
        // Written so that `NaN` fails too.
        if !(self.alpha > T::zero() && self.alpha <= T::one()) {
            return Err(OpusConfigError::InvalidAlpha(self.alpha.to_string()));
        }
        Ok(())
    }

    /// Returns `true` if the search is exact (`alpha == 1`).
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.alpha == T::one()
    }

    /// Returns `true` if a node at `depth` may be pushed onto the frontier.
    #[inline]
    pub fn allows_depth(&self, depth: u32) -> bool {
        self.depth_limit.is_none_or(|limit| depth <= limit)
    }
}

impl<T> std::fmt::Display for OpusConfig<T>
where
    T: SearchValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let depth_limit = match self.depth_limit {
            Some(limit) => limit.to_string(),
            None => "none".to_string(),
        };
        write!(
            f,
            "OpusConfig(k: {}, alpha: {}, depth_limit: {}, operator_order: {}, traverse_order: {})",
            self.number_of_results,
            self.alpha,
            depth_limit,
            self.operator_order,
            self.traverse_order
        )
    }
}

/// Builder for `OpusConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpusConfigBuilder<T> {
    config: OpusConfig<T>,
}

impl<T> Default for OpusConfigBuilder<T>
where
    T: SearchValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OpusConfigBuilder<T>
where
    T: SearchValue,
{
    /// Creates a builder holding the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self {
            config: OpusConfig::default(),
        }
    }

    /// Sets the number of results.
    #[inline]
    pub fn number_of_results(mut self, number_of_results: usize) -> Self {
        self.config.number_of_results = number_of_results;
        self
    }

    /// Sets the approximation factor.
    #[inline]
    pub fn alpha(mut self, alpha: T) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Sets the depth limit.
    #[inline]
    pub fn depth_limit(mut self, depth_limit: u32) -> Self {
        self.config.depth_limit = Some(depth_limit);
        self
    }

    /// Removes the depth limit.
    #[inline]
    pub fn unlimited_depth(mut self) -> Self {
        self.config.depth_limit = None;
        self
    }

    /// Sets the operator distribution order.
    #[inline]
    pub fn operator_order(mut self, operator_order: OperatorOrder) -> Self {
        self.config.operator_order = operator_order;
        self
    }

    /// Sets the traversal order.
    #[inline]
    pub fn traverse_order(mut self, traverse_order: TraverseOrder) -> Self {
        self.config.traverse_order = traverse_order;
        self
    }

    /// Builds and validates the configuration.
    #[inline]
    pub fn build(self) -> Result<OpusConfig<T>, OpusConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OpusConfig::<f64>::default();
        assert_eq!(config.number_of_results, 1);
        assert_eq!(config.alpha, 1.0);
        assert_eq!(config.depth_limit, None);
        assert_eq!(config.operator_order, OperatorOrder::OpusPaper);
        assert_eq!(config.traverse_order, TraverseOrder::BestFirstPotential);
        assert!(config.is_exact());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_sets_every_field() {
        let config = OpusConfigBuilder::<f64>::new()
            .number_of_results(5)
            .alpha(0.5)
            .depth_limit(3)
            .operator_order(OperatorOrder::Trivial)
            .traverse_order(TraverseOrder::Fifo)
            .build()
            .expect("valid configuration");

        assert_eq!(config.number_of_results, 5);
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.depth_limit, Some(3));
        assert_eq!(config.operator_order, OperatorOrder::Trivial);
        assert_eq!(config.traverse_order, TraverseOrder::Fifo);
        assert!(!config.is_exact());
    }

    #[test]
    fn test_zero_results_is_rejected() {
        let err = OpusConfigBuilder::<f64>::new()
            .number_of_results(0)
            .build()
            .unwrap_err();
        assert_eq!(err, OpusConfigError::ZeroResults);
    }

    #[test]
    fn test_alpha_outside_unit_interval_is_rejected() {
        for alpha in [0.0, -0.5, 1.000001, f64::NAN, f64::INFINITY] {
            let result = OpusConfigBuilder::<f64>::new().alpha(alpha).build();
            assert!(
                matches!(result, Err(OpusConfigError::InvalidAlpha(_))),
                "alpha {alpha} was accepted"
            );
        }
    }

    #[test]
    fn test_depth_limit_admits_nodes_up_to_the_limit() {
        let limited = OpusConfigBuilder::<f64>::new()
            .depth_limit(2)
            .build()
            .expect("valid configuration");
        assert!(limited.allows_depth(0));
        assert!(limited.allows_depth(2));
        assert!(!limited.allows_depth(3));

        let unlimited = OpusConfigBuilder::<f64>::new()
            .depth_limit(2)
            .unlimited_depth()
            .build()
            .expect("valid configuration");
        assert!(unlimited.allows_depth(u32::MAX));
    }

    #[test]
    fn test_display() {
        let config = OpusConfig::<f64>::default();
        assert_eq!(
            config.to_string(),
            "OpusConfig(k: 1, alpha: 1, depth_limit: none, operator_order: OpusPaper, traverse_order: BestFirstPotential)"
        );
    }
}
