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

use crate::stats::OpusStatistics;
use opus_search::result::TerminationReason;

/// A result of the search with its value and the depth it was found at.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPattern<R, T> {
    /// The candidate, mapped into the caller's pattern type.
    pub pattern: R,
    /// The target value.
    pub value: T,
    /// The refinement depth of the node.
    pub depth: u32,
}

impl<R, T> std::fmt::Display for RankedPattern<R, T>
where
    R: std::fmt::Debug,
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} (value: {}, depth: {})",
            self.pattern, self.value, self.depth
        )
    }
}

/// Result of an OPUS search after termination.
#[derive(Debug, Clone)]
pub struct OpusOutcome<R, T> {
    results: Vec<RankedPattern<R, T>>,
    termination_reason: TerminationReason,
    statistics: OpusStatistics,
    best_value: Option<T>,
    exact: bool,
}

impl<R, T> OpusOutcome<R, T>
where
    T: Copy,
{
    #[inline]
    pub fn new(
        results: Vec<RankedPattern<R, T>>,
        termination_reason: TerminationReason,
        statistics: OpusStatistics,
        best_value: Option<T>,
        exact: bool,
    ) -> Self {
        Self {
            results,
            termination_reason,
            statistics,
            best_value,
            exact,
        }
    }

    /// Returns the results, best first.
    #[inline]
    pub fn results(&self) -> &[RankedPattern<R, T>] {
        &self.results
    }

    /// Consumes the outcome and returns the results, best first.
    #[inline]
    pub fn into_results(self) -> Vec<RankedPattern<R, T>> {
        self.results
    }

    /// Returns the patterns alone, best first.
    #[inline]
    pub fn patterns(&self) -> impl Iterator<Item = &R> {
        self.results.iter().map(|r| &r.pattern)
    }

    /// Returns the best result, if any.
    #[inline]
    pub fn best(&self) -> Option<&RankedPattern<R, T>> {
        self.results.first()
    }

    /// Returns the highest value the search has seen.
    #[inline]
    pub fn best_value(&self) -> Option<T> {
        self.best_value
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the search statistics.
    #[inline]
    pub fn statistics(&self) -> &OpusStatistics {
        &self.statistics
    }

    /// Returns `true` if the results are the exact top-k: the search ran to
    /// a proven end with `alpha == 1`.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.exact && self.termination_reason.is_complete()
    }
}

impl<R, T> std::fmt::Display for OpusOutcome<R, T>
where
    R: std::fmt::Debug,
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "OPUS Outcome ({}):", self.termination_reason)?;
        for (rank, result) in self.results.iter().enumerate() {
            writeln!(f, "  {:>3}. {}", rank + 1, result)?;
        }
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(pattern: &'static str, value: f64) -> RankedPattern<&'static str, f64> {
        RankedPattern {
            pattern,
            value,
            depth: pattern.len() as u32,
        }
    }

    #[test]
    fn test_accessors() {
        let outcome = OpusOutcome::new(
            vec![ranked("ab", 2.0), ranked("a", 1.0)],
            TerminationReason::SearchExhausted,
            OpusStatistics::default(),
            Some(2.0),
            true,
        );
        assert_eq!(outcome.best().map(|r| r.pattern), Some("ab"));
        assert_eq!(outcome.patterns().copied().collect::<Vec<_>>(), vec!["ab", "a"]);
        assert_eq!(outcome.best_value(), Some(2.0));
        assert!(outcome.is_exact());
        assert_eq!(outcome.into_results().len(), 2);
    }

    #[test]
    fn test_aborted_or_approximate_runs_are_not_exact() {
        let aborted = OpusOutcome::new(
            vec![ranked("a", 1.0)],
            TerminationReason::Aborted("stop".into()),
            OpusStatistics::default(),
            Some(1.0),
            true,
        );
        assert!(!aborted.is_exact());

        let approximate = OpusOutcome::<&'static str, f64>::new(
            vec![],
            TerminationReason::BoundReached,
            OpusStatistics::default(),
            None,
            false,
        );
        assert!(!approximate.is_exact());
        assert!(approximate.best().is_none());
    }

    #[test]
    fn test_display_ranks_results() {
        let outcome = OpusOutcome::new(
            vec![ranked("ab", 2.0)],
            TerminationReason::BoundReached,
            OpusStatistics::default(),
            Some(2.0),
            true,
        );
        let text = outcome.to_string();
        assert!(text.starts_with("OPUS Outcome (Bound Reached):"));
        assert!(text.contains("1. \"ab\" (value: 2, depth: 2)"));
    }
}
