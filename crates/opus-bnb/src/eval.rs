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

//! Candidate evaluation interfaces
//!
//! The engine is generic over how candidates are scored. It only needs three
//! kinds of collaborators, each a plain function of the candidate:
//!
//! - `TargetFunction`: the value being maximized.
//! - `OptimisticEstimator`: an admissible upper bound on the value of the
//!   candidate and of every refinement of it.
//! - `PruningRule`: a domain predicate that discards a candidate (and the
//!   subtree below it) outright.
//!
//! Closures of the matching shape implement the traits directly, so callers
//! rarely need a named type. Admissibility of estimators is assumed, not
//! checked; a non-admissible estimator silently costs optimality but never
//! termination.

use opus_search::num::SearchValue;

/// The function the search maximizes.
pub trait TargetFunction<N, T>
where
    T: SearchValue,
{
    /// Returns the name of the function.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Evaluates `candidate`.
    fn evaluate(&self, candidate: &N) -> T;
}

impl<N, T, F> TargetFunction<N, T> for F
where
    T: SearchValue,
    F: Fn(&N) -> T,
{
    #[inline(always)]
    fn evaluate(&self, candidate: &N) -> T {
        self(candidate)
    }
}

/// An optimistic (admissible) bound on the best value reachable from a candidate.
pub trait OptimisticEstimator<N, T>
where
    T: SearchValue,
{
    /// Returns the name of the estimator.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Returns an upper bound on the target value of `candidate` and of
    /// all of its refinements.
    fn estimate(&self, candidate: &N) -> T;
}

impl<N, T, F> OptimisticEstimator<N, T> for F
where
    T: SearchValue,
    F: Fn(&N) -> T,
{
    #[inline(always)]
    fn estimate(&self, candidate: &N) -> T {
        self(candidate)
    }
}

/// A predicate that removes a candidate from the search.
pub trait PruningRule<N> {
    /// Returns the name of the rule.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Returns `true` if `candidate` must be discarded.
    fn prune(&self, candidate: &N) -> bool;
}

impl<N, F> PruningRule<N> for F
where
    F: Fn(&N) -> bool,
{
    #[inline(always)]
    fn prune(&self, candidate: &N) -> bool {
        self(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SizeBound {
        max: usize,
    }

    impl OptimisticEstimator<Vec<u8>, f64> for SizeBound {
        fn name(&self) -> &str {
            "SizeBound"
        }

        fn estimate(&self, _candidate: &Vec<u8>) -> f64 {
            self.max as f64
        }
    }

    #[test]
    fn test_closures_implement_all_evaluation_traits() {
        let f = |c: &Vec<u8>| c.len() as f64;
        let rule = |c: &Vec<u8>| c.contains(&0);

        assert_eq!(TargetFunction::evaluate(&f, &vec![1, 2]), 2.0);
        assert_eq!(OptimisticEstimator::estimate(&f, &vec![1, 2, 3]), 3.0);
        assert!(PruningRule::prune(&rule, &vec![1, 0]));
        assert!(!PruningRule::prune(&rule, &vec![1, 2]));
    }

    #[test]
    fn test_named_estimator() {
        let est: Box<dyn OptimisticEstimator<Vec<u8>, f64>> = Box::new(SizeBound { max: 4 });
        assert_eq!(est.name(), "SizeBound");
        assert_eq!(est.estimate(&vec![]), 4.0);
    }
}
