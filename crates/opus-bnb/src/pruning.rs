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

//! Pruning pipeline
//!
//! Three checks remove nodes from the search:
//!
//! 1. `matching_rule`: caller-supplied predicates, applied in order; the
//!    first rule that matches discards the candidate.
//! 2. `refinement_potential`: the chained optimistic estimators. The bound is
//!    the running minimum over the estimators, and the chain stops as soon as
//!    the bound can no longer beat `threshold / alpha`, so cheap and tight
//!    estimators belong at the front.
//! 3. `has_top_potential`: the dequeue-time check of a cached bound against
//!    the current threshold (the threshold may have risen since the node was
//!    pushed).
//!
//! An estimator returning `NaN` abstains: `Float::min` ignores it, so the
//! running bound is unchanged and `NaN` never prunes.

use crate::eval::{OptimisticEstimator, PruningRule};
use opus_search::num::SearchValue;

/// The result of bounding a candidate with the estimator chain.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PotentialBound<T> {
    /// Some refinement may still enter the top-k set; carries the bound.
    Promising(T),
    /// The bound cannot beat the threshold; carries the bound at the point
    /// the chain stopped.
    Exhausted(T),
}

impl<T> PotentialBound<T>
where
    T: Copy,
{
    /// Returns the computed bound.
    #[inline]
    pub fn potential(&self) -> T {
        match self {
            PotentialBound::Promising(p) | PotentialBound::Exhausted(p) => *p,
        }
    }

    /// Returns `true` if the candidate is worth refining.
    #[inline]
    pub fn is_promising(&self) -> bool {
        matches!(self, PotentialBound::Promising(_))
    }
}

/// Returns the value a bound has to exceed: `threshold / alpha`.
#[inline(always)]
pub fn cutoff<T>(threshold: T, alpha: T) -> T
where
    T: SearchValue,
{
    threshold / alpha
}

/// Returns the index of the first rule that discards `candidate`.
#[inline]
pub fn matching_rule<'r, N>(
    rules: &[Box<dyn PruningRule<N> + 'r>],
    candidate: &N,
) -> Option<usize> {
    rules.iter().position(|rule| rule.prune(candidate))
}

/// Bounds `candidate` with the ordered estimator chain.
///
/// The running bound starts at `+inf` and takes the minimum with each
/// estimate. Evaluation stops at the first estimator that brings the bound
/// to or below `threshold / alpha`.
pub fn refinement_potential<'e, N, T>(
    estimators: &[Box<dyn OptimisticEstimator<N, T> + 'e>],
    candidate: &N,
    threshold: T,
    alpha: T,
) -> PotentialBound<T>
where
    T: SearchValue,
{
    let cutoff = cutoff(threshold, alpha);
    let mut potential = T::infinity();
    for estimator in estimators {
        potential = potential.min(estimator.estimate(candidate));
        if potential <= cutoff {
            return PotentialBound::Exhausted(potential);
        }
    }
    PotentialBound::Promising(potential)
}

/// Returns `true` if a cached `potential` still beats `threshold / alpha`.
#[inline]
pub fn has_top_potential<T>(potential: T, threshold: T, alpha: T) -> bool
where
    T: SearchValue,
{
    potential > cutoff(threshold, alpha)
}
