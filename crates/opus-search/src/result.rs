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

/// Why a search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The frontier ran empty. Every region of the search space was either
    /// refined or pruned by an admissible bound.
    SearchExhausted,
    /// The best remaining bound on the frontier could not beat the current
    /// threshold, so no remaining node can contribute a result.
    BoundReached,
    /// The search was stopped by a monitor (interrupt, time limit, budget).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl TerminationReason {
    /// Returns `true` if the search ran to a proven end rather than being
    /// cut short by a monitor.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            TerminationReason::SearchExhausted | TerminationReason::BoundReached
        )
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::SearchExhausted => write!(f, "Search Exhausted"),
            TerminationReason::BoundReached => write!(f, "Bound Reached"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}
