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

//! Configuration errors
//!
//! Everything the engine can reject is rejected at construction time. Once a
//! search is built, running it cannot fail.

/// A reason an `OpusSearch` could not be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OpusConfigError {
    /// `number_of_results` was zero.
    #[error("the number of requested results must be greater than zero")]
    ZeroResults,
    /// No optimistic estimator was supplied.
    #[error("at least one optimistic estimator is required")]
    NoOptimisticEstimators,
    /// No target function was supplied.
    #[error("a target function is required")]
    MissingObjective,
    /// `alpha` was outside `(0, 1]` or not a number.
    #[error("alpha must lie in (0, 1], got {0}")]
    InvalidAlpha(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(
            OpusConfigError::ZeroResults.to_string(),
            "the number of requested results must be greater than zero"
        );
        assert_eq!(
            OpusConfigError::InvalidAlpha("1.5".to_string()).to_string(),
            "alpha must lie in (0, 1], got 1.5"
        );
    }

    #[test]
    fn test_is_a_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(OpusConfigError::MissingObjective);
        assert!(err.source().is_none());
    }
}
