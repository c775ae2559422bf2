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

//! # Search Value Trait
//!
//! Unified numeric bounds for objective values, potentials and thresholds.
//! `SearchValue` collects the floating point capabilities the OPUS engine
//! needs (infinities, NaN detection, `min`, division by the approximation
//! factor) into a single alias, so engine signatures stay short.
//!
//! ## Highlights
//!
//! - Requires `num_traits::Float` for infinities, `min` and `is_nan`.
//! - Requires `FromPrimitive` so constants such as `1.0` can be produced
//!   generically.
//! - `Send + Sync` so values can cross thread boundaries in monitors.
//!
//! Implemented for `f32` and `f64`.

use num_traits::{Float, FromPrimitive};
use std::cmp::Ordering;

/// A trait alias for numeric types that can be used as objective values,
/// optimistic estimates and pruning thresholds.
pub trait SearchValue:
    Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Compares two values, treating incomparable pairs (NaN) as equal.
    ///
    /// The engine normalizes NaN away before values reach any ordered
    /// structure, so the fallback is never observed in practice.
    #[inline(always)]
    fn cmp_value(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

impl<T> SearchValue for T where
    T: Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::SearchValue;
    use std::cmp::Ordering;

    #[test]
    fn test_cmp_value_orders_regular_values() {
        assert_eq!(1.0f64.cmp_value(&2.0), Ordering::Less);
        assert_eq!(2.0f64.cmp_value(&1.0), Ordering::Greater);
        assert_eq!(2.0f32.cmp_value(&2.0), Ordering::Equal);
    }

    #[test]
    fn test_cmp_value_handles_infinities() {
        assert_eq!(f64::NEG_INFINITY.cmp_value(&f64::MIN), Ordering::Less);
        assert_eq!(f64::INFINITY.cmp_value(&f64::MAX), Ordering::Greater);
    }

    #[test]
    fn test_cmp_value_treats_nan_as_equal() {
        assert_eq!(f64::NAN.cmp_value(&1.0), Ordering::Equal);
        assert_eq!(1.0f64.cmp_value(&f64::NAN), Ordering::Equal);
    }
}
