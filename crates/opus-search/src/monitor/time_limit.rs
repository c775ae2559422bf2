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

//! # Time Limit Monitor
//!
//! A lightweight monitor that enforces a wall-clock time budget on the search.
//! It checks elapsed time only at masked step intervals and requests
//! termination once the configured `Duration` has been exceeded.
//!
//! ## Highlights
//!
//! - Bitmask-driven clock checks: `(steps & clock_check_mask) == 0` triggers a check.
//!   The default mask (`0x3FF`) checks every 1,024 steps. One OPUS step refines a
//!   whole node, which is far more work than a single decision in a depth-first
//!   solver, so the mask is smaller than a tight inner loop would use.
//! - `on_step()` uses `wrapping_add` to increment steps at minimal cost.
//! - Constructors: `new(time_limit)` and `with_clock_check_mask(time_limit, mask)`.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::num::SearchValue;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    clock_check_mask: u64,
    steps: u64,
    time_limit: Duration,
    start_time: Instant,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Default mask: check every 1,024 steps (2^10).
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FF;

    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the configured time budget.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor<T>
where
    T: SearchValue,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self) {
        self.start_time = Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_result_found(&mut self, _value: T) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::search_monitor::SearchCommand;
    use std::time::{Duration, Instant};

    type ValueType = f64;

    fn new_monitor_with_limit(ms: u64) -> TimeLimitMonitor<ValueType> {
        TimeLimitMonitor::<ValueType>::new(Duration::from_millis(ms))
    }

    #[test]
    fn test_default_mask_is_power_of_two_minus_one() {
        let mask = TimeLimitMonitor::<ValueType>::DEFAULT_STEP_CLOCK_CHECK_MASK;
        assert_eq!(mask, 0x3FF);
        assert!((mask + 1).is_power_of_two());
    }

    #[test]
    fn test_search_command_terminates_after_time_limit_when_mask_condition_met() {
        let mut mon = new_monitor_with_limit(10);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 0;

        match mon.search_command() {
            SearchCommand::Terminate(msg) => {
                assert!(msg.contains("time limit"), "unexpected message: {msg}");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_search_command_skips_clock_between_mask_points() {
        let mut mon = new_monitor_with_limit(1);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 1;

        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_zero_mask_always_checks() {
        let mut mon =
            TimeLimitMonitor::<ValueType>::with_clock_check_mask(Duration::from_millis(1), 0);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 12345;

        assert!(mon.search_command().is_terminate());
    }

    #[test]
    fn test_on_enter_search_resets_clock_and_steps() {
        let mut mon = new_monitor_with_limit(1000);
        mon.steps = 77;
        mon.start_time = Instant::now() - Duration::from_secs(5000);

        mon.on_enter_search();

        assert_eq!(mon.steps, 0);
        assert!(mon.start_time.elapsed() < Duration::from_secs(10));
        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_on_step_increments_steps_wrapping() {
        let mut mon = new_monitor_with_limit(1000);
        mon.on_step();
        assert_eq!(mon.steps, 1);

        mon.steps = u64::MAX;
        mon.on_step();
        assert_eq!(mon.steps, 0);
    }
}
