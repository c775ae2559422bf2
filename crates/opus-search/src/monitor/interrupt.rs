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

//! # Interrupt Monitor
//!
//! Cooperative cancellation for a running search. The monitor polls a
//! [`StopSignal`] once per step and answers `Terminate` as soon as the signal
//! is raised. Signals are provided for a borrowed `AtomicBool`, a shared
//! `Arc<AtomicBool>`, and any `Fn() -> bool` closure, so an outer
//! "stoppable algorithm" framework can plug in whatever it uses.
//!
//! Loads use `Ordering::Relaxed`: the flag is a single boolean that only
//! ever moves from `false` to `true`, and the search observes it within one
//! iteration.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::num::SearchValue;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Something that can tell a search it should stop.
pub trait StopSignal {
    fn stop_requested(&self) -> bool;
}

impl StopSignal for AtomicBool {
    #[inline(always)]
    fn stop_requested(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl StopSignal for &AtomicBool {
    #[inline(always)]
    fn stop_requested(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl StopSignal for Arc<AtomicBool> {
    #[inline(always)]
    fn stop_requested(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Adapter that turns a boolean-returning closure into a [`StopSignal`].
#[derive(Clone)]
pub struct StopFn<F>(pub F);

impl<F> StopSignal for StopFn<F>
where
    F: Fn() -> bool,
{
    #[inline(always)]
    fn stop_requested(&self) -> bool {
        (self.0)()
    }
}

/// A search monitor that checks a stop signal to determine
/// whether the search should be interrupted.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<S, T> {
    signal: S,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> InterruptMonitor<&'a AtomicBool, T> {
    /// Creates a new `InterruptMonitor` that monitors the given atomic boolean flag.
    /// The search will be terminated once the flag is set to `true`.
    #[inline(always)]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self::with_signal(stop_flag)
    }
}

impl<F, T> InterruptMonitor<StopFn<F>, T>
where
    F: Fn() -> bool,
{
    /// Creates a new `InterruptMonitor` that asks the given closure
    /// whether a stop has been requested.
    #[inline(always)]
    pub fn from_fn(stop_requested: F) -> Self {
        Self::with_signal(StopFn(stop_requested))
    }
}

impl<S, T> InterruptMonitor<S, T> {
    /// Creates a new `InterruptMonitor` over an arbitrary stop signal.
    #[inline(always)]
    pub fn with_signal(signal: S) -> Self {
        Self {
            signal,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, T> SearchMonitor<T> for InterruptMonitor<S, T>
where
    S: StopSignal,
    T: SearchValue,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self) {}
    fn on_exit_search(&mut self) {}
    fn on_result_found(&mut self, _value: T) {}
    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.signal.stop_requested() {
            SearchCommand::Terminate("Interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InterruptMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use std::cell::Cell;
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    type ValueType = f64;

    #[test]
    fn test_interrupt_monitor_continues_when_flag_is_clear() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::<_, ValueType>::new(&flag);

        match monitor.search_command() {
            SearchCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupt_monitor_terminates_when_flag_is_set() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::<_, ValueType>::new(&flag);

        flag.store(true, Ordering::Relaxed);

        match monitor.search_command() {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason, "Interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupt_monitor_observes_shared_flag_from_other_thread() {
        let flag = Arc::new(AtomicBool::new(false));
        let monitor = InterruptMonitor::<_, ValueType>::with_signal(Arc::clone(&flag));
        assert!(!monitor.search_command().is_terminate());

        let remote = Arc::clone(&flag);
        std::thread::spawn(move || remote.store(true, Ordering::Relaxed))
            .join()
            .expect("stopper thread panicked");

        assert!(monitor.search_command().is_terminate());
    }

    #[test]
    fn test_interrupt_monitor_from_closure() {
        let calls = Cell::new(0u32);
        let monitor = InterruptMonitor::<_, ValueType>::from_fn(|| {
            calls.set(calls.get() + 1);
            calls.get() >= 3
        });

        assert!(!monitor.search_command().is_terminate());
        assert!(!monitor.search_command().is_terminate());
        assert!(monitor.search_command().is_terminate());
        assert_eq!(calls.get(), 3);
    }
}
