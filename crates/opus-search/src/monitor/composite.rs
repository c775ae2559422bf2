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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::num::SearchValue;

/// A composite monitor that aggregates multiple monitors and forwards events to all of them.
///
/// `search_command` short-circuits on the first non-`Continue` answer, so put
/// the strictest stop conditions first.
pub struct CompositeMonitor<'a, T> {
    monitors: Vec<Box<dyn SearchMonitor<T> + 'a>>,
}

impl<'a, T> std::fmt::Debug for CompositeMonitor<'a, T>
where
    T: SearchValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names().join(", "))
            .finish()
    }
}

impl<'a, T> std::fmt::Display for CompositeMonitor<'a, T>
where
    T: SearchValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names().join(", "))
    }
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: SearchValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: SearchValue,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a new boxed monitor to the composite monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors in the composite monitor.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    fn names(&self) -> Vec<&str> {
        self.monitors.iter().map(|m| m.name()).collect()
    }
}

impl<'a, T> FromIterator<Box<dyn SearchMonitor<T> + 'a>> for CompositeMonitor<'a, T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> SearchMonitor<T> for CompositeMonitor<'a, T>
where
    T: SearchValue,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search();
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search();
        }
    }

    fn on_result_found(&mut self, value: T) {
        for monitor in &mut self.monitors {
            monitor.on_result_found(value);
        }
    }

    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        for monitor in &self.monitors {
            let cmd = monitor.search_command();
            if cmd.is_terminate() {
                return cmd;
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type ValueType = f64;

    #[derive(Default)]
    struct Journal {
        events: Vec<String>,
    }

    struct Recording {
        name: &'static str,
        command: SearchCommand,
        journal: Rc<RefCell<Journal>>,
    }

    impl Recording {
        fn new(name: &'static str, command: SearchCommand, journal: Rc<RefCell<Journal>>) -> Self {
            Self {
                name,
                command,
                journal,
            }
        }

        fn log(&self, event: &str) {
            self.journal
                .borrow_mut()
                .events
                .push(format!("{}:{}", self.name, event));
        }
    }

    impl SearchMonitor<ValueType> for Recording {
        fn name(&self) -> &str {
            self.name
        }
        fn on_enter_search(&mut self) {
            self.log("enter");
        }
        fn on_exit_search(&mut self) {
            self.log("exit");
        }
        fn on_result_found(&mut self, value: ValueType) {
            self.log(&format!("result={value}"));
        }
        fn on_step(&mut self) {
            self.log("step");
        }
        fn search_command(&self) -> SearchCommand {
            self.log("command");
            self.command.clone()
        }
    }

    #[test]
    fn test_events_fan_out_in_insertion_order() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut composite = CompositeMonitor::<ValueType>::new();
        composite.add_monitor(Recording::new(
            "a",
            SearchCommand::Continue,
            journal.clone(),
        ));
        composite.add_monitor(Recording::new(
            "b",
            SearchCommand::Continue,
            journal.clone(),
        ));

        composite.on_enter_search();
        composite.on_result_found(1.5);
        composite.on_exit_search();

        assert_eq!(
            journal.borrow().events,
            vec![
                "a:enter",
                "b:enter",
                "a:result=1.5",
                "b:result=1.5",
                "a:exit",
                "b:exit"
            ]
        );
    }

    #[test]
    fn test_search_command_short_circuits_on_first_terminate() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut composite = CompositeMonitor::<ValueType>::with_capacity(3);
        composite.add_monitor(Recording::new(
            "a",
            SearchCommand::Continue,
            journal.clone(),
        ));
        composite.add_monitor(Recording::new(
            "b",
            SearchCommand::Terminate("stop".into()),
            journal.clone(),
        ));
        composite.add_monitor(Recording::new(
            "c",
            SearchCommand::Terminate("never asked".into()),
            journal.clone(),
        ));

        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("stop".into())
        );
        assert_eq!(journal.borrow().events, vec!["a:command", "b:command"]);
    }

    #[test]
    fn test_empty_composite_continues_and_displays_names() {
        let composite = CompositeMonitor::<ValueType>::default();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
        assert_eq!(composite.to_string(), "CompositeMonitor([])");
    }
}
