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

//! Monitoring combinators for the safety search
//!
//! Provides `CompositeMonitor`, a fan-out monitor that forwards every event to
//! its children. This lets callers mix logging and early stopping without
//! coupling them to the checker.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    monitor::safety_monitor::{SafetyMonitor, SearchCommand},
    stats::SafetyStatistics,
};
use banker_model::{configuration::Configuration, index::OwnerIndex, num::ResourceCount};

/// A safety monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeMonitor<'a, T>
where
    T: ResourceCount,
{
    monitors: Vec<Box<dyn SafetyMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: ResourceCount,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: ResourceCount,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SafetyMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SafetyMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn SafetyMonitor<T> + 'a>] {
        &self.monitors
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn SafetyMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: ResourceCount,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SafetyMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> SafetyMonitor<T> for CompositeMonitor<'a, T>
where
    T: ResourceCount,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, initial: &Configuration<T>, statistics: &SafetyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(initial, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &SafetyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &SafetyStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, statistics: &SafetyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(statistics);
        }
    }

    #[inline(always)]
    fn on_expand(
        &mut self,
        configuration: &Configuration<T>,
        transitions: usize,
        statistics: &SafetyStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_expand(configuration, transitions, statistics);
        }
    }

    #[inline(always)]
    fn on_dead_end(&mut self, configuration: &Configuration<T>, statistics: &SafetyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_dead_end(configuration, statistics);
        }
    }

    #[inline(always)]
    fn on_duplicate(&mut self, configuration: &Configuration<T>, statistics: &SafetyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_duplicate(configuration, statistics);
        }
    }

    #[inline(always)]
    fn on_complete(
        &mut self,
        configuration: &Configuration<T>,
        order: &[OwnerIndex],
        statistics: &SafetyStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_complete(configuration, order, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder<'r> {
        label: &'static str,
        events: &'r RefCell<Vec<String>>,
        command: SearchCommand,
    }

    impl<'r> SafetyMonitor<u32> for Recorder<'r> {
        fn name(&self) -> &str {
            self.label
        }
        fn on_enter_search(&mut self, _initial: &Configuration<u32>, _s: &SafetyStatistics) {
            self.events.borrow_mut().push(format!("{}:enter", self.label));
        }
        fn on_exit_search(&mut self, _s: &SafetyStatistics) {
            self.events.borrow_mut().push(format!("{}:exit", self.label));
        }
        fn search_command(&mut self, _s: &SafetyStatistics) -> SearchCommand {
            self.events.borrow_mut().push(format!("{}:command", self.label));
            self.command.clone()
        }
        fn on_step(&mut self, _s: &SafetyStatistics) {
            self.events.borrow_mut().push(format!("{}:step", self.label));
        }
        fn on_expand(&mut self, _c: &Configuration<u32>, n: usize, _s: &SafetyStatistics) {
            self.events
                .borrow_mut()
                .push(format!("{}:expand({})", self.label, n));
        }
        fn on_dead_end(&mut self, _c: &Configuration<u32>, _s: &SafetyStatistics) {}
        fn on_duplicate(&mut self, _c: &Configuration<u32>, _s: &SafetyStatistics) {}
        fn on_complete(&mut self, _c: &Configuration<u32>, _o: &[OwnerIndex], _s: &SafetyStatistics) {
        }
    }

    fn sample() -> Configuration<u32> {
        Configuration::from_demands(
            [(
                banker_model::resources::ResourceVector::from([0]),
                banker_model::resources::ResourceVector::from([1]),
            )],
            banker_model::resources::ResourceVector::from([1]),
        )
        .unwrap()
    }

    #[test]
    fn test_events_fan_out_in_insertion_order() {
        let events = RefCell::new(Vec::new());
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(Recorder {
            label: "a",
            events: &events,
            command: SearchCommand::Continue,
        });
        composite.add_monitor(Recorder {
            label: "b",
            events: &events,
            command: SearchCommand::Continue,
        });

        let stats = SafetyStatistics::default();
        composite.on_enter_search(&sample(), &stats);
        composite.on_step(&stats);
        composite.on_expand(&sample(), 3, &stats);
        composite.on_exit_search(&stats);

        assert_eq!(composite.len(), 2);
        assert_eq!(
            *events.borrow(),
            vec![
                "a:enter", "b:enter", "a:step", "b:step", "a:expand(3)", "b:expand(3)", "a:exit",
                "b:exit"
            ]
        );
    }

    #[test]
    fn test_search_command_short_circuits() {
        let events = RefCell::new(Vec::new());
        let mut composite = CompositeMonitor::with_capacity(3);
        composite.add_monitor(Recorder {
            label: "a",
            events: &events,
            command: SearchCommand::Continue,
        });
        composite.add_monitor(Recorder {
            label: "b",
            events: &events,
            command: SearchCommand::Terminate("stop".to_string()),
        });
        composite.add_monitor(Recorder {
            label: "c",
            events: &events,
            command: SearchCommand::Terminate("late".to_string()),
        });

        let cmd = composite.search_command(&SafetyStatistics::default());
        assert_eq!(cmd, SearchCommand::Terminate("stop".to_string()));
        assert_eq!(*events.borrow(), vec!["a:command", "b:command"]);
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite: CompositeMonitor<'_, u32> = CompositeMonitor::default();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&SafetyStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_from_iterator_collects_boxed_monitors() {
        let boxed: Vec<Box<dyn SafetyMonitor<u32>>> = vec![
            Box::new(crate::monitor::no_op::NoOperationMonitor::new()),
            Box::new(crate::monitor::no_op::NoOperationMonitor::new()),
        ];
        let composite: CompositeMonitor<'_, u32> = boxed.into_iter().collect();
        assert_eq!(composite.len(), 2);
        assert_eq!(composite.monitors()[0].name(), "NoOperationMonitor");
    }
}
