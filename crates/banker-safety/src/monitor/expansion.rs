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

use crate::{
    monitor::safety_monitor::{SafetyMonitor, SearchCommand},
    stats::SafetyStatistics,
};
use banker_model::{configuration::Configuration, index::OwnerIndex, num::ResourceCount};

/// A safety monitor that terminates the search once a fixed number of
/// configurations has been expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionLimitMonitor<T> {
    max_expansions: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> ExpansionLimitMonitor<T> {
    /// Creates a new `ExpansionLimitMonitor` allowing `max_expansions` expansions.
    #[inline]
    pub fn new(max_expansions: u64) -> Self {
        Self {
            max_expansions,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the expansion budget.
    #[inline]
    pub fn max_expansions(&self) -> u64 {
        self.max_expansions
    }
}

impl<T> SafetyMonitor<T> for ExpansionLimitMonitor<T>
where
    T: ResourceCount,
{
    fn name(&self) -> &str {
        "ExpansionLimitMonitor"
    }

    fn on_enter_search(&mut self, _initial: &Configuration<T>, _statistics: &SafetyStatistics) {}

    fn on_exit_search(&mut self, _statistics: &SafetyStatistics) {}

    fn search_command(&mut self, statistics: &SafetyStatistics) -> SearchCommand {
        if statistics.configurations_expanded >= self.max_expansions {
            return SearchCommand::Terminate(format!(
                "expansion limit of {} reached",
                self.max_expansions
            ));
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, _statistics: &SafetyStatistics) {}

    fn on_expand(
        &mut self,
        _configuration: &Configuration<T>,
        _transitions: usize,
        _statistics: &SafetyStatistics,
    ) {
    }

    fn on_dead_end(&mut self, _configuration: &Configuration<T>, _statistics: &SafetyStatistics) {}

    fn on_duplicate(&mut self, _configuration: &Configuration<T>, _statistics: &SafetyStatistics) {}

    fn on_complete(
        &mut self,
        _configuration: &Configuration<T>,
        _order: &[OwnerIndex],
        _statistics: &SafetyStatistics,
    ) {
    }
}
