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

//! Time limit monitor for the safety search
//!
//! `TimeLimitMonitor` enforces a wall-clock budget. It resets its clock when
//! the search starts, reads the clock only at masked step intervals, and
//! signals termination once the limit is reached.
//!
//! Construct with `new(limit)` or `with_clock_check_mask(limit, mask)` to
//! trade clock reads against reaction time.

use crate::{
    monitor::safety_monitor::{SafetyMonitor, SearchCommand},
    stats::SafetyStatistics,
};
use banker_model::{configuration::Configuration, index::OwnerIndex, num::ResourceCount};
use std::time::{Duration, Instant};

/// A safety monitor that enforces a time limit on the search.
/// It uses a step mask to limit clock checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    start_time: Instant,
    time_limit: Duration,
    clock_check_mask: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Checks the clock every 16384 steps.
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    /// Creates a new `TimeLimitMonitor` with the specified time limit.
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    /// Creates a new `TimeLimitMonitor` with the specified time limit and clock check mask.
    /// A mask of `0` checks the clock on every step.
    pub fn with_clock_check_mask(time_limit: Duration, mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask: mask,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the configured limit.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<T> SafetyMonitor<T> for TimeLimitMonitor<T>
where
    T: ResourceCount,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _initial: &Configuration<T>, _statistics: &SafetyStatistics) {
        self.start_time = Instant::now();
    }

    fn on_exit_search(&mut self, _statistics: &SafetyStatistics) {}

    fn search_command(&mut self, statistics: &SafetyStatistics) -> SearchCommand {
        if (statistics.steps & self.clock_check_mask) == 0
            && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate(format!(
                "time limit of {} ms exceeded",
                self.time_limit.as_millis()
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
