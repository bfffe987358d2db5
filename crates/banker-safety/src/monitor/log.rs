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

//! Progress logging for the safety search
//!
//! `LogMonitor` emits `tracing` events at `info` level while the search runs.
//! Progress lines are rate-limited twice: the clock is only read on steps
//! selected by `clock_check_mask`, and a line is only written once
//! `log_interval` has elapsed since the previous one. Session start, a found
//! completion order and the final summary are always logged; dead ends go to
//! `debug`.

use crate::{
    monitor::safety_monitor::{SafetyMonitor, SearchCommand},
    stats::SafetyStatistics,
};
use banker_model::{configuration::Configuration, index::OwnerIndex, num::ResourceCount};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    lines_written: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> LogMonitor<T> {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            lines_written: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Number of progress lines written in the current session.
    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    #[inline(always)]
    fn log_line(&mut self, stats: &SafetyStatistics) {
        let now = Instant::now();
        info!(
            elapsed_s = now.duration_since(self.start_time).as_secs_f32(),
            steps = stats.steps,
            expanded = stats.configurations_expanded,
            frontier_peak = stats.peak_frontier_size,
            depth = stats.max_depth,
            dead_ends = stats.dead_ends,
            duplicates = stats.duplicates_skipped,
            "safety search progress"
        );
        self.last_log_time = now;
        self.lines_written = self.lines_written.saturating_add(1);
    }
}

impl<T> Default for LogMonitor<T> {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}ms, clock_check_mask: {})",
            self.log_interval.as_millis(),
            self.clock_check_mask
        )
    }
}

impl<T> SafetyMonitor<T> for LogMonitor<T>
where
    T: ResourceCount,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, initial: &Configuration<T>, _statistics: &SafetyStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.lines_written = 0;
        info!(
            owners = initial.num_owners(),
            resources = initial.num_resources(),
            free = %initial.free_ref(),
            "safety search started"
        );
    }

    fn on_exit_search(&mut self, statistics: &SafetyStatistics) {
        info!(
            steps = statistics.steps,
            expanded = statistics.configurations_expanded,
            dead_ends = statistics.dead_ends,
            elapsed_ms = statistics.time_total.as_millis() as u64,
            "safety search finished"
        );
    }

    fn search_command(&mut self, _statistics: &SafetyStatistics) -> SearchCommand {
        SearchCommand::Continue
    }

    fn on_step(&mut self, statistics: &SafetyStatistics) {
        if (statistics.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(statistics);
        }
    }

    fn on_expand(
        &mut self,
        _configuration: &Configuration<T>,
        _transitions: usize,
        _statistics: &SafetyStatistics,
    ) {
    }

    fn on_dead_end(&mut self, configuration: &Configuration<T>, statistics: &SafetyStatistics) {
        debug!(
            completed = configuration.num_completed(),
            free = %configuration.free_ref(),
            dead_ends = statistics.dead_ends,
            "dead end"
        );
    }

    fn on_duplicate(&mut self, _configuration: &Configuration<T>, _statistics: &SafetyStatistics) {}

    fn on_complete(
        &mut self,
        _configuration: &Configuration<T>,
        order: &[OwnerIndex],
        _statistics: &SafetyStatistics,
    ) {
        info!(length = order.len(), "completion order found");
    }
}
