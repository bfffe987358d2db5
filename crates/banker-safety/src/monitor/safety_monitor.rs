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

//! Safety search monitoring interface
//!
//! Declares the `SafetyMonitor` trait and `SearchCommand` for observing and
//! controlling the checker. Callbacks follow the session lifecycle, and a
//! monitor can stop the search through `search_command` (default: Continue).
//!
//! Lifecycle
//! - enter → step → {complete | expand → (dead end) → duplicates} → exit
//! - `SafetyStatistics` is provided to every callback.
//!
//! Methods take `&mut self`; monitors are single-threaded.

use crate::stats::SafetyStatistics;
use banker_model::{configuration::Configuration, index::OwnerIndex, num::ResourceCount};

/// What the search should do next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchCommand {
    /// Keep searching.
    #[default]
    Continue,
    /// Stop and report the given reason.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Trait for monitoring and controlling the safety search.
pub trait SafetyMonitor<T>
where
    T: ResourceCount,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the first step with the initial configuration.
    fn on_enter_search(&mut self, initial: &Configuration<T>, statistics: &SafetyStatistics);
    /// Called once after the verdict is known.
    fn on_exit_search(&mut self, statistics: &SafetyStatistics);
    /// Called at the top of every step to decide whether to go on.
    ///
    /// Not consulted when the next configuration to pop is already complete.
    fn search_command(&mut self, _statistics: &SafetyStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at each step of the search, before the frontier is inspected.
    fn on_step(&mut self, statistics: &SafetyStatistics);
    /// Called after a configuration has been expanded.
    /// `transitions` is the number of successors that were enqueued.
    fn on_expand(
        &mut self,
        configuration: &Configuration<T>,
        transitions: usize,
        statistics: &SafetyStatistics,
    );
    /// Called when an expanded configuration has no enabled transition.
    fn on_dead_end(&mut self, configuration: &Configuration<T>, statistics: &SafetyStatistics);
    /// Called when a successor is refused because it was seen before.
    fn on_duplicate(&mut self, configuration: &Configuration<T>, statistics: &SafetyStatistics);
    /// Called when a complete configuration reaches the head of the frontier.
    fn on_complete(
        &mut self,
        configuration: &Configuration<T>,
        order: &[OwnerIndex],
        statistics: &SafetyStatistics,
    );
}

impl<T> std::fmt::Debug for dyn SafetyMonitor<T>
where
    T: ResourceCount,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SafetyMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SafetyMonitor<T>
where
    T: ResourceCount,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SafetyMonitor({})", self.name())
    }
}
