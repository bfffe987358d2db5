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

//! Search options for the safety checker.
//!
//! `TerminationPolicy` decides what a dead end means for the verdict.
//! `SearchPolicy` bundles it with duplicate detection and the release
//! accounting used to build successors.

use banker_model::configuration::ReleaseAccounting;

/// What the search does when it meets a configuration no owner can leave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TerminationPolicy {
    /// Abandon the dead branch and keep exploring the frontier. The state is
    /// safe iff a complete configuration reaches the head of the frontier.
    #[default]
    Exhaustive,
    /// Stop at the first dead end and report safe iff the frontier still
    /// holds unexamined configurations. Those are never checked, so a safe
    /// verdict obtained this way carries no completion order.
    FirstDeadEnd,
}

impl std::fmt::Display for TerminationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationPolicy::Exhaustive => write!(f, "Exhaustive"),
            TerminationPolicy::FirstDeadEnd => write!(f, "FirstDeadEnd"),
        }
    }
}

/// Options for one safety check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchPolicy {
    termination: TerminationPolicy,
    deduplicate: bool,
    accounting: ReleaseAccounting,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::exhaustive()
    }
}

impl SearchPolicy {
    /// Exhaustive search that never enqueues the same configuration twice.
    #[inline]
    pub const fn exhaustive() -> Self {
        Self {
            termination: TerminationPolicy::Exhaustive,
            deduplicate: true,
            accounting: ReleaseAccounting::Footprint,
        }
    }

    /// Early-exit search without duplicate detection: every transition is
    /// enqueued and the verdict is "frontier non-empty" at the first dead end.
    #[inline]
    pub const fn first_dead_end() -> Self {
        Self {
            termination: TerminationPolicy::FirstDeadEnd,
            deduplicate: false,
            accounting: ReleaseAccounting::Footprint,
        }
    }

    /// Sets the termination policy.
    #[inline]
    pub const fn with_termination(mut self, termination: TerminationPolicy) -> Self {
        self.termination = termination;
        self
    }

    /// Enables or disables duplicate detection on the frontier.
    #[inline]
    pub const fn with_deduplication(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Sets how released resources return to the free pool.
    #[inline]
    pub const fn with_accounting(mut self, accounting: ReleaseAccounting) -> Self {
        self.accounting = accounting;
        self
    }

    #[inline]
    pub const fn termination(&self) -> TerminationPolicy {
        self.termination
    }

    #[inline]
    pub const fn deduplicate(&self) -> bool {
        self.deduplicate
    }

    #[inline]
    pub const fn accounting(&self) -> ReleaseAccounting {
        self.accounting
    }
}

impl std::fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchPolicy(termination: {}, deduplicate: {}, accounting: {})",
            self.termination, self.deduplicate, self.accounting
        )
    }
}
