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

//! Best-first safety checker.
//!
//! `SafetyChecker` explores the configurations reachable from an initial
//! allocation state by completing one owner at a time. A priority frontier
//! always yields the smallest configuration next, so runs are deterministic
//! for a given input and policy. The checker keeps its frontier between runs
//! and only clears it, which avoids reallocation across repeated checks.
//!
//! Each run is driven by a private search session that owns the per-run
//! statistics and timing, reports to a `SafetyMonitor`, and turns the way the
//! loop ended into a `SafetyOutcome`.
//!
//! Loop
//! - Ask the monitor whether to continue.
//! - Pop the head of the frontier; an empty frontier means the state is unsafe.
//! - A complete head ends the run with its completion order.
//! - Otherwise enqueue every enabled transition. A configuration without any
//!   enabled transition is a dead end, which either ends the run or only its
//!   branch, depending on the `TerminationPolicy`.

use crate::{
    frontier::{Frontier, FrontierEntry},
    monitor::{
        no_op::NoOperationMonitor,
        safety_monitor::{SafetyMonitor, SearchCommand},
    },
    policy::{SearchPolicy, TerminationPolicy},
    result::SafetyOutcome,
    stats::SafetyStatistics,
};
use banker_model::{
    configuration::Configuration, error::ModelResult, index::OwnerIndex, num::ResourceCount,
    resources::ResourceVector,
};
use tracing::{debug, trace};

/// Decides whether an allocation state is safe.
#[derive(Clone, Debug)]
pub struct SafetyChecker<T>
where
    T: ResourceCount,
{
    policy: SearchPolicy,
    frontier: Frontier<T>,
}

impl<T> Default for SafetyChecker<T>
where
    T: ResourceCount,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SafetyChecker<T>
where
    T: ResourceCount,
{
    /// Creates a checker with the default `SearchPolicy`.
    #[inline]
    pub fn new() -> Self {
        Self::with_policy(SearchPolicy::default())
    }

    /// Creates a checker with the given policy.
    #[inline]
    pub fn with_policy(policy: SearchPolicy) -> Self {
        Self {
            policy,
            frontier: Frontier::new(),
        }
    }

    /// Returns the policy used by `check`.
    #[inline]
    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    /// Replaces the policy used by `check`.
    #[inline]
    pub fn set_policy(&mut self, policy: SearchPolicy) {
        self.policy = policy;
    }

    /// Checks `initial` under the checker's policy, reporting to `monitor`.
    #[inline]
    pub fn check<S>(&mut self, initial: &Configuration<T>, monitor: S) -> SafetyOutcome
    where
        S: SafetyMonitor<T>,
    {
        self.check_with_policy(initial, self.policy, monitor)
    }

    /// Checks `initial` under `policy`, reporting to `monitor`. The checker's
    /// own policy is left untouched.
    pub fn check_with_policy<S>(
        &mut self,
        initial: &Configuration<T>,
        policy: SearchPolicy,
        mut monitor: S,
    ) -> SafetyOutcome
    where
        S: SafetyMonitor<T>,
    {
        let session = SafetySearchSession::new(&mut self.frontier, initial, policy, &mut monitor);
        let outcome = session.run();
        self.frontier.reset(policy.deduplicate());
        outcome
    }
}

/// Returns `true` if the owners described by `(owned, required)` pairs can all
/// complete from the free pool `free`, under the default policy.
///
/// # Errors
///
/// Returns a `ModelError` if `owners` is empty, if any vector's width differs
/// from `free`, or if the total amount of some resource kind overflows `T`.
pub fn is_safe<T>(
    owners: &[(ResourceVector<T>, ResourceVector<T>)],
    free: &ResourceVector<T>,
) -> ModelResult<bool>
where
    T: ResourceCount,
{
    let initial = Configuration::from_demands(owners.iter().cloned(), free.clone())?;
    let outcome = SafetyChecker::new().check(&initial, NoOperationMonitor::new());
    Ok(outcome.is_safe())
}

/// How a session ended.
#[derive(Debug)]
enum SessionEnd {
    Completed(Vec<OwnerIndex>),
    Exhausted,
    DeadEnd(usize),
    Aborted(String),
}

/// A search session for the safety checker.
/// This struct encapsulates the state of a single run.
struct SafetySearchSession<'a, T, S>
where
    T: ResourceCount,
{
    frontier: &'a mut Frontier<T>,
    initial: &'a Configuration<T>,
    policy: SearchPolicy,
    monitor: &'a mut S,
    stats: SafetyStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, S> std::fmt::Debug for SafetySearchSession<'a, T, S>
where
    T: ResourceCount,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafetySearchSession")
            .field("initial", &self.initial)
            .field("policy", &self.policy)
            .field("frontier_len", &self.frontier.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S> SafetySearchSession<'a, T, S>
where
    T: ResourceCount,
    S: SafetyMonitor<T>,
{
    #[inline]
    fn new(
        frontier: &'a mut Frontier<T>,
        initial: &'a Configuration<T>,
        policy: SearchPolicy,
        monitor: &'a mut S,
    ) -> Self {
        frontier.reset(policy.deduplicate());
        Self {
            frontier,
            initial,
            policy,
            monitor,
            stats: SafetyStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> SafetyOutcome {
        debug!(
            owners = self.initial.num_owners(),
            resources = self.initial.num_resources(),
            policy = %self.policy,
            "starting safety check"
        );
        self.monitor.on_enter_search(self.initial, &self.stats);

        let seeded = self.frontier.push(FrontierEntry::root(self.initial.clone()));
        debug_assert!(
            seeded.is_ok(),
            "called `Frontier::push` on a fresh frontier and the root was refused"
        );
        self.stats.on_frontier_size(self.frontier.len());

        let end = loop {
            self.monitor.on_step(&self.stats);
            self.stats.on_step();

            // A complete head is reported even when the monitor would stop.
            let head_complete = self
                .frontier
                .peek()
                .is_some_and(|entry| entry.configuration().is_complete());
            let command = if head_complete {
                SearchCommand::Continue
            } else {
                self.monitor.search_command(&self.stats)
            };
            if let SearchCommand::Terminate(msg) = command {
                break SessionEnd::Aborted(msg);
            }

            let Some(entry) = self.frontier.pop() else {
                break SessionEnd::Exhausted;
            };
            self.stats.on_depth_update(entry.path().len() as u64);

            if entry.configuration().is_complete() {
                self.monitor
                    .on_complete(entry.configuration(), entry.path(), &self.stats);
                break SessionEnd::Completed(entry.into_path());
            }

            if !self.expand(&entry) && self.policy.termination() == TerminationPolicy::FirstDeadEnd
            {
                break SessionEnd::DeadEnd(self.frontier.len());
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(end)
    }

    /// Enqueues every enabled transition of `entry`. Returns `false` if the
    /// configuration is a dead end, that is, no owner could complete.
    /// Transitions refused as duplicates still count as enabled.
    fn expand(&mut self, entry: &FrontierEntry<T>) -> bool {
        let source = entry.configuration();
        let mut enabled = 0usize;
        let mut enqueued = 0usize;

        for transition in source.successors(self.policy.accounting()) {
            enabled += 1;
            self.stats.on_transition_generated();

            match self
                .frontier
                .push(entry.child(transition.owner, transition.configuration))
            {
                Ok(()) => enqueued += 1,
                Err(refused) => {
                    self.stats.on_duplicate_skipped();
                    self.monitor
                        .on_duplicate(refused.configuration(), &self.stats);
                }
            }
        }

        self.stats.on_configuration_expanded();
        self.stats.on_frontier_size(self.frontier.len());
        trace!(
            depth = entry.path().len(),
            free = %source.free_ref(),
            enabled,
            enqueued,
            frontier = self.frontier.len(),
            "expanded configuration"
        );
        self.monitor.on_expand(source, enqueued, &self.stats);

        if enabled == 0 {
            self.stats.on_dead_end();
            self.monitor.on_dead_end(source, &self.stats);
            return false;
        }
        true
    }

    /// Turn the way the loop ended into an outcome.
    ///
    /// # Note
    ///
    /// This consumes self.
    fn finalize_result(self, end: SessionEnd) -> SafetyOutcome {
        let outcome = match end {
            SessionEnd::Completed(order) => SafetyOutcome::completed(order, self.stats),
            SessionEnd::Exhausted => SafetyOutcome::exhausted(self.stats),
            SessionEnd::DeadEnd(remaining) => SafetyOutcome::dead_end(remaining, self.stats),
            SessionEnd::Aborted(msg) => SafetyOutcome::aborted(msg, self.stats),
        };
        debug!(
            verdict = %outcome.verdict(),
            reason = %outcome.termination_reason(),
            seen = self.frontier.num_seen(),
            "safety check finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::expansion::ExpansionLimitMonitor;
    use crate::result::{TerminationReason, Verdict};
    use banker_model::configuration::ReleaseAccounting;
    use std::time::Duration;

    fn rv<const N: usize>(counts: [u32; N]) -> ResourceVector<u32> {
        ResourceVector::from(counts)
    }

    fn build<const N: usize>(
        owners: &[([u32; N], [u32; N])],
        free: [u32; N],
    ) -> Configuration<u32> {
        Configuration::from_demands(
            owners.iter().map(|(owned, required)| (rv(*owned), rv(*required))),
            rv(free),
        )
        .unwrap()
    }

    fn order(ids: &[usize]) -> Vec<OwnerIndex> {
        ids.iter().copied().map(OwnerIndex::new).collect()
    }

    fn check(config: &Configuration<u32>, policy: SearchPolicy) -> SafetyOutcome {
        SafetyChecker::with_policy(policy).check(config, NoOperationMonitor::new())
    }

    /// Neither owner's requirement fits the free pool.
    fn blocked_pair() -> Configuration<u32> {
        build(
            &[([0, 0, 0], [5, 7, 9]), ([0, 2, 0], [1, 3, 4])],
            [5, 2, 3],
        )
    }

    /// Y (id 1) must complete before X (id 0).
    fn chain() -> Configuration<u32> {
        build(&[([0, 0], [2, 2]), ([2, 1], [0, 1])], [0, 1])
    }

    /// Two interchangeable owners followed by one that can never run.
    fn interchangeable_then_stuck() -> Configuration<u32> {
        build(&[([0], [1]), ([1], [1]), ([0], [100])], [1])
    }

    #[test]
    fn test_blocked_pair_is_unsafe_under_both_policies() {
        let exhaustive = check(&blocked_pair(), SearchPolicy::exhaustive());
        assert_eq!(exhaustive.verdict(), Verdict::Unsafe);
        assert_eq!(
            exhaustive.termination_reason(),
            &TerminationReason::FrontierExhausted
        );
        assert_eq!(exhaustive.statistics().dead_ends, 1);
        assert_eq!(exhaustive.statistics().configurations_expanded, 1);

        let early = check(&blocked_pair(), SearchPolicy::first_dead_end());
        assert_eq!(early.verdict(), Verdict::Unsafe);
        assert_eq!(
            early.termination_reason(),
            &TerminationReason::DeadEnd { remaining: 0 }
        );
    }

    #[test]
    fn test_owner_without_requirement_is_safe_immediately() {
        let config = build(&[([3, 1], [0, 0])], [0, 0]);
        for policy in [SearchPolicy::exhaustive(), SearchPolicy::first_dead_end()] {
            let outcome = check(&config, policy);
            assert!(outcome.is_safe());
            assert_eq!(outcome.completion_order(), Some(&[][..]));
            assert_eq!(outcome.statistics().configurations_expanded, 0);
        }
    }

    #[test]
    fn test_requirement_exceeding_free_is_unsafe() {
        let config = build(&[([0, 0], [4, 4])], [3, 3]);
        let outcome = check(&config, SearchPolicy::exhaustive());
        assert_eq!(outcome.verdict(), Verdict::Unsafe);
        assert!(outcome.completion_order().is_none());
    }

    #[test]
    fn test_chain_completes_in_dependency_order() {
        for accounting in [ReleaseAccounting::Footprint, ReleaseAccounting::Held] {
            let policy = SearchPolicy::exhaustive().with_accounting(accounting);
            let outcome = check(&chain(), policy);
            assert_eq!(outcome.verdict(), Verdict::Safe, "{}", accounting);
            assert_eq!(outcome.completion_order(), Some(&order(&[1, 0])[..]));
            assert_eq!(outcome.statistics().max_depth, 2);
        }
    }

    #[test]
    fn test_accounting_decides_tight_chain() {
        // Y holds [2, 0] and needs [0, 1]; X then needs [2, 2].
        let config = build(&[([0, 0], [2, 2]), ([2, 0], [0, 1])], [0, 1]);

        let footprint = check(&config, SearchPolicy::exhaustive());
        assert_eq!(footprint.verdict(), Verdict::Safe);
        assert_eq!(footprint.completion_order(), Some(&order(&[1, 0])[..]));

        let held = check(
            &config,
            SearchPolicy::exhaustive().with_accounting(ReleaseAccounting::Held),
        );
        assert_eq!(held.verdict(), Verdict::Unsafe);
    }

    #[test]
    fn test_policies_disagree_when_dead_end_leaves_frontier_non_empty() {
        let config = interchangeable_then_stuck();

        let early = check(&config, SearchPolicy::first_dead_end());
        assert_eq!(early.verdict(), Verdict::Safe);
        assert_eq!(
            early.termination_reason(),
            &TerminationReason::DeadEnd { remaining: 1 }
        );
        assert!(early.completion_order().is_none());

        let exhaustive = check(&config, SearchPolicy::exhaustive());
        assert_eq!(exhaustive.verdict(), Verdict::Unsafe);
        assert_eq!(
            exhaustive.termination_reason(),
            &TerminationReason::FrontierExhausted
        );
    }

    #[test]
    fn test_exhaustive_statistics_on_interchangeable_owners() {
        let outcome = check(&interchangeable_then_stuck(), SearchPolicy::exhaustive());
        let stats = outcome.statistics();

        assert_eq!(stats.steps, 5);
        assert_eq!(stats.configurations_expanded, 4);
        assert_eq!(stats.transitions_generated, 4);
        assert_eq!(stats.duplicates_skipped, 1);
        assert_eq!(stats.dead_ends, 1);
        assert_eq!(stats.peak_frontier_size, 2);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_duplicate_only_expansion_is_not_a_dead_end() {
        // With deduplication, the second route to {P, Q done} is refused but
        // its source still had an enabled transition.
        let policy = SearchPolicy::first_dead_end().with_deduplication(true);
        let outcome = check(&interchangeable_then_stuck(), policy);
        assert_eq!(outcome.statistics().duplicates_skipped, 1);
        assert_eq!(outcome.statistics().dead_ends, 1);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::DeadEnd { remaining: 0 }
        );
        assert_eq!(outcome.verdict(), Verdict::Unsafe);
    }

    #[test]
    fn test_monitor_abort_yields_unknown() {
        let mut checker = SafetyChecker::new();
        let outcome = checker.check(&interchangeable_then_stuck(), ExpansionLimitMonitor::new(1));
        assert_eq!(outcome.verdict(), Verdict::Unknown);
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
        assert_eq!(outcome.statistics().configurations_expanded, 1);
    }

    #[test]
    fn test_complete_head_wins_over_exhausted_budget() {
        let mut checker = SafetyChecker::new();
        let outcome = checker.check(&chain(), ExpansionLimitMonitor::new(2));
        assert_eq!(outcome.verdict(), Verdict::Safe);
        assert_eq!(outcome.completion_order(), Some(&order(&[1, 0])[..]));
        assert_eq!(outcome.statistics().configurations_expanded, 2);
    }

    #[test]
    fn test_repeated_checks_are_deterministic() {
        let mut checker = SafetyChecker::new();
        let config = chain();

        let mut first = checker.check(&config, NoOperationMonitor::new());
        let mut second = checker.check(&config, NoOperationMonitor::new());

        assert_eq!(first.verdict(), second.verdict());
        assert_eq!(first.termination_reason(), second.termination_reason());
        assert_eq!(first.completion_order(), second.completion_order());

        let mut a = first.statistics().clone();
        let mut b = second.statistics().clone();
        a.time_total = Duration::ZERO;
        b.time_total = Duration::ZERO;
        assert_eq!(a, b);

        first = checker.check(&blocked_pair(), NoOperationMonitor::new());
        second = checker.check(&chain(), NoOperationMonitor::new());
        assert!(!first.is_safe());
        assert!(second.is_safe());
    }

    #[test]
    fn test_check_with_policy_leaves_checker_policy() {
        let mut checker = SafetyChecker::with_policy(SearchPolicy::exhaustive());
        let outcome = checker.check_with_policy(
            &interchangeable_then_stuck(),
            SearchPolicy::first_dead_end(),
            NoOperationMonitor::new(),
        );
        assert!(outcome.is_safe());
        assert_eq!(checker.policy(), SearchPolicy::exhaustive());

        checker.set_policy(SearchPolicy::first_dead_end());
        assert_eq!(checker.policy(), SearchPolicy::first_dead_end());
    }

    #[test]
    fn test_is_safe_boundary() {
        let owners = vec![(rv([2, 1]), rv([0, 1])), (rv([0, 0]), rv([2, 2]))];
        assert_eq!(is_safe(&owners, &rv([0, 1])), Ok(true));
        assert_eq!(is_safe(&owners, &rv([0, 0])), Ok(false));
    }

    #[test]
    fn test_is_safe_rejects_malformed_input() {
        use banker_model::error::ModelError;

        assert_eq!(is_safe::<u32>(&[], &rv([1])), Err(ModelError::EmptyOwnerSet));

        let owners = vec![(rv([0, 0]), rv([1, 1]))];
        assert!(matches!(
            is_safe(&owners, &rv([1, 1, 1])),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }
}
