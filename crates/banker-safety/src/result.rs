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

use crate::stats::SafetyStatistics;
use banker_model::index::OwnerIndex;

/// The answer of a safety check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Every owner can complete in some order.
    Safe,
    /// No order lets every owner complete.
    Unsafe,
    /// The search was aborted before reaching a verdict.
    Unknown,
}

impl Verdict {
    #[inline]
    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Safe => write!(f, "Safe"),
            Verdict::Unsafe => write!(f, "Unsafe"),
            Verdict::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why the search stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    /// A configuration with every owner complete reached the frontier head.
    CompletionReached,
    /// The frontier ran empty without a complete configuration.
    FrontierExhausted,
    /// A dead end stopped an early-exit search; carries the number of
    /// configurations left unexamined in the frontier.
    DeadEnd { remaining: usize },
    /// A monitor stopped the search. The string says why.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::CompletionReached => write!(f, "Completion Reached"),
            TerminationReason::FrontierExhausted => write!(f, "Frontier Exhausted"),
            TerminationReason::DeadEnd { remaining } => {
                write!(f, "Dead End ({} unexamined)", remaining)
            }
            TerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

/// Result of a safety check after termination.
#[derive(Debug, Clone)]
pub struct SafetyOutcome {
    verdict: Verdict,
    termination_reason: TerminationReason,
    completion_order: Option<Vec<OwnerIndex>>,
    statistics: SafetyStatistics,
}

impl SafetyOutcome {
    /// A complete configuration was reached through `order`.
    #[inline]
    pub fn completed(order: Vec<OwnerIndex>, statistics: SafetyStatistics) -> Self {
        Self {
            verdict: Verdict::Safe,
            termination_reason: TerminationReason::CompletionReached,
            completion_order: Some(order),
            statistics,
        }
    }

    /// Every reachable configuration was examined without completing.
    #[inline]
    pub fn exhausted(statistics: SafetyStatistics) -> Self {
        Self {
            verdict: Verdict::Unsafe,
            termination_reason: TerminationReason::FrontierExhausted,
            completion_order: None,
            statistics,
        }
    }

    /// An early-exit search hit a dead end with `remaining` configurations
    /// still queued; the verdict is safe iff any remain.
    #[inline]
    pub fn dead_end(remaining: usize, statistics: SafetyStatistics) -> Self {
        let verdict = if remaining > 0 {
            Verdict::Safe
        } else {
            Verdict::Unsafe
        };
        Self {
            verdict,
            termination_reason: TerminationReason::DeadEnd { remaining },
            completion_order: None,
            statistics,
        }
    }

    /// A monitor aborted the search.
    #[inline]
    pub fn aborted<R>(reason: R, statistics: SafetyStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            verdict: Verdict::Unknown,
            termination_reason: TerminationReason::Aborted(reason.into()),
            completion_order: None,
            statistics,
        }
    }

    /// Returns the verdict.
    #[inline]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns `true` if the verdict is safe.
    #[inline]
    pub fn is_safe(&self) -> bool {
        self.verdict.is_safe()
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the owners in the order they completed on the path to the
    /// complete configuration, if one was reached.
    #[inline]
    pub fn completion_order(&self) -> Option<&[OwnerIndex]> {
        self.completion_order.as_deref()
    }

    /// Returns the search statistics.
    #[inline]
    pub fn statistics(&self) -> &SafetyStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for SafetyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.verdict, self.termination_reason)?;
        if let Some(order) = &self.completion_order {
            write!(f, ", order: [")?;
            for (i, owner) in order.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", owner.get())?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> SafetyStatistics {
        SafetyStatistics::default()
    }

    #[test]
    fn test_completed_is_safe_with_order() {
        let outcome = SafetyOutcome::completed(vec![OwnerIndex::new(1), OwnerIndex::new(0)], stats());
        assert!(outcome.is_safe());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::CompletionReached
        );
        assert_eq!(
            outcome.completion_order(),
            Some(&[OwnerIndex::new(1), OwnerIndex::new(0)][..])
        );
        assert_eq!(outcome.to_string(), "Safe (Completion Reached), order: [1, 0]");
    }

    #[test]
    fn test_exhausted_is_unsafe() {
        let outcome = SafetyOutcome::exhausted(stats());
        assert_eq!(outcome.verdict(), Verdict::Unsafe);
        assert_eq!(outcome.completion_order(), None);
    }

    #[test]
    fn test_dead_end_verdict_follows_remaining_frontier() {
        let safe = SafetyOutcome::dead_end(2, stats());
        assert_eq!(safe.verdict(), Verdict::Safe);
        assert_eq!(safe.completion_order(), None);

        let not_safe = SafetyOutcome::dead_end(0, stats());
        assert_eq!(not_safe.verdict(), Verdict::Unsafe);
        assert_eq!(not_safe.to_string(), "Unsafe (Dead End (0 unexamined))");
    }

    #[test]
    fn test_aborted_is_unknown() {
        let outcome = SafetyOutcome::aborted("time limit exceeded", stats());
        assert_eq!(outcome.verdict(), Verdict::Unknown);
        assert!(!outcome.is_safe());
        match outcome.termination_reason() {
            TerminationReason::Aborted(msg) => assert_eq!(msg, "time limit exceeded"),
            other => panic!("expected Aborted, got {}", other),
        }
    }
}
