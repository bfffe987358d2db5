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

//! # Configurations
//!
//! A `Configuration<T>` is an immutable snapshot of an allocation state: the
//! free pool plus every owner's held and outstanding resources. Owners are
//! kept sorted in owner order, so a configuration behaves like a multiset and
//! two configurations reached along different paths compare equal whenever
//! they describe the same resource state.
//!
//! Configurations order by free pool first and by the sorted owner sequence
//! second. The order is only a deterministic key for a priority frontier.
//!
//! ## Transitions
//!
//! From a configuration, every incomplete owner whose requirement is
//! dominated by the free pool can complete. `successor` and `successors`
//! produce the resulting configurations as fresh values; the source is never
//! touched. How the released resources flow back into the pool is chosen by
//! `ReleaseAccounting`.
//!
//! ## Validation
//!
//! Construction rejects an empty owner set, widths that disagree with the
//! free pool, and states whose conserved total per resource kind
//! (`free + Σ owned + Σ required`) overflows `T`. The free pool of any
//! reachable configuration is bounded by that total, so transitions never
//! overflow.

use crate::error::{ModelError, ModelResult};
use crate::index::OwnerIndex;
use crate::num::ResourceCount;
use crate::owner::Owner;
use crate::resources::ResourceVector;
use std::cmp::Ordering;

/// How the resources released by a completing owner reach the free pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReleaseAccounting {
    /// The successor pool is `free + owned + required`: the whole footprint
    /// returned by `Owner::allocate` is added to the pool.
    #[default]
    Footprint,
    /// The successor pool is `free - required + (owned + required)`: the grant
    /// is taken from the pool before the footprint comes back, leaving a net
    /// gain of what the owner held.
    Held,
}

impl std::fmt::Display for ReleaseAccounting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseAccounting::Footprint => write!(f, "Footprint"),
            ReleaseAccounting::Held => write!(f, "Held"),
        }
    }
}

/// A completion step from one configuration to the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition<T>
where
    T: ResourceCount,
{
    /// The owner that completed.
    pub owner: OwnerIndex,
    /// What the owner released, `owned + required`.
    pub freed: ResourceVector<T>,
    /// The configuration after the completion.
    pub configuration: Configuration<T>,
}

/// A snapshot of the free pool and the normalized multiset of owners.
#[derive(Clone)]
pub struct Configuration<T> {
    owners: Vec<Owner<T>>,
    free: ResourceVector<T>,
}

impl<T> Configuration<T>
where
    T: ResourceCount,
{
    /// Creates a configuration from its owners and the free pool.
    ///
    /// # Errors
    ///
    /// - `EmptyOwnerSet` if `owners` is empty.
    /// - `DimensionMismatch` if an owner's width differs from `free`.
    /// - `CapacityOverflow` if the conserved total of a resource kind
    ///   overflows `T`.
    pub fn new(mut owners: Vec<Owner<T>>, free: ResourceVector<T>) -> ModelResult<Self> {
        if owners.is_empty() {
            return Err(ModelError::EmptyOwnerSet);
        }

        let mut total = free.clone();
        for owner in owners.iter() {
            total = total.try_add(owner.owned())?.try_add(owner.required())?;
        }

        owners.sort();
        Ok(Self { owners, free })
    }

    /// Creates a configuration from `(owned, required)` pairs. Owner ids follow
    /// the input order.
    ///
    /// # Errors
    ///
    /// Same as `Configuration::new`, plus the errors of `Owner::new`.
    pub fn from_demands<I>(demands: I, free: ResourceVector<T>) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (ResourceVector<T>, ResourceVector<T>)>,
    {
        let owners = demands
            .into_iter()
            .enumerate()
            .map(|(i, (owned, required))| Owner::new(OwnerIndex::new(i), owned, required))
            .collect::<ModelResult<Vec<_>>>()?;
        Self::new(owners, free)
    }

    /// Returns `true` if every owner has completed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.owners.iter().all(Owner::is_complete)
    }

    /// Returns the owners in owner order.
    #[inline]
    pub fn owners(&self) -> &[Owner<T>] {
        &self.owners
    }

    /// Returns a copy of the free pool.
    #[inline]
    pub fn free(&self) -> ResourceVector<T> {
        self.free.clone()
    }

    /// Returns the free pool by reference.
    #[inline]
    pub fn free_ref(&self) -> &ResourceVector<T> {
        &self.free
    }

    /// Returns the number of owners.
    #[inline]
    pub fn num_owners(&self) -> usize {
        self.owners.len()
    }

    /// Returns the number of resource kinds.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.free.len()
    }

    /// Returns the number of owners that have completed.
    #[inline]
    pub fn num_completed(&self) -> usize {
        self.owners.iter().filter(|o| o.is_complete()).count()
    }

    /// Returns `true` if the owner at `position` (in owner order) is
    /// incomplete and its requirement is covered by the free pool.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[inline]
    pub fn can_complete(&self, position: usize) -> bool {
        let owner = &self.owners[position];
        !owner.is_complete() && self.free.dominates(owner.required())
    }

    /// Completes the owner at `position` (in owner order) if it can proceed
    /// and returns the resulting transition.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn successor(
        &self,
        position: usize,
        accounting: ReleaseAccounting,
    ) -> Option<Transition<T>> {
        if !self.can_complete(position) {
            return None;
        }

        let mut owners = self.owners.clone();
        let owner = &mut owners[position];
        let granted = owner.required().clone();
        let id = owner.id();
        let freed = owner.allocate();

        let free = match accounting {
            ReleaseAccounting::Footprint => &self.free + &freed,
            ReleaseAccounting::Held => &(&self.free - &granted) + &freed,
        };

        owners.sort();
        Some(Transition {
            owner: id,
            freed,
            configuration: Self { owners, free },
        })
    }

    /// Returns every transition leaving this configuration, in owner order.
    pub fn successors(
        &self,
        accounting: ReleaseAccounting,
    ) -> impl Iterator<Item = Transition<T>> + '_ {
        (0..self.owners.len()).filter_map(move |position| self.successor(position, accounting))
    }
}

impl<T> Ord for Configuration<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(
            self.owners.len(),
            other.owners.len(),
            "called `Configuration::cmp` with different owner counts"
        );
        self.free
            .cmp(&other.free)
            .then_with(|| self.owners.cmp(&other.owners))
    }
}

impl<T> PartialOrd for Configuration<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Configuration<T>
where
    T: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Configuration<T> where T: Ord {}

impl<T> std::fmt::Display for Configuration<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration(free: {}, owners: [", self.free)?;
        for (i, owner) in self.owners.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", owner)?;
        }
        write!(f, "])")
    }
}

impl<T> std::fmt::Debug for Configuration<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("free", &self.free)
            .field("owners", &self.owners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ResourceIndex;

    type R = ResourceVector<u32>;

    fn config(demands: &[([u32; 3], [u32; 3])], free: [u32; 3]) -> Configuration<u32> {
        Configuration::from_demands(
            demands.iter().map(|&(o, r)| (R::from(o), R::from(r))),
            R::from(free),
        )
        .expect("configuration should be valid")
    }

    #[test]
    fn test_empty_owner_set_is_rejected() {
        let result = Configuration::<u32>::new(Vec::new(), R::from([1, 2, 3]));
        assert_eq!(result.err(), Some(ModelError::EmptyOwnerSet));
    }

    #[test]
    fn test_owner_width_must_match_free_pool() {
        let result = Configuration::from_demands(
            [(R::from([0, 0]), R::from([1, 1]))],
            R::from([1, 1, 1]),
        );
        assert_eq!(
            result.err(),
            Some(ModelError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_conserved_total_must_fit_count_type() {
        let result = Configuration::from_demands(
            [
                (
                    ResourceVector::<u8>::from([0, 100]),
                    ResourceVector::from([0, 100]),
                ),
                (ResourceVector::from([0, 0]), ResourceVector::from([1, 50])),
            ],
            ResourceVector::from([0, 10]),
        );
        assert_eq!(
            result.err(),
            Some(ModelError::CapacityOverflow {
                resource: ResourceIndex::new(1)
            })
        );
    }

    #[test]
    fn test_owners_are_normalized_on_construction() {
        let c = config(
            &[
                ([0, 0, 0], [0, 0, 0]),
                ([0, 0, 0], [5, 7, 9]),
                ([0, 2, 0], [1, 3, 4]),
            ],
            [5, 2, 3],
        );

        let ids: Vec<usize> = c.owners().iter().map(|o| o.id().get()).collect();
        assert_eq!(ids, vec![2, 1, 0]);
        assert_eq!(c.num_completed(), 1);
        assert!(!c.is_complete());
    }

    #[test]
    fn test_complete_iff_every_owner_complete() {
        let done = config(&[([1, 0, 0], [0, 0, 0]), ([0, 0, 0], [0, 0, 0])], [0; 3]);
        assert!(done.is_complete());

        let pending = config(&[([1, 0, 0], [0, 0, 0]), ([0, 0, 0], [0, 0, 1])], [0; 3]);
        assert!(!pending.is_complete());
    }

    #[test]
    fn test_no_transition_without_dominance() {
        let c = config(
            &[([0, 0, 0], [5, 7, 9]), ([0, 2, 0], [1, 3, 4])],
            [5, 2, 3],
        );
        assert_eq!(c.successors(ReleaseAccounting::Footprint).count(), 0);
    }

    #[test]
    fn test_footprint_accounting_adds_released_resources() {
        let c = config(&[([2, 0, 0], [1, 1, 0])], [1, 1, 1]);
        let transition = c
            .successor(0, ReleaseAccounting::Footprint)
            .expect("owner should proceed");

        assert_eq!(transition.owner, OwnerIndex::new(0));
        assert_eq!(transition.freed, R::from([3, 1, 0]));
        assert_eq!(transition.configuration.free(), R::from([4, 2, 1]));
        assert!(transition.configuration.is_complete());
    }

    #[test]
    fn test_held_accounting_nets_out_the_grant() {
        let c = config(&[([2, 0, 0], [1, 1, 0])], [1, 1, 1]);
        let transition = c
            .successor(0, ReleaseAccounting::Held)
            .expect("owner should proceed");

        assert_eq!(transition.configuration.free(), R::from([3, 1, 1]));
    }

    #[test]
    fn test_successor_leaves_source_untouched() {
        let c = config(&[([0, 0, 0], [1, 0, 0]), ([0, 0, 0], [0, 1, 0])], [1, 1, 0]);
        let before = c.clone();
        let successors: Vec<_> = c.successors(ReleaseAccounting::Footprint).collect();

        assert_eq!(successors.len(), 2);
        assert_eq!(c, before);
        assert_eq!(c.num_completed(), 0);
        for t in successors {
            assert_eq!(t.configuration.num_completed(), 1);
        }
    }

    #[test]
    fn test_completed_owner_has_no_successor() {
        let c = config(&[([0, 0, 0], [0, 0, 0]), ([0, 0, 0], [1, 0, 0])], [1, 0, 0]);
        // Position 0 holds the pending owner, position 1 the completed one.
        assert!(c.successor(1, ReleaseAccounting::Footprint).is_none());
        assert!(c.successor(0, ReleaseAccounting::Footprint).is_some());
    }

    #[test]
    fn test_order_is_free_pool_first() {
        let smaller = config(&[([0, 0, 0], [9, 9, 9])], [1, 0, 0]);
        let larger = config(&[([0, 0, 0], [0, 0, 1])], [2, 0, 0]);
        assert!(smaller < larger);
        assert!(larger > smaller);
    }

    #[test]
    fn test_ties_broken_by_owner_sequence() {
        let a = config(&[([0, 0, 0], [1, 0, 0])], [3, 3, 3]);
        let b = config(&[([0, 0, 0], [2, 0, 0])], [3, 3, 3]);
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_state_along_different_paths_is_equal() {
        let c = config(&[([1, 0, 0], [1, 0, 0]), ([0, 1, 0], [0, 1, 0])], [1, 1, 0]);

        let first = c.successor(0, ReleaseAccounting::Footprint).unwrap();
        let then_second = first
            .configuration
            .successors(ReleaseAccounting::Footprint)
            .next()
            .unwrap();

        let second = c.successor(1, ReleaseAccounting::Footprint).unwrap();
        let then_first = second
            .configuration
            .successors(ReleaseAccounting::Footprint)
            .next()
            .unwrap();

        assert_eq!(then_second.configuration, then_first.configuration);
        assert!(then_first.configuration.is_complete());
    }

    #[test]
    fn test_display_lists_free_pool_and_owners() {
        let c = config(&[([0, 2, 0], [1, 3, 4])], [5, 2, 3]);
        assert_eq!(
            c.to_string(),
            "Configuration(free: [5, 2, 3], owners: [Owner#0(owned: [0, 2, 0], required: [1, 3, 4], pending)])"
        );
    }
}
