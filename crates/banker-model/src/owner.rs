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

//! # Owners
//!
//! An `Owner<T>` holds some resources and still requires more before it can
//! finish. It moves from incomplete to complete exactly once, through
//! `allocate`, which hands back everything the owner would hold after its
//! request is granted.
//!
//! Owners sort incomplete-first, then by outstanding requirement, then by
//! held resources. The id only labels the owner for reporting and is ignored
//! by ordering and equality, so two owners in the same resource state are
//! interchangeable inside a configuration.

use crate::error::ModelResult;
use crate::index::OwnerIndex;
use crate::num::ResourceCount;
use crate::resources::ResourceVector;
use std::cmp::Ordering;

/// An entity holding some resources and requiring more to complete.
#[derive(Clone)]
pub struct Owner<T> {
    id: OwnerIndex,
    owned: ResourceVector<T>,
    required: ResourceVector<T>,
    completed: bool,
}

impl<T> Owner<T>
where
    T: ResourceCount,
{
    /// Creates a new owner. It is complete right away if nothing is required.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `owned` and `required` differ in width,
    /// `CapacityOverflow` if `owned + required` does not fit `T`.
    pub fn new(
        id: OwnerIndex,
        owned: ResourceVector<T>,
        required: ResourceVector<T>,
    ) -> ModelResult<Self> {
        owned.try_add(&required)?;
        let completed = required.is_zero();
        Ok(Self {
            id,
            owned,
            required,
            completed,
        })
    }

    /// Returns the id this owner was created with.
    #[inline]
    pub fn id(&self) -> OwnerIndex {
        self.id
    }

    /// Returns the resources this owner currently holds.
    #[inline]
    pub fn owned(&self) -> &ResourceVector<T> {
        &self.owned
    }

    /// Returns the outstanding requirement.
    #[inline]
    pub fn required(&self) -> &ResourceVector<T> {
        &self.required
    }

    /// Returns what this owner would release on completion, `owned + required`.
    #[inline]
    pub fn footprint(&self) -> ResourceVector<T> {
        &self.owned + &self.required
    }

    /// Returns `true` once the owner has completed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Returns the number of resource kinds this owner tracks.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.owned.len()
    }

    /// Completes the owner and returns the released resources,
    /// `owned + required`. Both vectors are zeroed afterwards. Calling it on
    /// a completed owner releases nothing.
    pub fn allocate(&mut self) -> ResourceVector<T> {
        let freed = self.footprint();
        self.required.zero();
        self.owned.zero();
        self.completed = true;
        freed
    }
}

impl<T> Ord for Owner<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.completed
            .cmp(&other.completed)
            .then_with(|| self.required.cmp(&other.required))
            .then_with(|| self.owned.cmp(&other.owned))
    }
}

impl<T> PartialOrd for Owner<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Owner<T>
where
    T: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Owner<T> where T: Ord {}

impl<T> std::fmt::Display for Owner<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Owner#{}(owned: {}, required: {}, {})",
            self.id.get(),
            self.owned,
            self.required,
            if self.completed { "complete" } else { "pending" }
        )
    }
}

impl<T> std::fmt::Debug for Owner<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Owner")
            .field("id", &self.id)
            .field("owned", &self.owned)
            .field("required", &self.required)
            .field("completed", &self.completed)
            .finish()
    }
}
