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

//! # Resource Vectors
//!
//! A `ResourceVector<T>` holds one non-negative count per resource kind. All
//! vectors taking part in one search share the same width; combining vectors
//! of different widths is a contract violation.
//!
//! ## Arithmetic
//!
//! - `try_add` / `try_sub` validate the width and every coordinate and return
//!   a `ModelError` instead of wrapping.
//! - The operator forms (`&a + &b`, `&a - &b`, `a += &b`) panic on the same
//!   conditions. They are meant for values that were validated up front.
//! - `zero` clears a vector in place.
//!
//! ## Ordering
//!
//! `Ord` is lexicographic: the first coordinate where two vectors differ
//! decides. It is a deterministic total order and carries no resource
//! meaning. Whether one pool can cover a request is answered by `dominates`,
//! which requires every coordinate to be at least as large.

use crate::error::{ModelError, ModelResult};
use crate::index::ResourceIndex;
use crate::num::ResourceCount;
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Index, Sub};

/// Fixed-width vector of resource quantities, one per resource kind.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ResourceVector<T> {
    counts: Vec<T>,
}

impl<T> ResourceVector<T> {
    /// Creates a vector from one count per resource kind.
    #[inline]
    pub fn new(counts: Vec<T>) -> Self {
        Self { counts }
    }

    /// Returns the number of resource kinds.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the vector tracks no resource kind at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the counts as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.counts
    }

    /// Returns an iterator over the counts.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.counts.iter()
    }

    /// Consumes the vector and returns the counts.
    #[inline]
    pub fn into_inner(self) -> Vec<T> {
        self.counts
    }

    /// Checks that `other` has the same width as `self`.
    #[inline]
    pub fn check_dimension(&self, other: &Self) -> ModelResult<()> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(ModelError::DimensionMismatch {
                expected: self.len(),
                found: other.len(),
            })
        }
    }
}

impl<T> ResourceVector<T>
where
    T: ResourceCount,
{
    /// Creates a vector of `len` zero counts.
    #[inline]
    pub fn zeros(len: usize) -> Self {
        Self {
            counts: vec![T::zero(); len],
        }
    }

    /// Returns the count of the given resource kind, if it exists.
    #[inline]
    pub fn get(&self, resource: ResourceIndex) -> Option<T> {
        self.counts.get(resource.get()).copied()
    }

    /// Returns `true` if every count is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|c| c.is_zero())
    }

    /// Resets every count to zero in place.
    #[inline]
    pub fn zero(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = T::zero());
    }

    /// Sum over all resource kinds, or `None` if it overflows `T`.
    pub fn total(&self) -> Option<T> {
        self.counts
            .iter()
            .try_fold(T::zero(), |acc, &c| acc.checked_add(&c))
    }

    /// Element-wise addition.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the widths differ, `CapacityOverflow` naming the
    /// first coordinate whose sum does not fit `T`.
    pub fn try_add(&self, other: &Self) -> ModelResult<Self> {
        self.check_dimension(other)?;
        self.counts
            .iter()
            .zip(other.counts.iter())
            .enumerate()
            .map(|(i, (a, b))| {
                a.checked_add(b).ok_or(ModelError::CapacityOverflow {
                    resource: ResourceIndex::new(i),
                })
            })
            .collect::<ModelResult<Vec<T>>>()
            .map(Self::new)
    }

    /// Element-wise subtraction.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the widths differ, `CapacityUnderflow` naming the
    /// first coordinate where `other` exceeds `self`.
    pub fn try_sub(&self, other: &Self) -> ModelResult<Self> {
        self.check_dimension(other)?;
        self.counts
            .iter()
            .zip(other.counts.iter())
            .enumerate()
            .map(|(i, (a, b))| {
                a.checked_sub(b).ok_or(ModelError::CapacityUnderflow {
                    resource: ResourceIndex::new(i),
                })
            })
            .collect::<ModelResult<Vec<T>>>()
            .map(Self::new)
    }

    /// Returns `true` if `self` is at least `other` in every coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the widths differ.
    #[inline]
    pub fn dominates(&self, other: &Self) -> bool {
        assert_eq!(
            self.len(),
            other.len(),
            "called `ResourceVector::dominates` with mismatched widths: {} vs {}",
            self.len(),
            other.len()
        );
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(a, b)| a >= b)
    }

    /// Strict lexicographic comparison, `self < other`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the widths differ.
    #[inline]
    pub fn less_than(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }
}

impl<T> Ord for ResourceVector<T>
where
    T: Ord,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(
            self.counts.len(),
            other.counts.len(),
            "called `ResourceVector::cmp` with mismatched widths"
        );
        self.counts.cmp(&other.counts)
    }
}

impl<T> PartialOrd for ResourceVector<T>
where
    T: Ord,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Add<&ResourceVector<T>> for &ResourceVector<T>
where
    T: ResourceCount,
{
    type Output = ResourceVector<T>;

    /// # Panics
    ///
    /// Panics if the widths differ or a coordinate overflows.
    #[inline]
    fn add(self, rhs: &ResourceVector<T>) -> ResourceVector<T> {
        match self.try_add(rhs) {
            Ok(sum) => sum,
            Err(e) => panic!("called `ResourceVector::add` with invalid operands: {e}"),
        }
    }
}

impl<T> Sub<&ResourceVector<T>> for &ResourceVector<T>
where
    T: ResourceCount,
{
    type Output = ResourceVector<T>;

    /// # Panics
    ///
    /// Panics if the widths differ or a coordinate underflows.
    #[inline]
    fn sub(self, rhs: &ResourceVector<T>) -> ResourceVector<T> {
        match self.try_sub(rhs) {
            Ok(difference) => difference,
            Err(e) => panic!("called `ResourceVector::sub` with invalid operands: {e}"),
        }
    }
}

impl<T> AddAssign<&ResourceVector<T>> for ResourceVector<T>
where
    T: ResourceCount,
{
    /// # Panics
    ///
    /// Panics if the widths differ or a coordinate overflows.
    #[inline]
    fn add_assign(&mut self, rhs: &ResourceVector<T>) {
        *self = &*self + rhs;
    }
}

impl<T> Index<ResourceIndex> for ResourceVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, resource: ResourceIndex) -> &T {
        &self.counts[resource.get()]
    }
}

impl<T> From<Vec<T>> for ResourceVector<T> {
    #[inline]
    fn from(counts: Vec<T>) -> Self {
        Self::new(counts)
    }
}

impl<T, const N: usize> From<[T; N]> for ResourceVector<T> {
    #[inline]
    fn from(counts: [T; N]) -> Self {
        Self::new(counts.into())
    }
}

impl<T> FromIterator<T> for ResourceVector<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ResourceVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl<T> std::fmt::Display for ResourceVector<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, count) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", count)?;
        }
        write!(f, "]")
    }
}

impl<T> std::fmt::Debug for ResourceVector<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResourceVector{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type R = ResourceVector<u32>;

    #[test]
    fn test_add_and_sub_are_elementwise() {
        let a = R::from([5, 2, 3]);
        let b = R::from([1, 2, 0]);

        assert_eq!(&a + &b, R::from([6, 4, 3]));
        assert_eq!(&a - &b, R::from([4, 0, 3]));
    }

    #[test]
    fn test_sub_then_add_restores_operand() {
        let a = R::from([9, 4, 7, 0]);
        let b = R::from([3, 4, 0, 0]);
        assert_eq!(&(&a - &b) + &b, a);
    }

    #[test]
    fn test_try_add_reports_dimension_mismatch() {
        let a = R::from([1, 2, 3]);
        let b = R::from([1, 2]);
        assert_eq!(
            a.try_add(&b),
            Err(ModelError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_try_add_reports_overflowing_coordinate() {
        let a = ResourceVector::<u8>::from([1, 250]);
        let b = ResourceVector::<u8>::from([1, 10]);
        assert_eq!(
            a.try_add(&b),
            Err(ModelError::CapacityOverflow {
                resource: ResourceIndex::new(1)
            })
        );
    }

    #[test]
    fn test_try_sub_reports_underflowing_coordinate() {
        let a = R::from([3, 0]);
        let b = R::from([1, 1]);
        assert_eq!(
            a.try_sub(&b),
            Err(ModelError::CapacityUnderflow {
                resource: ResourceIndex::new(1)
            })
        );
    }

    #[test]
    #[should_panic(expected = "called `ResourceVector::add` with invalid operands")]
    fn test_add_operator_panics_on_mismatch() {
        let _ = &R::from([1]) + &R::from([1, 2]);
    }

    #[test]
    fn test_lexicographic_order_decided_by_first_difference() {
        assert!(R::from([1, 9, 9]).less_than(&R::from([2, 0, 0])));
        assert!(R::from([2, 0, 1]).less_than(&R::from([2, 1, 0])));
        assert!(!R::from([2, 1, 0]).less_than(&R::from([2, 1, 0])));
        assert!(!R::from([5, 2, 3]).less_than(&R::from([1, 3, 4])));
    }

    #[test]
    fn test_dominance_requires_every_coordinate() {
        let free = R::from([5, 2, 3]);
        // Lexicographically larger, but short on the second kind.
        assert!(!free.dominates(&R::from([1, 3, 4])));
        assert!(free.dominates(&R::from([5, 2, 3])));
        assert!(free.dominates(&R::from([0, 0, 0])));
        assert!(!free.dominates(&R::from([6, 0, 0])));
    }

    #[test]
    fn test_zero_clears_in_place() {
        let mut v = R::from([4, 0, 7]);
        assert!(!v.is_zero());
        v.zero();
        assert!(v.is_zero());
        assert_eq!(v.len(), 3);
        assert_eq!(v, R::zeros(3));
    }

    #[test]
    fn test_total_and_indexing() {
        let v = R::from([4, 0, 7]);
        assert_eq!(v.total(), Some(11));
        assert_eq!(v[ResourceIndex::new(2)], 7);
        assert_eq!(v.get(ResourceIndex::new(3)), None);
        assert_eq!(ResourceVector::<u8>::from([200, 100]).total(), None);
    }

    #[test]
    fn test_add_assign_accumulates() {
        let mut pool = R::from([1, 1]);
        pool += &R::from([2, 3]);
        assert_eq!(pool, R::from([3, 4]));
    }

    #[test]
    fn test_display() {
        assert_eq!(R::from([5, 2, 3]).to_string(), "[5, 2, 3]");
        assert_eq!(format!("{:?}", R::from([1])), "ResourceVector[1]");
        assert_eq!(R::new(vec![]).to_string(), "[]");
    }
}
