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

use banker_model::{configuration::Configuration, index::OwnerIndex, num::ResourceCount};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap};

/// A queued configuration together with the owners completed to reach it.
///
/// Entries compare by configuration only; the path is payload.
#[derive(Clone, Debug)]
pub(crate) struct FrontierEntry<T>
where
    T: ResourceCount,
{
    configuration: Configuration<T>,
    path: Vec<OwnerIndex>,
}

impl<T> FrontierEntry<T>
where
    T: ResourceCount,
{
    /// The entry for the initial configuration.
    #[inline]
    pub fn root(configuration: Configuration<T>) -> Self {
        Self {
            configuration,
            path: Vec::new(),
        }
    }

    /// The entry reached from `self` by completing `owner`.
    #[inline]
    pub fn child(&self, owner: OwnerIndex, configuration: Configuration<T>) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(owner);
        Self {
            configuration,
            path,
        }
    }

    #[inline]
    pub fn configuration(&self) -> &Configuration<T> {
        &self.configuration
    }

    #[inline]
    pub fn path(&self) -> &[OwnerIndex] {
        &self.path
    }

    #[inline]
    pub fn into_path(self) -> Vec<OwnerIndex> {
        self.path
    }
}

impl<T> Ord for FrontierEntry<T>
where
    T: ResourceCount,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.configuration.cmp(&other.configuration)
    }
}

impl<T> PartialOrd for FrontierEntry<T>
where
    T: ResourceCount,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for FrontierEntry<T>
where
    T: ResourceCount,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.configuration == other.configuration
    }
}

impl<T> Eq for FrontierEntry<T> where T: ResourceCount {}

/// Priority frontier of unexamined configurations, smallest first.
///
/// With duplicate detection enabled, every configuration ever pushed is
/// remembered and pushing it again is refused, even after it was popped.
#[derive(Clone, Debug)]
pub(crate) struct Frontier<T>
where
    T: ResourceCount,
{
    heap: BinaryHeap<Reverse<FrontierEntry<T>>>,
    seen: BTreeSet<Configuration<T>>,
    deduplicate: bool,
}

impl<T> Default for Frontier<T>
where
    T: ResourceCount,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T>
where
    T: ResourceCount,
{
    /// Creates an empty frontier that keeps duplicates.
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seen: BTreeSet::new(),
            deduplicate: false,
        }
    }

    /// Clears all state and sets the duplicate policy for the next run.
    /// Allocated heap capacity is kept.
    #[inline]
    pub fn reset(&mut self, deduplicate: bool) {
        self.heap.clear();
        self.seen.clear();
        self.deduplicate = deduplicate;
    }

    /// Enqueues an entry. A configuration refused by duplicate detection is
    /// handed back as `Err`.
    #[inline]
    pub fn push(&mut self, entry: FrontierEntry<T>) -> Result<(), FrontierEntry<T>> {
        if self.deduplicate && !self.seen.insert(entry.configuration.clone()) {
            return Err(entry);
        }
        self.heap.push(Reverse(entry));
        Ok(())
    }

    /// Removes and returns the smallest entry.
    #[inline]
    pub fn pop(&mut self) -> Option<FrontierEntry<T>> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    /// Returns the smallest entry without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&FrontierEntry<T>> {
        self.heap.peek().map(|Reverse(entry)| entry)
    }

    /// Returns the number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of distinct configurations remembered.
    #[inline]
    pub fn num_seen(&self) -> usize {
        self.seen.len()
    }
}
