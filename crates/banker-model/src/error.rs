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

//! Contract violations detected while building resource vectors, owners and
//! configurations. None of them describe a property of the resource state;
//! they all mean the caller handed in malformed input.

use crate::index::ResourceIndex;
use thiserror::Error;

/// Errors raised when model values are constructed from invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Two resource vectors that must be combined or compared differ in width.
    #[error("resource vectors differ in width: expected {expected} kinds, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A configuration was built without any owner.
    #[error("a configuration needs at least one owner")]
    EmptyOwnerSet,

    /// The amount of some resource kind does not fit the count type.
    #[error("the total amount of {resource} overflows the resource count type")]
    CapacityOverflow { resource: ResourceIndex },

    /// A subtraction would drive some resource kind below zero.
    #[error("subtracting would leave a negative amount of {resource}")]
    CapacityUnderflow { resource: ResourceIndex },
}

/// Result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;
