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

//! # Resource Count Trait
//!
//! `ResourceCount` gathers the bounds a resource quantity has to satisfy:
//! an unsigned primitive integer (`PrimInt + Unsigned`, which brings checked
//! and saturating arithmetic along), printable, hashable, parseable from
//! text and shareable across threads.
//!
//! All unsigned primitive integers (`u8` through `u128`, `usize`) implement
//! it through the blanket impl below. Instances loaded from text default to
//! `u32`.

use num_traits::{PrimInt, Unsigned};
use std::hash::Hash;
use std::str::FromStr;

/// A trait alias for the integer types that can count resources.
pub trait ResourceCount:
    PrimInt + Unsigned + FromStr + std::fmt::Debug + std::fmt::Display + Hash + Send + Sync
{
}

impl<T> ResourceCount for T where
    T: PrimInt + Unsigned + FromStr + std::fmt::Debug + std::fmt::Display + Hash + Send + Sync
{
}
