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

//! # Banker Model
//!
//! Value types describing a multi-resource allocation state: fixed-width
//! resource vectors, owners that hold some resources and still require more,
//! and the immutable configurations that a safety search walks over.
//!
//! ## Modules
//!
//! - `num`: the `ResourceCount` bound collecting the unsigned integer
//!   capabilities every resource quantity needs.
//! - `index`: phantom-tagged indices (`OwnerIndex`, `ResourceIndex`) so owner
//!   positions and resource kinds cannot be mixed up.
//! - `resources`: `ResourceVector<T>` with element-wise arithmetic,
//!   dominance and the lexicographic order.
//! - `owner`: `Owner<T>` and its one-shot completion transition.
//! - `configuration`: `Configuration<T>`, the normalized snapshot of free
//!   pool plus owners, and the transitions leaving it.
//! - `error`: `ModelError`, the contract violations detected at construction.
//! - `loading`: a whitespace-token text format for instances.
//!
//! Every constructor validates its input and returns a `Result`. Once a
//! configuration exists, all arithmetic performed while exploring it is
//! total: vector widths agree and the conserved totals fit the count type.

pub mod configuration;
pub mod error;
pub mod index;
pub mod loading;
pub mod num;
pub mod owner;
pub mod resources;
