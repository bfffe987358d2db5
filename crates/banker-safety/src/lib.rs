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

//! Banker-Safety: best-first safety verification for allocation states
//!
//! Decides whether an allocation state is safe, that is, whether some order
//! of granting the owners' outstanding requests lets every owner complete and
//! release what it holds. The engine explores the configurations reachable
//! by completing one owner at a time, always examining the smallest
//! configuration of a priority frontier first.
//!
//! Core flow
//! - Build a `banker_model::configuration::Configuration<T>`.
//! - Pick a `policy::SearchPolicy` (termination semantics, deduplication,
//!   release accounting); the default is exhaustive with deduplication.
//! - Optionally compose monitors for logging and limits.
//! - Run `checker::SafetyChecker::check`, or call `is_safe` for a plain
//!   boolean.
//!
//! Module map
//! - `checker`: the search engine and its per-run session.
//! - `policy`: termination and search options.
//! - `monitor`: search monitors (log, composite, limits, no-op).
//! - `result`: verdicts, termination reasons and completion orders.
//! - `stats`: counters and timing.

pub mod checker;
mod frontier;
pub mod monitor;
pub mod policy;
pub mod result;
pub mod stats;

pub use checker::{SafetyChecker, is_safe};
pub use policy::{SearchPolicy, TerminationPolicy};
pub use result::{SafetyOutcome, TerminationReason, Verdict};
