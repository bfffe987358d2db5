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

//! # Instance Loading
//!
//! Reads allocation states from a whitespace-separated text format. A `#`
//! starts a comment that runs to the end of the line.
//!
//! ```raw
//! <num_owners> <num_resources>
//! <free_0> ... <free_{k-1}>
//! <owned_0> ... <owned_{k-1}> <required_0> ... <required_{k-1}>   # one row per owner
//! ```
//!
//! Owner ids follow the row order. Line breaks carry no meaning beyond
//! separating tokens, but every token after the last owner row is rejected.
//!
//! ```rust
//! use banker_model::loading::InstanceLoader;
//!
//! let text = "2 3\n5 2 3\n0 0 0 5 7 9\n0 2 0 1 3 4\n";
//! let configuration = InstanceLoader::<u32>::new().from_str(text).unwrap();
//! assert_eq!(configuration.num_owners(), 2);
//! assert_eq!(configuration.num_resources(), 3);
//! ```

use crate::configuration::Configuration;
use crate::error::ModelError;
use crate::num::ResourceCount;
use crate::resources::ResourceVector;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading an instance.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before the named section was complete.
    #[error("unexpected end of input while reading {section}")]
    UnexpectedEof { section: &'static str },
    /// A token could not be parsed into the expected numeric type.
    #[error("could not parse token '{token}' as {type_name}")]
    Parse {
        token: String,
        type_name: &'static str,
    },
    /// The header declares no owners or no resource kinds.
    #[error(
        "instance dimensions must be positive, found {num_owners} owners and {num_resources} resource kinds"
    )]
    InvalidDimensions {
        num_owners: usize,
        num_resources: usize,
    },
    /// Tokens remain after the last owner row.
    #[error("unexpected trailing token '{0}'")]
    TrailingInput(String),
    /// The parsed values do not form a valid configuration.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Loader for allocation instances in the text format described above.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceLoader<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> InstanceLoader<T>
where
    T: ResourceCount,
{
    /// Creates a new loader.
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    /// Loads an instance from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, input: &str) -> Result<Configuration<T>, LoaderError> {
        let mut tokens = Tokens::new(input);

        let num_owners: usize = tokens.next("header")?;
        let num_resources: usize = tokens.next("header")?;
        if num_owners == 0 || num_resources == 0 {
            return Err(LoaderError::InvalidDimensions {
                num_owners,
                num_resources,
            });
        }

        let free = tokens.vector::<T>(num_resources, "free pool")?;

        // The header is untrusted; rows are collected as they are read.
        let demands = (0..num_owners)
            .map(|_| {
                let owned = tokens.vector::<T>(num_resources, "owner row")?;
                let required = tokens.vector::<T>(num_resources, "owner row")?;
                Ok((owned, required))
            })
            .collect::<Result<Vec<_>, LoaderError>>()?;

        if let Some(extra) = tokens.peek() {
            return Err(LoaderError::TrailingInput(extra.to_string()));
        }

        Ok(Configuration::from_demands(demands, free)?)
    }

    /// Loads an instance from any reader.
    pub fn from_reader<R: Read>(&self, mut reader: R) -> Result<Configuration<T>, LoaderError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        self.from_str(&input)
    }

    /// Loads an instance from a file.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Configuration<T>, LoaderError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(std::io::BufReader::new(file))
    }
}

/// Whitespace tokens with `#` comments removed.
struct Tokens<'a> {
    inner: std::iter::Peekable<Box<dyn Iterator<Item = &'a str> + 'a>>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        let iter: Box<dyn Iterator<Item = &'a str> + 'a> = Box::new(
            input
                .lines()
                .map(|line| line.split_once('#').map_or(line, |(data, _)| data))
                .flat_map(str::split_whitespace),
        );
        Self {
            inner: iter.peekable(),
        }
    }

    fn peek(&mut self) -> Option<&'a str> {
        self.inner.peek().copied()
    }

    fn next<V>(&mut self, section: &'static str) -> Result<V, LoaderError>
    where
        V: std::str::FromStr,
    {
        let token = self
            .inner
            .next()
            .ok_or(LoaderError::UnexpectedEof { section })?;
        token.parse::<V>().map_err(|_| LoaderError::Parse {
            token: token.to_string(),
            type_name: std::any::type_name::<V>(),
        })
    }

    fn vector<V>(&mut self, len: usize, section: &'static str) -> Result<ResourceVector<V>, LoaderError>
    where
        V: std::str::FromStr,
    {
        (0..len)
            .map(|_| self.next::<V>(section))
            .collect::<Result<Vec<V>, _>>()
            .map(ResourceVector::new)
    }
}
