//! One-slot lookahead cursor with pushback
//!
//! [`LookAheadStream`] is shared by both stages of the front end:
//! - the tokenizer walks a line as a `LookAheadStream<char>`
//! - the parser walks a unit as a `LookAheadStream<Token>`
//!
//! Pushback exists for one grammar decision: a term that starts with an
//! identifier can be a variable, an array index or a subroutine call, and the
//! parser needs to see the token after the identifier before it can choose.
//!
//! All operations are O(1); the backing store is a [`VecDeque`].

use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

/// Raised by [`LookAheadStream::expect`] when nothing is left to read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no further input, expected {expected}")]
pub struct Exhausted {
    pub expected: String,
}

/// Ordered cursor over `T` with `peek`, `extract` and `pushback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookAheadStream<T> {
    items: VecDeque<T>,
}

impl<T> LookAheadStream<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Returns the head without consuming it.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Consumes and returns the head.
    pub fn extract(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Makes `item` the new head. The previous head, if any, follows it.
    pub fn pushback(&mut self, item: T) {
        self.items.push_front(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the head, or an [`Exhausted`] error naming what was expected.
    pub fn expect(&self, description: &str) -> Result<&T, Exhausted> {
        self.peek().ok_or_else(|| Exhausted {
            expected: description.to_string(),
        })
    }

    /// Consumes the head only if `predicate` accepts it.
    pub fn extract_if(&mut self, predicate: impl FnOnce(&T) -> bool) -> Option<T> {
        match self.peek() {
            Some(item) if predicate(item) => self.extract(),
            _ => None,
        }
    }
}

impl<T> Iterator for LookAheadStream<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.extract()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items.len(), Some(self.items.len()))
    }
}

impl<T> FromIterator<T> for LookAheadStream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: fmt::Display> fmt::Display for LookAheadStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
