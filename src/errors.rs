//! Error types for the front end
//!
//! - [`LexError`]: raised while stripping comments or extracting tokens
//! - [`ParseError`]: raised while walking the grammar
//! - [`CompileError`]: either of the above, tagged with the failing unit, or a
//!   request for a unit the batch does not have
//!
//! All errors are fatal for the unit being processed. There is no
//! resynchronization after a grammar violation.

use thiserror::Error;

use crate::parser::NonTerminal;
use crate::stream::Exhausted;
use crate::tokenizer::Token;

/// Tokenizer errors. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string constant on line {line}")]
    UnterminatedString { line: usize },

    #[error("unterminated comment opened on line {line}")]
    UnterminatedComment { line: usize },

    #[error("no token extractor accepts {lookahead:?} on line {line}")]
    NoExtractor { lookahead: char, line: usize },

    #[error(
        "exactly one token extractor expected for {lookahead:?} on line {line}, found [{}]",
        .matched.join(", ")
    )]
    AmbiguousExtractors {
        lookahead: char,
        line: usize,
        matched: Vec<&'static str>,
    },

    #[error("integer constant {digits} on line {line} does not fit in 32 bits")]
    IntegerOverflow { digits: String, line: usize },
}

/// Grammar errors, each carrying the expected and actual token context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: Token },

    #[error("no further tokens, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("unexpected trailing tokens starting at {next} ({remaining} left)")]
    TrailingTokens { next: Token, remaining: usize },

    #[error("no statement begins with {found}")]
    NoStatement { found: Token },

    #[error("no term begins with {found}")]
    NoTerm { found: Token },

    #[error("cannot end {closing}, innermost open production is {}", innermost(.open))]
    MismatchedNesting {
        closing: NonTerminal,
        open: Option<NonTerminal>,
    },

    #[error("{open} was never closed")]
    Unclosed { open: NonTerminal },

    #[error("{token} lies outside every production")]
    StrayTerminal { token: Token },
}

fn innermost(open: &Option<NonTerminal>) -> &'static str {
    open.map_or("none", NonTerminal::as_str)
}

impl ParseError {
    pub(crate) fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.clone(),
        }
    }
}

impl From<Exhausted> for ParseError {
    fn from(err: Exhausted) -> Self {
        ParseError::UnexpectedEnd {
            expected: err.expected,
        }
    }
}

/// A [`LexError`] or [`ParseError`] attributed to one unit of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("{unit}: {source}")]
    Lex { unit: String, source: LexError },

    #[error("{unit}: {source}")]
    Parse { unit: String, source: ParseError },

    #[error("no unit at index {index}, batch has {len}")]
    NoSuchUnit { index: usize, len: usize },
}

impl CompileError {
    /// Name of the unit that failed, if the error concerns a known unit.
    pub fn unit(&self) -> Option<&str> {
        match self {
            CompileError::Lex { unit, .. } | CompileError::Parse { unit, .. } => Some(unit),
            CompileError::NoSuchUnit { .. } => None,
        }
    }
}
