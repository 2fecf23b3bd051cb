//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and the shared parsing
//! infrastructure: token matching helpers, the begin/end emitter and the
//! unit entry point.
//!
//! # Parser Architecture
//!
//! Recursive descent, one method per grammar production:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: class, member and subroutine declarations
//! - `statements`: `let`, `if`, `while`, `do`, `return`
//! - `expressions`: expressions, terms and subroutine calls
//!
//! Parser methods are split across these files using `impl Parser` blocks.
//!
//! # Matching
//!
//! Tokens are matched by text. A string constant never matches a text
//! expectation, so `"let"` (the string) cannot stand in for `let` (the
//! keyword) and `"+"` cannot act as an operator.

use tracing::trace;

use super::visitor::{ElementVisitor, NonTerminal};
use crate::context::Context;
use crate::errors::ParseError;
use crate::stream::LookAheadStream;
use crate::tokenizer::{Token, TokenKind};

/// Recursive descent parser for one compilation unit.
///
/// The class-name [`Context`] must already hold every class of the batch.
pub struct Parser<'a, V: ElementVisitor> {
    pub(crate) tokens: LookAheadStream<Token>,
    pub(crate) context: &'a Context,
    visitor: V,
    open: Vec<NonTerminal>,
}

impl<'a, V: ElementVisitor> Parser<'a, V> {
    pub fn new(tokens: Vec<Token>, context: &'a Context, visitor: V) -> Self {
        Self {
            tokens: LookAheadStream::new(tokens),
            context,
            visitor,
            open: Vec::new(),
        }
    }

    /// Parses one `class` and hands the visitor back.
    ///
    /// Fails if any token is left over once the class is closed.
    pub fn parse(mut self) -> Result<V, ParseError> {
        self.parse_class()?;

        if let Some(next) = self.tokens.peek() {
            return Err(ParseError::TrailingTokens {
                next: next.clone(),
                remaining: self.tokens.len(),
            });
        }
        if let Some(&open) = self.open.last() {
            return Err(ParseError::Unclosed { open });
        }

        Ok(self.visitor)
    }

    // ===== Event emission =====

    /// Runs `body` between a begin/end pair for `kind`.
    pub(crate) fn non_terminal<F>(&mut self, kind: NonTerminal, body: F) -> Result<(), ParseError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParseError>,
    {
        self.begin(kind);
        body(self)?;
        self.end(kind)
    }

    fn begin(&mut self, kind: NonTerminal) {
        trace!(depth = self.open.len(), "begin {}", kind);
        self.open.push(kind);
        self.visitor.begin_non_terminal(kind);
    }

    fn end(&mut self, kind: NonTerminal) -> Result<(), ParseError> {
        match self.open.pop() {
            Some(open) if open == kind => {
                trace!(depth = self.open.len(), "end {}", kind);
                self.visitor.end_non_terminal(kind);
                Ok(())
            }
            open => Err(ParseError::MismatchedNesting {
                closing: kind,
                open,
            }),
        }
    }

    fn emit_terminal(&mut self, token: &Token) {
        self.visitor.terminal(token);
    }

    // ===== Lookahead =====

    /// Returns the next token, failing with `expected` if there is none.
    pub(crate) fn peek(&self, expected: &str) -> Result<&Token, ParseError> {
        Ok(self.tokens.expect(expected)?)
    }

    pub(crate) fn has_text(&self, text: &str) -> bool {
        self.tokens.peek().is_some_and(|t| is_lexeme(t, text))
    }

    pub(crate) fn has_text_in(&self, texts: &[&str]) -> bool {
        self.tokens
            .peek()
            .is_some_and(|t| texts.iter().any(|text| is_lexeme(t, text)))
    }

    pub(crate) fn has_kind(&self, kind: TokenKind) -> bool {
        self.tokens.peek().is_some_and(|t| t.is(kind))
    }

    /// Whether the next token can start a `type`.
    pub(crate) fn has_type(&self) -> bool {
        self.has_text_in(PRIMITIVE_TYPES) || self.has_kind(TokenKind::Identifier)
    }

    // ===== Matching =====

    /// Consumes the next token, failing with `expected` if there is none.
    pub(crate) fn extract(&mut self, expected: &str) -> Result<Token, ParseError> {
        self.tokens
            .extract()
            .ok_or_else(|| ParseError::UnexpectedEnd {
                expected: expected.to_string(),
            })
    }

    /// Consumes the exact lexeme `text` and emits it.
    pub(crate) fn match_text(&mut self, text: &str) -> Result<(), ParseError> {
        self.match_any(&[text])
    }

    /// Consumes one of `texts` and emits it.
    pub(crate) fn match_any(&mut self, texts: &[&str]) -> Result<(), ParseError> {
        let expected = describe(texts);
        let token = self.extract(&expected)?;
        if !texts.iter().any(|text| is_lexeme(&token, text)) {
            return Err(ParseError::unexpected(expected, &token));
        }
        self.emit_terminal(&token);
        Ok(())
    }

    /// Consumes a token of the given kind and emits it.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        let expected = kind.to_string();
        let token = self.extract(&expected)?;
        if !token.is(kind) {
            return Err(ParseError::unexpected(expected, &token));
        }
        self.emit_terminal(&token);
        Ok(())
    }

    pub(crate) fn parse_identifier(&mut self) -> Result<(), ParseError> {
        self.match_kind(TokenKind::Identifier)
    }
}

pub(crate) const PRIMITIVE_TYPES: &[&str] = &["int", "char", "boolean"];

fn is_lexeme(token: &Token, text: &str) -> bool {
    token.has_text(text) && !token.is(TokenKind::StringConstant)
}

/// `'x'` for one choice, `one of 'a', 'b'` for several.
fn describe(texts: &[&str]) -> String {
    let quoted: Vec<String> = texts.iter().map(|t| format!("'{}'", t)).collect();
    match quoted.as_slice() {
        [only] => only.clone(),
        _ => format!("one of {}", quoted.join(", ")),
    }
}

/// Parses one unit's tokens into `visitor`.
pub fn parse_unit<V: ElementVisitor>(
    tokens: Vec<Token>,
    context: &Context,
    visitor: V,
) -> Result<V, ParseError> {
    Parser::new(tokens, context, visitor).parse()
}
