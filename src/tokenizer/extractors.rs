//! Token extractors
//!
//! Each extractor owns one lexical category. The tokenizer asks every
//! extractor whether it accepts the current lookahead character and hands the
//! character stream to the single one that does. The acceptance predicates
//! partition the characters the language allows:
//!
//! | extractor              | lookahead                         |
//! |------------------------|-----------------------------------|
//! | whitespace             | `char::is_whitespace`             |
//! | symbol                 | one of `{}()[].,;+-*/&\|<>=~`     |
//! | integer constant       | ASCII digit                       |
//! | string constant        | `"`                               |
//! | identifier or keyword  | alphabetic or `_`                 |

use rustc_hash::FxHashSet;
use std::sync::OnceLock;

use super::token::{Token, TokenKind};
use crate::errors::LexError;
use crate::stream::LookAheadStream;

pub const SYMBOLS: [char; 19] = [
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

pub const KEYWORDS: [&str; 21] = [
    "class",
    "constructor",
    "function",
    "method",
    "field",
    "static",
    "var",
    "int",
    "char",
    "boolean",
    "void",
    "true",
    "false",
    "null",
    "this",
    "let",
    "do",
    "if",
    "else",
    "while",
    "return",
];

pub fn is_keyword(text: &str) -> bool {
    static KEYWORD_SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    KEYWORD_SET
        .get_or_init(|| KEYWORDS.into_iter().collect())
        .contains(text)
}

/// One lexical category of the tokenizer.
pub trait TokenExtractor: Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether a token of this category may start with `lookahead`.
    fn matches(&self, lookahead: char) -> bool;

    /// Builds one token starting with `first`, which the caller has already
    /// taken off `chars` after [`Self::matches`] accepted it.
    fn extract(
        &self,
        first: char,
        chars: &mut LookAheadStream<char>,
        line: usize,
    ) -> Result<Token, LexError>;
}

/// Dispatch table, in evaluation order.
pub static EXTRACTORS: [&dyn TokenExtractor; 5] = [
    &WhitespaceExtractor,
    &SymbolExtractor,
    &IntegerConstantExtractor,
    &StringConstantExtractor,
    &IdentifierOrKeywordExtractor,
];

/// Returns the only extractor accepting `lookahead`.
pub fn extractor_for(
    lookahead: char,
    line: usize,
) -> Result<&'static dyn TokenExtractor, LexError> {
    select(&EXTRACTORS, lookahead, line)
}

/// Picks the only extractor of `table` that accepts `lookahead`.
fn select(
    table: &[&'static dyn TokenExtractor],
    lookahead: char,
    line: usize,
) -> Result<&'static dyn TokenExtractor, LexError> {
    let matched: Vec<&'static dyn TokenExtractor> = table
        .iter()
        .copied()
        .filter(|extractor| extractor.matches(lookahead))
        .collect();

    match matched.as_slice() {
        [only] => Ok(*only),
        [] => Err(LexError::NoExtractor { lookahead, line }),
        _ => Err(LexError::AmbiguousExtractors {
            lookahead,
            line,
            matched: matched.iter().map(|e| e.name()).collect(),
        }),
    }
}

/// Appends characters to `text` while `accept` holds.
fn take_while(
    mut text: String,
    chars: &mut LookAheadStream<char>,
    accept: impl Fn(char) -> bool,
) -> String {
    while let Some(ch) = chars.extract_if(|c| accept(*c)) {
        text.push(ch);
    }
    text
}

pub struct WhitespaceExtractor;

impl TokenExtractor for WhitespaceExtractor {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn matches(&self, lookahead: char) -> bool {
        lookahead.is_whitespace()
    }

    fn extract(
        &self,
        first: char,
        chars: &mut LookAheadStream<char>,
        _line: usize,
    ) -> Result<Token, LexError> {
        let run = take_while(first.to_string(), chars, char::is_whitespace);
        Ok(Token::new(TokenKind::Whitespace, run))
    }
}

pub struct SymbolExtractor;

impl TokenExtractor for SymbolExtractor {
    fn name(&self) -> &'static str {
        "symbol"
    }

    fn matches(&self, lookahead: char) -> bool {
        SYMBOLS.contains(&lookahead)
    }

    fn extract(
        &self,
        first: char,
        _chars: &mut LookAheadStream<char>,
        _line: usize,
    ) -> Result<Token, LexError> {
        Ok(Token::symbol(first))
    }
}

pub struct IntegerConstantExtractor;

impl TokenExtractor for IntegerConstantExtractor {
    fn name(&self) -> &'static str {
        "integer constant"
    }

    fn matches(&self, lookahead: char) -> bool {
        lookahead.is_ascii_digit()
    }

    fn extract(
        &self,
        first: char,
        chars: &mut LookAheadStream<char>,
        line: usize,
    ) -> Result<Token, LexError> {
        let digits = take_while(first.to_string(), chars, |c| c.is_ascii_digit());

        let mut value: u32 = 0;
        for digit in digits.chars().filter_map(|c| c.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| LexError::IntegerOverflow {
                    digits: digits.clone(),
                    line,
                })?;
        }

        Ok(Token::integer(value))
    }
}

pub struct StringConstantExtractor;

impl TokenExtractor for StringConstantExtractor {
    fn name(&self) -> &'static str {
        "string constant"
    }

    fn matches(&self, lookahead: char) -> bool {
        lookahead == '"'
    }

    fn extract(
        &self,
        _quote: char,
        chars: &mut LookAheadStream<char>,
        line: usize,
    ) -> Result<Token, LexError> {
        let text = take_while(String::new(), chars, |c| c != '"');
        if chars.extract() != Some('"') {
            return Err(LexError::UnterminatedString { line });
        }
        Ok(Token::string(&text))
    }
}

pub struct IdentifierOrKeywordExtractor;

impl IdentifierOrKeywordExtractor {
    fn is_leading(c: char) -> bool {
        c.is_alphabetic() || c == '_'
    }

    fn is_continuing(c: char) -> bool {
        Self::is_leading(c) || c.is_ascii_digit()
    }
}

impl TokenExtractor for IdentifierOrKeywordExtractor {
    fn name(&self) -> &'static str {
        "identifier or keyword"
    }

    fn matches(&self, lookahead: char) -> bool {
        Self::is_leading(lookahead)
    }

    fn extract(
        &self,
        first: char,
        chars: &mut LookAheadStream<char>,
        _line: usize,
    ) -> Result<Token, LexError> {
        let text = take_while(first.to_string(), chars, Self::is_continuing);
        let kind = if is_keyword(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Ok(Token::new(kind, text))
    }
}
