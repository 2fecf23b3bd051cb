//! Tokenizer for Jack source text
//!
//! Converts the lines of one compilation unit into the flat, whitespace-free
//! [`Token`] sequence consumed by the parser:
//! - [`preprocess`]: strips `//` and `/* */` comments line by line
//! - [`extractors`]: one extractor per lexical category, chosen by lookahead
//! - [`token`]: the (kind, text) pair handed to the parser

pub mod extractors;
pub mod preprocess;
pub mod token;

pub use preprocess::Preprocessor;
pub use token::{Token, TokenKind};

use crate::errors::LexError;
use crate::stream::LookAheadStream;
use extractors::extractor_for;

/// Tokenizes a whole source text, splitting it on line breaks.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_lines(source.lines())
}

/// Tokenizes an ordered sequence of raw lines belonging to one unit.
pub fn tokenize_lines<I, S>(lines: I) -> Result<Vec<Token>, LexError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut preprocessor = Preprocessor::new();
    let mut tokens = Vec::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let line = preprocessor.preprocess(raw.as_ref());
        tokenize_line(&line, index + 1, &mut tokens)?;
    }

    preprocessor.finish()?;
    Ok(tokens)
}

/// Appends the tokens of one comment-free line to `tokens`.
fn tokenize_line(line: &str, line_no: usize, tokens: &mut Vec<Token>) -> Result<(), LexError> {
    let mut chars = LookAheadStream::new(line.chars());

    while let Some(&lookahead) = chars.peek() {
        let extractor = extractor_for(lookahead, line_no)?;
        chars.extract();
        let token = extractor.extract(lookahead, &mut chars, line_no)?;
        if !token.is(TokenKind::Whitespace) {
            tokens.push(token);
        }
    }

    Ok(())
}
