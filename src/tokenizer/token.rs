//! Token type shared by the tokenizer and the parser
//!
//! A [`Token`] is nothing more than a kind and the exact lexeme. Tokens carry
//! no source location so that two tokens with the same kind and text compare
//! equal wherever they came from.

use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Symbol,
    IntegerConstant,
    StringConstant,
    Keyword,
    Identifier,
    /// Produced by the whitespace extractor and dropped by the tokenizer;
    /// never reaches the parser.
    Whitespace,
}

impl TokenKind {
    /// Element name used for this kind in markup output (`integerConstant`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Symbol => "symbol",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Symbol => "symbol",
            TokenKind::IntegerConstant => "integer constant",
            TokenKind::StringConstant => "string constant",
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Whitespace => "whitespace",
        };
        f.write_str(name)
    }
}

/// Immutable (kind, text) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn symbol(symbol: char) -> Self {
        Self::new(TokenKind::Symbol, symbol.to_string())
    }

    pub fn keyword(text: &str) -> Self {
        Self::new(TokenKind::Keyword, text)
    }

    pub fn identifier(text: &str) -> Self {
        Self::new(TokenKind::Identifier, text)
    }

    pub fn integer(value: u32) -> Self {
        Self::new(TokenKind::IntegerConstant, value.to_string())
    }

    pub fn string(text: &str) -> Self {
        Self::new(TokenKind::StringConstant, text)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::StringConstant => write!(f, "{} \"{}\"", self.kind, self.text),
            TokenKind::Whitespace => write!(f, "whitespace"),
            _ => write!(f, "{} '{}'", self.kind, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_compare_by_value() {
        assert_eq!(Token::keyword("class"), Token::new(TokenKind::Keyword, "class"));
        assert_ne!(Token::keyword("Foo"), Token::identifier("Foo"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::integer(123).to_string(), "integer constant '123'");
        assert_eq!(Token::symbol('{').to_string(), "symbol '{'");
        assert_eq!(Token::string("hi there").to_string(), "string constant \"hi there\"");
    }

    #[test]
    fn test_tags() {
        assert_eq!(TokenKind::IntegerConstant.tag(), "integerConstant");
        assert_eq!(TokenKind::StringConstant.tag(), "stringConstant");
        assert_eq!(TokenKind::Keyword.tag(), "keyword");
    }
}
