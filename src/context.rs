//! Cross-unit class-name context
//!
//! `Foo.bar()` is a function/constructor call when `Foo` is a class and a
//! method call when `Foo` is a variable. The tokens alone cannot tell the two
//! apart, so every unit of a batch is pre-scanned for its declared class name
//! before any unit is parsed.
//!
//! The two phases are separate types: [`ContextBuilder`] only accepts new
//! names, [`Context`] only answers lookups.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::tokenizer::{Token, TokenKind};

/// Collects class names during the pre-scan.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    class_names: FxHashSet<String>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the identifier that follows the unit's first `class` keyword.
    ///
    /// Returns the recorded name, or `None` if the unit declares no class.
    pub fn scan_unit<'t>(&mut self, tokens: &'t [Token]) -> Option<&'t str> {
        let name = declared_class_name(tokens)?;
        debug!(class = name, "registered class name");
        self.class_names.insert(name.to_string());
        Some(name)
    }

    pub fn build(self) -> Context {
        Context {
            class_names: self.class_names,
        }
    }
}

/// Frozen set of every class name declared in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    class_names: FxHashSet<String>,
}

impl Context {
    /// Pre-scans every unit and freezes the result.
    pub fn from_units<'a>(units: impl IntoIterator<Item = &'a [Token]>) -> Self {
        let mut builder = ContextBuilder::new();
        for tokens in units {
            builder.scan_unit(tokens);
        }
        builder.build()
    }

    pub fn is_class_name(&self, name: &str) -> bool {
        self.class_names.contains(name)
    }

    /// Whether `token` is an identifier naming a known class.
    pub fn is_class_name_token(&self, token: &Token) -> bool {
        token.is(TokenKind::Identifier) && self.is_class_name(token.text())
    }

    pub fn len(&self) -> usize {
        self.class_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty()
    }

    /// Class names in sorted order.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.class_names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn declared_class_name(tokens: &[Token]) -> Option<&str> {
    let class_at = tokens
        .iter()
        .position(|t| t.is(TokenKind::Keyword) && t.has_text("class"))?;

    tokens
        .get(class_at + 1)
        .filter(|t| t.is(TokenKind::Identifier))
        .map(Token::text)
}
