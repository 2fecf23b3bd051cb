//! Statement parsing implementation
//!
//! This module handles the five statement forms of the language:
//!
//! - `let x = e;` and `let a[i] = e;`
//! - `if (e) { ... }` with an optional `else { ... }`
//! - `while (e) { ... }`
//! - `do call;`
//! - `return;` and `return e;`
//!
//! # Grammar
//!
//! ```text
//! statements      ::= statement+
//! statement       ::= letStatement | ifStatement | whileStatement
//!                   | doStatement | returnStatement
//! letStatement    ::= "let" varName ("[" expression "]")? "=" expression ";"
//! ifStatement     ::= "if" "(" expression ")" block ("else" block)?
//! whileStatement  ::= "while" "(" expression ")" block
//! doStatement     ::= "do" subroutineCall ";"
//! returnStatement ::= "return" expression? ";"
//! block           ::= "{" statements? "}"
//! ```
//!
//! A statement is selected by its leading keyword through an ordered table.
//! `statements` is only reported when at least one statement follows.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::errors::ParseError;
use crate::parser::parse::Parser;
use crate::parser::visitor::{ElementVisitor, NonTerminal};
use crate::tokenizer::TokenKind;

/// Leading keyword and the production it selects.
pub(crate) struct StatementRule<P> {
    pub keyword: &'static str,
    pub parse: fn(&mut P) -> Result<(), ParseError>,
}

impl<'a, V: ElementVisitor> Parser<'a, V> {
    /// Statement dispatch table, in evaluation order.
    pub(crate) fn statement_rules() -> [StatementRule<Self>; 5] {
        [
            StatementRule {
                keyword: "let",
                parse: Self::parse_let_statement,
            },
            StatementRule {
                keyword: "if",
                parse: Self::parse_if_statement,
            },
            StatementRule {
                keyword: "while",
                parse: Self::parse_while_statement,
            },
            StatementRule {
                keyword: "do",
                parse: Self::parse_do_statement,
            },
            StatementRule {
                keyword: "return",
                parse: Self::parse_return_statement,
            },
        ]
    }

    fn has_statement(&self) -> bool {
        self.tokens.peek().is_some_and(|t| {
            t.is(TokenKind::Keyword)
                && Self::statement_rules()
                    .iter()
                    .any(|rule| t.has_text(rule.keyword))
        })
    }

    /// Parse a run of statements; emits nothing if there is none
    pub(crate) fn parse_statements(&mut self) -> Result<(), ParseError> {
        if !self.has_statement() {
            return Ok(());
        }

        self.non_terminal(NonTerminal::Statements, |p| {
            while p.has_statement() {
                p.parse_statement()?;
            }
            Ok(())
        })
    }

    /// Parse one statement chosen by its leading keyword
    pub(crate) fn parse_statement(&mut self) -> Result<(), ParseError> {
        let lookahead = self.peek("statement")?;
        let rule = Self::statement_rules()
            .into_iter()
            .find(|rule| lookahead.is(TokenKind::Keyword) && lookahead.has_text(rule.keyword));

        match rule {
            Some(rule) => (rule.parse)(self),
            None => Err(ParseError::NoStatement {
                found: lookahead.clone(),
            }),
        }
    }

    /// Parse `{ statements? }`
    fn parse_block(&mut self) -> Result<(), ParseError> {
        self.match_text("{")?;
        self.parse_statements()?;
        self.match_text("}")
    }

    /// Parse `( expression )`
    fn parse_condition(&mut self) -> Result<(), ParseError> {
        self.match_text("(")?;
        self.parse_expression()?;
        self.match_text(")")
    }

    fn parse_let_statement(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::LetStatement, |p| {
            p.match_text("let")?;
            p.parse_var_name()?;
            if p.has_text("[") {
                p.match_text("[")?;
                p.parse_expression()?;
                p.match_text("]")?;
            }
            p.match_text("=")?;
            p.parse_expression()?;
            p.match_text(";")
        })
    }

    fn parse_if_statement(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::IfStatement, |p| {
            p.match_text("if")?;
            p.parse_condition()?;
            p.parse_block()?;

            if p.has_text("else") {
                p.match_text("else")?;
                p.parse_block()?;
            }
            Ok(())
        })
    }

    fn parse_while_statement(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::WhileStatement, |p| {
            p.match_text("while")?;
            p.parse_condition()?;
            p.parse_block()
        })
    }

    fn parse_do_statement(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::DoStatement, |p| {
            p.match_text("do")?;
            p.parse_subroutine_call()?;
            p.match_text(";")
        })
    }

    fn parse_return_statement(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::ReturnStatement, |p| {
            p.match_text("return")?;
            if !p.has_text(";") {
                p.parse_expression()?;
            }
            p.match_text(";")
        })
    }
}
