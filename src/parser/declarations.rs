//! Declaration parsing implementation
//!
//! This module handles the class-level structure of a unit:
//!
//! - The class itself: `class Name { ... }`
//! - Class variables: `static int count;`, `field Point a, b;`
//! - Subroutines: `constructor`, `function`, `method`
//! - Parameter lists, subroutine bodies and local `var` declarations
//! - The helper productions `className`, `varName`, `type`, `typedVarName`
//!
//! # Grammar
//!
//! ```text
//! class          ::= "class" className "{" classVarDec* subroutineDec* "}"
//! classVarDec    ::= ("static" | "field") type varName ("," varName)* ";"
//! subroutineDec  ::= ("constructor" | "function" | "method") ("void" | type)
//!                    identifier "(" parameterList? ")" subroutineBody
//! parameterList  ::= typedVarName ("," typedVarName)*
//! subroutineBody ::= "{" varDec* statements? "}"
//! varDec         ::= "var" type varName ("," varName)* ";"
//! type           ::= "int" | "char" | "boolean" | identifier
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::errors::ParseError;
use crate::parser::parse::{Parser, PRIMITIVE_TYPES};
use crate::parser::visitor::{ElementVisitor, NonTerminal};
use crate::tokenizer::TokenKind;

const CLASS_VAR_KEYWORDS: &[&str] = &["static", "field"];
const SUBROUTINE_KEYWORDS: &[&str] = &["constructor", "function", "method"];

impl<V: ElementVisitor> Parser<'_, V> {
    /// Parse the unit's class declaration
    pub(crate) fn parse_class(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::Class, |p| {
            p.match_text("class")?;
            p.parse_class_name()?;
            p.match_text("{")?;

            while p.has_text_in(CLASS_VAR_KEYWORDS) {
                p.parse_class_var_dec()?;
            }
            while p.has_text_in(SUBROUTINE_KEYWORDS) {
                p.parse_subroutine_dec()?;
            }

            p.match_text("}")
        })
    }

    pub(crate) fn parse_class_name(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::ClassName, |p| p.parse_identifier())
    }

    pub(crate) fn parse_var_name(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::VarName, |p| p.parse_identifier())
    }

    /// Parse `static`/`field` declaration
    fn parse_class_var_dec(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::ClassVarDec, |p| {
            p.match_any(CLASS_VAR_KEYWORDS)?;
            p.parse_type()?;
            p.parse_var_names()?;
            p.match_text(";")
        })
    }

    /// Parse `varName ("," varName)*`
    fn parse_var_names(&mut self) -> Result<(), ParseError> {
        self.parse_var_name()?;
        while self.has_text(",") {
            self.match_text(",")?;
            self.parse_var_name()?;
        }
        Ok(())
    }

    /// Parse a primitive type or a class name used as a type
    fn parse_type(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::Type, |p| {
            let is_class_type = p.peek("type")?.is(TokenKind::Identifier);
            if is_class_type {
                p.parse_identifier()
            } else {
                p.match_any(PRIMITIVE_TYPES)
            }
        })
    }

    /// Parse constructor, function or method
    fn parse_subroutine_dec(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::SubroutineDec, |p| {
            p.match_any(SUBROUTINE_KEYWORDS)?;

            p.peek("subroutine return type")?;
            if p.has_type() {
                p.parse_type()?;
            } else {
                p.match_text("void")?;
            }

            p.parse_identifier()?;
            p.match_text("(")?;
            p.parse_parameter_list()?;
            p.match_text(")")?;
            p.parse_subroutine_body()
        })
    }

    /// Parse the parameter list; emits nothing for `()`
    fn parse_parameter_list(&mut self) -> Result<(), ParseError> {
        if !self.has_type() {
            return Ok(());
        }

        self.non_terminal(NonTerminal::ParameterList, |p| {
            p.parse_typed_var_name()?;
            while p.has_text(",") {
                p.match_text(",")?;
                p.parse_typed_var_name()?;
            }
            Ok(())
        })
    }

    fn parse_typed_var_name(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::TypedVarName, |p| {
            p.parse_type()?;
            p.parse_var_name()
        })
    }

    fn parse_subroutine_body(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::SubroutineBody, |p| {
            p.match_text("{")?;
            while p.has_text("var") {
                p.parse_var_dec()?;
            }
            p.parse_statements()?;
            p.match_text("}")
        })
    }

    /// Parse local variable declaration: `var type name, name;`
    fn parse_var_dec(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::VarDec, |p| {
            p.match_text("var")?;
            p.parse_type()?;
            p.parse_var_names()?;
            p.match_text(";")
        })
    }
}
