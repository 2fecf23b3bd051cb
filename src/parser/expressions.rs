//! Expression parsing implementation
//!
//! This module handles expressions, terms and subroutine calls.
//!
//! # Grammar
//!
//! ```text
//! expression      ::= term (op term)*
//! term            ::= integerConstant | stringConstant | keywordConstant
//!                   | "(" expression ")" | unaryOp term
//!                   | arrayExpression | subroutineCall | varName
//! arrayExpression ::= varName "[" expression "]"
//! subroutineCall  ::= ((className | varName) ".")? identifier "(" expressionList ")"
//! expressionList  ::= (expression ("," expression)*)?
//! op              ::= "+" | "-" | "*" | "/" | "&" | "|" | "<" | ">" | "="
//! unaryOp         ::= "-" | "~"
//! keywordConstant ::= "true" | "false" | "null" | "this"
//! ```
//!
//! Operators have no precedence: `term (op term)*` is reported flat, left to
//! right.
//!
//! # Term selection
//!
//! Terms are selected through an ordered table, first match wins. The order
//! is part of the contract and must not be rearranged:
//!
//! 1. integer constant
//! 2. string constant
//! 3. keyword constant
//! 4. `(`
//! 5. unary operator
//! 6. identifier
//!
//! An identifier alone cannot tell a variable, an array element and a call
//! apart. The parser extracts it, looks at the next token and pushes the
//! identifier back before choosing: `[` selects `arrayExpression`, `(` or `.`
//! selects `subroutineCall`, anything else `varName`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::errors::ParseError;
use crate::parser::parse::Parser;
use crate::parser::visitor::{ElementVisitor, NonTerminal};
use crate::tokenizer::TokenKind;

const BINARY_OPS: &[&str] = &["+", "-", "*", "/", "&", "|", "<", ">", "="];
const UNARY_OPS: &[&str] = &["-", "~"];
const KEYWORD_CONSTANTS: &[&str] = &["true", "false", "null", "this"];

/// Lookahead predicate and the term form it selects.
pub(crate) struct TermRule<P> {
    pub name: &'static str,
    pub matches: fn(&P) -> bool,
    pub parse: fn(&mut P) -> Result<(), ParseError>,
}

impl<'a, V: ElementVisitor> Parser<'a, V> {
    /// Term dispatch table, in evaluation order.
    pub(crate) fn term_rules() -> [TermRule<Self>; 6] {
        [
            TermRule {
                name: "integer constant",
                matches: |p| p.has_kind(TokenKind::IntegerConstant),
                parse: |p| p.match_kind(TokenKind::IntegerConstant),
            },
            TermRule {
                name: "string constant",
                matches: |p| p.has_kind(TokenKind::StringConstant),
                parse: |p| p.match_kind(TokenKind::StringConstant),
            },
            TermRule {
                name: "keyword constant",
                matches: |p| p.has_text_in(KEYWORD_CONSTANTS),
                parse: |p| p.match_any(KEYWORD_CONSTANTS),
            },
            TermRule {
                name: "parenthesized expression",
                matches: |p| p.has_text("("),
                parse: Self::parse_parenthesized,
            },
            TermRule {
                name: "unary operation",
                matches: |p| p.has_text_in(UNARY_OPS),
                parse: Self::parse_unary,
            },
            TermRule {
                name: "identifier",
                matches: |p| p.has_kind(TokenKind::Identifier),
                parse: Self::parse_identifier_term,
            },
        ]
    }

    /// Parse expression: `term (op term)*`
    pub(crate) fn parse_expression(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::Expression, |p| {
            p.parse_term()?;
            while p.has_text_in(BINARY_OPS) {
                p.match_any(BINARY_OPS)?;
                p.parse_term()?;
            }
            Ok(())
        })
    }

    /// Parse a term using the first rule whose predicate accepts the lookahead
    pub(crate) fn parse_term(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::Term, |p| {
            let found = p.peek("term")?.clone();
            match Self::term_rules().into_iter().find(|rule| (rule.matches)(p)) {
                Some(rule) => {
                    tracing::trace!(rule = rule.name, "selected term");
                    (rule.parse)(p)
                }
                None => Err(ParseError::NoTerm { found }),
            }
        })
    }

    fn parse_parenthesized(&mut self) -> Result<(), ParseError> {
        self.match_text("(")?;
        self.parse_expression()?;
        self.match_text(")")
    }

    fn parse_unary(&mut self) -> Result<(), ParseError> {
        self.match_any(UNARY_OPS)?;
        self.parse_term()
    }

    /// Resolve a leading identifier by the token that follows it
    fn parse_identifier_term(&mut self) -> Result<(), ParseError> {
        let identifier = self.extract("identifier")?;
        let indexes = self.has_text("[");
        let calls = self.has_text_in(&["(", "."]);
        self.tokens.pushback(identifier);

        if indexes {
            self.parse_array_expression()
        } else if calls {
            self.parse_subroutine_call()
        } else {
            self.parse_var_name()
        }
    }

    /// Parse `varName [ expression ]`
    fn parse_array_expression(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::ArrayExpression, |p| {
            p.parse_var_name()?;
            p.match_text("[")?;
            p.parse_expression()?;
            p.match_text("]")
        })
    }

    /// Parse a call, qualified by a class or by an object
    ///
    /// `A.f()` and `a.f()` look the same. The qualifier is reported as
    /// `className` when the batch declares a class of that name and as
    /// `varName` otherwise.
    pub(crate) fn parse_subroutine_call(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::SubroutineCall, |p| {
            let leading = p.extract("subroutine call")?;
            let qualified = p.has_text(".");
            p.tokens.pushback(leading);

            if qualified {
                let qualifier = p.peek("class or variable name")?;
                let names_class = p.context.is_class_name_token(qualifier);
                if names_class {
                    p.parse_class_name()?;
                } else {
                    p.parse_var_name()?;
                }
                p.match_text(".")?;
            }

            p.parse_identifier()?;
            p.match_text("(")?;
            p.parse_expression_list()?;
            p.match_text(")")
        })
    }

    /// Parse comma separated arguments; always reported, even when empty
    fn parse_expression_list(&mut self) -> Result<(), ParseError> {
        self.non_terminal(NonTerminal::ExpressionList, |p| {
            if p.has_text(")") {
                return Ok(());
            }
            p.parse_expression()?;
            while p.has_text(",") {
                p.match_text(",")?;
                p.parse_expression()?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::errors::ParseError;
    use crate::parser::parse::parse_unit;
    use crate::parser::visitor::{Element, EventRecorder, Node, NonTerminal, TreeBuilder};
    use crate::tokenizer::{tokenize, Token};

    fn returning(expr: &str) -> String {
        format!("class Main {{ function int main() {{ return {}; }} }}", expr)
    }

    /// Parses `return <expr>;` and returns the expression node.
    fn parse_expr_with(expr: &str, context: &Context) -> Node {
        let tokens = tokenize(&returning(expr)).unwrap();
        let tree = parse_unit(tokens, context, TreeBuilder::new())
            .unwrap()
            .finish()
            .unwrap();
        tree.find(NonTerminal::ReturnStatement)
            .and_then(|r| r.find(NonTerminal::Expression))
            .cloned()
            .unwrap()
    }

    fn parse_expr(expr: &str) -> Node {
        parse_expr_with(expr, &Context::default())
    }

    /// The production directly under the expression's first term.
    fn first_term_shape(expr: &Node) -> Vec<NonTerminal> {
        let term = expr.nodes().next().unwrap();
        assert_eq!(term.kind, NonTerminal::Term);
        term.nodes().map(|n| n.kind).collect()
    }

    #[test]
    fn test_constants() {
        for expr in ["42", "\"hi\"", "true", "false", "null", "this"] {
            let node = parse_expr(expr);
            assert!(first_term_shape(&node).is_empty(), "{}", expr);
            assert_eq!(node.tokens().len(), 1);
        }
    }

    #[test]
    fn test_flat_binary_chain() {
        let node = parse_expr("1 + 2 * 3");
        assert_eq!(node.nodes().count(), 3);
        assert_eq!(
            node.tokens(),
            vec![
                &Token::integer(1),
                &Token::symbol('+'),
                &Token::integer(2),
                &Token::symbol('*'),
                &Token::integer(3),
            ]
        );
    }

    #[test]
    fn test_unary_nests_term() {
        let node = parse_expr("-~x");
        let outer = node.nodes().next().unwrap();
        let middle = outer.nodes().next().unwrap();
        assert_eq!(middle.kind, NonTerminal::Term);
        let inner = middle.nodes().next().unwrap();
        assert_eq!(inner.kind, NonTerminal::Term);
        assert_eq!(
            inner.nodes().map(|n| n.kind).collect::<Vec<_>>(),
            vec![NonTerminal::VarName]
        );
    }

    #[test]
    fn test_parenthesized() {
        let node = parse_expr("(a)");
        assert_eq!(first_term_shape(&node), vec![NonTerminal::Expression]);
    }

    #[test]
    fn test_identifier_resolution() {
        assert_eq!(first_term_shape(&parse_expr("x")), vec![NonTerminal::VarName]);
        assert_eq!(
            first_term_shape(&parse_expr("a[1]")),
            vec![NonTerminal::ArrayExpression]
        );
        assert_eq!(
            first_term_shape(&parse_expr("f()")),
            vec![NonTerminal::SubroutineCall]
        );
        assert_eq!(
            first_term_shape(&parse_expr("p.x()")),
            vec![NonTerminal::SubroutineCall]
        );
    }

    #[test]
    fn test_call_qualifier_uses_context() {
        let context = Context::from_units([tokenize("class Math { }").unwrap().as_slice()]);

        let by_class = parse_expr_with("Math.abs(x)", &context);
        let call = by_class.find(NonTerminal::SubroutineCall).unwrap();
        assert_eq!(call.nodes().next().unwrap().kind, NonTerminal::ClassName);

        let by_object = parse_expr_with("math.abs(x)", &context);
        let call = by_object.find(NonTerminal::SubroutineCall).unwrap();
        assert_eq!(call.nodes().next().unwrap().kind, NonTerminal::VarName);
    }

    #[test]
    fn test_expression_list() {
        let node = parse_expr("f(1, g(), a[2])");
        let list = node.find(NonTerminal::ExpressionList).unwrap();
        assert_eq!(list.nodes().count(), 3);
        assert!(list.nodes().all(|n| n.kind == NonTerminal::Expression));

        let empty = parse_expr("f()");
        let list = empty.find(NonTerminal::ExpressionList).unwrap();
        assert!(list.children.is_empty());
    }

    #[test]
    fn test_unqualified_call_has_no_qualifier() {
        let node = parse_expr("run(1)");
        let call = node.find(NonTerminal::SubroutineCall).unwrap();
        assert!(matches!(
            call.children.first(),
            Some(Element::Terminal(token)) if *token == Token::identifier("run")
        ));
    }

    #[test]
    fn test_no_term() {
        let tokens = tokenize(&returning("*")).unwrap();
        let err = parse_unit(tokens, &Context::default(), EventRecorder::new()).unwrap_err();
        assert_eq!(
            err,
            ParseError::NoTerm {
                found: Token::symbol('*')
            }
        );
    }

    #[test]
    fn test_keyword_is_not_a_term() {
        let tokens = tokenize(&returning("while")).unwrap();
        let err = parse_unit(tokens, &Context::default(), EventRecorder::new()).unwrap_err();
        assert_eq!(
            err,
            ParseError::NoTerm {
                found: Token::keyword("while")
            }
        );
    }

    #[test]
    fn test_unclosed_index() {
        let tokens = tokenize(&returning("a[1")).unwrap();
        let err = parse_unit(tokens, &Context::default(), EventRecorder::new()).unwrap_err();
        assert_eq!(err, ParseError::unexpected("']'", &Token::symbol(';')));
    }
}
