//! Parse events and their consumers
//!
//! The parser never builds a syntax tree. It streams events to an
//! [`ElementVisitor`]: a `begin`/`end` pair per grammar production and one
//! `terminal` per matched token. Events nest strictly.
//!
//! Two in-memory visitors are provided:
//! - [`EventRecorder`] keeps the flat event list
//! - [`TreeBuilder`] folds the events into a [`ParseTree`]

use std::fmt;

use crate::errors::ParseError;
use crate::tokenizer::Token;

/// Grammar productions that are reported as begin/end pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
    // helper productions
    ClassName,
    VarName,
    Type,
    TypedVarName,
    SubroutineCall,
    ArrayExpression,
}

impl NonTerminal {
    /// Element name of the production (`classVarDec`, `letStatement`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            NonTerminal::Class => "class",
            NonTerminal::ClassVarDec => "classVarDec",
            NonTerminal::SubroutineDec => "subroutineDec",
            NonTerminal::ParameterList => "parameterList",
            NonTerminal::SubroutineBody => "subroutineBody",
            NonTerminal::VarDec => "varDec",
            NonTerminal::Statements => "statements",
            NonTerminal::LetStatement => "letStatement",
            NonTerminal::IfStatement => "ifStatement",
            NonTerminal::WhileStatement => "whileStatement",
            NonTerminal::DoStatement => "doStatement",
            NonTerminal::ReturnStatement => "returnStatement",
            NonTerminal::Expression => "expression",
            NonTerminal::Term => "term",
            NonTerminal::ExpressionList => "expressionList",
            NonTerminal::ClassName => "className",
            NonTerminal::VarName => "varName",
            NonTerminal::Type => "type",
            NonTerminal::TypedVarName => "typedVarName",
            NonTerminal::SubroutineCall => "subroutineCall",
            NonTerminal::ArrayExpression => "arrayExpression",
        }
    }

    /// Whether this is one of the auxiliary productions (`className`,
    /// `varName`, ...) rather than a node of the language grammar proper.
    pub fn is_helper(self) -> bool {
        matches!(
            self,
            NonTerminal::ClassName
                | NonTerminal::VarName
                | NonTerminal::Type
                | NonTerminal::TypedVarName
                | NonTerminal::SubroutineCall
                | NonTerminal::ArrayExpression
        )
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of parse events.
pub trait ElementVisitor {
    fn begin_non_terminal(&mut self, non_terminal: NonTerminal);

    /// Closes the innermost open production, which is always `non_terminal`.
    fn end_non_terminal(&mut self, non_terminal: NonTerminal);

    fn terminal(&mut self, token: &Token);
}

impl<V: ElementVisitor + ?Sized> ElementVisitor for &mut V {
    fn begin_non_terminal(&mut self, non_terminal: NonTerminal) {
        (**self).begin_non_terminal(non_terminal)
    }

    fn end_non_terminal(&mut self, non_terminal: NonTerminal) {
        (**self).end_non_terminal(non_terminal)
    }

    fn terminal(&mut self, token: &Token) {
        (**self).terminal(token)
    }
}

/// One parse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin(NonTerminal),
    End(NonTerminal),
    Terminal(Token),
}

/// Visitor that records every event in order.
#[derive(Debug, Default)]
pub struct EventRecorder {
    pub events: Vec<Event>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the productions in the order they began.
    pub fn non_terminals(&self) -> Vec<NonTerminal> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Begin(nt) => Some(*nt),
                _ => None,
            })
            .collect()
    }

    /// Matched tokens in order.
    pub fn terminals(&self) -> Vec<&Token> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Terminal(token) => Some(token),
                _ => None,
            })
            .collect()
    }

    /// Whether every `Begin` is closed by a matching `End`, innermost first.
    pub fn is_well_nested(&self) -> bool {
        let mut open = Vec::new();
        for event in &self.events {
            match event {
                Event::Begin(nt) => open.push(*nt),
                Event::End(nt) => {
                    if open.pop() != Some(*nt) {
                        return false;
                    }
                }
                Event::Terminal(_) => {}
            }
        }
        open.is_empty()
    }
}

impl ElementVisitor for EventRecorder {
    fn begin_non_terminal(&mut self, non_terminal: NonTerminal) {
        self.events.push(Event::Begin(non_terminal));
    }

    fn end_non_terminal(&mut self, non_terminal: NonTerminal) {
        self.events.push(Event::End(non_terminal));
    }

    fn terminal(&mut self, token: &Token) {
        self.events.push(Event::Terminal(token.clone()));
    }
}

/// A materialized production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NonTerminal,
    pub children: Vec<Element>,
}

impl Node {
    fn new(kind: NonTerminal) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Direct children that are productions.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|c| match c {
            Element::Node(node) => Some(node),
            Element::Terminal(_) => None,
        })
    }

    /// First descendant (depth first, pre-order) of the given kind.
    pub fn find(&self, kind: NonTerminal) -> Option<&Node> {
        self.nodes()
            .find_map(|n| if n.kind == kind { Some(n) } else { n.find(kind) })
    }

    /// Every token below this node, in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for child in &self.children {
            match child {
                Element::Node(node) => node.collect_tokens(out),
                Element::Terminal(token) => out.push(token),
            }
        }
    }
}

/// A child of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Node(Node),
    Terminal(Token),
}

/// Root of a materialized parse; one per unit.
pub type ParseTree = Node;

/// Visitor that assembles the event stream into a [`ParseTree`].
///
/// The first nesting violation is kept and reported by [`TreeBuilder::finish`];
/// events after it are ignored.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    open: Vec<Node>,
    root: Option<Node>,
    error: Option<ParseError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the finished tree.
    ///
    /// Fails on the first nesting violation seen, on a production left open,
    /// or if no production was ever reported.
    pub fn finish(self) -> Result<ParseTree, ParseError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if let Some(node) = self.open.last() {
            return Err(ParseError::Unclosed { open: node.kind });
        }
        self.root.ok_or_else(|| ParseError::UnexpectedEnd {
            expected: "a production".to_string(),
        })
    }

    fn fail(&mut self, err: ParseError) {
        self.error.get_or_insert(err);
    }
}

impl ElementVisitor for TreeBuilder {
    fn begin_non_terminal(&mut self, non_terminal: NonTerminal) {
        if self.error.is_none() {
            self.open.push(Node::new(non_terminal));
        }
    }

    fn end_non_terminal(&mut self, non_terminal: NonTerminal) {
        if self.error.is_some() {
            return;
        }
        match self.open.pop() {
            Some(node) if node.kind == non_terminal => match self.open.last_mut() {
                Some(parent) => parent.children.push(Element::Node(node)),
                None if self.root.is_none() => self.root = Some(node),
                // a second root
                None => self.fail(ParseError::MismatchedNesting {
                    closing: non_terminal,
                    open: None,
                }),
            },
            node => self.fail(ParseError::MismatchedNesting {
                closing: non_terminal,
                open: node.map(|n| n.kind),
            }),
        }
    }

    fn terminal(&mut self, token: &Token) {
        if self.error.is_some() {
            return;
        }
        match self.open.last_mut() {
            Some(parent) => parent.children.push(Element::Terminal(token.clone())),
            None => self.fail(ParseError::StrayTerminal {
                token: token.clone(),
            }),
        }
    }
}
