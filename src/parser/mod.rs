//! Jack source parser
//!
//! This module walks one unit's token sequence and reports its structure as
//! a stream of events:
//! - [`parse`]: the [`Parser`] struct, matching helpers and entry point
//! - [`declarations`]: class, members, subroutines
//! - [`statements`]: `let`, `if`, `while`, `do`, `return`
//! - [`expressions`]: expressions, terms, subroutine calls
//! - [`visitor`]: event types and in-memory consumers
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead, plus a single
//! pushback where a leading identifier must be resolved. No external parser
//! generator dependencies.

pub mod declarations;
pub mod expressions;
pub mod parse;
pub mod statements;
pub mod visitor;

pub use parse::{parse_unit, Parser};
pub use visitor::{
    Element, ElementVisitor, Event, EventRecorder, Node, NonTerminal, ParseTree, TreeBuilder,
};
