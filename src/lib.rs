//! # Introduction
//!
//! jackfront is the front end of a compiler for Jack, a small class-based
//! language. It reads the source of every class in a program, turns it into
//! tokens and reports each class's syntactic structure as a stream of
//! begin/end/terminal events.
//!
//! ## Pipeline
//!
//! ```text
//! Source lines → Preprocessor → Tokenizer → Context pre-scan → Parser → Visitor
//! ```
//!
//! 1. [`tokenizer`] strips comments and splits each line into [`tokenizer::Token`]s,
//!    choosing exactly one extractor per lexical category from the lookahead
//!    character.
//! 2. [`context`] collects the class name declared by every unit of the batch.
//! 3. [`parser`] walks one unit's tokens by recursive descent and emits
//!    events to a [`parser::ElementVisitor`].
//! 4. [`pipeline`] ties the phases together for a batch of named units.
//!
//! [`stream::LookAheadStream`] is the single-item lookahead with pushback
//! used by both the tokenizer (over characters) and the parser (over tokens).
//!
//! ## Example
//!
//! ```
//! use jackfront::parser::{NonTerminal, TreeBuilder};
//! use jackfront::pipeline::Batch;
//!
//! let batch = Batch::new([("Main", "class Main { field int x; }")]).unwrap();
//! let tree = batch.parse_unit(0, TreeBuilder::new()).unwrap().finish().unwrap();
//! assert_eq!(tree.kind, NonTerminal::Class);
//! assert!(tree.find(NonTerminal::ClassVarDec).is_some());
//! ```

pub mod context;
pub mod errors;
pub mod parser;
pub mod pipeline;
pub mod stream;
pub mod tokenizer;

pub use context::Context;
pub use errors::{CompileError, LexError, ParseError};
pub use pipeline::Batch;
