//! Batch driver
//!
//! Runs the three phases over a set of named units:
//!
//! ```text
//! sources → tokenize every unit → pre-scan class names → parse each unit
//! ```
//!
//! The [`Context`] is frozen before the first parse, so every unit sees every
//! class of the batch no matter which order the units come in. Parsing is
//! sequential; since the context is only read, units can also be handed to
//! [`Batch::parse_unit`] from several threads.
//!
//! The first error aborts the batch.

use tracing::debug;

use crate::context::{Context, ContextBuilder};
use crate::errors::CompileError;
use crate::parser::{parse_unit, ElementVisitor};
use crate::tokenizer::{tokenize, Token};

/// One tokenized compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub tokens: Vec<Token>,
}

/// Tokenized units plus the class-name context built from all of them.
#[derive(Debug, Clone)]
pub struct Batch {
    units: Vec<Unit>,
    context: Context,
}

impl Batch {
    /// Tokenizes every `(name, source)` pair and builds the context.
    pub fn new<I, N, S>(sources: I) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<str>,
    {
        let units = sources
            .into_iter()
            .map(|(name, source)| {
                let name = name.into();
                match tokenize(source.as_ref()) {
                    Ok(tokens) => {
                        debug!(unit = %name, tokens = tokens.len(), "tokenized unit");
                        Ok(Unit { name, tokens })
                    }
                    Err(source) => Err(CompileError::Lex { unit: name, source }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_units(units))
    }

    /// Builds the context over already tokenized units.
    pub fn from_units(units: Vec<Unit>) -> Self {
        let mut builder = ContextBuilder::new();
        for unit in &units {
            if builder.scan_unit(&unit.tokens).is_none() {
                debug!(unit = %unit.name, "unit declares no class");
            }
        }

        Self {
            units,
            context: builder.build(),
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Parses the unit at `index` into `visitor`.
    pub fn parse_unit<V: ElementVisitor>(
        &self,
        index: usize,
        visitor: V,
    ) -> Result<V, CompileError> {
        let unit = self.units.get(index).ok_or(CompileError::NoSuchUnit {
            index,
            len: self.units.len(),
        })?;
        let visitor = parse_unit(unit.tokens.clone(), &self.context, visitor).map_err(
            |source| CompileError::Parse {
                unit: unit.name.clone(),
                source,
            },
        )?;
        debug!(unit = %unit.name, "parsed unit");
        Ok(visitor)
    }

    /// Parses every unit in order, with a fresh visitor from `make_visitor`
    /// for each, and returns the visitors.
    pub fn parse_all<V, F>(&self, mut make_visitor: F) -> Result<Vec<V>, CompileError>
    where
        V: ElementVisitor,
        F: FnMut(&Unit) -> V,
    {
        self.units
            .iter()
            .enumerate()
            .map(|(index, unit)| self.parse_unit(index, make_visitor(unit)))
            .collect()
    }
}
