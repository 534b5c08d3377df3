//! Core domain types for the symbols a player can choose from.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::instrument;

/// An opaque, comparable identifier naming one of the fixed choices.
///
/// Cloning is cheap: the name is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{}", _0)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Creates a symbol from its name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the symbol's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The four buttons of the classic game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Top-left button.
    Green,
    /// Top-right button.
    Red,
    /// Bottom-left button.
    Yellow,
    /// Bottom-right button.
    Blue,
}

impl From<Color> for Symbol {
    fn from(color: Color) -> Self {
        Symbol::new(color.to_string())
    }
}

/// Errors from building a symbol set.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SymbolSetError {
    /// Fewer than two symbols were supplied.
    #[display("A symbol set needs at least 2 symbols, got {}", _0)]
    TooFew(#[error(not(source))] usize),

    /// The same symbol appears more than once.
    #[display("Symbol '{}' appears more than once", _0)]
    Duplicate(#[error(not(source))] Symbol),
}

/// Text input that does not name any symbol of the set.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("'{}' is not one of the game's symbols", input)]
pub struct UnknownSymbol {
    /// The rejected input.
    pub input: String,
}

/// Fixed, ordered collection of the distinct symbols the game selects from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolSet {
    symbols: Vec<Symbol>,
}

impl SymbolSet {
    /// Smallest set the game can be played with.
    pub const MIN_LEN: usize = 2;

    /// Builds a set, rejecting fewer than two symbols and duplicates.
    #[instrument(skip(symbols))]
    pub fn new<I, S>(symbols: I) -> Result<Self, SymbolSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();

        if symbols.len() < Self::MIN_LEN {
            return Err(SymbolSetError::TooFew(symbols.len()));
        }

        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(SymbolSetError::Duplicate(symbol.clone()));
            }
        }

        Ok(Self { symbols })
    }

    /// The classic green/red/yellow/blue set.
    pub fn classic() -> Self {
        Self {
            symbols: Color::iter().map(Symbol::from).collect(),
        }
    }

    /// Number of symbols (always >= 2).
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True only for an empty set, which `new` never builds.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol at `index` in set order.
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    /// Returns the symbol at `index % len`.
    pub fn wrapping(&self, index: usize) -> &Symbol {
        &self.symbols[index % self.symbols.len()]
    }

    /// Returns true if the symbol belongs to the set.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// Iterates symbols in set order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Parses player text into a member of the set (case-insensitive).
    pub fn parse(&self, input: &str) -> Result<Symbol, UnknownSymbol> {
        let needle = input.trim();
        self.symbols
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(needle))
            .cloned()
            .ok_or_else(|| UnknownSymbol {
                input: needle.to_string(),
            })
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::classic()
    }
}
