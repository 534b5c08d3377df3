//! Player input for the current round and its incremental comparison.

use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Result of comparing one submission against the reference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Comparison {
    /// Correct so far, more symbols expected.
    #[display("continuing")]
    Continuing,
    /// The latest submission differs from the reference at the same index.
    #[display("mismatch")]
    Mismatch,
    /// The whole reference sequence was reproduced; the buffer is now empty.
    #[display("round complete")]
    RoundComplete,
}

/// Accumulates the player's submissions for the current round.
///
/// Mismatches are caught on the submission that causes them, so a wrong
/// second symbol is reported without waiting for a third.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputBuffer {
    entries: Vec<Symbol>,
}

impl InputBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `symbol` and compares it against `reference` at the same index.
    #[instrument(skip(self, symbol, reference), fields(symbol = %symbol, position = self.entries.len()))]
    pub fn submit(&mut self, symbol: Symbol, reference: &[Symbol]) -> Comparison {
        self.entries.push(symbol);
        let index = self.entries.len() - 1;

        let outcome = if reference.get(index) != self.entries.get(index) {
            Comparison::Mismatch
        } else if self.entries.len() == reference.len() {
            self.entries.clear();
            Comparison::RoundComplete
        } else {
            Comparison::Continuing
        };

        trace!(%outcome, "Submission compared");
        outcome
    }

    /// Symbols submitted so far this round.
    pub fn entries(&self) -> &[Symbol] {
        &self.entries
    }

    /// Number of symbols submitted so far this round.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was submitted this round.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discards all submissions.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::simon::Color;

    fn reference(colors: &[Color]) -> Vec<Symbol> {
        colors.iter().copied().map(Symbol::from).collect()
    }

    #[test]
    fn test_continuing_then_complete() {
        let reference = reference(&[Color::Green, Color::Red]);
        let mut buffer = InputBuffer::new();

        assert_eq!(buffer.submit(Color::Green.into(), &reference), Comparison::Continuing);
        assert_eq!(buffer.entries(), &reference[..1]);
        assert_eq!(buffer.submit(Color::Red.into(), &reference), Comparison::RoundComplete);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_mismatch_detected_immediately() {
        let reference = reference(&[Color::Green, Color::Red, Color::Blue]);
        let mut buffer = InputBuffer::new();

        assert_eq!(buffer.submit(Color::Green.into(), &reference), Comparison::Continuing);
        assert_eq!(buffer.submit(Color::Yellow.into(), &reference), Comparison::Mismatch);
    }

    #[test]
    fn test_unknown_symbol_is_mismatch() {
        let reference = reference(&[Color::Green]);
        let mut buffer = InputBuffer::new();

        assert_eq!(buffer.submit(Symbol::new("purple"), &reference), Comparison::Mismatch);
    }

    #[test]
    fn test_submission_past_reference_is_mismatch() {
        let mut buffer = InputBuffer::new();
        assert_eq!(buffer.submit(Color::Green.into(), &[]), Comparison::Mismatch);
    }
}
