//! Pseudo-random symbol selection.
//!
//! The generator holds no state beyond its random source, so swapping the
//! source for a [`ScriptedSource`] makes sequence growth fully deterministic.

use super::symbol::{Symbol, SymbolSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{instrument, trace};

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Returns an index in `0..upper`. `upper` is never zero.
    fn index(&mut self, upper: usize) -> usize;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Indices are reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<usize>,
}

impl ScriptedSource {
    /// Creates a source that yields `script` in order, then repeats it.
    ///
    /// An empty script always yields index 0.
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn index(&mut self, upper: usize) -> usize {
        match self.script.pop_front() {
            Some(next) => {
                self.script.push_back(next);
                next % upper
            }
            None => 0,
        }
    }
}

/// Draws one symbol per call, uniformly from the symbol set.
#[derive(Debug, Clone)]
pub struct SequenceGenerator<S> {
    source: S,
}

impl<S: RandomSource> SequenceGenerator<S> {
    /// Creates a generator over the given random source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Picks the next symbol with probability 1/N each.
    #[instrument(skip_all, fields(choices = symbols.len()))]
    pub fn next(&mut self, symbols: &SymbolSet) -> Symbol {
        let index = self.source.index(symbols.len());
        let symbol = symbols.wrapping(index).clone();
        trace!(index, %symbol, "Symbol drawn");
        symbol
    }
}
