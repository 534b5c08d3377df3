//! Sequence length invariant: the reference grows exactly one symbol per level.

use super::super::GameSnapshot;
use super::Invariant;

/// Invariant: `len(reference) == level`, and level 0 only while idle or
/// after a game over.
pub struct SequenceLengthInvariant;

impl Invariant<GameSnapshot> for SequenceLengthInvariant {
    fn holds(state: &GameSnapshot) -> bool {
        state.reference.len() == state.level as usize
            && (state.level == 0) == state.phase.accepts_start()
    }

    fn description() -> &'static str {
        "Reference sequence length must equal the level, which is 0 exactly when no run is active"
    }
}
