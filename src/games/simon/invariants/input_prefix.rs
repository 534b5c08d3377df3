//! Input prefix invariant: the player's submissions so far are correct.

use super::super::GameSnapshot;
use super::Invariant;

/// Invariant: between transitions the input buffer is a prefix of the
/// reference sequence.
///
/// A mismatching submission ends the run before the next check, so a
/// wrong entry is never observable.
pub struct InputPrefixInvariant;

impl Invariant<GameSnapshot> for InputPrefixInvariant {
    fn holds(state: &GameSnapshot) -> bool {
        state.reference.starts_with(&state.input)
    }

    fn description() -> &'static str {
        "Player input must be a prefix of the reference sequence"
    }
}
