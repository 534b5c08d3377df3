//! Input lock invariant.

use super::super::{GameSnapshot, Phase};
use super::Invariant;

/// Invariant: input is locked exactly while presenting or settling.
pub struct InputLockInvariant;

impl Invariant<GameSnapshot> for InputLockInvariant {
    fn holds(state: &GameSnapshot) -> bool {
        let should_lock = matches!(state.phase, Phase::Presenting | Phase::RoundSettling);
        state.input_locked == should_lock
    }

    fn description() -> &'static str {
        "Input must be locked exactly while presenting or settling a round"
    }
}
