//! Single timer invariant: never more than one scheduled transition.

use super::super::{GameSnapshot, Phase, TimerEvent};
use super::Invariant;

/// Invariant: at most one timer is outstanding, and it matches the phase.
///
/// - RoundSettling: only the advance timer.
/// - GameOver: only the restart message.
/// - Otherwise: nothing.
pub struct SingleTimerInvariant;

impl Invariant<GameSnapshot> for SingleTimerInvariant {
    fn holds(state: &GameSnapshot) -> bool {
        match state.pending.as_slice() {
            [] => state.phase != Phase::RoundSettling,
            [(_, TimerEvent::AdvanceRound)] => state.phase == Phase::RoundSettling,
            [(_, TimerEvent::ShowRestartMessage { .. })] => state.phase == Phase::GameOver,
            _ => false,
        }
    }

    fn description() -> &'static str {
        "At most one timer may be pending, matching the current phase"
    }
}
