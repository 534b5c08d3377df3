//! First-class invariants for the memory game.
//!
//! Invariants are logical properties that must hold between transitions.
//! The controller checks them in debug builds; they are also testable
//! independently against any [`GameSnapshot`](super::GameSnapshot).

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod input_lock;
pub mod input_prefix;
pub mod sequence_length;
pub mod single_timer;

pub use input_lock::InputLockInvariant;
pub use input_prefix::InputPrefixInvariant;
pub use sequence_length::SequenceLengthInvariant;
pub use single_timer::SingleTimerInvariant;

/// All game invariants as a composable set.
pub type SimonInvariants = (
    SequenceLengthInvariant,
    InputPrefixInvariant,
    InputLockInvariant,
    SingleTimerInvariant,
);
