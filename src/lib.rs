//! Strictly Simon library - a type-safe "repeat the sequence" memory game
//!
//! The game core is a single-threaded state machine driven by input events
//! and timer fires. Rendering, audio and timing live behind traits so the
//! same controller runs in a terminal, in tests, or anywhere else.
//!
//! # Architecture
//!
//! - **Symbols**: fixed, ordered set of choices (`SymbolSet`)
//! - **Generator**: uniform draws from an injected random source
//! - **Input buffer**: incremental comparison against the reference sequence
//! - **Round controller**: level progression, input lock, reset semantics
//! - **Timers**: named, cancellable transitions (`VirtualClock`, `TokioTimers`)
//!
//! # Example
//!
//! ```
//! use strictly_simon::{
//!     RoundController, ScriptedSource, SequenceGenerator, SymbolSet, Timing, UiRecorder,
//!     VirtualClock,
//! };
//!
//! let mut game = RoundController::new(
//!     SymbolSet::classic(),
//!     SequenceGenerator::new(ScriptedSource::new([0, 1])),
//!     VirtualClock::new(),
//!     UiRecorder::new(),
//!     Timing::default(),
//! );
//!
//! game.request_start();
//! assert_eq!(game.level(), 1);
//!
//! let first = game.reference()[0].clone();
//! game.submit_player_symbol(first);
//! game.advance_clock(Timing::default().settle_delay);
//! assert_eq!(game.level(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod demo;
mod games;
mod terminal;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Scripted play
pub use demo::{DemoPlan, DemoReport, play_scripted};

// Crate-level exports - Terminal front end
pub use terminal::{TerminalCommand, TerminalUi, parse_line};

// Crate-level exports - Game core
pub use games::simon::{
    CancelToken, Color, Comparison, DisplayPort, Feedback, FeedbackPort, FiredTimer, FlashTiming,
    GameSnapshot, GameUi, InputBuffer, InputEvent, Phase, PresentationPort, RESTART_DELAY,
    RandomSource, RngSource, RoundController, SETTLE_DELAY, ScriptedSource, SequenceGenerator,
    Symbol, SymbolSet, SymbolSetError, TimerEvent, TimerFacade, Timing, TokioTimers, UiEvent,
    UiRecorder, UnknownSymbol, VirtualClock, restart_message,
};

// Crate-level exports - Invariants
pub use games::simon::invariants::{
    InputLockInvariant, InputPrefixInvariant, Invariant, InvariantSet, InvariantViolation,
    SequenceLengthInvariant, SimonInvariants, SingleTimerInvariant,
};
