mod buffer;
mod controller;
mod generator;
pub mod invariants;
mod ports;
mod symbol;
mod timer;

pub use buffer::{Comparison, InputBuffer};
pub use controller::{GameSnapshot, Phase, RESTART_DELAY, RoundController, SETTLE_DELAY, Timing};
pub use generator::{RandomSource, RngSource, ScriptedSource, SequenceGenerator};
pub use ports::{
    DisplayPort, Feedback, FeedbackPort, FlashTiming, GameUi, InputEvent, PresentationPort,
    UiEvent, UiRecorder, restart_message,
};
pub use symbol::{Color, Symbol, SymbolSet, SymbolSetError, UnknownSymbol};
pub use timer::{CancelToken, FiredTimer, TimerEvent, TimerFacade, TokioTimers, VirtualClock};
