//! Collaborator interfaces consumed by the round controller.
//!
//! Rendering, audio and styling live behind these ports. All calls are
//! fire-and-forget: the core never waits on them or reads anything back.

use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audio-visual feedback shown after a round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    /// The full sequence was reproduced.
    Success,
    /// A wrong symbol ended the run.
    Failure,
}

impl Feedback {
    /// Headline text for the feedback.
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Success => "CORRECT!",
            Feedback::Failure => "WRONG!",
        }
    }

    /// Style tag applied to the page for the flash duration.
    pub fn style(self) -> &'static str {
        match self {
            Feedback::Success => "success",
            Feedback::Failure => "game-over",
        }
    }
}

/// Formats the restart prompt shown after a game over.
pub fn restart_message(completed_levels: u32) -> String {
    format!("Press ENTER to Restart! Completed Levels: {}", completed_levels)
}

/// Plays a symbol's cue.
pub trait PresentationPort {
    /// Highlights and sounds the symbol the game just added.
    fn present(&mut self, symbol: &Symbol);

    /// Replays the cue of a symbol the player just pressed.
    fn echo(&mut self, symbol: &Symbol) {
        self.present(symbol);
    }
}

/// Success and failure cues.
pub trait FeedbackPort {
    /// A round was completed correctly.
    fn on_success(&mut self);

    /// The player made a mistake.
    fn on_failure(&mut self);
}

/// Textual status.
pub trait DisplayPort {
    /// Shows the level just started.
    fn show_level(&mut self, level: u32);

    /// Shows the restart prompt with the levels completed in the last run.
    fn show_restart_message(&mut self, completed_levels: u32);
}

/// Everything the controller needs from the outside world.
pub trait GameUi: PresentationPort + FeedbackPort + DisplayPort {}

impl<T: PresentationPort + FeedbackPort + DisplayPort> GameUi for T {}

/// Events produced by an input source (keyboard, touch, test harness).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Start trigger (confirm key or touch).
    Start,
    /// The player chose a symbol.
    SymbolChosen(Symbol),
}

/// Transient styling durations handed to visual collaborators.
///
/// Not synchronized with game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashTiming {
    /// How long a presented symbol flashes.
    pub symbol: Duration,
    /// How long success/failure styling stays on.
    pub feedback: Duration,
}

impl Default for FlashTiming {
    fn default() -> Self {
        Self {
            symbol: Duration::from_millis(100),
            feedback: Duration::from_millis(200),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Recording collaborator
// ─────────────────────────────────────────────────────────────

/// One call made on a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// `PresentationPort::present`.
    Presented(Symbol),
    /// `PresentationPort::echo`.
    Echoed(Symbol),
    /// `FeedbackPort::on_success` / `on_failure`.
    Feedback(Feedback),
    /// `DisplayPort::show_level`.
    Level(u32),
    /// `DisplayPort::show_restart_message`.
    RestartMessage(u32),
}

impl std::fmt::Display for UiEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiEvent::Presented(symbol) => write!(f, "* {}", symbol),
            UiEvent::Echoed(symbol) => write!(f, "> {}", symbol),
            UiEvent::Feedback(feedback) => write!(f, "{}", feedback.message()),
            UiEvent::Level(level) => write!(f, "Level {}", level),
            UiEvent::RestartMessage(levels) => write!(f, "{}", restart_message(*levels)),
        }
    }
}

/// Records every port call, in order.
#[derive(Debug, Clone, Default)]
pub struct UiRecorder {
    events: Vec<UiEvent>,
}

impl UiRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls.
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    /// Removes and returns all recorded calls.
    pub fn take(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Symbols passed to `present`, in order.
    pub fn presented(&self) -> Vec<Symbol> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Presented(symbol) => Some(symbol.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PresentationPort for UiRecorder {
    fn present(&mut self, symbol: &Symbol) {
        self.events.push(UiEvent::Presented(symbol.clone()));
    }

    fn echo(&mut self, symbol: &Symbol) {
        self.events.push(UiEvent::Echoed(symbol.clone()));
    }
}

impl FeedbackPort for UiRecorder {
    fn on_success(&mut self) {
        self.events.push(UiEvent::Feedback(Feedback::Success));
    }

    fn on_failure(&mut self) {
        self.events.push(UiEvent::Feedback(Feedback::Failure));
    }
}

impl DisplayPort for UiRecorder {
    fn show_level(&mut self, level: u32) {
        self.events.push(UiEvent::Level(level));
    }

    fn show_restart_message(&mut self, completed_levels: u32) {
        self.events.push(UiEvent::RestartMessage(completed_levels));
    }
}
