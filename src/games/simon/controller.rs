//! The round controller: the game's state machine.
//!
//! ```text
//! Idle ──start──▶ Presenting ──▶ AwaitingInput ──mismatch──▶ GameOver ──restart msg──▶ Idle
//!                     ▲                │                        │
//!                     │          round complete                 └──start──▶ Presenting
//!                     │                ▼
//!                     └──settle── RoundSettling
//! ```
//!
//! All waiting is modelled as a phase plus a timer scheduled through the
//! [`TimerFacade`]. Each transition sets the input lock together with the
//! phase, so a submission never observes a stale lock.

use super::buffer::{Comparison, InputBuffer};
use super::generator::{RandomSource, RngSource, SequenceGenerator};
use super::invariants::{InvariantSet, SimonInvariants};
use super::ports::{GameUi, InputEvent};
use super::symbol::{Symbol, SymbolSet};
use super::timer::{CancelToken, FiredTimer, TimerEvent, TimerFacade, VirtualClock};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Pause after a fully correct round before the next symbol is added.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Pause after a game over before the restart message appears.
pub const RESTART_DELAY: Duration = Duration::from_millis(1500);

/// Phase of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Not started; level 0, sequences empty.
    Idle,
    /// Extending the sequence and presenting the new symbol.
    Presenting,
    /// Accepting player submissions.
    AwaitingInput,
    /// Correct round finished; input locked until the settle timer fires.
    RoundSettling,
    /// Run ended; counters already reset, restart message pending.
    GameOver,
}

impl Phase {
    /// Phases in which a new run may be started.
    pub fn accepts_start(self) -> bool {
        matches!(self, Phase::Idle | Phase::GameOver)
    }
}

/// Fixed delays of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Delay between a correct round and the next presentation.
    pub settle_delay: Duration,
    /// Delay between a game over and the restart message.
    pub restart_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_delay: SETTLE_DELAY,
            restart_delay: RESTART_DELAY,
        }
    }
}

/// Serializable view of the controller's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Current level (0 when not running).
    pub level: u32,
    /// Reference sequence.
    pub reference: Vec<Symbol>,
    /// Player submissions this round.
    pub input: Vec<Symbol>,
    /// Whether submissions are being ignored.
    pub input_locked: bool,
    /// Outstanding timers.
    pub pending: Vec<(CancelToken, TimerEvent)>,
    /// Levels completed in the last finished run.
    pub completed_levels: Option<u32>,
}

/// Owns one game's state and drives it from input events and timer fires.
///
/// Independent instances share nothing.
#[derive(Debug)]
pub struct RoundController<T, U, R = RngSource<StdRng>> {
    symbols: SymbolSet,
    generator: SequenceGenerator<R>,
    timers: T,
    ui: U,
    timing: Timing,
    phase: Phase,
    level: u32,
    reference: Vec<Symbol>,
    input: InputBuffer,
    input_locked: bool,
    pending_advance: Option<CancelToken>,
    pending_restart: Option<CancelToken>,
    completed_levels: Option<u32>,
}

impl<T, U, R> RoundController<T, U, R>
where
    T: TimerFacade,
    U: GameUi,
    R: RandomSource,
{
    /// Creates a controller in the Idle phase.
    #[instrument(skip_all, fields(symbols = symbols.len()))]
    pub fn new(
        symbols: SymbolSet,
        generator: SequenceGenerator<R>,
        timers: T,
        ui: U,
        timing: Timing,
    ) -> Self {
        Self {
            symbols,
            generator,
            timers,
            ui,
            timing,
            phase: Phase::Idle,
            level: 0,
            reference: Vec::new(),
            input: InputBuffer::new(),
            input_locked: false,
            pending_advance: None,
            pending_restart: None,
            completed_levels: None,
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Events
    // ─────────────────────────────────────────────────────────

    /// Dispatches an input-source event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Start => self.request_start(),
            InputEvent::SymbolChosen(symbol) => self.submit_player_symbol(symbol),
        }
    }

    /// Starts a new run if none is in progress.
    ///
    /// Cancels a pending restart message so it cannot appear mid-run.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn request_start(&mut self) {
        if !self.phase.accepts_start() {
            debug!("Start ignored, run in progress");
            return;
        }

        self.cancel_pending_restart();
        info!("Starting new run");
        self.phase = Phase::Presenting;
        self.input_locked = true;
        self.advance_round();
    }

    /// Handles one symbol chosen by the player.
    ///
    /// Ignored while idle or while input is locked.
    #[instrument(skip(self, symbol), fields(symbol = %symbol, level = self.level))]
    pub fn submit_player_symbol(&mut self, symbol: Symbol) {
        if self.level == 0 || self.input_locked || self.phase != Phase::AwaitingInput {
            debug!(locked = self.input_locked, phase = %self.phase, "Submission ignored");
            return;
        }

        self.ui.echo(&symbol);

        match self.input.submit(symbol, &self.reference) {
            Comparison::Continuing => {}
            Comparison::Mismatch => self.handle_game_over(),
            Comparison::RoundComplete => {
                info!(level = self.level, "Round complete");
                self.input_locked = true;
                self.phase = Phase::RoundSettling;
                self.ui.on_success();
                let token = self
                    .timers
                    .schedule(TimerEvent::AdvanceRound, self.timing.settle_delay);
                self.pending_advance = Some(token);
            }
        }

        self.check_invariants();
    }

    /// Ends the current run: failure feedback, reset, delayed restart message.
    ///
    /// Does nothing when already reset, so a repeated call is harmless.
    #[instrument(skip(self), fields(level = self.level))]
    pub fn handle_game_over(&mut self) {
        if self.level == 0 {
            debug!("Game over ignored, already reset");
            return;
        }

        let completed_levels = self.level.saturating_sub(1);
        info!(completed_levels, "Game over");
        self.ui.on_failure();

        self.level = 0;
        self.reference.clear();
        self.input.clear();
        self.input_locked = false;
        if let Some(token) = self.pending_advance.take() {
            self.timers.cancel(token);
        }
        self.cancel_pending_restart();

        let token = self.timers.schedule(
            TimerEvent::ShowRestartMessage { completed_levels },
            self.timing.restart_delay,
        );
        self.pending_restart = Some(token);
        self.completed_levels = Some(completed_levels);
        self.phase = Phase::GameOver;

        self.check_invariants();
    }

    /// Performs the transition a timer named, if it is still current.
    ///
    /// Fires for cancelled or superseded timers are dropped.
    #[instrument(skip(self), fields(token = %fired.token, phase = %self.phase))]
    pub fn on_timer(&mut self, fired: FiredTimer) {
        // Releases facade bookkeeping; a no-op for timers already gone.
        self.timers.cancel(fired.token);

        match fired.event {
            TimerEvent::AdvanceRound => {
                if self.pending_advance != Some(fired.token) || self.phase != Phase::RoundSettling {
                    warn!("Stale advance timer ignored");
                    return;
                }
                self.pending_advance = None;
                self.phase = Phase::Presenting;
                self.advance_round();
            }
            TimerEvent::ShowRestartMessage { completed_levels } => {
                if self.pending_restart != Some(fired.token) || self.phase != Phase::GameOver {
                    warn!("Stale restart timer ignored");
                    return;
                }
                self.pending_restart = None;
                self.ui.show_restart_message(completed_levels);
                self.phase = Phase::Idle;
            }
        }

        self.check_invariants();
    }

    // ─────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────

    /// Entry action of Presenting: grow the sequence by one and present it.
    fn advance_round(&mut self) {
        debug_assert_eq!(self.phase, Phase::Presenting);

        self.cancel_pending_restart();
        self.level += 1;
        let symbol = self.generator.next(&self.symbols);
        self.reference.push(symbol.clone());
        info!(level = self.level, symbol = %symbol, "Advancing round");

        self.ui.show_level(self.level);
        self.ui.present(&symbol);

        self.input_locked = false;
        self.phase = Phase::AwaitingInput;
        self.check_invariants();
    }

    fn cancel_pending_restart(&mut self) {
        if let Some(token) = self.pending_restart.take() {
            debug!(%token, "Cancelling pending restart message");
            self.timers.cancel(token);
        }
    }

    /// Checked after every transition in debug builds.
    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(violations) = SimonInvariants::check_all(&self.snapshot()) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            panic!("Invariant violation: {}", descriptions);
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────

    /// Returns a serializable view of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            level: self.level,
            reference: self.reference.clone(),
            input: self.input.entries().to_vec(),
            input_locked: self.input_locked,
            pending: self.timers.pending(),
            completed_levels: self.completed_levels,
        }
    }
}

impl<T, U, R> RoundController<T, U, R> {
    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current level; 0 when not running.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The sequence the player must reproduce.
    pub fn reference(&self) -> &[Symbol] {
        &self.reference
    }

    /// The player's submissions this round.
    pub fn input(&self) -> &[Symbol] {
        self.input.entries()
    }

    /// Whether submissions are currently ignored.
    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    /// Handle of the scheduled restart message, if any.
    pub fn pending_restart(&self) -> Option<CancelToken> {
        self.pending_restart
    }

    /// Handle of the scheduled round advance, if any.
    pub fn pending_advance(&self) -> Option<CancelToken> {
        self.pending_advance
    }

    /// Levels completed in the last finished run.
    pub fn completed_levels(&self) -> Option<u32> {
        self.completed_levels
    }

    /// The symbols this game draws from.
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// The configured delays.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// The UI collaborator.
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Mutable access to the UI collaborator.
    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// The timer facade.
    pub fn timers(&self) -> &T {
        &self.timers
    }
}

impl<U, R> RoundController<VirtualClock, U, R>
where
    U: GameUi,
    R: RandomSource,
{
    /// Advances virtual time, delivering every timer that comes due.
    ///
    /// Timers scheduled while handling a fire are delivered too if they fall
    /// inside the window. Returns the number of fires delivered.
    pub fn advance_clock(&mut self, by: Duration) -> usize {
        let target = self.timers.now() + by;
        let mut delivered = 0;
        while let Some(fired) = self.timers.pop_due(target) {
            self.on_timer(fired);
            delivered += 1;
        }
        self.timers.settle_at(target);
        delivered
    }
}
