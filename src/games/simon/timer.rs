//! Delayed, cancellable transitions.
//!
//! Every scheduled callback names the transition it will trigger
//! ([`TimerEvent`]) instead of capturing a closure, so pending timers can be
//! listed and cancelled. Two facades are provided:
//!
//! - [`VirtualClock`]: manual time for tests and scripted runs.
//! - [`TokioTimers`]: real time, each timer a tokio task that reports back
//!   through a channel so fires are serialized with player input.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Handle identifying one scheduled timer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("timer#{}", _0)]
pub struct CancelToken(u64);

/// The transition a timer triggers when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerEvent {
    /// End of the settle delay: extend and present the sequence.
    AdvanceRound,
    /// Show the restart message after a game over.
    ShowRestartMessage {
        /// Levels completed in the run that just ended.
        completed_levels: u32,
    },
}

/// A timer that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredTimer {
    /// Handle returned when the timer was scheduled.
    pub token: CancelToken,
    /// Transition to perform.
    pub event: TimerEvent,
}

/// Scheduler for delayed transitions.
pub trait TimerFacade {
    /// Schedules `event` to fire after `delay`.
    fn schedule(&mut self, event: TimerEvent, delay: Duration) -> CancelToken;

    /// Cancels a timer. Unknown, fired or already cancelled tokens are ignored.
    fn cancel(&mut self, token: CancelToken);

    /// Timers scheduled and neither fired nor cancelled, in token order.
    fn pending(&self) -> Vec<(CancelToken, TimerEvent)>;
}

// ─────────────────────────────────────────────────────────────
//  Virtual clock
// ─────────────────────────────────────────────────────────────

/// Deterministic timer facade driven by explicit time advancement.
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Duration,
    next_token: u64,
    queue: BTreeMap<(Duration, CancelToken), TimerEvent>,
}

impl VirtualClock {
    /// Creates a clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Removes the earliest timer due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<FiredTimer> {
        let (&(due, token), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }
        let event = self.queue.remove(&(due, token))?;
        self.now = self.now.max(due);
        trace!(%token, ?event, now_ms = self.now.as_millis() as u64, "Virtual timer fired");
        Some(FiredTimer { token, event })
    }

    /// Moves the clock forward to `to` without firing anything.
    pub fn settle_at(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    /// Advances by `by`, returning every timer that came due in order.
    ///
    /// Timers scheduled by the caller while handling the returned fires are
    /// not included; use [`pop_due`](Self::pop_due) to interleave.
    #[instrument(skip(self), fields(from_ms = self.now.as_millis() as u64))]
    pub fn advance(&mut self, by: Duration) -> Vec<FiredTimer> {
        let target = self.now + by;
        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(target) {
            fired.push(timer);
        }
        self.settle_at(target);
        fired
    }
}

impl TimerFacade for VirtualClock {
    fn schedule(&mut self, event: TimerEvent, delay: Duration) -> CancelToken {
        let token = CancelToken(self.next_token);
        self.next_token += 1;
        self.queue.insert((self.now + delay, token), event);
        debug!(%token, ?event, delay_ms = delay.as_millis() as u64, "Virtual timer scheduled");
        token
    }

    fn cancel(&mut self, token: CancelToken) {
        let before = self.queue.len();
        self.queue.retain(|(_, t), _| *t != token);
        if self.queue.len() != before {
            debug!(%token, "Virtual timer cancelled");
        }
    }

    fn pending(&self) -> Vec<(CancelToken, TimerEvent)> {
        let mut pending: Vec<_> = self.queue.iter().map(|(&(_, t), &e)| (t, e)).collect();
        pending.sort_by_key(|(t, _)| *t);
        pending
    }
}

// ─────────────────────────────────────────────────────────────
//  Tokio timers
// ─────────────────────────────────────────────────────────────

/// Real-time timer facade.
///
/// Each timer is a tokio task that sleeps and then sends a [`FiredTimer`]
/// on the channel. The owner of the receiver feeds fires back into the
/// controller, which cancels the token to release its bookkeeping.
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTimers {
    next_token: u64,
    timers: HashMap<CancelToken, (TimerEvent, JoinHandle<()>)>,
    fired_tx: mpsc::UnboundedSender<FiredTimer>,
}

impl TokioTimers {
    /// Creates a facade and the receiver its fires arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FiredTimer>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let timers = Self {
            next_token: 0,
            timers: HashMap::new(),
            fired_tx,
        };
        (timers, fired_rx)
    }

    /// Cancels all timers.
    pub fn cancel_all(&mut self) {
        for (token, (_, handle)) in self.timers.drain() {
            handle.abort();
            trace!(%token, "Timer cancelled (shutdown)");
        }
    }
}

impl TimerFacade for TokioTimers {
    fn schedule(&mut self, event: TimerEvent, delay: Duration) -> CancelToken {
        let token = CancelToken(self.next_token);
        self.next_token += 1;

        let fired_tx = self.fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(%token, "Timer fired, sending event");
            // Receiver gone means the game loop has shut down.
            let _ = fired_tx.send(FiredTimer { token, event });
        });

        self.timers.insert(token, (event, handle));
        debug!(%token, ?event, delay_ms = delay.as_millis() as u64, "Timer set");
        token
    }

    fn cancel(&mut self, token: CancelToken) {
        if let Some((_, handle)) = self.timers.remove(&token) {
            handle.abort();
            debug!(%token, "Timer cancelled");
        }
    }

    fn pending(&self) -> Vec<(CancelToken, TimerEvent)> {
        let mut pending: Vec<_> = self.timers.iter().map(|(&t, (e, _))| (t, *e)).collect();
        pending.sort_by_key(|(t, _)| *t);
        pending
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
