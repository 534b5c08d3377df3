//! Scripted play against a virtual clock.
//!
//! Drives a controller with a player that always repeats the sequence
//! correctly, optionally failing on a chosen level, and returns every call
//! the game made on its collaborators.

use crate::config::{ConfigError, GameConfig};
use crate::games::simon::{RoundController, Symbol, UiEvent, UiRecorder, VirtualClock};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{info, instrument};

/// How the scripted player behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoPlan {
    /// Rounds to complete; extended up to `mistake_at` when that is later.
    pub rounds: u32,
    /// Level on which the first symbol is answered wrongly.
    pub mistake_at: Option<u32>,
}

/// Outcome of a scripted run.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct DemoReport {
    /// Highest level reached.
    highest_level: u32,
    /// Levels completed when the run ended in a mistake.
    completed_levels: Option<u32>,
    /// Every collaborator call, in order.
    transcript: Vec<UiEvent>,
}

/// Plays one scripted run.
#[instrument(skip(config))]
pub fn play_scripted(config: &GameConfig, plan: DemoPlan) -> Result<DemoReport, ConfigError> {
    let symbols = config.symbol_set()?;
    let timing = config.timing();
    let mut game = RoundController::new(
        symbols,
        config.generator(),
        VirtualClock::new(),
        UiRecorder::new(),
        timing,
    );

    game.request_start();
    let mut highest_level = game.level();

    while game.level() > 0 {
        let level = game.level();
        highest_level = highest_level.max(level);

        if plan.mistake_at == Some(level) {
            let wrong = wrong_answer(&game);
            game.submit_player_symbol(wrong);
            game.advance_clock(timing.restart_delay);
            break;
        }

        for symbol in game.reference().to_vec() {
            game.submit_player_symbol(symbol);
        }

        let mistake_ahead = plan.mistake_at.is_some_and(|m| m > level);
        if level >= plan.rounds && !mistake_ahead {
            break;
        }
        game.advance_clock(timing.settle_delay);
    }

    info!(highest_level, completed = ?game.completed_levels(), "Scripted run finished");
    Ok(DemoReport {
        highest_level,
        completed_levels: game.completed_levels(),
        transcript: game.ui_mut().take(),
    })
}

/// A member of the set that differs from the expected first symbol.
fn wrong_answer<T, U, R>(game: &RoundController<T, U, R>) -> Symbol {
    let expected = game.reference().first();
    game.symbols()
        .iter()
        .find(|s| Some(*s) != expected)
        .cloned()
        .unwrap_or_else(|| Symbol::new("?"))
}
