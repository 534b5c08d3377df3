//! Tests for the round controller state machine.

use std::time::Duration;
use strictly_simon::{
    Color, Feedback, InputEvent, Phase, RESTART_DELAY, RoundController, SETTLE_DELAY,
    ScriptedSource, SequenceGenerator, Symbol, SymbolSet, TimerEvent, TimerFacade, Timing,
    UiEvent, UiRecorder, VirtualClock,
};

type TestGame = RoundController<VirtualClock, UiRecorder, ScriptedSource>;

/// Game whose draws follow `script` as indices into green/red/yellow/blue.
fn game(script: &[usize]) -> TestGame {
    RoundController::new(
        SymbolSet::classic(),
        SequenceGenerator::new(ScriptedSource::new(script.to_vec())),
        VirtualClock::new(),
        UiRecorder::new(),
        Timing::default(),
    )
}

fn sym(color: Color) -> Symbol {
    color.into()
}

/// Plays the current reference back correctly and waits out the settle delay.
fn complete_round(game: &mut TestGame) {
    for symbol in game.reference().to_vec() {
        game.submit_player_symbol(symbol);
    }
    game.advance_clock(SETTLE_DELAY);
}

/// Game sitting in AwaitingInput with reference [green, red].
fn game_at_green_red() -> TestGame {
    let mut game = game(&[0, 1, 2, 3]);
    game.request_start();
    complete_round(&mut game);
    assert_eq!(game.reference(), &[sym(Color::Green), sym(Color::Red)]);
    game
}

#[test]
fn test_new_game_is_idle() {
    let game = game(&[0]);
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.level(), 0);
    assert!(game.reference().is_empty());
    assert!(!game.is_input_locked());
}

#[test]
fn test_start_presents_first_symbol() {
    let mut game = game(&[2]);
    game.request_start();

    assert_eq!(game.level(), 1);
    assert_eq!(game.reference(), &[sym(Color::Yellow)]);
    assert_eq!(game.phase(), Phase::AwaitingInput);
    assert!(!game.is_input_locked());
    assert_eq!(
        game.ui().events(),
        &[UiEvent::Level(1), UiEvent::Presented(sym(Color::Yellow))]
    );
}

#[test]
fn test_round_complete_locks_then_advances() {
    let mut game = game_at_green_red();

    game.submit_player_symbol(sym(Color::Green));
    assert_eq!(game.input(), &[sym(Color::Green)]);

    game.submit_player_symbol(sym(Color::Red));
    assert!(game.input().is_empty());
    assert!(game.is_input_locked());
    assert_eq!(game.phase(), Phase::RoundSettling);
    assert_eq!(game.level(), 2);

    // Not yet.
    game.advance_clock(SETTLE_DELAY - Duration::from_millis(1));
    assert_eq!(game.level(), 2);

    game.advance_clock(Duration::from_millis(1));
    assert_eq!(game.level(), 3);
    assert_eq!(game.reference().len(), 3);
    assert_eq!(game.phase(), Phase::AwaitingInput);
    assert!(!game.is_input_locked());
}

#[test]
fn test_success_feedback_on_round_complete() {
    let mut game = game(&[0]);
    game.request_start();
    game.ui_mut().take();

    game.submit_player_symbol(sym(Color::Green));

    assert_eq!(
        game.ui().events(),
        &[
            UiEvent::Echoed(sym(Color::Green)),
            UiEvent::Feedback(Feedback::Success),
        ]
    );
}

#[test]
fn test_wrong_first_symbol_is_immediate_game_over() {
    let mut game = game_at_green_red();

    game.submit_player_symbol(sym(Color::Yellow));

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.level(), 0);
    assert!(game.reference().is_empty());
    assert!(game.input().is_empty());
    assert_eq!(game.completed_levels(), Some(1));
}

#[test]
fn test_wrong_second_symbol_caught_without_third() {
    let mut game = game(&[0, 1, 3]);
    game.request_start();
    complete_round(&mut game);
    complete_round(&mut game);
    assert_eq!(game.level(), 3);

    game.submit_player_symbol(sym(Color::Green));
    game.submit_player_symbol(sym(Color::Blue));

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.completed_levels(), Some(2));
}

#[test]
fn test_failure_on_level_one_reports_zero_completed() {
    let mut game = game(&[0]);
    game.request_start();
    game.ui_mut().take();

    game.submit_player_symbol(sym(Color::Yellow));
    assert_eq!(game.completed_levels(), Some(0));

    game.advance_clock(RESTART_DELAY);
    assert_eq!(
        game.ui().events(),
        &[
            UiEvent::Echoed(sym(Color::Yellow)),
            UiEvent::Feedback(Feedback::Failure),
            UiEvent::RestartMessage(0),
        ]
    );
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn test_restart_message_waits_for_delay() {
    let mut game = game(&[0]);
    game.request_start();
    game.submit_player_symbol(sym(Color::Red));
    game.ui_mut().take();

    game.advance_clock(RESTART_DELAY - Duration::from_millis(1));
    assert!(game.ui().events().is_empty());
    assert_eq!(game.phase(), Phase::GameOver);

    game.advance_clock(Duration::from_millis(1));
    assert_eq!(game.ui().events(), &[UiEvent::RestartMessage(0)]);
}

#[test]
fn test_unknown_symbol_is_mismatch() {
    let mut game = game(&[0]);
    game.request_start();

    game.submit_player_symbol(Symbol::new("purple"));

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.level(), 0);
}

#[test]
fn test_submission_while_idle_ignored() {
    let mut game = game(&[0]);
    game.submit_player_symbol(sym(Color::Green));

    assert_eq!(game.phase(), Phase::Idle);
    assert!(game.input().is_empty());
    assert!(game.ui().events().is_empty());
}

#[test]
fn test_submission_while_settling_ignored() {
    let mut game = game(&[0, 1]);
    game.request_start();
    game.submit_player_symbol(sym(Color::Green));
    assert!(game.is_input_locked());
    let before = game.snapshot();
    game.ui_mut().take();

    game.submit_player_symbol(sym(Color::Green));
    game.submit_player_symbol(sym(Color::Blue));

    assert_eq!(game.snapshot(), before);
    assert!(game.ui().events().is_empty());
}

#[test]
fn test_start_while_awaiting_input_is_noop() {
    let mut game = game(&[0, 1]);
    game.request_start();
    let before = game.snapshot();

    game.request_start();
    game.handle_input(InputEvent::Start);

    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_start_during_game_over_cancels_restart_message() {
    let mut game = game(&[0, 1]);
    game.request_start();
    game.submit_player_symbol(sym(Color::Blue));
    assert!(game.pending_restart().is_some());

    game.request_start();
    assert!(game.pending_restart().is_none());
    assert_eq!(game.phase(), Phase::AwaitingInput);
    assert_eq!(game.level(), 1);

    game.ui_mut().take();
    game.advance_clock(RESTART_DELAY * 2);
    assert!(!game.ui().events().contains(&UiEvent::RestartMessage(0)));
    assert_eq!(game.phase(), Phase::AwaitingInput);
}

#[test]
fn test_double_game_over_is_idempotent() {
    let mut game = game(&[0, 1]);
    game.request_start();
    complete_round(&mut game);

    game.handle_game_over();
    let once = game.snapshot();
    let events = game.ui().events().len();

    game.handle_game_over();
    assert_eq!(game.snapshot(), once);
    assert_eq!(game.ui().events().len(), events);
}

#[test]
fn test_game_over_during_settle_cancels_advance() {
    let mut game = game(&[0, 1]);
    game.request_start();
    game.submit_player_symbol(sym(Color::Green));
    assert!(game.pending_advance().is_some());

    game.handle_game_over();

    assert!(game.pending_advance().is_none());
    assert_eq!(game.completed_levels(), Some(0));
    game.advance_clock(SETTLE_DELAY);
    assert_eq!(game.level(), 0);
}

#[test]
fn test_repeated_starts_keep_single_restart_timer() {
    let mut game = game(&[0]);
    for _ in 0..5 {
        game.request_start();
        game.submit_player_symbol(sym(Color::Red));
        let restarts = game
            .timers()
            .pending()
            .into_iter()
            .filter(|(_, e)| matches!(e, TimerEvent::ShowRestartMessage { .. }))
            .count();
        assert_eq!(restarts, 1);
    }
    game.request_start();
    assert!(game.timers().pending().is_empty());
}

#[test]
fn test_stale_timer_fire_is_ignored() {
    let mut game = game(&[0, 1]);
    game.request_start();
    game.submit_player_symbol(sym(Color::Red));
    let stale = game.pending_restart().expect("restart scheduled");

    game.request_start();
    let before = game.snapshot();

    game.on_timer(strictly_simon::FiredTimer {
        token: stale,
        event: TimerEvent::ShowRestartMessage { completed_levels: 0 },
    });

    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_length_and_prefix_hold_over_long_run() {
    let mut game = game(&[3, 1, 0, 2, 2, 1]);
    game.request_start();

    for level in 1..=12u32 {
        assert_eq!(game.level(), level);
        assert_eq!(game.reference().len(), level as usize);

        let reference = game.reference().to_vec();
        for (i, symbol) in reference.iter().enumerate() {
            game.submit_player_symbol(symbol.clone());
            if i + 1 < reference.len() {
                assert!(reference.starts_with(game.input()));
                assert_eq!(game.input().len(), i + 1);
            }
        }
        game.advance_clock(SETTLE_DELAY);
    }

    assert_eq!(game.ui().presented(), game.reference());
}

#[test]
fn test_two_symbol_set_supported() {
    let symbols = SymbolSet::new(["left", "right"]).unwrap();
    let mut game = RoundController::new(
        symbols,
        SequenceGenerator::new(ScriptedSource::new([1, 0])),
        VirtualClock::new(),
        UiRecorder::new(),
        Timing::default(),
    );

    game.request_start();
    game.submit_player_symbol(Symbol::new("right"));
    game.advance_clock(SETTLE_DELAY);

    assert_eq!(game.reference(), &[Symbol::new("right"), Symbol::new("left")]);
}

#[test]
fn test_independent_games_share_nothing() {
    let mut a = game(&[0]);
    let mut b = game(&[1]);
    a.request_start();

    assert_eq!(a.level(), 1);
    assert_eq!(b.level(), 0);

    b.request_start();
    a.submit_player_symbol(sym(Color::Blue));
    assert_eq!(a.phase(), Phase::GameOver);
    assert_eq!(b.phase(), Phase::AwaitingInput);
}

#[test]
fn test_custom_timing_respected() {
    let timing = Timing {
        settle_delay: Duration::from_millis(10),
        restart_delay: Duration::from_millis(20),
    };
    let mut game = RoundController::new(
        SymbolSet::classic(),
        SequenceGenerator::new(ScriptedSource::new([0])),
        VirtualClock::new(),
        UiRecorder::new(),
        timing,
    );

    game.request_start();
    game.submit_player_symbol(sym(Color::Green));
    game.advance_clock(Duration::from_millis(10));
    assert_eq!(game.level(), 2);
}
