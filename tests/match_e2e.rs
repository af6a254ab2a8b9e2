//! End-to-end match tests
//!
//! Drive full matches through the public API with loaded dice and recorded
//! events, checking turn order, banking and the final round.

use similar_asserts::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use tenk::{
    core::{Die, KeepSelection, PlayerId, Roll},
    game::{
        GameEndReason, GameEvent, GameLoop, GameState, GameStateView, HeuristicController,
        PlayerController, ScriptedController, VerbosityLevel,
    },
    Result,
};

type EventLog = Rc<RefCell<Vec<GameEvent>>>;

/// Delegates decisions and records every event it is shown
struct Recording<C> {
    inner: C,
    events: EventLog,
}

impl<C: PlayerController> PlayerController for Recording<C> {
    fn player_id(&self) -> PlayerId {
        self.inner.player_id()
    }

    fn choose_keep(&mut self, view: &GameStateView, roll: &[Die]) -> Result<KeepSelection> {
        self.inner.choose_keep(view, roll)
    }

    fn choose_bank(&mut self, view: &GameStateView) -> Result<bool> {
        self.inner.choose_bank(view)
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

fn dice(values: &[u8]) -> Roll {
    Die::faces(values).unwrap()
}

fn quiet_game(players: usize) -> GameState {
    let names: Vec<String> = (1..=players).map(|n| format!("P{n}")).collect();
    let seats: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), true)).collect();
    let mut game = GameState::with_seats(&seats).unwrap();
    game.logger.enable_capture();
    game
}

/// Heuristic bots everywhere; seat 0 also records events
fn recorded_bots(game: &GameState) -> (Vec<Box<dyn PlayerController>>, EventLog) {
    let events = EventLog::default();
    let controllers = game
        .players
        .iter()
        .map(|p| -> Box<dyn PlayerController> {
            if p.id.index() == 0 {
                Box::new(Recording {
                    inner: HeuristicController::new(p.id),
                    events: events.clone(),
                })
            } else {
                Box::new(HeuristicController::new(p.id))
            }
        })
        .collect();
    (controllers, events)
}

#[test]
fn test_bank_then_farkle_lands_on_new_turn() {
    let mut game = quiet_game(2);
    game.load_rolls([
        dice(&[1, 1, 1, 2, 3, 4]),
        dice(&[2, 2, 3, 3, 4, 6]),
        dice(&[2, 2, 3, 3, 4, 6]),
    ]);
    let (mut controllers, events) = recorded_bots(&game);

    let result = GameLoop::new(&mut game)
        .with_max_turns(3)
        .run_game(&mut controllers)
        .unwrap();

    assert_eq!(result.end_reason, GameEndReason::TurnLimit);
    assert_eq!(result.final_scores, vec![1_000, 0]);

    let p1 = PlayerId::new(0);
    let p2 = PlayerId::new(1);
    let events = events.borrow();
    let expected = vec![
        GameEvent::TurnStarted {
            player: p1,
            total: 0,
        },
        GameEvent::Rolled {
            player: p1,
            roll: dice(&[1, 1, 1, 2, 3, 4]).to_vec(),
            roll_score: 1_000,
            turn_score: 0,
        },
        GameEvent::Kept {
            player: p1,
            keep: dice(&[1, 1, 1]).to_vec(),
            points: 1_000,
            turn_score: 1_000,
            dice_remaining: 3,
        },
        GameEvent::Banked {
            player: p1,
            points: 1_000,
            total: 1_000,
        },
        GameEvent::TurnStarted {
            player: p2,
            total: 0,
        },
        GameEvent::Rolled {
            player: p2,
            roll: dice(&[2, 2, 3, 3, 4, 6]).to_vec(),
            roll_score: 0,
            turn_score: 0,
        },
        GameEvent::Farkled {
            player: p2,
            roll: dice(&[2, 2, 3, 3, 4, 6]).to_vec(),
            lost: 0,
        },
        GameEvent::TurnStarted {
            player: p1,
            total: 1_000,
        },
        GameEvent::Rolled {
            player: p1,
            roll: dice(&[2, 2, 3, 3, 4, 6]).to_vec(),
            roll_score: 0,
            turn_score: 0,
        },
        GameEvent::Farkled {
            player: p1,
            roll: dice(&[2, 2, 3, 3, 4, 6]).to_vec(),
            lost: 0,
        },
        GameEvent::GameOver {
            winner: None,
            totals: vec![1_000, 0],
        },
    ];
    assert_eq!(*events, expected);
}

#[test]
fn test_final_round_everyone_else_plays_once() {
    let mut game = quiet_game(4);
    game.players[2].total_score = 9_000;
    game.current_player_idx = 2;
    // P3 crosses the line with three 1s; P4, P1 and P2 farkle their last turns
    game.load_rolls([
        dice(&[1, 1, 1, 2, 3, 4]),
        dice(&[2, 2, 3, 3, 4, 6]),
        dice(&[2, 2, 3, 4, 4, 6]),
        dice(&[3, 3, 4, 6, 6, 2]),
    ]);
    let (mut controllers, events) = recorded_bots(&game);

    let result = GameLoop::new(&mut game).run_game(&mut controllers).unwrap();
    assert_eq!(result.end_reason, GameEndReason::FinalRoundComplete);
    assert_eq!(result.turns_played, 4);
    assert_eq!(result.winner, Some(PlayerId::new(2)));
    assert_eq!(result.final_scores, vec![0, 0, 10_000, 0]);

    let events = events.borrow();
    let turn_order: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::TurnStarted { player, .. } => Some(player.index()),
            _ => None,
        })
        .collect();
    assert_eq!(turn_order, vec![2, 3, 0, 1]);

    let triggers: Vec<&GameEvent> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::FinalRoundTriggered { .. }))
        .collect();
    assert_eq!(
        triggers,
        vec![&GameEvent::FinalRoundTriggered {
            player: PlayerId::new(2),
            total: 10_000,
            pending: vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(3)],
        }]
    );
}

#[test]
fn test_overtaking_in_final_round_wins() {
    let mut game = quiet_game(2);
    game.players[0].total_score = 9_900;
    game.players[1].total_score = 9_000;
    game.load_rolls([
        // P1: a lone 1 reaches exactly 10,000
        dice(&[1, 2, 3, 4, 6, 6]),
        // P2: straight for 1500, hot dice, then a triplet of 1s for 1000 more
        dice(&[6, 5, 4, 3, 2, 1]),
        dice(&[1, 1, 1, 2, 3, 4]),
    ]);
    let mut controllers: Vec<Box<dyn PlayerController>> = vec![
        Box::new(
            ScriptedController::new(PlayerId::new(0))
                .with_keeps([dice(&[1])])
                .with_bank_decisions([true]),
        ),
        Box::new(
            ScriptedController::new(PlayerId::new(1))
                .with_keeps([dice(&[6, 5, 4, 3, 2, 1]), dice(&[1, 1, 1])])
                .with_bank_decisions([false, true]),
        ),
    ];

    let result = GameLoop::new(&mut game).run_game(&mut controllers).unwrap();
    assert_eq!(result.end_reason, GameEndReason::FinalRoundComplete);
    assert_eq!(result.final_scores, vec![10_000, 11_500]);
    assert_eq!(result.winner, Some(PlayerId::new(1)));
}

#[test]
fn test_tied_finish_goes_to_lower_seat() {
    let mut game = quiet_game(2);
    game.players[0].total_score = 9_000;
    game.players[1].total_score = 9_000;
    game.load_rolls([dice(&[1, 1, 1, 2, 3, 4]), dice(&[1, 1, 1, 2, 3, 4])]);
    let (mut controllers, _events) = recorded_bots(&game);

    let result = GameLoop::new(&mut game).run_game(&mut controllers).unwrap();
    assert_eq!(result.final_scores, vec![10_000, 10_000]);
    assert_eq!(result.winner, Some(PlayerId::new(0)));
}

#[test]
fn test_solo_match_ends_on_reaching_target() {
    let mut game = quiet_game(1);
    game.players[0].total_score = 8_500;
    game.load_rolls([dice(&[2, 3, 4, 5, 6, 1])]);
    let mut controllers: Vec<Box<dyn PlayerController>> = vec![Box::new(
        ScriptedController::new(PlayerId::new(0))
            .with_keeps([dice(&[2, 3, 4, 5, 6, 1])])
            .with_bank_decisions([true]),
    )];

    let result = GameLoop::new(&mut game).run_game(&mut controllers).unwrap();
    assert_eq!(result.end_reason, GameEndReason::FinalRoundComplete);
    assert_eq!(result.turns_played, 1);
    assert_eq!(result.winner, Some(PlayerId::new(0)));
}

#[test]
fn test_seeded_bot_matches_finish_with_valid_winner() {
    for seed in 0..20u64 {
        let mut game = quiet_game(3);
        game.seed_rng(seed);
        let (mut controllers, events) = recorded_bots(&game);

        let result = GameLoop::new(&mut game)
            .with_verbosity(VerbosityLevel::Silent)
            .run_game(&mut controllers)
            .unwrap();
        assert_eq!(result.end_reason, GameEndReason::FinalRoundComplete);

        let best = *result.final_scores.iter().max().unwrap();
        let first_best = result.final_scores.iter().position(|&s| s == best).unwrap();
        assert!(best >= 10_000);
        assert_eq!(result.winner, Some(PlayerId::new(first_best)));

        // Banked points add up to the final totals
        let mut banked = vec![0u32; 3];
        for event in events.borrow().iter() {
            if let GameEvent::Banked { player, points, .. } = event {
                banked[player.index()] += points;
            }
        }
        assert_eq!(banked, result.final_scores, "seed {seed}");
    }
}
