//! Game loop implementation
//!
//! Drives turns in seat order, asks controllers for keep and bank decisions,
//! and reports every state change as a `GameEvent`.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating the per-roll format! allocations in bulk simulations.
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.log_verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

use crate::core::{Die, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{GameEvent, GameState, TurnOutcome, TurnState};
use crate::{Result, TenKError};

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - final round and game outcome
    Minimal = 1,
    /// Normal - rolls, keeps, banks and farkles (default)
    #[default]
    Normal = 2,
    /// Verbose - every decision and dice count
    Verbose = 3,
}

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Winner of the game (None if the turn limit stopped it)
    pub winner: Option<PlayerId>,
    /// Total number of turns played
    pub turns_played: u32,
    /// Reason the game ended
    pub end_reason: GameEndReason,
    /// Banked totals in seat order
    pub final_scores: Vec<u32>,
}

/// Reason the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// Everyone owed a final-round turn has taken it
    FinalRoundComplete,
    /// Game reached maximum turn limit
    TurnLimit,
}

/// Game loop manager
///
/// Handles turn progression, the final round and end-of-match reporting
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    /// Maximum turns before stopping without a winner
    max_turns: Option<u32>,
    /// Verbosity level for output (cached from game.logger)
    pub verbosity: VerbosityLevel,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state
    pub fn new(game: &'a mut GameState) -> Self {
        let verbosity = game.logger.verbosity();
        GameLoop {
            game,
            max_turns: None,
            verbosity,
        }
    }

    /// Stop after `max_turns` turns even if nobody has won
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    /// Set verbosity level for output
    ///
    /// This sets the verbosity on both the game loop and the game's centralized logger,
    /// which is accessed by controllers via GameStateView.
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Run the game loop with one controller per seat
    ///
    /// Returns when the final round completes or the turn limit is hit
    pub fn run_game(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<GameResult> {
        self.setup_game(controllers)?;

        loop {
            if let Some(result) = self.run_turn_once(controllers)? {
                for controller in controllers.iter_mut() {
                    let won = result.winner == Some(controller.player_id());
                    controller.on_game_end(won);
                }
                return Ok(result);
            }
        }
    }

    /// Verify controllers line up with the seats
    fn setup_game(&self, controllers: &[Box<dyn PlayerController>]) -> Result<()> {
        if controllers.len() != self.game.players.len() {
            return Err(TenKError::InvalidAction(format!(
                "Game has {} players but {} controllers",
                self.game.players.len(),
                controllers.len()
            )));
        }
        if controllers
            .iter()
            .zip(&self.game.players)
            .any(|(c, p)| c.player_id() != p.id)
        {
            return Err(TenKError::InvalidAction(
                "Controller player IDs don't match game players".to_string(),
            ));
        }
        Ok(())
    }

    /// Play the current player's turn and fold it into the match
    ///
    /// Returns `Some` once the match is over.
    pub fn run_turn_once(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<Option<GameResult>> {
        if let Some(result) = self.check_game_over() {
            return Ok(Some(result));
        }

        let outcome = self.play_turn(controllers)?;
        let record = self.game.finish_turn(outcome.points())?;

        if let TurnOutcome::Banked(points) = outcome {
            self.emit(
                controllers,
                GameEvent::Banked {
                    player: record.player,
                    points,
                    total: record.total,
                },
            );
        }
        if record.triggered_final_round {
            let pending = self.game.final_round_pending.iter().copied().collect();
            self.emit(
                controllers,
                GameEvent::FinalRoundTriggered {
                    player: record.player,
                    total: record.total,
                    pending,
                },
            );
        }

        let result = self.check_game_over();
        if let Some(result) = &result {
            self.emit(
                controllers,
                GameEvent::GameOver {
                    winner: result.winner,
                    totals: result.final_scores.clone(),
                },
            );
        }
        Ok(result)
    }

    /// Play one turn for the seat whose turn it is
    ///
    /// Loops roll, keep, bank until the turn banks or scores nothing.
    fn play_turn(&mut self, controllers: &mut [Box<dyn PlayerController>]) -> Result<TurnOutcome> {
        let idx = self.game.current_player_idx;
        let player = self.game.players[idx].id;
        let player_total = self.game.players[idx].total_score;
        self.emit(
            controllers,
            GameEvent::TurnStarted {
                player,
                total: player_total,
            },
        );

        let mut turn = TurnState::new();
        while turn.is_active() {
            log_if_verbose!(
                self,
                "{} throws {} dice with {} on the line",
                self.player_name(player),
                turn.dice_remaining(),
                turn.turn_score()
            );
            let at_stake = turn.turn_score();
            let roll = self.game.roll_dice(turn.dice_remaining())?;
            let roll_score = turn.record_roll(&roll)?;
            self.emit(
                controllers,
                GameEvent::Rolled {
                    player,
                    roll: roll.to_vec(),
                    roll_score,
                    turn_score: turn.turn_score(),
                },
            );
            if !turn.is_active() {
                self.emit(
                    controllers,
                    GameEvent::Farkled {
                        player,
                        roll: roll.to_vec(),
                        lost: at_stake,
                    },
                );
                break;
            }

            let keep = {
                let view = GameStateView::new(self.game, player, &turn);
                controllers[idx].choose_keep(&view, &roll)?
            };
            let applied = match turn.apply_keep(&keep) {
                Ok(applied) => applied,
                Err(TenKError::InvalidSelection { roll, keep }) => {
                    self.emit(
                        controllers,
                        GameEvent::SelectionRejected { player, roll, keep },
                    );
                    break;
                }
                Err(e) => return Err(e),
            };
            self.emit(
                controllers,
                GameEvent::Kept {
                    player,
                    keep: keep.to_vec(),
                    points: applied.points,
                    turn_score: turn.turn_score(),
                    dice_remaining: turn.dice_remaining(),
                },
            );
            if applied.hot_dice {
                self.emit(
                    controllers,
                    GameEvent::HotDice {
                        player,
                        turn_score: turn.turn_score(),
                    },
                );
            }

            if turn.can_bank(player_total) {
                let bank = {
                    let view = GameStateView::new(self.game, player, &turn);
                    controllers[idx].choose_bank(&view)?
                };
                if bank {
                    turn.bank(player_total)?;
                } else {
                    self.emit(
                        controllers,
                        GameEvent::Continued {
                            player,
                            turn_score: turn.turn_score(),
                            dice_remaining: turn.dice_remaining(),
                        },
                    );
                }
            } else {
                log_if_verbose!(
                    self,
                    "{} needs {} on the board to bank",
                    self.player_name(player),
                    crate::core::rules::BANK_THRESHOLD
                );
            }
        }

        turn.outcome().ok_or_else(|| {
            TenKError::InvalidAction(format!("turn for {player} stopped while still active"))
        })
    }

    /// The match result, if the match has ended
    fn check_game_over(&self) -> Option<GameResult> {
        let end_reason = if self.game.finished {
            GameEndReason::FinalRoundComplete
        } else if self
            .max_turns
            .is_some_and(|max| self.game.turns_played >= max)
        {
            GameEndReason::TurnLimit
        } else {
            return None;
        };

        Some(GameResult {
            winner: self.game.winner,
            turns_played: self.game.turns_played,
            end_reason,
            final_scores: self.game.totals(),
        })
    }

    fn player_name(&self, id: PlayerId) -> &str {
        self.game
            .get_player(id)
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown")
    }

    #[cfg_attr(not(feature = "verbose-logging"), allow(dead_code))]
    fn log_verbose(&self, message: &str) {
        self.game.logger.verbose(message);
    }

    /// Send an event to the logger and to every controller
    fn emit(&self, controllers: &mut [Box<dyn PlayerController>], event: GameEvent) {
        self.game
            .logger
            .event(&event, || self.describe_event(&event));
        for controller in controllers.iter_mut() {
            controller.on_event(&event);
        }
    }

    fn describe_event(&self, event: &GameEvent) -> String {
        match event {
            GameEvent::TurnStarted { player, total } => {
                format!("{}'s turn ({total} banked)", self.player_name(*player))
            }
            GameEvent::Rolled {
                player,
                roll,
                roll_score,
                ..
            } => format!(
                "{} rolls {} (worth {roll_score})",
                self.player_name(*player),
                format_dice(roll)
            ),
            GameEvent::Kept {
                player,
                keep,
                points,
                turn_score,
                dice_remaining,
            } => format!(
                "{} keeps {} for {points} (turn: {turn_score}, {dice_remaining} dice left)",
                self.player_name(*player),
                format_dice(keep)
            ),
            GameEvent::HotDice { player, turn_score } => format!(
                "{} has hot dice! All six back in play with {turn_score} on the line",
                self.player_name(*player)
            ),
            GameEvent::Continued {
                player,
                turn_score,
                dice_remaining,
            } => format!(
                "{} rolls on with {turn_score} at stake ({dice_remaining} dice)",
                self.player_name(*player)
            ),
            GameEvent::Farkled { player, lost, .. } => {
                format!("{} farkles and loses {lost}", self.player_name(*player))
            }
            GameEvent::SelectionRejected { player, roll, keep } => format!(
                "{} tried to keep {} from {}; the turn scores nothing",
                self.player_name(*player),
                format_dice(keep),
                format_dice(roll)
            ),
            GameEvent::Banked {
                player,
                points,
                total,
            } => format!(
                "{} banks {points} (total: {total})",
                self.player_name(*player)
            ),
            GameEvent::FinalRoundTriggered { player, total, .. } => format!(
                "\n{} reaches {total}! Everyone else gets one last turn.",
                self.player_name(*player)
            ),
            GameEvent::GameOver { winner, totals } => {
                let mut out = String::from("\n=== Game Over ===");
                for (player, total) in self.game.players.iter().zip(totals) {
                    out.push_str(&format!("\n  {}: {total}", player.name));
                }
                match winner {
                    Some(id) => out.push_str(&format!("\n{} wins!", self.player_name(*id))),
                    None => out.push_str("\nNo winner"),
                }
                out
            }
        }
    }
}

fn format_dice(dice: &[Die]) -> String {
    let faces: Vec<String> = dice.iter().map(|d| d.to_string()).collect();
    format!("[{}]", faces.join(" "))
}
