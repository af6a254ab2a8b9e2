//! Player controller trait and game state view
//!
//! This module defines the interface between the game engine and player
//! controllers (bot or human). The engine calls the controller when a
//! decision is needed, and the controller inspects a read-only view of the
//! match and the running turn to make its choice.

use crate::core::{Die, KeepSelection, Player, PlayerId};
use crate::game::{GameEvent, GameLogger, GameState, TurnState};
use crate::Result;

/// Read-only view of the match from one player's seat
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
    turn: &'a TurnState,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, player_id: PlayerId, turn: &'a TurnState) -> Self {
        GameStateView {
            game,
            player_id,
            turn,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Banked total of the acting player
    pub fn player_total(&self) -> u32 {
        self.game
            .get_player(self.player_id)
            .map(|p| p.total_score)
            .unwrap_or(0)
    }

    /// Points accumulated so far this turn
    pub fn turn_score(&self) -> u32 {
        self.turn.turn_score()
    }

    /// Dice that would be thrown if the player keeps rolling
    pub fn dice_remaining(&self) -> usize {
        self.turn.dice_remaining()
    }

    pub fn players(&self) -> &[Player] {
        &self.game.players
    }

    pub fn final_round_triggered(&self) -> bool {
        self.game.final_round_triggered
    }

    /// Fair coin drawn from the match RNG
    pub fn coin_flip(&self) -> bool {
        self.game.coin_flip()
    }

    pub fn logger(&self) -> &GameLogger {
        &self.game.logger
    }
}

/// Player controller trait
///
/// Implement this trait to create bots or connect a user interface. Both
/// decision methods may block; errors abort the match.
pub trait PlayerController {
    /// Get the player ID this controller is responsible for
    fn player_id(&self) -> PlayerId;

    /// Choose which dice to set aside from `roll`
    ///
    /// Only called for rolls that score. The engine validates the answer; a
    /// refused selection ends the turn with nothing.
    fn choose_keep(&mut self, view: &GameStateView, roll: &[Die]) -> Result<KeepSelection>;

    /// Decide whether to bank the turn score
    ///
    /// Only called when banking is allowed. `false` rolls the live dice again.
    fn choose_bank(&mut self, view: &GameStateView) -> Result<bool>;

    /// Called for every game event (for presentation/logging)
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Called when the match ends (for cleanup/logging)
    fn on_game_end(&mut self, _won: bool) {}
}
