//! Match state
//!
//! `GameState` holds everything that outlives a single turn: the players and
//! their banked totals, whose turn it is, the final-round bookkeeping and the
//! match's single source of randomness.

use crate::core::rules::{MAX_PLAYERS, WINNING_SCORE};
use crate::core::{roll_dice, LoadedDice, Player, PlayerId, Roll};
use crate::game::GameLogger;
use crate::{Result, TenKError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::cell::RefCell;
use std::collections::BTreeSet;

#[derive(Debug)]
pub struct GameState {
    /// Players in seat order; `players[i].id == PlayerId::new(i)`
    pub players: Vec<Player>,

    /// Seat whose turn is next
    pub current_player_idx: usize,

    /// Set once, when a player first reaches the winning score
    pub final_round_triggered: bool,

    /// Players still owed their last turn
    pub final_round_pending: BTreeSet<PlayerId>,

    pub finished: bool,

    /// First player (by seat) holding the highest total, once finished
    pub winner: Option<PlayerId>,

    pub turns_played: u32,

    /// Randomness for dice and bot coin flips
    ///
    /// Wrapped in RefCell so controllers can draw from it through a shared
    /// `GameStateView`.
    pub rng: RefCell<ChaCha12Rng>,

    /// Predetermined rolls consumed before the RNG
    pub loaded_dice: LoadedDice,

    pub logger: GameLogger,
}

/// What the end-of-turn bookkeeping decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub points: u32,
    pub total: u32,
    /// This turn opened the final round
    pub triggered_final_round: bool,
    /// This turn ended the match
    pub game_over: bool,
}

impl GameState {
    /// Create a match for the given players, seated in order
    pub fn new(players: Vec<Player>) -> Result<Self> {
        if players.is_empty() || players.len() > MAX_PLAYERS {
            return Err(TenKError::InvalidArgument(format!(
                "a match needs 1..={MAX_PLAYERS} players, got {}",
                players.len()
            )));
        }
        if let Some((idx, p)) = players
            .iter()
            .enumerate()
            .find(|(idx, p)| p.id.index() != *idx)
        {
            return Err(TenKError::InvalidArgument(format!(
                "player {} sits at seat {idx}",
                p.id
            )));
        }

        Ok(GameState {
            players,
            current_player_idx: 0,
            final_round_triggered: false,
            final_round_pending: BTreeSet::new(),
            finished: false,
            winner: None,
            turns_played: 0,
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(0)),
            loaded_dice: LoadedDice::new(),
            logger: GameLogger::new(),
        })
    }

    /// Create a match from `(name, is_bot)` seats
    pub fn with_seats(seats: &[(&str, bool)]) -> Result<Self> {
        let players = seats
            .iter()
            .enumerate()
            .map(|(idx, (name, is_bot))| Player::new(PlayerId::new(idx), *name, *is_bot))
            .collect();
        Self::new(players)
    }

    /// Set the RNG seed for reproducible matches
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Queue predetermined rolls, thrown before any random ones
    pub fn load_rolls(&mut self, rolls: impl IntoIterator<Item = Roll>) {
        for roll in rolls {
            self.loaded_dice.push(roll);
        }
    }

    /// Throw `count` dice: the next loaded roll if one is queued, else random
    pub fn roll_dice(&mut self, count: usize) -> Result<Roll> {
        match self.loaded_dice.take(count)? {
            Some(roll) => Ok(roll),
            None => roll_dice(&mut *self.rng.borrow_mut(), count),
        }
    }

    /// Fair coin from the match RNG
    pub fn coin_flip(&self) -> bool {
        self.rng.borrow_mut().gen_bool(0.5)
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_idx]
    }

    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .get(id.index())
            .ok_or_else(|| TenKError::InvalidArgument(format!("no player {id}")))
    }

    pub fn get_next_player_idx(&self, current_idx: usize) -> usize {
        (current_idx + 1) % self.players.len()
    }

    pub fn totals(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.total_score).collect()
    }

    /// First player by seat holding the highest total
    pub fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<&Player> = None;
        for player in &self.players {
            if best.map_or(true, |b| player.total_score > b.total_score) {
                best = Some(player);
            }
        }
        best.map(|p| p.id)
    }

    /// Fold the current player's finished turn into the match
    ///
    /// Adds `points` to their total, opens the final round the first time
    /// anyone reaches the winning score, retires a pending final-round turn,
    /// ends the match once nobody is owed a turn, and passes the dice on.
    pub fn finish_turn(&mut self, points: u32) -> Result<TurnRecord> {
        if self.finished {
            return Err(TenKError::InvalidAction(
                "the match is already over".to_string(),
            ));
        }

        let idx = self.current_player_idx;
        let player_id = self.players[idx].id;
        self.players[idx].add_points(points);
        self.turns_played += 1;
        let total = self.players[idx].total_score;

        let mut triggered_final_round = false;
        if total >= WINNING_SCORE && !self.final_round_triggered {
            self.final_round_triggered = true;
            self.final_round_pending = self
                .players
                .iter()
                .map(|p| p.id)
                .filter(|&id| id != player_id)
                .collect();
            triggered_final_round = true;
        } else if self.final_round_triggered {
            self.final_round_pending.remove(&player_id);
        }

        if self.final_round_triggered && self.final_round_pending.is_empty() {
            self.finished = true;
            self.winner = self.leader();
        }

        self.current_player_idx = self.get_next_player_idx(idx);

        Ok(TurnRecord {
            player: player_id,
            points,
            total,
            triggered_final_round,
            game_over: self.finished,
        })
    }
}
