//! Per-turn state machine
//!
//! A turn starts `Active` with six dice and no points. Each cycle records a
//! roll, then (if the roll scored) applies the player's keep. The turn ends
//! either `Farkled` (a dead roll or a refused keep, worth nothing) or
//! `Banked` (the accumulated score is paid out).
//!
//! ```text
//!            record_roll (scores)        apply_keep
//!   Active ---------------------> Active -----------> Active --bank--> Banked
//!     |                             |
//!     | record_roll (scores 0)      | apply_keep (refused)
//!     v                             v
//!   Farkled                      Farkled
//! ```

use crate::core::rules::{BANK_THRESHOLD, DICE_PER_RACK};
use crate::core::{score, validate_keep, Die, Roll};
use crate::{Result, TenKError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    Active,
    Farkled,
    Banked,
}

/// How a finished turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Banked(u32),
    /// A roll with nothing to score
    Farkled,
    /// The controller's keep was refused
    InvalidSelection,
}

impl TurnOutcome {
    /// Points the turn adds to the player's total
    pub fn points(self) -> u32 {
        match self {
            TurnOutcome::Banked(points) => points,
            TurnOutcome::Farkled | TurnOutcome::InvalidSelection => 0,
        }
    }
}

/// Result of a successful keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepApplied {
    pub points: u32,
    /// Every die was set aside and the rack was reset to six
    pub hot_dice: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    dice_remaining: usize,
    turn_score: u32,
    status: TurnStatus,
    rolls: u32,
    /// Scoring roll on the table, waiting for a keep
    current_roll: Option<Roll>,
    /// Farkled because a keep was refused, not because of the dice
    rejected: bool,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnState {
    pub fn new() -> Self {
        TurnState {
            dice_remaining: DICE_PER_RACK,
            turn_score: 0,
            status: TurnStatus::Active,
            rolls: 0,
            current_roll: None,
            rejected: false,
        }
    }

    pub fn dice_remaining(&self) -> usize {
        self.dice_remaining
    }

    pub fn turn_score(&self) -> u32 {
        self.turn_score
    }

    pub fn status(&self) -> TurnStatus {
        self.status
    }

    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    pub fn is_active(&self) -> bool {
        self.status == TurnStatus::Active
    }

    /// Terminal outcome, or None while the turn is still running
    pub fn outcome(&self) -> Option<TurnOutcome> {
        match self.status {
            TurnStatus::Active => None,
            TurnStatus::Banked => Some(TurnOutcome::Banked(self.turn_score)),
            TurnStatus::Farkled if self.rejected => Some(TurnOutcome::InvalidSelection),
            TurnStatus::Farkled => Some(TurnOutcome::Farkled),
        }
    }

    fn ensure_active(&self, action: &str) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(TenKError::InvalidAction(format!(
                "cannot {action}: turn is {:?}",
                self.status
            )))
        }
    }

    /// Record a fresh throw of the live dice
    ///
    /// Returns the roll's score. A roll worth nothing farkles the turn and
    /// wipes everything accumulated so far.
    pub fn record_roll(&mut self, roll: &[Die]) -> Result<u32> {
        self.ensure_active("roll")?;
        if self.current_roll.is_some() {
            return Err(TenKError::InvalidAction(
                "cannot roll again before keeping dice".to_string(),
            ));
        }
        if roll.len() != self.dice_remaining {
            return Err(TenKError::InvalidArgument(format!(
                "rolled {} dice with {} live",
                roll.len(),
                self.dice_remaining
            )));
        }

        self.rolls += 1;
        let roll_score = score(roll);
        if roll_score == 0 {
            self.turn_score = 0;
            self.status = TurnStatus::Farkled;
        } else {
            self.current_roll = Some(roll.iter().copied().collect());
        }
        Ok(roll_score)
    }

    /// Set aside `keep` from the recorded roll and add its points to the turn
    ///
    /// A refused keep farkles the turn and returns `InvalidSelection`.
    pub fn apply_keep(&mut self, keep: &[Die]) -> Result<KeepApplied> {
        self.ensure_active("keep dice")?;
        let roll = self
            .current_roll
            .take()
            .ok_or_else(|| TenKError::InvalidAction("no scoring roll to keep from".to_string()))?;

        let points = match validate_keep(&roll, keep) {
            Ok(points) => points,
            Err(err) => {
                self.turn_score = 0;
                self.status = TurnStatus::Farkled;
                self.rejected = true;
                return Err(err);
            }
        };

        self.turn_score += points;
        self.dice_remaining -= keep.len();
        let hot_dice = self.dice_remaining == 0;
        if hot_dice {
            self.dice_remaining = DICE_PER_RACK;
        }
        Ok(KeepApplied { points, hot_dice })
    }

    /// Banking is open once the player's total plus this turn reaches the
    /// threshold, between a keep and the next roll
    pub fn can_bank(&self, player_total: u32) -> bool {
        self.is_active()
            && self.current_roll.is_none()
            && self.turn_score > 0
            && player_total + self.turn_score >= BANK_THRESHOLD
    }

    /// End the turn, paying out the accumulated score
    pub fn bank(&mut self, player_total: u32) -> Result<u32> {
        self.ensure_active("bank")?;
        if !self.can_bank(player_total) {
            return Err(TenKError::InvalidAction(format!(
                "cannot bank {} with a total of {player_total} (need {BANK_THRESHOLD})",
                self.turn_score
            )));
        }
        self.status = TurnStatus::Banked;
        Ok(self.turn_score)
    }
}
