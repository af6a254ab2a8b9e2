//! Scripted player controller for testing
//!
//! This controller answers from predetermined queues of keeps and bank
//! decisions, useful for deterministic tests and replays.

use crate::core::{Die, KeepSelection, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::{Result, TenKError};
use std::collections::VecDeque;

/// A controller that follows a predetermined sequence of answers
pub struct ScriptedController {
    player_id: PlayerId,
    keeps: VecDeque<KeepSelection>,
    bank_decisions: VecDeque<bool>,
}

impl ScriptedController {
    pub fn new(player_id: PlayerId) -> Self {
        ScriptedController {
            player_id,
            keeps: VecDeque::new(),
            bank_decisions: VecDeque::new(),
        }
    }

    /// Queue keep selections, answered in order
    pub fn with_keeps<I, K>(mut self, keeps: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeepSelection>,
    {
        self.keeps.extend(keeps.into_iter().map(Into::into));
        self
    }

    /// Queue bank decisions, answered in order
    pub fn with_bank_decisions(mut self, decisions: impl IntoIterator<Item = bool>) -> Self {
        self.bank_decisions.extend(decisions);
        self
    }
}

impl PlayerController for ScriptedController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_keep(&mut self, _view: &GameStateView, roll: &[Die]) -> Result<KeepSelection> {
        self.keeps.pop_front().ok_or_else(|| {
            TenKError::InvalidAction(format!(
                "script for {} has no keep left for roll {roll:?}",
                self.player_id
            ))
        })
    }

    fn choose_bank(&mut self, _view: &GameStateView) -> Result<bool> {
        self.bank_decisions.pop_front().ok_or_else(|| {
            TenKError::InvalidAction(format!(
                "script for {} has no bank decision left",
                self.player_id
            ))
        })
    }
}
