//! Player representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat index of a player, stable for the whole match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(usize);

impl PlayerId {
    pub fn new(idx: usize) -> Self {
        PlayerId(idx)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a player in the match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Seat index
    pub id: PlayerId,

    /// Player name
    pub name: String,

    /// Banked points; only ever grows
    pub total_score: u32,

    /// Driven by the heuristic bot rather than a person
    pub is_bot: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, is_bot: bool) -> Self {
        Player {
            id,
            name: name.into(),
            total_score: 0,
            is_bot,
        }
    }

    /// Fold a finished turn into the total
    pub fn add_points(&mut self, points: u32) {
        self.total_score += points;
    }
}
