//! Game events emitted to the logger and to controllers
//!
//! Every state change the presentation layer might care about is one of these.
//! They serialize as one JSON object per event, tagged by `event`.

use crate::core::{Die, PlayerId};
use crate::game::VerbosityLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    TurnStarted {
        player: PlayerId,
        total: u32,
    },
    Rolled {
        player: PlayerId,
        roll: Vec<Die>,
        roll_score: u32,
        turn_score: u32,
    },
    Kept {
        player: PlayerId,
        keep: Vec<Die>,
        points: u32,
        turn_score: u32,
        dice_remaining: usize,
    },
    /// All six dice were set aside; the full rack is live again
    HotDice {
        player: PlayerId,
        turn_score: u32,
    },
    /// Player chose to keep rolling with banking available
    Continued {
        player: PlayerId,
        turn_score: u32,
        dice_remaining: usize,
    },
    Farkled {
        player: PlayerId,
        roll: Vec<Die>,
        lost: u32,
    },
    /// The controller returned a keep the rules refuse; the turn scores 0
    SelectionRejected {
        player: PlayerId,
        roll: Vec<Die>,
        keep: Vec<Die>,
    },
    Banked {
        player: PlayerId,
        points: u32,
        total: u32,
    },
    FinalRoundTriggered {
        player: PlayerId,
        total: u32,
        pending: Vec<PlayerId>,
    },
    GameOver {
        winner: Option<PlayerId>,
        totals: Vec<u32>,
    },
}

impl GameEvent {
    /// Lowest verbosity at which this event is printed
    pub fn level(&self) -> VerbosityLevel {
        match self {
            GameEvent::FinalRoundTriggered { .. } | GameEvent::GameOver { .. } => {
                VerbosityLevel::Minimal
            }
            GameEvent::Continued { .. } => VerbosityLevel::Verbose,
            _ => VerbosityLevel::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::Banked {
            player: PlayerId::new(1),
            points: 1000,
            total: 4500,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"banked","player":1,"points":1000,"total":4500}"#
        );
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_farkle_and_rejection_are_distinct() {
        let farkle = GameEvent::Farkled {
            player: PlayerId::new(0),
            roll: Die::faces(&[2, 3]).unwrap().to_vec(),
            lost: 300,
        };
        let rejected = GameEvent::SelectionRejected {
            player: PlayerId::new(0),
            roll: Die::faces(&[1, 3]).unwrap().to_vec(),
            keep: Die::faces(&[3]).unwrap().to_vec(),
        };
        assert_ne!(farkle, rejected);
        assert!(serde_json::to_string(&farkle).unwrap().contains("\"farkled\""));
        assert!(serde_json::to_string(&rejected)
            .unwrap()
            .contains("\"selection_rejected\""));
    }

    #[test]
    fn test_levels() {
        let over = GameEvent::GameOver {
            winner: None,
            totals: vec![],
        };
        assert_eq!(over.level(), VerbosityLevel::Minimal);
    }
}
