//! Core rule types: dice, scoring, selections and players

pub mod dice;
pub mod player;
pub mod rules;
pub mod scoring;
pub mod selection;


pub use dice::{roll_dice, Die, FaceCounts, KeepSelection, LoadedDice, Roll};
pub use player::{Player, PlayerId};
pub use scoring::{is_farkle, is_straight, is_three_pairs, score};
pub use selection::{is_valid, validate_keep};
