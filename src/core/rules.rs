//! Fixed rule constants
//!
//! The game has no variants: dice count, target and scoring table are the
//! same for every match.

/// Dice in a full rack
pub const DICE_PER_RACK: usize = 6;

/// Number of faces on each die
pub const FACES: usize = 6;

/// Total that opens the final round
pub const WINNING_SCORE: u32 = 10_000;

/// Minimum of `player_total + turn_score` before a player may bank
pub const BANK_THRESHOLD: u32 = 1_000;

/// Points for a straight (1-2-3-4-5-6)
pub const STRAIGHT_POINTS: u32 = 1_500;

/// Points for three distinct pairs across six dice
pub const THREE_PAIRS_POINTS: u32 = 1_500;

/// Points for a single 1 outside a triplet
pub const SINGLE_ONE_POINTS: u32 = 100;

/// Points for a single 5 outside a triplet
pub const SINGLE_FIVE_POINTS: u32 = 50;

/// Largest table the match loop accepts
pub const MAX_PLAYERS: usize = 8;
