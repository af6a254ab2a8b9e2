//! Scoring table
//!
//! `score` maps any multiset of up to six dice to its point value. Order never
//! matters: everything is computed from the face histogram.
//!
//! | Combination                  | Points                                  |
//! |------------------------------|-----------------------------------------|
//! | 1-2-3-4-5-6                  | 1500                                    |
//! | three pairs (six dice)       | 1500                                    |
//! | three or more 1s             | 1000 x (count - 2)                      |
//! | three or more of face v > 1  | v x 100 x (count - 2)                   |
//! | single 1 / single 5          | 100 / 50 each, when not in a triplet    |

use crate::core::dice::{Die, FaceCounts};
use crate::core::rules::{
    DICE_PER_RACK, SINGLE_FIVE_POINTS, SINGLE_ONE_POINTS, STRAIGHT_POINTS, THREE_PAIRS_POINTS,
};

/// Point value of a set of dice
pub fn score(dice: &[Die]) -> u32 {
    let counts = FaceCounts::from_dice(dice);

    if is_straight_counts(&counts) {
        return STRAIGHT_POINTS;
    }
    if is_three_pairs_counts(&counts) {
        return THREE_PAIRS_POINTS;
    }

    counts
        .iter()
        .map(|(face, count)| face_points(face, count as u32))
        .sum()
}

fn face_points(face: u8, count: u32) -> u32 {
    if count >= 3 {
        triplet_base(face) * (count - 2)
    } else {
        match face {
            1 => count * SINGLE_ONE_POINTS,
            5 => count * SINGLE_FIVE_POINTS,
            _ => 0,
        }
    }
}

/// Value of exactly three dice showing `face`
pub fn triplet_base(face: u8) -> u32 {
    if face == 1 {
        1000
    } else {
        face as u32 * 100
    }
}

/// Exactly one of each face
pub fn is_straight(dice: &[Die]) -> bool {
    is_straight_counts(&FaceCounts::from_dice(dice))
}

/// Exactly three faces, each shown exactly twice
pub fn is_three_pairs(dice: &[Die]) -> bool {
    is_three_pairs_counts(&FaceCounts::from_dice(dice))
}

/// No scoring combination at all
pub fn is_farkle(dice: &[Die]) -> bool {
    score(dice) == 0
}

pub(crate) fn is_straight_counts(counts: &FaceCounts) -> bool {
    counts.total() == DICE_PER_RACK && counts.iter().all(|(_, c)| c == 1)
}

pub(crate) fn is_three_pairs_counts(counts: &FaceCounts) -> bool {
    counts.total() == DICE_PER_RACK && counts.iter().filter(|&(_, c)| c == 2).count() == 3
}
