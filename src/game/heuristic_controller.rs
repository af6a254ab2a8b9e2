//! Heuristic bot
//!
//! The bot is greedy about dice and loose about banking:
//!
//! - A straight or three pairs is kept whole.
//! - Otherwise it keeps every die in a triplet-or-better, plus every 1 and 5.
//!   Non-scoring 2s, 3s, 4s and 6s go back in the cup.
//! - Once banking is allowed it banks any turn worth 1000 or more, and
//!   flips a coin for anything smaller.
//!
//! The coin comes from the match RNG so seeded matches replay exactly.

use crate::core::rules::BANK_THRESHOLD;
use crate::core::scoring::{is_straight_counts, is_three_pairs_counts};
use crate::core::{Die, FaceCounts, KeepSelection, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::Result;

/// Dice the bot sets aside from `roll`, in roll order
pub fn choose_keep(roll: &[Die]) -> KeepSelection {
    let counts = FaceCounts::from_dice(roll);
    if is_straight_counts(&counts) || is_three_pairs_counts(&counts) {
        return roll.iter().copied().collect();
    }
    roll.iter()
        .copied()
        .filter(|die| {
            let face = die.value();
            counts.count(face) >= 3 || face == 1 || face == 5
        })
        .collect()
}

/// Whether the bot stops and banks
///
/// `coin_flip` is only consulted for turns below 1000 once banking is open.
pub fn should_bank(turn_score: u32, player_total: u32, coin_flip: impl FnOnce() -> bool) -> bool {
    if player_total + turn_score < BANK_THRESHOLD {
        return false;
    }
    turn_score >= BANK_THRESHOLD || coin_flip()
}

pub struct HeuristicController {
    player_id: PlayerId,
}

impl HeuristicController {
    pub fn new(player_id: PlayerId) -> Self {
        HeuristicController { player_id }
    }
}

impl PlayerController for HeuristicController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_keep(&mut self, view: &GameStateView, roll: &[Die]) -> Result<KeepSelection> {
        let keep = choose_keep(roll);
        view.logger().controller_choice(
            "BOT",
            &format!("keeps {:?} from {:?}", keep.as_slice(), roll),
        );
        Ok(keep)
    }

    fn choose_bank(&mut self, view: &GameStateView) -> Result<bool> {
        let bank = should_bank(view.turn_score(), view.player_total(), || view.coin_flip());
        view.logger().controller_choice(
            "BOT",
            if bank {
                "chooses to bank"
            } else {
                "chooses to roll again"
            },
        );
        Ok(bank)
    }
}
