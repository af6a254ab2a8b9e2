//! Dice, rolls and the dice roller

use crate::core::rules::{DICE_PER_RACK, FACES};
use crate::{Result, TenKError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;

/// A single die face in 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Die(u8);

impl Die {
    pub fn new(face: u8) -> Result<Self> {
        if (1..=FACES as u8).contains(&face) {
            Ok(Die(face))
        } else {
            Err(TenKError::InvalidArgument(format!(
                "die face {face} is outside 1..={FACES}"
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Build a roll or selection from raw faces
    pub fn faces(values: &[u8]) -> Result<Roll> {
        values.iter().map(|&v| Die::new(v)).collect()
    }
}

impl TryFrom<u8> for Die {
    type Error = TenKError;

    fn try_from(face: u8) -> Result<Self> {
        Die::new(face)
    }
}

impl From<Die> for u8 {
    fn from(die: Die) -> u8 {
        die.0
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Faces produced by one throw, in throw order
pub type Roll = SmallVec<[Die; DICE_PER_RACK]>;

/// Dice a player claims to set aside from the current roll
pub type KeepSelection = SmallVec<[Die; DICE_PER_RACK]>;

/// Per-face histogram, indexed by `face - 1`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceCounts([u8; FACES]);

impl FaceCounts {
    pub fn from_dice(dice: &[Die]) -> Self {
        let mut counts = [0u8; FACES];
        for die in dice {
            counts[(die.value() - 1) as usize] += 1;
        }
        FaceCounts(counts)
    }

    /// How many dice show `face`
    pub fn count(&self, face: u8) -> u8 {
        self.0[(face - 1) as usize]
    }

    /// `(face, count)` pairs for faces 1..=6, including zero counts
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, &count)| (idx as u8 + 1, count))
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }
}

/// Roll `count` fair dice
///
/// Fails with `InvalidArgument` unless `1 <= count <= 6`.
pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<Roll> {
    check_dice_count(count)?;
    Ok((0..count)
        .map(|_| Die(rng.gen_range(1..=FACES as u8)))
        .collect())
}

fn check_dice_count(count: usize) -> Result<()> {
    if (1..=DICE_PER_RACK).contains(&count) {
        Ok(())
    } else {
        Err(TenKError::InvalidArgument(format!(
            "cannot roll {count} dice (expected 1..={DICE_PER_RACK})"
        )))
    }
}

/// Predetermined rolls handed out before falling back to the RNG
///
/// Used to replay a known sequence of throws in tests and demos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadedDice {
    rolls: VecDeque<Roll>,
}

impl LoadedDice {
    pub fn new() -> Self {
        LoadedDice::default()
    }

    pub fn push(&mut self, roll: Roll) {
        self.rolls.push_back(roll);
    }

    /// Take the next loaded roll, if any, checking it has `count` dice
    pub fn take(&mut self, count: usize) -> Result<Option<Roll>> {
        check_dice_count(count)?;
        match self.rolls.pop_front() {
            Some(roll) if roll.len() != count => Err(TenKError::InvalidArgument(format!(
                "loaded roll {:?} has {} dice but {count} were thrown",
                roll.as_slice(),
                roll.len()
            ))),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn test_die_rejects_bad_faces() {
        assert!(Die::new(0).is_err());
        assert!(Die::new(7).is_err());
        assert_eq!(Die::new(6).unwrap().value(), 6);
    }

    #[test]
    fn test_roll_dice_lengths() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for count in 1..=6 {
            let roll = roll_dice(&mut rng, count).unwrap();
            assert_eq!(roll.len(), count);
            assert!(roll.iter().all(|d| (1..=6).contains(&d.value())));
        }
    }

    #[test]
    fn test_roll_dice_out_of_range() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        assert!(matches!(
            roll_dice(&mut rng, 0),
            Err(TenKError::InvalidArgument(_))
        ));
        assert!(matches!(
            roll_dice(&mut rng, 7),
            Err(TenKError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_roll_dice_covers_every_face() {
        let mut rng = ChaCha12Rng::seed_from_u64(99);
        let mut seen = [false; 6];
        for _ in 0..200 {
            for die in roll_dice(&mut rng, 6).unwrap() {
                seen[(die.value() - 1) as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let mut rng1 = ChaCha12Rng::seed_from_u64(42);
        let mut rng2 = ChaCha12Rng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                roll_dice(&mut rng1, 6).unwrap(),
                roll_dice(&mut rng2, 6).unwrap()
            );
        }
    }

    #[test]
    fn test_face_counts() {
        let dice = Die::faces(&[1, 5, 5, 5, 2, 3]).unwrap();
        let counts = FaceCounts::from_dice(&dice);
        assert_eq!(counts.count(1), 1);
        assert_eq!(counts.count(5), 3);
        assert_eq!(counts.count(6), 0);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_loaded_dice_fifo_and_length_check() {
        let mut loaded = LoadedDice::new();
        loaded.push(Die::faces(&[1, 1, 1]).unwrap());
        loaded.push(Die::faces(&[2, 2]).unwrap());

        let first = loaded.take(3).unwrap().unwrap();
        assert_eq!(first, Die::faces(&[1, 1, 1]).unwrap());

        // A mismatched roll is still consumed
        assert!(loaded.take(4).is_err());
        assert!(loaded.take(6).unwrap().is_none());
    }

    #[test]
    fn test_die_serde_as_integer() {
        let dice = Die::faces(&[1, 6]).unwrap();
        let json = serde_json::to_string(&dice).unwrap();
        assert_eq!(json, "[1,6]");
        assert!(serde_json::from_str::<Vec<Die>>("[0]").is_err());
    }
}
