//! Keep-selection validation

use crate::core::dice::{Die, FaceCounts};
use crate::core::scoring::score;
use crate::{Result, TenKError};

/// True when `keep` is a sub-multiset of `roll`
///
/// Says nothing about whether `keep` scores; see [`validate_keep`].
pub fn is_valid(roll: &[Die], keep: &[Die]) -> bool {
    let rolled = FaceCounts::from_dice(roll);
    let kept = FaceCounts::from_dice(keep);
    let valid = kept.iter().all(|(face, count)| count <= rolled.count(face));
    valid
}

/// Acceptance rule for a keep during a turn
///
/// The keep must be non-empty, drawn from the roll, and worth points.
/// Returns the points it adds to the turn.
pub fn validate_keep(roll: &[Die], keep: &[Die]) -> Result<u32> {
    let points = score(keep);
    if keep.is_empty() || points == 0 || !is_valid(roll, keep) {
        return Err(TenKError::InvalidSelection {
            roll: roll.to_vec(),
            keep: keep.to_vec(),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(values: &[u8]) -> Vec<Die> {
        Die::faces(values).unwrap().to_vec()
    }

    #[test]
    fn test_subset_is_valid() {
        let roll = dice(&[1, 5, 5, 5, 2, 3]);
        assert!(is_valid(&roll, &dice(&[1, 5, 5, 5])));
        assert!(is_valid(&roll, &dice(&[5, 1])));
        assert!(is_valid(&roll, &[]));
        assert!(is_valid(&roll, &roll));
    }

    #[test]
    fn test_overclaiming_is_invalid() {
        let roll = dice(&[1, 5, 5, 5, 2, 3]);
        assert!(!is_valid(&roll, &dice(&[1, 1])));
        assert!(!is_valid(&roll, &dice(&[5, 5, 5, 5])));
        assert!(!is_valid(&roll, &dice(&[6])));
    }

    #[test]
    fn test_is_valid_matches_count_comparison() {
        // All pairs of multisets over faces {1, 2} with up to three dice each
        let sets: Vec<Vec<Die>> = (0..=3u8)
            .flat_map(|ones| (0..=3 - ones).map(move |twos| (ones, twos)))
            .map(|(ones, twos)| {
                let mut v = vec![1u8; ones as usize];
                v.extend(std::iter::repeat(2u8).take(twos as usize));
                dice(&v)
            })
            .collect();

        for roll in &sets {
            for keep in &sets {
                let count = |d: &[Die], f: u8| d.iter().filter(|x| x.value() == f).count();
                let expected =
                    count(keep, 1) <= count(roll, 1) && count(keep, 2) <= count(roll, 2);
                assert_eq!(is_valid(roll, keep), expected, "{roll:?} / {keep:?}");
            }
        }
    }

    #[test]
    fn test_validate_keep_returns_points() {
        let roll = dice(&[1, 5, 5, 5, 2, 3]);
        assert_eq!(validate_keep(&roll, &dice(&[1, 5, 5, 5])).unwrap(), 600);
        // Junk riding along with scoring dice is allowed but worth nothing
        assert_eq!(validate_keep(&roll, &dice(&[1, 2])).unwrap(), 100);
    }

    #[test]
    fn test_validate_keep_rejections() {
        let roll = dice(&[1, 5, 5, 5, 2, 3]);
        assert!(matches!(
            validate_keep(&roll, &[]),
            Err(TenKError::InvalidSelection { .. })
        ));
        assert!(matches!(
            validate_keep(&roll, &dice(&[2, 3])),
            Err(TenKError::InvalidSelection { .. })
        ));
        assert!(matches!(
            validate_keep(&roll, &dice(&[1, 1])),
            Err(TenKError::InvalidSelection { .. })
        ));
    }
}
