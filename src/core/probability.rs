//! Win Probability Engine
//!
//! Exhaustive pairwise win odds for a die set. For every ordered pair of
//! dice the 36 face combinations are enumerated; a win is a strictly
//! greater face, ties count toward neither side. Pure and deterministic,
//! computed once per game run and cached on the session.

use serde::{Deserialize, Serialize};

use crate::core::dice::{DieSet, FACES};
use crate::error::Result;

/// Win/tie tally for one ordered die pair over all 36 face combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatStats {
    /// Combinations where the first die's face is strictly greater.
    pub wins: u32,
    /// Combinations with equal faces.
    pub ties: u32,
}

impl BeatStats {
    /// Win probability as a fraction of all 36 combinations.
    pub fn probability(&self) -> f64 {
        f64::from(self.wins) / f64::from((FACES * FACES) as u32)
    }
}

/// Square matrix of pairwise win probabilities, including self-pairs.
///
/// `P[i][j] + P[j][i] <= 1`; the remainder is the tie probability.
/// Diagonal entries are informational only, the protocol never pits a die
/// against itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    stats: Vec<Vec<BeatStats>>,
}

impl ProbabilityMatrix {
    /// Enumerate every ordered die pair of `dice`.
    ///
    /// Die validity is enforced at construction; the fixed-size face array
    /// makes a malformed die unrepresentable, so no defensive re-check is
    /// needed here.
    pub fn compute(dice: &DieSet) -> Result<Self> {
        let stats = dice
            .iter()
            .map(|a| dice.iter().map(|b| beat_stats(a, b)).collect())
            .collect();
        Ok(Self { stats })
    }

    /// Number of rows (== number of dice).
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// True for an empty matrix. Unreachable through `compute` since a
    /// `DieSet` holds at least 3 dice.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Tally for die `i` against die `j`.
    pub fn stats(&self, i: usize, j: usize) -> BeatStats {
        self.stats[i][j]
    }

    /// Probability that die `i` beats die `j`.
    pub fn probability(&self, i: usize, j: usize) -> f64 {
        self.stats[i][j].probability()
    }

    /// Mean win probability of die `index` against the dice in `others`.
    ///
    /// Used by the host's best-average selection policy. Returns 0.0 for
    /// an empty slice.
    pub fn mean_probability_against(&self, index: usize, others: &[usize]) -> f64 {
        if others.is_empty() {
            return 0.0;
        }
        let sum: f64 = others.iter().map(|&j| self.probability(index, j)).sum();
        sum / others.len() as f64
    }
}

/// Count wins and ties for `a` against `b` over all face combinations.
fn beat_stats(a: &crate::core::dice::Die, b: &crate::core::dice::Die) -> BeatStats {
    let mut wins = 0;
    let mut ties = 0;
    for &fa in a.faces() {
        for &fb in b.faces() {
            if fa > fb {
                wins += 1;
            } else if fa == fb {
                ties += 1;
            }
        }
    }
    BeatStats { wins, ties }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::DieSet;
    use proptest::prelude::*;

    fn canonical_set() -> DieSet {
        DieSet::parse(&["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap()
    }

    #[test]
    fn test_non_transitive_cycle() {
        // A beats B beats C beats A, each with 20/36, no ties.
        let m = ProbabilityMatrix::compute(&canonical_set()).unwrap();
        for (i, j) in [(0, 1), (1, 2), (2, 0)] {
            assert_eq!(m.stats(i, j), BeatStats { wins: 20, ties: 0 });
            assert_eq!(m.stats(j, i), BeatStats { wins: 16, ties: 0 });
            assert_eq!(format!("{:.4}", m.probability(i, j)), "0.5556");
            assert_eq!(format!("{:.4}", m.probability(j, i)), "0.4444");
        }
    }

    #[test]
    fn test_diagonal_self_pairs() {
        let m = ProbabilityMatrix::compute(&canonical_set()).unwrap();
        for i in 0..m.len() {
            let s = m.stats(i, i);
            // A die against itself wins exactly as often as it loses.
            assert_eq!(s.wins * 2 + s.ties, 36);
        }
    }

    #[test]
    fn test_wins_ties_losses_partition() {
        let m = ProbabilityMatrix::compute(&canonical_set()).unwrap();
        for i in 0..m.len() {
            for j in 0..m.len() {
                let fwd = m.stats(i, j);
                let rev = m.stats(j, i);
                assert_eq!(fwd.ties, rev.ties);
                assert_eq!(fwd.wins + rev.wins + fwd.ties, 36);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let set = canonical_set();
        let a = ProbabilityMatrix::compute(&set).unwrap();
        let b = ProbabilityMatrix::compute(&set).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_relabeling_permutes_matrix() {
        let m = ProbabilityMatrix::compute(&canonical_set()).unwrap();
        let rotated =
            DieSet::parse(&["1,1,6,6,8,8", "3,3,5,5,7,7", "2,2,4,4,9,9"]).unwrap();
        let r = ProbabilityMatrix::compute(&rotated).unwrap();

        // Die k in the rotated set is die (k + 1) % 3 in the original.
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(r.stats(i, j), m.stats((i + 1) % 3, (j + 1) % 3));
            }
        }
    }

    #[test]
    fn test_mean_probability_against() {
        let m = ProbabilityMatrix::compute(&canonical_set()).unwrap();
        let mean = m.mean_probability_against(0, &[1, 2]);
        let expected = (20.0 / 36.0 + 16.0 / 36.0) / 2.0;
        assert!((mean - expected).abs() < 1e-12);
        assert_eq!(m.mean_probability_against(0, &[]), 0.0);
    }

    proptest! {
        #[test]
        fn prop_partition_holds_for_arbitrary_dice(
            fa in proptest::array::uniform6(-50i32..50),
            fb in proptest::array::uniform6(-50i32..50),
        ) {
            let a = crate::core::dice::Die::new(fa);
            let b = crate::core::dice::Die::new(fb);
            let fwd = super::beat_stats(&a, &b);
            let rev = super::beat_stats(&b, &a);
            prop_assert_eq!(fwd.ties, rev.ties);
            prop_assert_eq!(fwd.wins + rev.wins + fwd.ties, 36);
        }
    }
}
