//! Bit-string genetic operators.
//!
//! # Crossover
//!
//! - [`single_point_crossover`]: one child, `mother[..k] ++ father[k..]` with
//!   `k` uniform in `0..L`
//! - [`crossover_at`]: the same splice at a caller-chosen point
//!
//! # Mutation
//!
//! - [`flip_mutation`]: negate one uniformly chosen bit
//!
//! Repeated calls to [`flip_mutation`] on the same gene may hit the same
//! position twice and undo each other; the mutation count is a knob on
//! aggregate pressure, not a per-individual guarantee.

use super::types::BitGene;
use crate::error::{GaError, Result};
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover producing one child.
///
/// The cut point `k` is drawn uniformly from `0..L`. With `k = 0` the child
/// is an exact copy of `father`.
///
/// # Errors
/// [`GaError::LengthMismatch`] if the parents differ in length.
pub fn single_point_crossover<R: Rng>(
    mother: &BitGene,
    father: &BitGene,
    rng: &mut R,
) -> Result<BitGene> {
    check_lengths(mother, father)?;
    if mother.is_empty() {
        return Ok(mother.clone());
    }
    let point = rng.random_range(0..mother.len());
    crossover_at(mother, father, point)
}

/// Splices `mother[..point]` with `father[point..]`.
///
/// `point` may equal `L`, which yields a copy of `mother`.
///
/// # Errors
/// [`GaError::LengthMismatch`] if the parents differ in length or `point`
/// exceeds their length.
pub fn crossover_at(mother: &BitGene, father: &BitGene, point: usize) -> Result<BitGene> {
    check_lengths(mother, father)?;
    let n = mother.len();
    if point > n {
        return Err(GaError::LengthMismatch {
            expected: n,
            actual: point,
        });
    }

    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&mother.bits()[..point]);
    child.extend_from_slice(&father.bits()[point..]);
    Ok(BitGene::from_bits(child))
}

fn check_lengths(mother: &BitGene, father: &BitGene) -> Result<()> {
    if mother.len() != father.len() {
        return Err(GaError::LengthMismatch {
            expected: mother.len(),
            actual: father.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Flips one uniformly chosen bit in place and returns its index.
///
/// Returns `None` (and does nothing) for an empty gene.
pub fn flip_mutation<R: Rng>(gene: &mut BitGene, rng: &mut R) -> Option<usize> {
    if gene.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..gene.len());
    gene.flip(idx);
    Some(idx)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gene(s: &str) -> BitGene {
        BitGene::from_bits(s.chars().map(|c| c == '1').collect())
    }

    // ---- Crossover ----

    #[test]
    fn test_crossover_at_every_point() {
        let mother = gene("11111");
        let father = gene("00000");
        for k in 0..=5 {
            let child = crossover_at(&mother, &father, k).unwrap();
            assert_eq!(child.len(), 5);
            assert_eq!(&child.bits()[..k], &mother.bits()[..k]);
            assert_eq!(&child.bits()[k..], &father.bits()[k..]);
        }
    }

    #[test]
    fn test_crossover_at_zero_copies_father() {
        let mother = gene("1010");
        let father = gene("0110");
        assert_eq!(crossover_at(&mother, &father, 0).unwrap(), father);
    }

    #[test]
    fn test_crossover_at_last_index_keeps_mother_prefix() {
        let mother = gene("1111");
        let father = gene("0000");
        assert_eq!(crossover_at(&mother, &father, 3).unwrap(), gene("1110"));
    }

    #[test]
    fn test_crossover_point_out_of_range() {
        let g = gene("101");
        assert!(matches!(
            crossover_at(&g, &g, 4),
            Err(GaError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = single_point_crossover(&gene("101"), &gene("10"), &mut rng).unwrap_err();
        assert_eq!(
            err,
            GaError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_single_point_child_is_a_splice() {
        let mut rng = StdRng::seed_from_u64(42);
        let mother = gene("11111111");
        let father = gene("00000000");
        for _ in 0..200 {
            let child = single_point_crossover(&mother, &father, &mut rng).unwrap();
            assert_eq!(child.len(), 8);
            // All ones must precede all zeros.
            let k = child.count_ones();
            assert!(k < 8, "cut point is drawn from 0..L, never L");
            assert!(child.bits()[..k].iter().all(|&b| b));
            assert!(child.bits()[k..].iter().all(|&b| !b));
        }
    }

    #[test]
    fn test_single_point_covers_zero_cut() {
        let mut rng = StdRng::seed_from_u64(3);
        let mother = gene("11");
        let father = gene("00");
        let mut saw_father_copy = false;
        for _ in 0..100 {
            if single_point_crossover(&mother, &father, &mut rng).unwrap() == father {
                saw_father_copy = true;
                break;
            }
        }
        assert!(saw_father_copy, "k = 0 should occur for L = 2");
    }

    // ---- Mutation ----

    #[test]
    fn test_flip_changes_exactly_one_bit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let original = BitGene::random(16, &mut rng);
            let mut mutated = original.clone();
            let idx = flip_mutation(&mut mutated, &mut rng).unwrap();
            let diffs: Vec<usize> = (0..16)
                .filter(|&i| original.get(i) != mutated.get(i))
                .collect();
            assert_eq!(diffs, vec![idx]);
        }
    }

    #[test]
    fn test_flip_single_bit_twice_restores() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut g = gene("0");
        flip_mutation(&mut g, &mut rng);
        assert_eq!(g, gene("1"));
        flip_mutation(&mut g, &mut rng);
        assert_eq!(g, gene("0"));
    }

    #[test]
    fn test_flip_empty_gene() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut g = BitGene::from_bits(vec![]);
        assert_eq!(flip_mutation(&mut g, &mut rng), None);
    }
}
