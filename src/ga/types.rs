//! Core type definitions for the GA engine.
//!
//! [`BitGene`] is the individual, and [`FitnessEvaluator`] is the contract
//! between the generic engine and the caller's scoring function.

use super::runner::GenerationStats;
use rand::Rng;
use std::fmt;

/// A fixed-length string of bits: one candidate solution.
///
/// The engine never interprets the bits. Meaning (which items are chosen,
/// what number is encoded) lives entirely in the caller's evaluator; see
/// [`weighted_sum`](BitGene::weighted_sum) for the usual conversion.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::BitGene;
///
/// let gene = BitGene::from_bits(vec![true, false, true]);
/// assert_eq!(gene.len(), 3);
/// assert_eq!(gene.count_ones(), 2);
/// assert_eq!(gene.to_string(), "101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitGene {
    bits: Vec<bool>,
}

impl BitGene {
    /// Creates a gene of `length` bits, each drawn from Bernoulli(0.5).
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.random_bool(0.5)).collect(),
        }
    }

    /// Wraps an existing bit vector.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if the gene holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits as a slice.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Bit at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Negates the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn flip(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Iterates over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Sums `weights[i]` over every set bit `i`.
    ///
    /// This is the bit-to-number boundary: a set bit counts as 1, a clear
    /// bit as 0. Extra weights beyond the gene length are ignored, missing
    /// ones count as 0.
    ///
    /// ```
    /// use u_bitga::ga::BitGene;
    ///
    /// let gene = BitGene::from_bits(vec![true, false, true]);
    /// assert!((gene.weighted_sum(&[1.5, 10.0, 2.0]) - 3.5).abs() < 1e-12);
    /// ```
    pub fn weighted_sum(&self, weights: &[f64]) -> f64 {
        self.bits
            .iter()
            .zip(weights)
            .filter(|(&b, _)| b)
            .map(|(_, &w)| w)
            .sum()
    }
}

impl From<Vec<bool>> for BitGene {
    fn from(bits: Vec<bool>) -> Self {
        Self::from_bits(bits)
    }
}

impl fmt::Display for BitGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Builds `size` random genes of `length` bits each.
pub fn random_population<R: Rng>(size: usize, length: usize, rng: &mut R) -> Vec<BitGene> {
    (0..size).map(|_| BitGene::random(length, rng)).collect()
}

/// Scores a gene. Higher is better.
///
/// Implementations must return a finite value `>= 0` for every gene of the
/// configured length, and should be pure: the engine may call `evaluate`
/// on the same gene more than once.
///
/// Any `Fn(&BitGene) -> f64` closure is an evaluator:
///
/// ```
/// use u_bitga::ga::{BitGene, FitnessEvaluator};
///
/// let ones = |g: &BitGene| g.count_ones() as f64;
/// assert_eq!(ones.evaluate(&BitGene::from_bits(vec![true, true])), 2.0);
/// ```
///
/// Implement the trait on a struct to also receive per-generation
/// statistics through [`on_generation`](FitnessEvaluator::on_generation).
pub trait FitnessEvaluator {
    /// Returns the fitness of `gene`.
    fn evaluate(&self, gene: &BitGene) -> f64;

    /// Called after each recorded generation, including the initial one.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}

impl<F> FitnessEvaluator for F
where
    F: Fn(&BitGene) -> f64,
{
    fn evaluate(&self, gene: &BitGene) -> f64 {
        self(gene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_length() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in [1, 2, 7, 64, 100] {
            assert_eq!(BitGene::random(len, &mut rng).len(), len);
        }
    }

    #[test]
    fn test_random_is_roughly_balanced() {
        let mut rng = StdRng::seed_from_u64(7);
        let gene = BitGene::random(10_000, &mut rng);
        let ones = gene.count_ones();
        assert!(
            (4_500..5_500).contains(&ones),
            "expected about half ones, got {ones}"
        );
    }

    #[test]
    fn test_random_population_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let pop = random_population(12, 5, &mut rng);
        assert_eq!(pop.len(), 12);
        assert!(pop.iter().all(|g| g.len() == 5));
    }

    #[test]
    fn test_flip_is_involution() {
        let mut gene = BitGene::from_bits(vec![false, true, false]);
        gene.flip(1);
        assert_eq!(gene.bits(), &[false, false, false]);
        gene.flip(1);
        assert_eq!(gene.bits(), &[false, true, false]);
    }

    #[test]
    fn test_get_out_of_range() {
        let gene = BitGene::from_bits(vec![true]);
        assert_eq!(gene.get(0), Some(true));
        assert_eq!(gene.get(1), None);
    }

    #[test]
    fn test_weighted_sum_ignores_clear_bits() {
        let gene = BitGene::from_bits(vec![false, true, true, false]);
        let sum = gene.weighted_sum(&[100.0, 1.0, 2.0, 100.0]);
        assert!((sum - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let gene: BitGene = vec![true, true, false, true].into();
        assert_eq!(gene.to_string(), "1101");
    }

    struct Counting;

    impl FitnessEvaluator for Counting {
        fn evaluate(&self, gene: &BitGene) -> f64 {
            gene.count_ones() as f64
        }
    }

    #[test]
    fn test_struct_and_closure_evaluators() {
        let gene = BitGene::from_bits(vec![true, false, true]);
        assert_eq!(Counting.evaluate(&gene), 2.0);

        let constant = |_: &BitGene| 1.0;
        assert_eq!(constant.evaluate(&gene), 1.0);
    }
}
