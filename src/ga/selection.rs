//! Fitness-proportionate (roulette-wheel) selection.
//!
//! [`ProbabilityDistribution`] normalizes a population's fitness values into
//! selection probabilities and draws indices from them.
//!
//! # Random starting offset
//!
//! The textbook wheel walks from index 0. Here each draw starts at a
//! uniformly random index and walks forward, wrapping around. When rounding
//! leaves the cumulative sum a hair below 1, the shortfall then lands on a
//! random individual instead of always on the last one. The walk visits
//! every index at most once, so it terminates even if the threshold is
//! never reached.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::{BitGene, FitnessEvaluator};
use crate::error::{GaError, Result};
use rand::Rng;

/// Selection probabilities for one generation.
///
/// `probability(i) = fitness(i) / total`. Built fresh every generation and
/// read-only afterwards.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::ProbabilityDistribution;
///
/// let dist = ProbabilityDistribution::from_fitness(&[1.0, 3.0]).unwrap();
/// assert!((dist.probability(1) - 0.75).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityDistribution {
    probabilities: Vec<f64>,
    total_fitness: f64,
}

impl ProbabilityDistribution {
    /// Evaluates every member of `population` and normalizes the scores.
    ///
    /// # Errors
    /// - [`GaError::InvalidFitness`] if a score is negative or non-finite
    /// - [`GaError::DegenerateFitness`] if the scores sum to zero
    pub fn build<E: FitnessEvaluator + ?Sized>(
        population: &[BitGene],
        evaluator: &E,
    ) -> Result<Self> {
        let fitness: Vec<f64> = population.iter().map(|g| evaluator.evaluate(g)).collect();
        Self::from_fitness(&fitness)
    }

    /// Normalizes precomputed fitness values, one per individual.
    ///
    /// # Errors
    /// Same as [`build`](Self::build).
    pub fn from_fitness(fitness: &[f64]) -> Result<Self> {
        check_fitness(fitness)?;

        // Normalize against the maximum first so large finite scores
        // cannot overflow the sum.
        let max = fitness.iter().copied().fold(0.0, f64::max);
        let total: f64 = fitness.iter().sum();
        if max <= 0.0 {
            return Err(GaError::DegenerateFitness { total });
        }
        let scaled_total: f64 = fitness.iter().map(|f| f / max).sum();

        Ok(Self {
            probabilities: fitness.iter().map(|f| (f / max) / scaled_total).collect(),
            total_fitness: total,
        })
    }

    /// Number of individuals covered.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Returns `true` if the distribution covers no individuals.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Selection probability of individual `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn probability(&self, index: usize) -> f64 {
        self.probabilities[index]
    }

    /// All probabilities, in population order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Sum of the raw fitness values. May be `+inf` when large scores
    /// overflow; the probabilities are unaffected.
    pub fn total_fitness(&self) -> f64 {
        self.total_fitness
    }

    /// Roulette-wheel draw with a random starting offset.
    ///
    /// # Panics
    /// Panics if the distribution is empty.
    pub fn sample_index<R: Rng>(&self, rng: &mut R) -> usize {
        assert!(!self.is_empty(), "cannot select from empty population");
        let start = rng.random_range(0..self.len());
        let threshold = rng.random_range(0.0..1.0);
        self.locate(start, threshold)
    }

    /// Deterministic part of [`sample_index`](Self::sample_index).
    ///
    /// Walks forward from `start`, wrapping modulo the population size and
    /// accumulating probabilities, and returns the first index at which the
    /// running sum reaches `threshold`. If one full lap never reaches it,
    /// returns the last index visited, `(start + n - 1) % n`.
    ///
    /// # Panics
    /// Panics if the distribution is empty.
    pub fn locate(&self, start: usize, threshold: f64) -> usize {
        let n = self.len();
        assert!(n > 0, "cannot select from empty population");

        let mut cumulative = 0.0;
        let mut idx = start % n;
        for _ in 0..n {
            cumulative += self.probabilities[idx];
            if cumulative >= threshold {
                return idx;
            }
            idx = (idx + 1) % n;
        }

        (start % n + n - 1) % n // lap exhausted by rounding
    }

    /// Draws `n` genes with replacement, returning independent copies.
    ///
    /// # Panics
    /// Panics if `population` is shorter than the distribution, or if the
    /// distribution is empty and `n > 0`.
    pub fn select_n<R: Rng>(&self, population: &[BitGene], n: usize, rng: &mut R) -> Vec<BitGene> {
        debug_assert_eq!(population.len(), self.len());
        (0..n)
            .map(|_| population[self.sample_index(rng)].clone())
            .collect()
    }
}

/// Rejects negative or non-finite scores.
pub(crate) fn check_fitness(fitness: &[f64]) -> Result<()> {
    match fitness
        .iter()
        .enumerate()
        .find(|(_, f)| !f.is_finite() || **f < 0.0)
    {
        Some((index, &value)) => Err(GaError::InvalidFitness { index, value }),
        None => Ok(()),
    }
}
