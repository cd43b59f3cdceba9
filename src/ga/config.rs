//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::error::{GaError, Result};

/// Configuration for the bit-string GA.
///
/// # Defaults
///
/// ```
/// use u_bitga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.generations, 50);
/// assert_eq!(config.gene_length, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_gene_length(32)
///     .with_crossover_rate(0.6)
///     .with_mutation_rate(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of genes in every generation (`P`).
    pub population_size: usize,

    /// Number of bits per gene (`L`).
    pub gene_length: usize,

    /// Share of each new generation produced by crossover (0.0–1.0).
    ///
    /// The remaining `1 - r` share is resampled survivors, copied unchanged.
    pub crossover_rate: f64,

    /// Mutation pressure (0.0–1.0).
    ///
    /// Each generation performs `round(m·P)` single-bit flips on randomly
    /// chosen individuals, with replacement.
    pub mutation_rate: f64,

    /// Number of generations to run (`G`). Zero evaluates only the initial
    /// random population.
    pub generations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            gene_length: 100,
            crossover_rate: 0.4,
            mutation_rate: 0.3,
            generations: 50,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the gene length in bits.
    pub fn with_gene_length(mut self, n: usize) -> Self {
        self.gene_length = n;
        self
    }

    /// Sets the crossover rate.
    ///
    /// Not clamped: an out-of-range value is reported by
    /// [`validate`](Self::validate).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate. Not clamped.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Survivors resampled unchanged each generation: `round((1-r)·P)`.
    pub fn survivor_count(&self) -> usize {
        scaled_count(1.0 - self.crossover_rate, self.population_size)
    }

    /// Size of the crossover parent pool each generation: `round(r·P)`.
    pub fn offspring_count(&self) -> usize {
        scaled_count(self.crossover_rate, self.population_size)
    }

    /// Bit flips per generation: `round(m·P)`.
    pub fn mutation_count(&self) -> usize {
        scaled_count(self.mutation_rate, self.population_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GaError::InvalidConfiguration(
                "population_size must be at least 1".into(),
            ));
        }
        if self.gene_length == 0 {
            return Err(GaError::InvalidConfiguration(
                "gene_length must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GaError::InvalidConfiguration(format!(
                "crossover_rate ({}) must be within [0, 1]",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidConfiguration(format!(
                "mutation_rate ({}) must be within [0, 1]",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

/// `round(rate · n)` with ties to even.
fn scaled_count(rate: f64, n: usize) -> usize {
    (rate * n as f64).round_ties_even().max(0.0) as usize
}
