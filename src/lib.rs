//! Generational genetic algorithm over fixed-length bit strings.
//!
//! Evolves a population of [`BitGene`](ga::BitGene)s under a caller-supplied
//! fitness function using:
//!
//! - **Roulette-wheel selection** with a random starting offset and a
//!   bounded wrap-around walk
//! - **Single-point crossover**, each crossover child entering the next
//!   generation twice
//! - **Bit-flip mutation** applied a fixed number of times per generation
//!
//! The engine is single-threaded and takes its randomness from an injected
//! [`rand::Rng`], so seeded runs are reproducible.
//!
//! ```
//! use u_bitga::ga::{BitGene, GaConfig, GaRunner};
//!
//! // Choose items whose weights sum close to 10.
//! let weights = [3.0, 1.5, 4.0, 2.5, 6.0, 0.5];
//! let fitness = |g: &BitGene| (-0.1 * (10.0 - g.weighted_sum(&weights)).powi(2)).exp();
//!
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_gene_length(weights.len())
//!     .with_generations(30)
//!     .with_seed(42);
//! let result = GaRunner::run(&fitness, &config).unwrap();
//! assert_eq!(result.history.len(), 31);
//! ```
//!
//! # Architecture
//!
//! - [`ga`]: genes, operators, selection, configuration and the
//!   generational loop
//! - [`error`]: the crate's [`GaError`](error::GaError) and `Result` alias
//!
//! Logging goes through the [`log`] facade; install any logger to see
//! per-generation progress at `debug` level.

pub mod error;
pub mod ga;

pub use error::{GaError, Result};
