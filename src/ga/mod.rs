//! Generational bit-string Genetic Algorithm.
//!
//! Candidate solutions are fixed-length bit strings ([`BitGene`]). The caller
//! supplies only a [`FitnessEvaluator`]; the engine handles selection,
//! crossover, mutation and bookkeeping, and never interprets the bits.
//!
//! # Generation step
//!
//! 1. Normalize fitness into a [`ProbabilityDistribution`]
//! 2. Resample `round((1-r)·P)` survivors, unchanged
//! 3. Draw `round(r·P)` parents; each consecutive pair yields one
//!    single-point crossover child, added twice
//! 4. Top up to exactly `P` with extra crossovers, then truncate to `P`
//! 5. Apply `round(m·P)` single-bit flips to randomly chosen individuals
//! 6. Replace the population and record [`GenerationStats`]
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters
//! - [`EvolutionEngine`]: Owns the population; one generation per `step`
//! - [`GaRunner`]: Runs an engine to completion
//! - [`GaResult`]: Final generation's best plus per-generation history
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover and bit-flip mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{run, EvolutionEngine, GaResult, GaRunner, GenerationStats};
pub use selection::ProbabilityDistribution;
pub use types::{random_population, BitGene, FitnessEvaluator};
