//! Generational loop execution.
//!
//! [`EvolutionEngine`] owns the population and advances it one generation at
//! a time: selection → crossover offspring → mutation → replace → record.
//! [`GaRunner`] and [`run`] drive an engine for the configured number of
//! generations and package the outcome as a [`GaResult`].

use super::config::GaConfig;
use super::operators::{flip_mutation, single_point_crossover};
use super::selection::{check_fitness, ProbabilityDistribution};
use super::types::{random_population, BitGene, FitnessEvaluator};
use crate::error::{GaError, Result};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Summary of one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 0 for the initial random population, then 1, 2, … per generation.
    pub generation: usize,

    /// Highest fitness in the population, or 0.0 if no individual scored
    /// above zero.
    pub best_fitness: f64,

    /// First individual (in population order) achieving `best_fitness`.
    ///
    /// `None` when no individual scored above zero.
    pub best_gene: Option<BitGene>,

    /// Mean fitness over the population.
    pub mean_fitness: f64,
}

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Best fitness of the final generation.
    ///
    /// This is the last generation's best, not the historical maximum.
    pub best_fitness: f64,

    /// Best gene of the final generation.
    pub best_gene: Option<BitGene>,

    /// Number of generations executed (excluding the initial population).
    pub generations: usize,

    /// One entry per recorded generation; entry 0 is the initial population.
    pub history: Vec<GenerationStats>,
}

impl GaResult {
    /// Best fitness of each recorded generation, for plotting.
    pub fn fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.best_fitness).collect()
    }
}

/// Owns a population and evolves it one generation per [`step`](Self::step).
///
/// # Usage
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_bitga::ga::{BitGene, EvolutionEngine, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(8)
///     .with_gene_length(6);
/// let ones = |g: &BitGene| g.count_ones() as f64 + 1.0;
/// let mut engine = EvolutionEngine::new(&ones, &config, StdRng::seed_from_u64(1)).unwrap();
/// engine.step().unwrap();
/// assert_eq!(engine.population().len(), 8);
/// assert_eq!(engine.history().len(), 2);
/// ```
pub struct EvolutionEngine<'a, E: ?Sized, R> {
    evaluator: &'a E,
    config: GaConfig,
    rng: R,
    population: Vec<BitGene>,
    fitness: Vec<f64>,
    history: Vec<GenerationStats>,
}

impl<'a, E, R> EvolutionEngine<'a, E, R>
where
    E: FitnessEvaluator + ?Sized,
    R: Rng,
{
    /// Validates `config`, draws a random initial population, evaluates it,
    /// and records it as generation 0.
    ///
    /// # Errors
    /// - [`GaError::InvalidConfiguration`] before any work is done
    /// - [`GaError::InvalidFitness`] if the evaluator scores an initial gene
    ///   negative or non-finite
    pub fn new(evaluator: &'a E, config: &GaConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let population = random_population(config.population_size, config.gene_length, &mut rng);
        Self::with_population(evaluator, config, rng, population)
    }

    /// Like [`new`](Self::new) but starts from a caller-supplied population.
    ///
    /// # Errors
    /// - [`GaError::InvalidConfiguration`] if the config is invalid or the
    ///   population size differs from `population_size`
    /// - [`GaError::LengthMismatch`] if a gene is not `gene_length` bits
    /// - [`GaError::InvalidFitness`] as for [`new`](Self::new)
    pub fn with_population(
        evaluator: &'a E,
        config: &GaConfig,
        rng: R,
        population: Vec<BitGene>,
    ) -> Result<Self> {
        config.validate()?;
        if population.len() != config.population_size {
            return Err(GaError::InvalidConfiguration(format!(
                "initial population has {} genes, expected {}",
                population.len(),
                config.population_size
            )));
        }
        check_gene_lengths(&population, config.gene_length)?;

        let mut engine = Self {
            evaluator,
            config: config.clone(),
            rng,
            population: Vec::new(),
            fitness: Vec::new(),
            history: Vec::with_capacity(config.generations + 1),
        };
        engine.record(0, population)?;
        Ok(engine)
    }

    /// Runs one generation and returns its statistics.
    ///
    /// # Errors
    /// [`GaError::DegenerateFitness`] if the current population cannot be
    /// turned into a selection distribution, or [`GaError::InvalidFitness`]
    /// if the evaluator scores a new gene negative or non-finite. The
    /// population and history are left untouched in either case.
    pub fn step(&mut self) -> Result<&GenerationStats> {
        let p = self.config.population_size;
        let distribution = ProbabilityDistribution::from_fitness(&self.fitness)?;

        // Survivors
        let mut next_gen =
            distribution.select_n(&self.population, self.config.survivor_count().min(p), &mut self.rng);

        // Offspring
        let parents =
            distribution.select_n(&self.population, self.config.offspring_count(), &mut self.rng);
        let room = p.saturating_sub(next_gen.len());
        next_gen.extend(paired_offspring(&parents, room, &mut self.rng)?);

        // Top up any shortfall left by rounding or an odd parent pool.
        while next_gen.len() < p {
            let (mother, father) = if parents.is_empty() {
                (
                    &self.population[distribution.sample_index(&mut self.rng)],
                    &self.population[distribution.sample_index(&mut self.rng)],
                )
            } else {
                (
                    &parents[self.rng.random_range(0..parents.len())],
                    &parents[self.rng.random_range(0..parents.len())],
                )
            };
            trace!("top-up crossover at size {}/{}", next_gen.len(), p);
            next_gen.push(single_point_crossover(mother, father, &mut self.rng)?);
        }
        next_gen.truncate(p);

        // Mutation, with replacement over individuals.
        for _ in 0..self.config.mutation_count() {
            let idx = self.rng.random_range(0..next_gen.len());
            flip_mutation(&mut next_gen[idx], &mut self.rng);
        }

        check_gene_lengths(&next_gen, self.config.gene_length)?;

        let generation = self.generation() + 1;
        self.record(generation, next_gen)?;
        Ok(self.latest())
    }

    /// Number of generations executed so far.
    pub fn generation(&self) -> usize {
        self.history.len() - 1
    }

    /// The current population.
    pub fn population(&self) -> &[BitGene] {
        &self.population
    }

    /// Fitness of each member of the current population.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Statistics recorded so far, starting with the initial population.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Consumes the engine and reports the latest generation.
    pub fn into_result(self) -> GaResult {
        let last = self.latest().clone();
        GaResult {
            best_fitness: last.best_fitness,
            best_gene: last.best_gene,
            generations: last.generation,
            history: self.history,
        }
    }

    fn latest(&self) -> &GenerationStats {
        &self.history[self.history.len() - 1]
    }

    /// Evaluates `population`, installs it as the current one and appends
    /// its statistics. Nothing changes if a score breaks the contract.
    fn record(&mut self, generation: usize, population: Vec<BitGene>) -> Result<()> {
        let fitness = evaluate_population(self.evaluator, &population);
        check_fitness(&fitness)?;

        let (best_fitness, best_idx) = find_best(&fitness);
        let mean_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;
        let stats = GenerationStats {
            generation,
            best_fitness,
            best_gene: best_idx.map(|i| population[i].clone()),
            mean_fitness,
        };
        self.population = population;
        self.fitness = fitness;

        debug!(
            "generation {}: best {:.6}, mean {:.6}",
            generation, best_fitness, mean_fitness
        );
        self.evaluator.on_generation(&stats);
        self.history.push(stats);
        Ok(())
    }
}

/// Executes the GA for a fixed number of generations.
///
/// ```
/// use u_bitga::ga::{BitGene, GaConfig, GaRunner};
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_gene_length(10)
///     .with_generations(5)
///     .with_seed(42);
/// let result = GaRunner::run(&|g: &BitGene| g.count_ones() as f64 + 1.0, &config).unwrap();
/// assert_eq!(result.history.len(), 6);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with an RNG seeded from `config.seed` (or OS entropy).
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] before the run starts;
    /// [`GaError::DegenerateFitness`] / [`GaError::InvalidFitness`] abort the
    /// run at the generation where selection becomes impossible.
    pub fn run<E: FitnessEvaluator + ?Sized>(evaluator: &E, config: &GaConfig) -> Result<GaResult> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::run_with_rng(evaluator, config, rng)
    }

    /// Runs the GA with a caller-owned random source.
    pub fn run_with_rng<E, R>(evaluator: &E, config: &GaConfig, rng: R) -> Result<GaResult>
    where
        E: FitnessEvaluator + ?Sized,
        R: Rng,
    {
        config.validate()?;
        info!(
            "starting GA: population {}, gene length {}, crossover {}, mutation {}, {} generations",
            config.population_size,
            config.gene_length,
            config.crossover_rate,
            config.mutation_rate,
            config.generations
        );

        let mut engine = EvolutionEngine::new(evaluator, config, rng)?;
        for _ in 0..config.generations {
            engine.step()?;
        }

        let result = engine.into_result();
        info!(
            "GA finished after {} generations, best fitness {:.6}",
            result.generations, result.best_fitness
        );
        Ok(result)
    }
}

/// Runs the GA from positional parameters with an entropy-seeded RNG.
///
/// Equivalent to building a [`GaConfig`] and calling [`GaRunner::run`].
pub fn run<E: FitnessEvaluator + ?Sized>(
    population_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    generation_count: usize,
    gene_length: usize,
    evaluator: &E,
) -> Result<GaResult> {
    let config = GaConfig {
        population_size,
        gene_length,
        crossover_rate,
        mutation_rate,
        generations: generation_count,
        seed: None,
    };
    GaRunner::run(evaluator, &config)
}

/// Crosses consecutive parent pairs, mother `pair[1]` and father `pair[0]`.
///
/// Each child is added twice as identical copies. Stops once `room`
/// children exist, so the result may exceed `room` by one.
fn paired_offspring<R: Rng>(parents: &[BitGene], room: usize, rng: &mut R) -> Result<Vec<BitGene>> {
    let mut children = Vec::with_capacity(parents.len());
    for pair in parents.chunks_exact(2) {
        if children.len() >= room {
            break;
        }
        let child = single_point_crossover(&pair[1], &pair[0], rng)?;
        children.push(child.clone());
        children.push(child);
    }
    Ok(children)
}

/// Evaluate all individuals in the population.
fn evaluate_population<E: FitnessEvaluator + ?Sized>(
    evaluator: &E,
    population: &[BitGene],
) -> Vec<f64> {
    population.iter().map(|g| evaluator.evaluate(g)).collect()
}

/// Highest strictly positive fitness and its first index.
///
/// Returns `(0.0, None)` if nothing scores above zero.
fn find_best(fitness: &[f64]) -> (f64, Option<usize>) {
    let mut best = 0.0;
    let mut best_idx = None;
    for (i, &f) in fitness.iter().enumerate() {
        if f > best {
            best = f;
            best_idx = Some(i);
        }
    }
    (best, best_idx)
}

fn check_gene_lengths(population: &[BitGene], expected: usize) -> Result<()> {
    match population.iter().find(|g| g.len() != expected) {
        Some(g) => Err(GaError::LengthMismatch {
            expected,
            actual: g.len(),
        }),
        None => Ok(()),
    }
}

// ============================================================================
// Tests
// ============================================================================
