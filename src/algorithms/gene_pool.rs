use log::{debug, info};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::algorithms::algorithm::{crossover_pairs, evaluate_population, mutate_all};
use crate::algorithms::Algorithm;
use crate::core::utils::{get_rng, is_probability};
use crate::core::{EvoError, Genotype};
use crate::operators::Selection;
use crate::utils::argmax;

fn default_mutation_rate() -> f64 {
    0.1
}

fn default_crossover_rate() -> f64 {
    1.0
}

/// Input arguments for the single-objective [`GenePool`].
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GenePoolArg {
    /// The number of individuals in the population. This must be larger than `0`.
    pub population_size: usize,
    /// The probability, in the [0, 1] range, of mutating each offspring. This defaults to `0.1`.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// The probability, in the [0, 1] range, of recombining a pair of selected parents. When the
    /// parents are not recombined, they are passed to the next generation. This defaults to `1`.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// The strategy used to select the parents. This defaults to [`Selection::RouletteWheel`].
    #[serde(default)]
    pub selection: Selection,
    /// Whether the fitness should be calculated in threads. This defaults to `false`.
    #[serde(default)]
    pub parallel: Option<bool>,
    /// The seed used in the random number generator (RNG). You can specify a seed in case you want
    /// to try to reproduce results. When `None`, the generator is seeded from the system entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GenePoolArg {
    /// Create the arguments with the default options.
    ///
    /// # Arguments
    ///
    /// * `population_size`: The number of individuals in the population.
    ///
    /// returns: `GenePoolArg`
    pub fn new(population_size: usize) -> Self {
        Self {
            population_size,
            mutation_rate: default_mutation_rate(),
            crossover_rate: default_crossover_rate(),
            selection: Selection::default(),
            parallel: None,
            seed: None,
        }
    }
}

/// A single-objective gene pool. At each generation, the parents are chosen with the configured
/// [`Selection`] strategy using the normalised fitness; adjacent parents are recombined and the
/// offspring are mutated. The offspring then replace the whole population.
///
/// There is no elitism: the best individual of a generation may be lost in the next one.
///
/// The fitness returned by [`Genotype::calculate_fitness`] is maximised and normalised so that
/// its sum is `1`; this returns an error if the total fitness is zero.
pub struct GenePool<G: Genotype<Fitness = f64>> {
    /// The data shared by the genotypes.
    context: G::Context,
    /// The options.
    args: GenePoolArg,
    /// The individuals of the current generation.
    population: Vec<G>,
    /// The fitness of the current generation.
    raw_fitness: Vec<f64>,
    /// The fitness of the current generation divided by its sum.
    fitness: Vec<f64>,
    /// The current generation.
    generation: usize,
    /// The random number generator.
    rng: Box<dyn RngCore>,
}

impl<G: Genotype<Fitness = f64>> GenePool<G> {
    /// Initialise the gene pool. This returns an error if the population size is `0`, a rate is
    /// outside the [0, 1] range or the selection options are not valid.
    ///
    /// # Arguments
    ///
    /// * `context`: The data shared by the genotypes, passed to [`Genotype::create_random`].
    /// * `args`: The [`GenePoolArg`] arguments to customise the pool behaviour.
    ///
    /// returns: `Result<GenePool<G>, EvoError>`
    pub fn new(context: G::Context, args: GenePoolArg) -> Result<Self, EvoError> {
        let name = "GenePool".to_string();
        if args.population_size == 0 {
            return Err(EvoError::Configuration(
                name,
                "The population size must be larger than 0".to_string(),
            ));
        }
        if !is_probability(args.mutation_rate) {
            return Err(EvoError::Configuration(
                name,
                format!(
                    "The mutation rate ({}) must be between 0 and 1",
                    args.mutation_rate
                ),
            ));
        }
        if !is_probability(args.crossover_rate) {
            return Err(EvoError::Configuration(
                name,
                format!(
                    "The crossover rate ({}) must be between 0 and 1",
                    args.crossover_rate
                ),
            ));
        }
        args.selection.validate()?;
        info!("{}", Self::algorithm_option_str(&args));

        Ok(Self {
            context,
            rng: get_rng(args.seed),
            args,
            population: Vec::new(),
            raw_fitness: Vec::new(),
            fitness: Vec::new(),
            generation: 0,
        })
    }

    /// Get a string listing the algorithm options.
    ///
    /// # Arguments
    ///
    /// * `args`: The pool options.
    ///
    /// returns: `String`
    fn algorithm_option_str(args: &GenePoolArg) -> String {
        format!(
            "Algorithm options are:\n\t* Population size {:>17}\n\t* Mutation rate {:>19}\n\t* Crossover rate {:>18}\n\t* Selection {:>23}",
            args.population_size, args.mutation_rate, args.crossover_rate, args.selection
        )
    }

    /// Calculate the fitness of a population and normalise it. This returns an error if any
    /// fitness is NaN or the total fitness is zero or not finite.
    ///
    /// # Arguments
    ///
    /// * `population`: The genotypes to evaluate.
    ///
    /// returns: `Result<(Vec<f64>, Vec<f64>), EvoError>`. The raw and normalised fitness.
    fn evaluate(&self, population: &[G]) -> Result<(Vec<f64>, Vec<f64>), EvoError> {
        let raw_fitness =
            evaluate_population(population, self.args.parallel.unwrap_or(false));
        if let Some(idx) = raw_fitness.iter().position(|f| f.is_nan()) {
            return Err(EvoError::NaN("fitness".to_string(), idx));
        }

        let total: f64 = raw_fitness.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return Err(EvoError::DegenerateFitness(total));
        }
        let fitness = raw_fitness.iter().map(|f| f / total).collect();
        Ok((raw_fitness, fitness))
    }

    /// Get the individuals of the current generation.
    ///
    /// return: `&[G]`
    pub fn population(&self) -> &[G] {
        &self.population
    }

    /// Get the normalised fitness of the current generation. The values sum to `1`.
    ///
    /// return: `&[f64]`
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Get the fitness of the current generation as returned by [`Genotype::calculate_fitness`].
    ///
    /// return: `&[f64]`
    pub fn raw_fitness(&self) -> &[f64] {
        &self.raw_fitness
    }

    /// Get the index of the individual with the largest fitness. When more individuals share
    /// the largest fitness, the first one is returned.
    ///
    /// return: `Result<usize, EvoError>`
    pub fn best_index(&self) -> Result<usize, EvoError> {
        argmax(&self.fitness).ok_or(EvoError::EmptyPopulation(self.name()))
    }

    /// Get the individual with the largest fitness.
    ///
    /// return: `Result<&G, EvoError>`
    pub fn best_gene(&self) -> Result<&G, EvoError> {
        Ok(&self.population[self.best_index()?])
    }

    /// Get the normalised fitness of the individual with the largest fitness.
    ///
    /// return: `Result<f64, EvoError>`
    pub fn best_fitness(&self) -> Result<f64, EvoError> {
        Ok(self.fitness[self.best_index()?])
    }

    /// Get the pool options.
    ///
    /// return: `&GenePoolArg`
    pub fn args(&self) -> &GenePoolArg {
        &self.args
    }
}

impl<G: Genotype<Fitness = f64>> Algorithm for GenePool<G> {
    fn name(&self) -> String {
        "GenePool".to_string()
    }

    fn initialize_population(&mut self) -> Result<(), EvoError> {
        info!("Creating initial random population");
        let population: Vec<G> = (0..self.args.population_size)
            .map(|_| G::create_random(&self.context, &mut self.rng))
            .collect();
        let (raw_fitness, fitness) = self.evaluate(&population)?;

        self.population = population;
        self.raw_fitness = raw_fitness;
        self.fitness = fitness;
        self.generation = 1;
        info!("Initial evaluation completed");
        Ok(())
    }

    fn generate(&mut self) -> Result<(), EvoError> {
        if self.population.is_empty() {
            return Err(EvoError::EmptyPopulation(self.name()));
        }

        debug!("Selecting parents with {} selection", self.args.selection);
        let selected = self.args.selection.select(
            &self.population,
            &self.fitness,
            self.args.population_size,
            &mut self.rng,
        )?;

        debug!("Generating new population (crossover + mutation)");
        let mut offspring = crossover_pairs(selected, self.args.crossover_rate, &mut self.rng);
        mutate_all(&mut offspring, self.args.mutation_rate, &mut self.rng);

        let (raw_fitness, fitness) = self.evaluate(&offspring)?;
        self.population = offspring;
        self.raw_fitness = raw_fitness;
        self.fitness = fitness;
        self.generation += 1;
        debug!(
            "Best fitness at generation #{} is {}",
            self.generation,
            self.raw_fitness[self.best_index()?]
        );
        Ok(())
    }

    fn generation(&self) -> usize {
        self.generation
    }
}
