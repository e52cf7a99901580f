use log::{debug, info};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::algorithms::algorithm::{crossover_pairs, evaluate_population, mutate_all};
use crate::algorithms::Algorithm;
use crate::core::utils::{get_rng, is_probability};
use crate::core::{EvaluatedIndividual, EvoError, Genotype};
use crate::operators::{CrowdedComparison, Selector, TournamentSelector};
use crate::utils::{fast_non_dominated_sort, set_crowding_distance, CrowdingDistanceType};

fn default_mutation_rate() -> f64 {
    0.1
}

fn default_crossover_rate() -> f64 {
    1.0
}

fn default_tournament_fraction() -> f64 {
    0.1
}

/// Input arguments for the multi-objective [`NonDominatedGenePool`].
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NonDominatedGenePoolArg {
    /// The number of individuals in the population. This must be larger than `0`.
    pub population_size: usize,
    /// The probability, in the [0, 1] range, of mutating each offspring. This defaults to `0.1`.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// The probability, in the [0, 1] range, of recombining a pair of selected parents. This
    /// defaults to `1`.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// The fraction of the population, in the (0, 1] range, sampled in each tournament. At least
    /// two individuals compete. This defaults to `0.1`.
    #[serde(default = "default_tournament_fraction")]
    pub tournament_fraction: f64,
    /// How the crowding distance is calculated. This defaults to
    /// [`CrowdingDistanceType::Unnormalised`].
    #[serde(default)]
    pub crowding_distance: CrowdingDistanceType,
    /// Whether the objectives should be calculated in threads. This defaults to `false`.
    #[serde(default)]
    pub parallel: Option<bool>,
    /// The seed used in the random number generator (RNG). When `None`, the generator is seeded
    /// from the system entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NonDominatedGenePoolArg {
    /// Create the arguments with the default options.
    ///
    /// # Arguments
    ///
    /// * `population_size`: The number of individuals in the population.
    ///
    /// returns: `NonDominatedGenePoolArg`
    pub fn new(population_size: usize) -> Self {
        Self {
            population_size,
            mutation_rate: default_mutation_rate(),
            crossover_rate: default_crossover_rate(),
            tournament_fraction: default_tournament_fraction(),
            crowding_distance: CrowdingDistanceType::default(),
            parallel: None,
            seed: None,
        }
    }
}

/// The multi-objective gene pool, based on the NSGA2 survival scheme. All the objectives returned
/// by [`Genotype::calculate_fitness`] are maximised.
///
/// At each generation:
///  1. the parents are chosen with tournaments using the crowded-comparison operator (lower rank
///     first, then larger crowding distance);
///  2. adjacent parents are recombined and the offspring are mutated;
///  3. the offspring are added to the current population. The union is ranked with the fast
///     non-dominated sort and the crowding distance is calculated within each front;
///  4. the best `population_size` individuals survive.
///
/// Implemented based on:
/// > K. Deb, A. Pratap, S. Agarwal and T. Meyarivan, "A fast and elitist multi-objective genetic
/// > algorithm: NSGA-II," in IEEE Transactions on Evolutionary Computation, vol. 6, no. 2, pp.
/// > 182-197, April 2002, doi: 10.1109/4235.996017.
pub struct NonDominatedGenePool<G: Genotype<Fitness = Vec<f64>>> {
    /// The data shared by the genotypes.
    context: G::Context,
    /// The options.
    args: NonDominatedGenePoolArg,
    /// The operator to select the parents.
    selector: TournamentSelector<CrowdedComparison>,
    /// The ranked individuals of the current generation, sorted by the crowded-comparison order.
    individuals: Vec<EvaluatedIndividual<G>>,
    /// The current generation.
    generation: usize,
    /// The random number generator.
    rng: Box<dyn RngCore>,
}

impl<G: Genotype<Fitness = Vec<f64>>> NonDominatedGenePool<G> {
    /// Initialise the gene pool. This returns an error if the population size is `0`, a rate is
    /// outside the [0, 1] range or the tournament fraction is outside the (0, 1] range.
    ///
    /// # Arguments
    ///
    /// * `context`: The data shared by the genotypes, passed to [`Genotype::create_random`].
    /// * `args`: The [`NonDominatedGenePoolArg`] arguments to customise the pool behaviour.
    ///
    /// returns: `Result<NonDominatedGenePool<G>, EvoError>`
    pub fn new(context: G::Context, args: NonDominatedGenePoolArg) -> Result<Self, EvoError> {
        let name = "NonDominatedGenePool".to_string();
        if args.population_size == 0 {
            return Err(EvoError::Configuration(
                name,
                "The population size must be larger than 0".to_string(),
            ));
        }
        for (label, rate) in [
            ("mutation rate", args.mutation_rate),
            ("crossover rate", args.crossover_rate),
        ] {
            if !is_probability(rate) {
                return Err(EvoError::Configuration(
                    name,
                    format!("The {label} ({rate}) must be between 0 and 1"),
                ));
            }
        }
        if !(args.tournament_fraction > 0.0 && args.tournament_fraction <= 1.0) {
            return Err(EvoError::Configuration(
                name,
                format!(
                    "The tournament fraction ({}) must be larger than 0 and not exceed 1",
                    args.tournament_fraction
                ),
            ));
        }

        let competitors = ((args.population_size as f64 * args.tournament_fraction).floor()
            as usize)
            .max(2);
        let selector = TournamentSelector::<CrowdedComparison>::new(competitors);
        info!(
            "Algorithm options are:\n\t* Population size {:>17}\n\t* Mutation rate {:>19}\n\t* Crossover rate {:>18}\n\t* Tournament competitors {:>10}\n\t* Crowding distance {:>15?}",
            args.population_size,
            args.mutation_rate,
            args.crossover_rate,
            competitors,
            args.crowding_distance
        );

        Ok(Self {
            context,
            rng: get_rng(args.seed),
            args,
            selector,
            individuals: Vec::new(),
            generation: 0,
        })
    }

    /// Calculate the objectives of the genotypes. This returns an error if any objective is NaN.
    ///
    /// # Arguments
    ///
    /// * `genotypes`: The genotypes to evaluate.
    ///
    /// returns: `Result<Vec<EvaluatedIndividual<G>>, EvoError>`
    fn evaluate(&self, genotypes: Vec<G>) -> Result<Vec<EvaluatedIndividual<G>>, EvoError> {
        let all_fitness = evaluate_population(&genotypes, self.args.parallel.unwrap_or(false));
        if let Some(idx) = all_fitness
            .iter()
            .position(|fitness| fitness.iter().any(|f| f.is_nan()))
        {
            return Err(EvoError::NaN("objective".to_string(), idx));
        }

        Ok(genotypes
            .into_iter()
            .zip(all_fitness)
            .map(|(genotype, fitness)| EvaluatedIndividual::from_parts(genotype, fitness))
            .collect())
    }

    /// Rank the individuals, calculate the crowding distance in each front and sort them with the
    /// crowded-comparison order.
    ///
    /// # Arguments
    ///
    /// * `individuals`: The individuals to rank.
    ///
    /// returns: `Result<Vec<EvaluatedIndividual<G>>, EvoError>`
    fn rank_and_crowd(
        &self,
        mut individuals: Vec<EvaluatedIndividual<G>>,
    ) -> Result<Vec<EvaluatedIndividual<G>>, EvoError> {
        let sorting_results = fast_non_dominated_sort(&mut individuals, false)?;
        debug!(
            "Found {} fronts with {} individuals",
            sorting_results.front_indexes.len(),
            individuals.len()
        );

        // move the individuals into their fronts
        let mut slots: Vec<Option<EvaluatedIndividual<G>>> =
            individuals.into_iter().map(Some).collect();
        let mut ranked = Vec::with_capacity(slots.len());
        for front_indexes in &sorting_results.front_indexes {
            let mut front: Vec<EvaluatedIndividual<G>> = front_indexes
                .iter()
                .filter_map(|idx| slots[*idx].take())
                .collect();
            set_crowding_distance(&mut front, self.args.crowding_distance)?;
            ranked.append(&mut front);
        }

        ranked.sort_by(|a, b| a.crowded_cmp(b));
        Ok(ranked)
    }

    /// Get the ranked individuals of the current generation, sorted by rank and then by
    /// descending crowding distance.
    ///
    /// return: `&[EvaluatedIndividual<G>]`
    pub fn individuals(&self) -> &[EvaluatedIndividual<G>] {
        &self.individuals
    }

    /// Get the genotypes of the current generation.
    ///
    /// return: `Vec<&G>`
    pub fn population(&self) -> Vec<&G> {
        self.individuals.iter().map(|i| i.genotype()).collect()
    }

    /// Get the fitness vector of each individual of the current generation.
    ///
    /// return: `Vec<&[f64]>`
    pub fn fitness(&self) -> Vec<&[f64]> {
        self.individuals.iter().map(|i| i.fitness()).collect()
    }

    /// Get the individuals in the first front (the non-dominated individuals).
    ///
    /// return: `Vec<&EvaluatedIndividual<G>>`
    pub fn best_individuals(&self) -> Vec<&EvaluatedIndividual<G>> {
        self.individuals
            .iter()
            .filter(|i| i.is_non_dominated())
            .collect()
    }

    /// Get the genotypes in the first front.
    ///
    /// return: `Vec<&G>`
    pub fn best_genes(&self) -> Vec<&G> {
        self.best_individuals()
            .into_iter()
            .map(|i| i.genotype())
            .collect()
    }

    /// Get the fitness vectors of the individuals in the first front.
    ///
    /// return: `Vec<&[f64]>`
    pub fn best_fitness(&self) -> Vec<&[f64]> {
        self.best_individuals()
            .into_iter()
            .map(|i| i.fitness())
            .collect()
    }

    /// Get the pool options.
    ///
    /// return: `&NonDominatedGenePoolArg`
    pub fn args(&self) -> &NonDominatedGenePoolArg {
        &self.args
    }
}

impl<G: Genotype<Fitness = Vec<f64>>> Algorithm for NonDominatedGenePool<G> {
    fn name(&self) -> String {
        "NonDominatedGenePool".to_string()
    }

    fn initialize_population(&mut self) -> Result<(), EvoError> {
        info!("Creating initial random population");
        let genotypes: Vec<G> = (0..self.args.population_size)
            .map(|_| G::create_random(&self.context, &mut self.rng))
            .collect();
        let individuals = self.rank_and_crowd(self.evaluate(genotypes)?)?;

        self.individuals = individuals;
        self.generation = 1;
        info!("Initial evaluation completed");
        Ok(())
    }

    fn generate(&mut self) -> Result<(), EvoError> {
        if self.individuals.is_empty() {
            return Err(EvoError::EmptyPopulation(self.name()));
        }

        debug!(
            "Selecting parents with {} competitors per tournament",
            self.selector.number_of_competitors()
        );
        let winners =
            self.selector
                .select(&self.individuals, self.args.population_size, &mut self.rng)?;
        let parents: Vec<G> = winners
            .into_iter()
            .map(|idx| self.individuals[idx].genotype().clone())
            .collect();

        debug!("Generating offspring (crossover + mutation)");
        let mut offspring = crossover_pairs(parents, self.args.crossover_rate, &mut self.rng);
        mutate_all(&mut offspring, self.args.mutation_rate, &mut self.rng);

        // the fitness of the parents is pure and is not recalculated
        debug!("Combining parents and offspring");
        let mut combined = self.individuals.clone();
        combined.extend(self.evaluate(offspring)?);
        let mut survivors = self.rank_and_crowd(combined)?;
        survivors.truncate(self.args.population_size);

        self.individuals = survivors;
        self.generation += 1;
        debug!(
            "Generation #{} has {} non-dominated individuals",
            self.generation,
            self.best_individuals().len()
        );
        Ok(())
    }

    fn generation(&self) -> usize {
        self.generation
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::algorithms::{Algorithm, NonDominatedGenePool, NonDominatedGenePoolArg};
    use crate::core::test_utils::SchafferGene;
    use crate::core::EvoError;
    use crate::operators::dominates;
    use crate::utils::CrowdingDistanceType;

    fn schaffer_pool(population_size: usize, seed: u64) -> NonDominatedGenePool<SchafferGene> {
        let mut args = NonDominatedGenePoolArg::new(population_size);
        args.mutation_rate = 0.2;
        args.seed = Some(seed);
        NonDominatedGenePool::new((), args).unwrap()
    }

    #[test]
    fn test_configuration_errors() {
        assert!(matches!(
            NonDominatedGenePool::<SchafferGene>::new((), NonDominatedGenePoolArg::new(0)),
            Err(EvoError::Configuration(_, _))
        ));

        for fraction in [0.0, -0.5, 1.1, f64::NAN] {
            let mut args = NonDominatedGenePoolArg::new(10);
            args.tournament_fraction = fraction;
            assert!(NonDominatedGenePool::<SchafferGene>::new((), args).is_err());
        }

        let mut args = NonDominatedGenePoolArg::new(10);
        args.mutation_rate = 2.0;
        assert!(NonDominatedGenePool::<SchafferGene>::new((), args).is_err());
    }

    #[test]
    /// The tournament size is a fraction of the population with a floor of 2.
    fn test_number_of_competitors() {
        let pool = schaffer_pool(10, 1);
        assert_eq!(pool.selector.number_of_competitors(), 2);

        let mut args = NonDominatedGenePoolArg::new(100);
        args.tournament_fraction = 0.25;
        let pool = NonDominatedGenePool::<SchafferGene>::new((), args).unwrap();
        assert_eq!(pool.selector.number_of_competitors(), 25);
    }

    #[test]
    fn test_generate_before_initialisation() {
        let mut pool = schaffer_pool(10, 1);
        assert!(matches!(
            pool.generate(),
            Err(EvoError::EmptyPopulation(_))
        ));
        assert!(pool.best_genes().is_empty());
    }

    #[test]
    fn test_initial_population() {
        let mut pool = schaffer_pool(20, 2);
        pool.initialize_population().unwrap();
        assert_eq!(pool.generation(), 1);
        assert_eq!(pool.individuals().len(), 20);
        assert!(pool.individuals().iter().all(|i| i.rank() >= 1));

        // sorted by the crowded-comparison order
        for pair in pool.individuals().windows(2) {
            assert!(pair[0].crowded_cmp(&pair[1]).is_le());
        }
        for (genotype, fitness) in pool.population().iter().zip(pool.fitness()) {
            let x = genotype.x as f64;
            assert_approx_eq!(f64, fitness[0], -x.powi(2));
        }
    }

    #[test]
    /// The population size is constant and the first front is never dominated.
    fn test_generate_invariants() {
        for size in [1, 7, 30] {
            let mut pool = schaffer_pool(size, 3);
            pool.initialize_population().unwrap();
            for _ in 0..10 {
                pool.generate().unwrap();
                assert_eq!(pool.individuals().len(), size);

                let best = pool.best_fitness();
                assert!(!best.is_empty());
                for b in &best {
                    for other in pool.fitness() {
                        assert!(!dominates(other, b).unwrap());
                    }
                }
            }
            assert_eq!(pool.generation(), 11);
        }
    }

    #[test]
    /// The survivors are chosen from parents and offspring, so the first front never regresses.
    fn test_elitism() {
        let mut pool = schaffer_pool(20, 4);
        pool.initialize_population().unwrap();
        let max_objective = |pool: &NonDominatedGenePool<SchafferGene>, idx: usize| {
            pool.fitness()
                .iter()
                .map(|f| f[idx])
                .fold(f64::NEG_INFINITY, f64::max)
        };

        for _ in 0..15 {
            let previous_best: Vec<Vec<f64>> =
                pool.best_fitness().iter().map(|f| f.to_vec()).collect();
            let previous_max = [max_objective(&pool, 0), max_objective(&pool, 1)];

            pool.generate().unwrap();
            for current in pool.best_fitness() {
                for prev in &previous_best {
                    assert!(!dominates(prev, current).unwrap());
                }
            }
            // the extremes of the front have an infinite crowding distance and survive
            assert!(max_objective(&pool, 0) >= previous_max[0]);
            assert!(max_objective(&pool, 1) >= previous_max[1]);
        }
    }

    #[test]
    /// The Pareto optimal solutions of the Schaffer's problem have x in [0, 2].
    fn test_schaffer_convergence() {
        for distance_type in [
            CrowdingDistanceType::Unnormalised,
            CrowdingDistanceType::RangeNormalised,
        ] {
            let mut args = NonDominatedGenePoolArg::new(50);
            args.mutation_rate = 0.3;
            args.crowding_distance = distance_type;
            args.seed = Some(5);
            let mut pool = NonDominatedGenePool::<SchafferGene>::new((), args).unwrap();
            pool.initialize_population().unwrap();
            for _ in 0..100 {
                pool.generate().unwrap();
            }

            let best = pool.best_genes();
            assert!(!best.is_empty());
            assert!(best.iter().all(|g| (0..=2).contains(&g.x)));
        }
    }

    #[test]
    fn test_args_from_json() {
        let args: NonDominatedGenePoolArg = serde_json::from_str(
            r#"{"population_size": 40, "tournament_fraction": 0.2, "crowding_distance": "RangeNormalised"}"#,
        )
        .unwrap();
        assert_eq!(args.population_size, 40);
        assert_approx_eq!(f64, args.tournament_fraction, 0.2);
        assert_eq!(args.crowding_distance, CrowdingDistanceType::RangeNormalised);
        assert_approx_eq!(f64, args.mutation_rate, 0.1);
        assert_eq!(args.seed, None);
    }
}
