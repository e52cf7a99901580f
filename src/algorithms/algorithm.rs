use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{Rng, RngCore};
use rayon::prelude::*;

use crate::algorithms::{StoppingCondition, StoppingConditionType};
use crate::core::{EvoError, Genotype};

/// The trait implemented by the gene pools to evolve a population one generation at a time.
pub trait Algorithm {
    /// Return the algorithm name.
    ///
    /// return: `String`.
    fn name(&self) -> String;

    /// Create and evaluate the initial random population. This replaces any existing population.
    ///
    /// return: `Result<(), EvoError>`
    fn initialize_population(&mut self) -> Result<(), EvoError>;

    /// Evolve the population by one generation. This returns an error if the population has not
    /// been initialised. On error, the previous population is left untouched.
    ///
    /// return: `Result<(), EvoError>`
    fn generate(&mut self) -> Result<(), EvoError>;

    /// Return the current generation. This is `0` before the population is initialised and `1`
    /// after the initialisation.
    ///
    /// return: `usize`.
    fn generation(&self) -> usize;

    /// Run the algorithm until the stopping condition is met. The population is initialised first
    /// if this has not been done yet.
    ///
    /// # Arguments
    ///
    /// * `stopping_condition`: The condition that terminates the evolution.
    ///
    /// return: `Result<(), EvoError>`
    fn run(&mut self, stopping_condition: &StoppingConditionType) -> Result<(), EvoError> {
        info!("Starting {}", self.name());
        let start_time = Instant::now();
        if self.generation() == 0 {
            self.initialize_population()?;
        }

        loop {
            let terminate = match stopping_condition {
                StoppingConditionType::MaxDuration(t) => t.is_met(start_time.elapsed()),
                StoppingConditionType::MaxGeneration(t) => t.is_met(self.generation()),
            };
            if terminate {
                info!(
                    "Stopping evolution because the {} was reached",
                    stopping_condition.name()
                );
                info!("Took {}", elapsed_as_string(start_time.elapsed()));
                break;
            }

            self.generate()?;
            info!(
                "Evolved generation #{} - Elapsed Time: {}",
                self.generation(),
                elapsed_as_string(start_time.elapsed())
            );
        }

        Ok(())
    }
}

/// Format an elapsed time as string.
///
/// # Arguments
///
/// * `duration`: The elapsed time.
///
/// return: `String`.
pub(crate) fn elapsed_as_string(duration: Duration) -> String {
    let seconds = duration.as_secs() % 60;
    let minutes = (duration.as_secs() / 60) % 60;
    let hours = (duration.as_secs() / 60) / 60;
    format!(
        "{:0>2} hours, {:0>2} minutes and {:0>2} seconds",
        hours, minutes, seconds
    )
}

/// Calculate the fitness of each genotype, with rayon's thread pool when `parallel` is `true`.
///
/// # Arguments
///
/// * `population`: The genotypes to evaluate.
/// * `parallel`: Whether to evaluate the genotypes in parallel.
///
/// return: `Vec<G::Fitness>`. The fitness in the same order of `population`.
pub(crate) fn evaluate_population<G: Genotype>(population: &[G], parallel: bool) -> Vec<G::Fitness> {
    debug!("Evaluating {} individuals", population.len());
    if parallel {
        population
            .par_iter()
            .map(|genotype| genotype.calculate_fitness())
            .collect()
    } else {
        population
            .iter()
            .map(|genotype| genotype.calculate_fitness())
            .collect()
    }
}

/// Pair adjacent parents and recombine each pair with probability `crossover_rate`; otherwise
/// the parents are passed through. A trailing unpaired parent is passed through unchanged.
///
/// # Arguments
///
/// * `parents`: The selected parents.
/// * `crossover_rate`: The probability of recombining a pair.
/// * `rng`: The random number generator.
///
/// return: `Vec<G>`. The offspring, with the same size as `parents`.
pub(crate) fn crossover_pairs<G: Genotype>(
    parents: Vec<G>,
    crossover_rate: f64,
    rng: &mut dyn RngCore,
) -> Vec<G> {
    let mut offspring: Vec<G> = Vec::with_capacity(parents.len());
    let mut parents = parents.into_iter();
    while let Some(parent_a) = parents.next() {
        match parents.next() {
            Some(parent_b) => {
                if rng.gen_bool(crossover_rate) {
                    let children = G::crossover(&parent_a, &parent_b, rng);
                    offspring.push(children.child1);
                    offspring.push(children.child2);
                } else {
                    offspring.push(parent_a);
                    offspring.push(parent_b);
                }
            }
            None => offspring.push(parent_a),
        }
    }
    offspring
}

/// Mutate each genotype independently with probability `mutation_rate`.
///
/// # Arguments
///
/// * `offspring`: The genotypes to mutate.
/// * `mutation_rate`: The mutation probability.
/// * `rng`: The random number generator.
pub(crate) fn mutate_all<G: Genotype>(
    offspring: &mut [G],
    mutation_rate: f64,
    rng: &mut dyn RngCore,
) {
    for genotype in offspring.iter_mut() {
        if rng.gen_bool(mutation_rate) {
            genotype.mutate(rng);
        }
    }
}
