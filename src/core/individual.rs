use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::core::Genotype;

/// A genotype of a multi-objective population with its cached fitness vector, rank and crowding
/// distance. The rank and distance are recalculated from scratch at each generation.
#[derive(Clone, Debug)]
pub struct EvaluatedIndividual<G> {
    /// The genotype.
    genotype: G,
    /// The fitness vector. All the objectives are maximised.
    fitness: Vec<f64>,
    /// The Pareto rank. Rank 1 is the non-dominated front; 0 means not ranked yet.
    rank: usize,
    /// The crowding distance within the individual's front.
    crowding_distance: f64,
}

impl<G> EvaluatedIndividual<G> {
    /// Wrap a genotype whose fitness has already been calculated.
    ///
    /// # Arguments
    ///
    /// * `genotype`: The genotype.
    /// * `fitness`: The genotype fitness vector.
    ///
    /// returns: `EvaluatedIndividual<G>`
    pub fn from_parts(genotype: G, fitness: Vec<f64>) -> Self {
        Self {
            genotype,
            fitness,
            rank: 0,
            crowding_distance: 0.0,
        }
    }

    /// Get the genotype.
    ///
    /// return: `&G`
    pub fn genotype(&self) -> &G {
        &self.genotype
    }

    /// Consume the individual and return its genotype.
    ///
    /// return: `G`
    pub fn into_genotype(self) -> G {
        self.genotype
    }

    /// Get the fitness vector.
    ///
    /// return: `&[f64]`
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Get the number of objectives.
    ///
    /// return: `usize`
    pub fn number_of_objectives(&self) -> usize {
        self.fitness.len()
    }

    /// Get the Pareto rank. This is `0` when the individual has not been sorted yet.
    ///
    /// return: `usize`
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Get the crowding distance.
    ///
    /// return: `f64`
    pub fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }

    pub(crate) fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    pub(crate) fn set_crowding_distance(&mut self, distance: f64) {
        self.crowding_distance = distance;
    }

    /// Whether the individual belongs to the first non-dominated front.
    ///
    /// return: `bool`
    pub fn is_non_dominated(&self) -> bool {
        self.rank == 1
    }

    /// The crowded-comparison order used by the tournament and the survivor selection. An
    /// individual with a lower rank is better; with the same rank, the individual with the larger
    /// crowding distance is better. [`Ordering::Less`] means that `self` is better than `other`,
    /// therefore sorting a vector with this function puts the best individuals first.
    ///
    /// # Arguments
    ///
    /// * `other`: The individual to compare against.
    ///
    /// returns: `Ordering`
    pub fn crowded_cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank).then_with(|| {
            other
                .crowding_distance
                .total_cmp(&self.crowding_distance)
        })
    }
}

impl<G: Genotype<Fitness = Vec<f64>>> EvaluatedIndividual<G> {
    /// Evaluate a genotype and wrap it.
    ///
    /// # Arguments
    ///
    /// * `genotype`: The genotype to evaluate.
    ///
    /// returns: `EvaluatedIndividual<G>`
    pub fn new(genotype: G) -> Self {
        let fitness = genotype.calculate_fitness();
        Self::from_parts(genotype, fitness)
    }
}

impl<G> Display for EvaluatedIndividual<G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Individual(fitness={:?}, rank={}, crowding_distance={})",
            self.fitness, self.rank, self.crowding_distance
        )
    }
}
