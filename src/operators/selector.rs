use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::core::{EvaluatedIndividual, EvoError};
use crate::operators::{BinaryComparisonOperator, PreferredSolution};

/// The strategies used by the single-objective [`crate::algorithms::GenePool`] to choose the
/// individuals for reproduction. All the strategies sample with replacement and expect the
/// fitness to be normalised (i.e. its sum must be `1`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub enum Selection {
    /// Each individual is copied `round(fitness * selection_size)` times. When these copies are
    /// not enough, the selection is completed with individuals chosen uniformly at random.
    Proportionate,
    /// Each individual is chosen with a probability equal to its normalised fitness.
    #[default]
    RouletteWheel,
    /// Individuals are ranked by descending fitness (equal fitness values share the same rank)
    /// and chosen with a probability proportional to their inverted rank. This makes the
    /// selection pressure independent of the fitness scale.
    Ranked,
    /// The best of the given number of individuals, drawn uniformly at random, is chosen. With
    /// one competitor this is a uniform random selection.
    Tournament(usize),
}

impl Display for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Proportionate => write!(f, "proportionate"),
            Selection::RouletteWheel => write!(f, "roulette wheel"),
            Selection::Ranked => write!(f, "ranked"),
            Selection::Tournament(size) => write!(f, "tournament (size {size})"),
        }
    }
}

impl Selection {
    /// Check the strategy options. This returns an error if a tournament has no competitors.
    ///
    /// returns: `Result<(), EvoError>`
    pub fn validate(&self) -> Result<(), EvoError> {
        if let Selection::Tournament(0) = self {
            return Err(EvoError::Configuration(
                "Selection".to_string(),
                "The tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Select `selection_size` individuals from the population.
    ///
    /// # Arguments
    ///
    /// * `population`: The individuals to select from.
    /// * `fitness`: The normalised fitness of each individual in `population`.
    /// * `selection_size`: The number of individuals to select.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Result<Vec<G>, EvoError>`. The selected individuals.
    pub fn select<G: Clone>(
        &self,
        population: &[G],
        fitness: &[f64],
        selection_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<G>, EvoError> {
        if population.len() != fitness.len() {
            return Err(EvoError::DimensionMismatch(population.len(), fitness.len()));
        }
        Ok(self
            .select_indexes(fitness, selection_size, rng)?
            .into_iter()
            .map(|idx| population[idx].clone())
            .collect())
    }

    /// Select `selection_size` individuals and return their indexes in the `fitness` vector.
    ///
    /// # Arguments
    ///
    /// * `fitness`: The normalised fitness of each individual.
    /// * `selection_size`: The number of individuals to select.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Result<Vec<usize>, EvoError>`
    pub fn select_indexes(
        &self,
        fitness: &[f64],
        selection_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, EvoError> {
        self.validate()?;
        if fitness.is_empty() {
            return Err(EvoError::SelectorOperator(
                self.to_string(),
                "The population is empty and no individual can be selected".to_string(),
            ));
        }

        let selected = match self {
            Selection::Proportionate => proportionate(fitness, selection_size, rng),
            Selection::RouletteWheel => roulette_wheel(fitness, selection_size, rng),
            Selection::Ranked => ranked(fitness, selection_size, rng),
            Selection::Tournament(size) => tournament(fitness, *size, selection_size, rng),
        };
        Ok(selected)
    }
}

/// Proportionate selection. This may under-allocate copies when many `fitness * selection_size`
/// values round to zero, so the selection is padded with random picks.
fn proportionate(fitness: &[f64], selection_size: usize, rng: &mut dyn RngCore) -> Vec<usize> {
    let mut selected: Vec<usize> = Vec::with_capacity(selection_size);
    for (idx, f) in fitness.iter().enumerate() {
        let copies = (f * selection_size as f64).round();
        if copies.is_nan() || copies < 1.0 {
            continue;
        }
        // any copy past the selection size would be truncated
        let copies = (copies as usize).min(selection_size - selected.len());
        selected.extend(std::iter::repeat(idx).take(copies));
    }
    while selected.len() < selection_size {
        selected.push(rng.gen_range(0..fitness.len()));
    }
    selected
}

/// Roulette wheel selection. A uniform draw in [0, 1) is mapped to the first individual whose
/// cumulative fitness exceeds the draw.
fn roulette_wheel(fitness: &[f64], selection_size: usize, rng: &mut dyn RngCore) -> Vec<usize> {
    (0..selection_size)
        .map(|_| {
            let x: f64 = rng.gen();
            let mut cumulative = 0.0;
            for (idx, f) in fitness.iter().enumerate() {
                cumulative += f;
                if x < cumulative {
                    return idx;
                }
            }
            // rounding errors can leave the total just below the draw
            fitness.len() - 1
        })
        .collect()
}

/// Ranked selection. The probabilities of the inverted ranks are drawn with the roulette wheel.
fn ranked(fitness: &[f64], selection_size: usize, rng: &mut dyn RngCore) -> Vec<usize> {
    // sort by descending fitness. Ties keep the population order
    let mut sorted_idx: Vec<usize> = (0..fitness.len()).collect();
    sorted_idx.sort_by(|a, b| fitness[*b].total_cmp(&fitness[*a]));

    let mut ranks: Vec<usize> = Vec::with_capacity(fitness.len());
    let mut prev_fitness = fitness[sorted_idx[0]];
    let mut rank = 1;
    for idx in &sorted_idx {
        if fitness[*idx] < prev_fitness {
            rank += 1;
            prev_fitness = fitness[*idx];
        }
        ranks.push(rank);
    }

    // rank 1 gets the largest weight
    let inverse_ranks: Vec<f64> = ranks.iter().map(|r| (rank - r + 1) as f64).collect();
    let total: f64 = inverse_ranks.iter().sum();
    let probabilities: Vec<f64> = inverse_ranks.iter().map(|r| r / total).collect();

    roulette_wheel(&probabilities, selection_size, rng)
        .into_iter()
        .map(|i| sorted_idx[i])
        .collect()
}

/// Tournament selection with `tournament_size` competitors drawn with replacement. The first
/// competitor with the largest fitness wins.
fn tournament(
    fitness: &[f64],
    tournament_size: usize,
    selection_size: usize,
    rng: &mut dyn RngCore,
) -> Vec<usize> {
    (0..selection_size)
        .map(|_| {
            let mut winner = rng.gen_range(0..fitness.len());
            for _ in 1..tournament_size {
                let competitor = rng.gen_range(0..fitness.len());
                if fitness[competitor] > fitness[winner] {
                    winner = competitor;
                }
            }
            winner
        })
        .collect()
}

/// A trait implementing methods to choose evaluated individuals for reproduction.
pub trait Selector {
    /// Select a number of individuals equal to `number_of_winners` and return their indexes.
    ///
    /// # Arguments
    ///
    /// * `individuals`: The individuals.
    /// * `number_of_winners`: The number of winners to select.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Result<Vec<usize>, EvoError>`
    fn select<G>(
        &self,
        individuals: &[EvaluatedIndividual<G>],
        number_of_winners: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, EvoError> {
        let mut winners: Vec<usize> = Vec::with_capacity(number_of_winners);
        for _ in 0..number_of_winners {
            winners.push(self.select_fit_individual(individuals, rng)?);
        }
        Ok(winners)
    }

    /// Select the fittest individual and return its index.
    ///
    /// # Arguments
    ///
    /// * `individuals`: The list of individuals.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Result<usize, EvoError>`
    fn select_fit_individual<G>(
        &self,
        individuals: &[EvaluatedIndividual<G>],
        rng: &mut dyn RngCore,
    ) -> Result<usize, EvoError>;
}

/// Tournament selection method between multiple competitors for choosing individuals from a
/// population for reproduction. `number_of_competitors` individuals are randomly selected, with
/// replacement, from the population, then the most fit becomes a parent based on the provided
/// comparison operator. When two competitors are mutually preferred, the first one drawn wins.
pub struct TournamentSelector<Operator: BinaryComparisonOperator> {
    /// The number of competitors in each tournament. For example, 2 to run a binary tournament.
    number_of_competitors: usize,
    /// The function to use to assess the fitness and determine which individual wins a tournament.
    _fitness_function: PhantomData<Operator>,
}

impl<Operator: BinaryComparisonOperator> TournamentSelector<Operator> {
    /// Create a new tournament.
    ///
    /// # Arguments
    ///
    /// * `number_of_competitors`: The number of competitors in the tournament.
    ///
    /// returns: `TournamentSelector`
    pub fn new(number_of_competitors: usize) -> Self {
        Self {
            _fitness_function: PhantomData::<Operator>,
            number_of_competitors,
        }
    }

    /// The number of competitors in each tournament.
    ///
    /// returns: `usize`
    pub fn number_of_competitors(&self) -> usize {
        self.number_of_competitors
    }
}

impl<Operator: BinaryComparisonOperator> Selector for TournamentSelector<Operator> {
    fn select_fit_individual<G>(
        &self,
        individuals: &[EvaluatedIndividual<G>],
        rng: &mut dyn RngCore,
    ) -> Result<usize, EvoError> {
        if individuals.is_empty() {
            return Err(EvoError::SelectorOperator(
                "TournamentSelector".to_string(),
                "The population is empty and no individual can be selected".to_string(),
            ));
        }
        let mut winner = rng.gen_range(0..individuals.len());
        for _ in 1..self.number_of_competitors {
            let potential_winner = rng.gen_range(0..individuals.len());
            let preferred_sol =
                Operator::compare(&individuals[winner], &individuals[potential_winner])?;
            if preferred_sol == PreferredSolution::Second {
                winner = potential_winner;
            }
        }

        Ok(winner)
    }
}
