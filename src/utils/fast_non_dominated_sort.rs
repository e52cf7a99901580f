use crate::core::{EvaluatedIndividual, EvoError};
use crate::operators::{BinaryComparisonOperator, ParetoDominance, PreferredSolution};

/// Outputs of the non-dominated sort algorithm.
#[derive(Debug)]
pub struct NonDominatedSortResults {
    /// A vector containing sub-vectors. Each child vector represents a front (with the first being
    /// the primary non-dominated front with solutions of rank 1); each child vector contains
    /// the indexes of the individuals belonging to that front. Each index refers to the vector of
    /// individuals passed to [`fast_non_dominated_sort`].
    pub front_indexes: Vec<Vec<usize>>,
    /// Number of individuals that dominates a solution at a given vector index. When the counter
    /// is 0, the solution is non-dominated. This is `n_p` in the paper.
    pub domination_counter: Vec<usize>,
}

/// Non-dominated fast sorting from NSGA2 paper (with complexity $O(M * N^2)$, where `M` is the
/// number of objectives and `N` the number of individuals).
///
/// This sorts solutions into fronts and ranks the individuals based on the number of solutions
/// an individual dominates. Solutions that are not dominated by any other individuals will belong
/// to the first front. The method also stores the rank into each individual; to retrieve it, use
/// [`EvaluatedIndividual::rank`].
///
/// Implemented based on paragraph 3A in:
/// > K. Deb, A. Pratap, S. Agarwal and T. Meyarivan, "A fast and elitist multi-objective genetic
/// > algorithm: NSGA-II," in IEEE Transactions on Evolutionary Computation, vol. 6, no. 2, pp.
/// > 182-197, April 2002, doi: 10.1109/4235.996017.
///
/// # Arguments
///
/// * `individuals`: The individuals to sort by dominance. This returns an error if the vector is
///   empty or if the fitness vectors do not have the same length. No rank is changed on error.
/// * `first_front_only`: Return the first front only with the rank 1 (i.e. containing only
///   non-dominated individuals). If you need only the first front set this to true to avoid
///   ranking the remaining individuals.
///
/// returns: `Result<NonDominatedSortResults, EvoError>`.
pub fn fast_non_dominated_sort<G>(
    individuals: &mut [EvaluatedIndividual<G>],
    first_front_only: bool,
) -> Result<NonDominatedSortResults, EvoError> {
    let number_of_objectives = individuals
        .first()
        .ok_or(EvoError::EmptyPopulation(
            "fast non-dominated sort".to_string(),
        ))?
        .number_of_objectives();
    if let Some(i) = individuals
        .iter()
        .find(|i| i.number_of_objectives() != number_of_objectives)
    {
        return Err(EvoError::DimensionMismatch(
            number_of_objectives,
            i.number_of_objectives(),
        ));
    }

    // this set contains all the individuals being dominated by an individual `p`.This is `S_p` in
    // the paper
    let mut dominated_solutions: Vec<Vec<usize>> = vec![Vec::new(); individuals.len()];
    // number of individuals that dominates `p`. When the counter is 0, `p` is non-dominated. This
    // is `n_p` in the paper
    let mut domination_counter: Vec<usize> = vec![0; individuals.len()];

    // the front of given rank containing non-dominated solutions
    let mut current_front: Vec<usize> = Vec::new();
    // the vector with all fronts of sorted ranks. The first item has rank 1 and subsequent elements
    // have increasing rank
    let mut all_fronts: Vec<Vec<usize>> = Vec::new();

    for pi in 0..individuals.len() {
        for qi in pi + 1..individuals.len() {
            match ParetoDominance::compare(&individuals[pi], &individuals[qi])? {
                PreferredSolution::First => {
                    // `p` dominates `q` - add `q` to the set of solutions dominated by `p`
                    dominated_solutions[pi].push(qi);
                    domination_counter[qi] += 1;
                }
                PreferredSolution::Second => {
                    // q dominates p
                    dominated_solutions[qi].push(pi);
                    domination_counter[pi] += 1;
                }
                PreferredSolution::MutuallyPreferred => {
                    // skip this
                }
            }
        }

        // the solution `p` is non-dominated by any other and this solution belongs to the first
        // front whose items have rank 1
        if domination_counter[pi] == 0 {
            current_front.push(pi);
        }
    }

    for individual in individuals.iter_mut() {
        individual.set_rank(0);
    }
    for pi in &current_front {
        individuals[*pi].set_rank(1);
    }

    // early return
    if first_front_only {
        return Ok(NonDominatedSortResults {
            front_indexes: vec![current_front],
            domination_counter,
        });
    }
    let e_domination_counter = domination_counter.clone();

    // collect the other fronts
    let mut rank = 1;
    loop {
        let mut next_front: Vec<usize> = Vec::new();
        // loop individuals in the current non-dominated front
        for pi in current_front.iter() {
            // loop solutions that are dominated by `p` in the current front
            for qi in dominated_solutions[*pi].iter() {
                // decrement the domination count for individual `q`
                domination_counter[*qi] -= 1;

                // if counter is 0 then none of the individuals in the subsequent fronts are
                // dominated by `p` and `q` belongs to the next front
                if domination_counter[*qi] == 0 {
                    next_front.push(*qi);
                    individuals[*qi].set_rank(rank + 1);
                }
            }
        }
        rank += 1;
        all_fronts.push(current_front);

        // stop when all solutions have been ranked
        if next_front.is_empty() {
            break;
        }
        current_front = next_front;
    }

    Ok(NonDominatedSortResults {
        front_indexes: all_fronts,
        domination_counter: e_domination_counter,
    })
}
