use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{EvaluatedIndividual, EvoError};
use crate::utils::{argsort, vector_max, vector_min, Sort};

/// How the distance between the neighbours of an individual is accumulated over the objectives.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub enum CrowdingDistanceType {
    /// Sum the absolute distances between the neighbours along each objective. Objectives with a
    /// large numeric magnitude dominate the sum.
    #[default]
    Unnormalised,
    /// Divide the distance along each objective by the objective range in the front, as in the
    /// NSGA2 paper. Objectives whose values are all equal do not contribute.
    RangeNormalised,
}

/// Calculate the crowding distance (with complexity $O(M * N log(N))$, where `M` is the number of
/// objectives and `N` the number of individuals). This sets the distance on each individual; to
/// retrieve it, use [`EvaluatedIndividual::crowding_distance`]. The two individuals with the
/// smallest and largest value of any objective get an infinite distance.
/// > NOTE: the individuals must be a non-dominated front.
///
/// Implemented based on paragraph 3B in:
/// > K. Deb, A. Pratap, S. Agarwal and T. Meyarivan, "A fast and elitist multi-objective genetic
/// > algorithm: NSGA-II," in IEEE Transactions on Evolutionary Computation, vol. 6, no. 2, pp.
/// > 182-197, April 2002, doi: 10.1109/4235.996017.
///
/// # Arguments
///
/// * `individuals`: The individuals in a non-dominated front.
/// * `distance_type`: Whether the distances are normalised by the objective range.
///
/// returns: `Result<(), EvoError>`
pub fn set_crowding_distance<G>(
    individuals: &mut [EvaluatedIndividual<G>],
    distance_type: CrowdingDistanceType,
) -> Result<(), EvoError> {
    let Some(first) = individuals.first() else {
        return Ok(());
    };
    let number_of_objectives = first.number_of_objectives();
    if let Some(i) = individuals
        .iter()
        .find(|i| i.number_of_objectives() != number_of_objectives)
    {
        return Err(EvoError::DimensionMismatch(
            number_of_objectives,
            i.number_of_objectives(),
        ));
    }

    for individual in individuals.iter_mut() {
        individual.set_crowding_distance(0.0);
    }

    let last = individuals.len() - 1;
    for obj_idx in 0..number_of_objectives {
        let obj_values: Vec<f64> = individuals.iter().map(|i| i.fitness()[obj_idx]).collect();

        // sort objectives and get indexes to map individuals to sorted objectives
        let sorted_idx = argsort(&obj_values, Sort::Ascending);

        // assign infinite distance to the boundary points
        individuals[sorted_idx[0]].set_crowding_distance(f64::INFINITY);
        individuals[sorted_idx[last]].set_crowding_distance(f64::INFINITY);
        if individuals.len() < 3 {
            continue;
        }

        let delta_range = vector_max(&obj_values)? - vector_min(&obj_values)?;
        if distance_type == CrowdingDistanceType::RangeNormalised && delta_range == 0.0 {
            debug!("Skipping objective #{obj_idx} in crowding distance. The min/max range is 0");
            continue;
        }

        for k in 1..last {
            // get the corresponding individual to sorted objective
            let ind_k = sorted_idx[k];
            let mut delta = (obj_values[sorted_idx[k + 1]] - obj_values[sorted_idx[k - 1]]).abs();
            if distance_type == CrowdingDistanceType::RangeNormalised {
                delta /= delta_range;
            }
            let current_distance = individuals[ind_k].crowding_distance();
            individuals[ind_k].set_crowding_distance(current_distance + delta);
        }
    }

    Ok(())
}
