use crate::core::{EvaluatedIndividual, EvoError};

/// The preferred solution with the `BinaryComparisonOperator`.
#[derive(Debug, PartialOrd, PartialEq)]
pub enum PreferredSolution {
    /// The first solution is preferred.
    First,
    /// The second solution is preferred.
    Second,
    /// The two solutions are mutually preferred.
    MutuallyPreferred,
}

/// A trait to implement a comparison operator between two individuals.
pub trait BinaryComparisonOperator {
    /// Compare two individuals and select the best one.
    ///
    /// # Arguments
    ///
    /// * `first_solution`: The first individual to compare.
    /// * `second_solution`: The second individual to compare.
    ///
    /// returns: `Result<PreferredSolution, EvoError>` The preferred solution.
    fn compare<G>(
        first_solution: &EvaluatedIndividual<G>,
        second_solution: &EvaluatedIndividual<G>,
    ) -> Result<PreferredSolution, EvoError>
    where
        Self: Sized;
}

/// Get the Pareto dominance relation between two fitness vectors. All the objectives are
/// maximised: the first vector is preferred when none of its values is smaller than the values in
/// the second vector and at least one value is larger. This returns an error if the two vectors
/// have a different length.
///
/// # Arguments
///
/// * `first`: The first fitness vector.
/// * `second`: The second fitness vector.
///
/// returns: `Result<PreferredSolution, EvoError>`
pub fn pareto_relation(first: &[f64], second: &[f64]) -> Result<PreferredSolution, EvoError> {
    if first.len() != second.len() {
        return Err(EvoError::DimensionMismatch(first.len(), second.len()));
    }

    let mut relation = PreferredSolution::MutuallyPreferred;
    for (f1, f2) in first.iter().zip(second) {
        if f1 > f2 {
            if relation == PreferredSolution::Second {
                // mutually dominated
                return Ok(PreferredSolution::MutuallyPreferred);
            }
            relation = PreferredSolution::First;
        } else if f1 < f2 {
            if relation == PreferredSolution::First {
                // mutually dominated
                return Ok(PreferredSolution::MutuallyPreferred);
            }
            relation = PreferredSolution::Second;
        }
    }
    Ok(relation)
}

/// Whether the fitness vector `p` strictly dominates `q`. See [`pareto_relation`].
///
/// # Arguments
///
/// * `p`: The first fitness vector.
/// * `q`: The second fitness vector.
///
/// returns: `Result<bool, EvoError>`
pub fn dominates(p: &[f64], q: &[f64]) -> Result<bool, EvoError> {
    Ok(pareto_relation(p, q)? == PreferredSolution::First)
}

/// Pareto dominance between two individuals using their fitness vectors. All the objectives are
/// maximised.
pub struct ParetoDominance;

impl BinaryComparisonOperator for ParetoDominance {
    fn compare<G>(
        first_solution: &EvaluatedIndividual<G>,
        second_solution: &EvaluatedIndividual<G>,
    ) -> Result<PreferredSolution, EvoError> {
        pareto_relation(first_solution.fitness(), second_solution.fitness())
    }
}

/// The crowded-comparison operator. An individual with a lower rank is preferred; when two
/// individuals have the same rank, the one with the larger crowding distance is preferred. See
/// [`EvaluatedIndividual::crowded_cmp`].
pub struct CrowdedComparison;

impl BinaryComparisonOperator for CrowdedComparison {
    fn compare<G>(
        first_solution: &EvaluatedIndividual<G>,
        second_solution: &EvaluatedIndividual<G>,
    ) -> Result<PreferredSolution, EvoError> {
        if first_solution.rank() == 0 || second_solution.rank() == 0 {
            return Err(EvoError::SelectorOperator(
                "CrowdedComparison".to_string(),
                "The individuals must be ranked before they can be compared".to_string(),
            ));
        }
        Ok(match first_solution.crowded_cmp(second_solution) {
            std::cmp::Ordering::Less => PreferredSolution::First,
            std::cmp::Ordering::Greater => PreferredSolution::Second,
            std::cmp::Ordering::Equal => PreferredSolution::MutuallyPreferred,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::core::test_utils::individuals_from_fitness_dummy;
    use crate::core::EvoError;
    use crate::operators::{
        dominates, pareto_relation, BinaryComparisonOperator, CrowdedComparison, ParetoDominance,
        PreferredSolution,
    };

    #[test]
    /// Test the dominance relation with one objective
    fn test_pareto_relation_1_objective() {
        assert_eq!(
            pareto_relation(&[15.0], &[5.0]).unwrap(),
            PreferredSolution::First
        );
        assert_eq!(
            pareto_relation(&[1.0], &[5.0]).unwrap(),
            PreferredSolution::Second
        );
        assert_eq!(
            pareto_relation(&[5.0], &[5.0]).unwrap(),
            PreferredSolution::MutuallyPreferred
        );
    }

    #[test]
    /// Test the dominance relation with two objectives
    fn test_pareto_relation_2_objectives() {
        // (5,5) dominates (1,1)
        assert!(dominates(&[5.0, 5.0], &[1.0, 1.0]).unwrap());
        assert!(!dominates(&[1.0, 1.0], &[5.0, 5.0]).unwrap());

        // equal on one objective, better on the other
        assert!(dominates(&[1.0, 2.0], &[1.0, 1.0]).unwrap());
        assert_eq!(
            pareto_relation(&[1.0, 1.0], &[1.0, 2.0]).unwrap(),
            PreferredSolution::Second
        );

        // trade-offs are mutually non-dominated
        let front = [[4.0, 1.0], [2.0, 2.0], [1.0, 4.0]];
        for p in &front {
            for q in &front {
                assert!(!dominates(p, q).unwrap());
            }
        }
    }

    #[test]
    /// Dominance is irreflexive and asymmetric
    fn test_dominance_irreflexive_asymmetric() {
        let vectors = [
            vec![0.0, 0.0, 0.0],
            vec![1.0, -1.0, 2.0],
            vec![1.0, 0.0, 2.0],
            vec![-3.0, 5.0, 0.5],
            vec![1.0, 0.0, 2.0],
        ];
        for p in &vectors {
            assert!(!dominates(p, p).unwrap());
            for q in &vectors {
                if dominates(p, q).unwrap() {
                    assert!(!dominates(q, p).unwrap());
                }
            }
        }
    }

    #[test]
    /// Vectors of different length cannot be compared
    fn test_dimension_mismatch() {
        let err = dominates(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, EvoError::DimensionMismatch(2, 1)));
    }

    #[test]
    fn test_operators() {
        let mut individuals =
            individuals_from_fitness_dummy(&[vec![5.0, 5.0], vec![1.0, 1.0], vec![0.0, 6.0]]);
        assert_eq!(
            ParetoDominance::compare(&individuals[0], &individuals[1]).unwrap(),
            PreferredSolution::First
        );
        assert_eq!(
            ParetoDominance::compare(&individuals[0], &individuals[2]).unwrap(),
            PreferredSolution::MutuallyPreferred
        );

        // not ranked yet
        assert!(CrowdedComparison::compare(&individuals[0], &individuals[1]).is_err());

        individuals[0].set_rank(1);
        individuals[0].set_crowding_distance(1.0);
        individuals[1].set_rank(2);
        individuals[2].set_rank(1);
        individuals[2].set_crowding_distance(1.0);
        assert_eq!(
            CrowdedComparison::compare(&individuals[1], &individuals[0]).unwrap(),
            PreferredSolution::Second
        );
        assert_eq!(
            CrowdedComparison::compare(&individuals[0], &individuals[2]).unwrap(),
            PreferredSolution::MutuallyPreferred
        );
        individuals[2].set_crowding_distance(f64::INFINITY);
        assert_eq!(
            CrowdedComparison::compare(&individuals[0], &individuals[2]).unwrap(),
            PreferredSolution::Second
        );
    }
}
