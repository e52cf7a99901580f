pub use comparison::{
    dominates, pareto_relation, BinaryComparisonOperator, CrowdedComparison, ParetoDominance,
    PreferredSolution,
};
pub use selector::{Selection, Selector, TournamentSelector};

pub mod comparison;
pub mod ordered;
pub mod selector;
