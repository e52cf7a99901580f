pub use algorithm::Algorithm;
pub use gene_pool::{GenePool, GenePoolArg};
pub use non_dominated_gene_pool::{NonDominatedGenePool, NonDominatedGenePoolArg};
pub use stopping_condition::{
    MaxDuration, MaxGeneration, StoppingCondition, StoppingConditionType,
};

mod algorithm;
mod gene_pool;
mod non_dominated_gene_pool;
mod stopping_condition;
