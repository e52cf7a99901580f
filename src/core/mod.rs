pub use error::EvoError;
pub use genotype::{Genotype, Offspring};
pub use individual::EvaluatedIndividual;

mod error;
mod genotype;
mod individual;
#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod utils;
