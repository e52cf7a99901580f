use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum EvoError {
    #[error("The configuration of {0} is not valid: {1}")]
    Configuration(String, String),
    #[error("The total fitness of the population is {0}. The fitness cannot be normalised")]
    DegenerateFitness(f64),
    #[error("The fitness vectors have a different number of objectives ({0} and {1})")]
    DimensionMismatch(usize, usize),
    #[error("The population of {0} is empty. You must initialise the population first")]
    EmptyPopulation(String),
    #[error("An error occurred in the selector operator '{0}': {1}")]
    SelectorOperator(String, String),
    #[error("NaN detected in the {0} of individual #{1}. This may be an error in the user-defined fitness function")]
    NaN(String, usize),
}
