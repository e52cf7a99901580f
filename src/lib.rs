//! A generic genetic algorithm engine. Any evolvable representation implementing the
//! [`core::Genotype`] trait can be evolved either with:
//!  - [`algorithms::GenePool`]: a single-objective pool driven by a pluggable
//!    [`operators::Selection`] strategy; or
//!  - [`algorithms::NonDominatedGenePool`]: a multi-objective pool that ranks individuals with
//!    the fast non-dominated sorting and crowding distance of NSGA-II and keeps the best
//!    individuals from parents and offspring.
pub mod algorithms;
pub mod core;
pub mod operators;
pub mod utils;
