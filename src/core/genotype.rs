use rand::RngCore;

/// The two children generated by [`Genotype::crossover`].
#[derive(Clone, Debug)]
pub struct Offspring<G> {
    /// The first generated child.
    pub child1: G,
    /// The second generated child.
    pub child2: G,
}

/// The trait to implement to evolve a representation of a candidate solution with the gene pools.
/// The pools never inspect the genotype content and only use the operations below.
///
/// Use `f64` as [`Genotype::Fitness`] for the single-objective [`crate::algorithms::GenePool`]
/// and `Vec<f64>` for the multi-objective [`crate::algorithms::NonDominatedGenePool`]. The fitness
/// is always maximised.
///
/// # Example
///
/// ```
/// use rand::{Rng, RngCore};
/// use genepool::core::{Genotype, Offspring};
///
/// /// Find the maximum of `-(x - 3)^2` for an integer `x` in a user-given range.
/// #[derive(Clone, Debug)]
/// struct Parabola {
///     x: i64,
/// }
///
/// impl Genotype for Parabola {
///     type Fitness = f64;
///     type Context = (i64, i64);
///
///     fn create_random(context: &(i64, i64), rng: &mut dyn RngCore) -> Self {
///         Parabola { x: rng.gen_range(context.0..=context.1) }
///     }
///
///     fn mutate(&mut self, rng: &mut dyn RngCore) {
///         self.x += rng.gen_range(-1..=1);
///     }
///
///     fn crossover(a: &Self, b: &Self, _rng: &mut dyn RngCore) -> Offspring<Self> {
///         let mid = (a.x + b.x) / 2;
///         Offspring { child1: Parabola { x: mid }, child2: Parabola { x: a.x + b.x - mid } }
///     }
///
///     fn calculate_fitness(&self) -> f64 {
///         // keep the score positive so that it can be normalised
///         1.0 / (1.0 + ((self.x - 3) as f64).powi(2))
///     }
/// }
/// ```
pub trait Genotype: Clone + Send + Sync {
    /// The fitness type returned by [`Genotype::calculate_fitness`].
    type Fitness: Clone + Send;
    /// Data shared by all the genotypes of a run, for example a list of cities or blocks. This is
    /// owned by the pool and passed to [`Genotype::create_random`].
    type Context;

    /// Create a new valid genotype with random data. This is used to bootstrap the first
    /// population.
    ///
    /// # Arguments
    ///
    /// * `context`: The data shared by the genotypes.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Self`
    fn create_random(context: &Self::Context, rng: &mut dyn RngCore) -> Self;

    /// Perturb the genotype in place. The genotype must remain valid after the mutation.
    ///
    /// # Arguments
    ///
    /// * `rng`: The random number generator.
    fn mutate(&mut self, rng: &mut dyn RngCore);

    /// Recombine two parents into two new children. The parents are left untouched.
    ///
    /// # Arguments
    ///
    /// * `parent_a`: The first parent.
    /// * `parent_b`: The second parent.
    /// * `rng`: The random number generator.
    ///
    /// returns: `Offspring<Self>`
    fn crossover(parent_a: &Self, parent_b: &Self, rng: &mut dyn RngCore) -> Offspring<Self>;

    /// Calculate the fitness. This must be deterministic and side-effect free, because the pools
    /// cache the value.
    ///
    /// returns: `Self::Fitness`
    fn calculate_fitness(&self) -> Self::Fitness;
}
