//! Genotypes and helpers used in the tests.
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::core::{EvaluatedIndividual, Genotype, Offspring};
use crate::operators::ordered::{single_point_crossover, single_swap_mutation};

/// A genotype with no data. Used to build individuals from known fitness values.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DummyGene(pub usize);

impl Genotype for DummyGene {
    type Fitness = Vec<f64>;
    type Context = ();

    fn create_random(_: &(), rng: &mut dyn RngCore) -> Self {
        DummyGene(rng.gen_range(0..1000))
    }

    fn mutate(&mut self, _: &mut dyn RngCore) {}

    fn crossover(parent_a: &Self, parent_b: &Self, _: &mut dyn RngCore) -> Offspring<Self> {
        Offspring {
            child1: parent_a.clone(),
            child2: parent_b.clone(),
        }
    }

    fn calculate_fitness(&self) -> Vec<f64> {
        vec![self.0 as f64]
    }
}

/// Create the individuals for a dummy problem from their fitness vectors. The genotype of each
/// individual stores its position in `fitness`.
///
/// # Arguments
///
/// * `fitness`: The fitness vectors.
///
/// returns: `Vec<EvaluatedIndividual<DummyGene>>`
pub(crate) fn individuals_from_fitness_dummy(
    fitness: &[Vec<f64>],
) -> Vec<EvaluatedIndividual<DummyGene>> {
    fitness
        .iter()
        .enumerate()
        .map(|(i, f)| EvaluatedIndividual::from_parts(DummyGene(i), f.clone()))
        .collect()
}

/// The Schaffer's study genotype with one integer variable `x` in [-10000, 10000] and the two
/// objectives `-x^2` and `-(x-2)^2` to maximise. The Pareto optimal solutions have `x` in [0, 2].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SchafferGene {
    pub x: i64,
}

impl Genotype for SchafferGene {
    type Fitness = Vec<f64>;
    type Context = ();

    fn create_random(_: &(), rng: &mut dyn RngCore) -> Self {
        SchafferGene {
            x: rng.gen_range(-10000..=10000),
        }
    }

    fn mutate(&mut self, rng: &mut dyn RngCore) {
        let r = rng.gen_range(0..=100);
        if self.x + r <= 10000 {
            self.x += r;
        } else {
            self.x -= r;
        }
    }

    fn crossover(parent_a: &Self, parent_b: &Self, rng: &mut dyn RngCore) -> Offspring<Self> {
        let diff = (parent_b.x - parent_a.x) as f64 / 10.0;
        let r = rng.gen_range(1..=10) as f64;
        Offspring {
            child1: SchafferGene {
                x: parent_a.x + (r * diff) as i64,
            },
            child2: SchafferGene {
                x: parent_a.x + ((10.0 - r) * diff) as i64,
            },
        }
    }

    fn calculate_fitness(&self) -> Vec<f64> {
        let x = self.x as f64;
        vec![-x.powi(2), -(x - 2.0).powi(2)]
    }
}

/// A single-objective genotype whose fitness is a constant given in the context.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ConstantGene {
    pub value: f64,
}

impl Genotype for ConstantGene {
    type Fitness = f64;
    type Context = f64;

    fn create_random(context: &f64, _: &mut dyn RngCore) -> Self {
        ConstantGene { value: *context }
    }

    fn mutate(&mut self, _: &mut dyn RngCore) {}

    fn crossover(parent_a: &Self, parent_b: &Self, _: &mut dyn RngCore) -> Offspring<Self> {
        Offspring {
            child1: parent_a.clone(),
            child2: parent_b.clone(),
        }
    }

    fn calculate_fitness(&self) -> f64 {
        self.value
    }
}

/// A single-objective genotype tracking whether it was generated by crossover and how many times
/// it was mutated. Each genotype has a unique id.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TracedGene {
    pub id: u64,
    pub from_crossover: bool,
    pub mutations: usize,
}

impl Genotype for TracedGene {
    type Fitness = f64;
    type Context = ();

    fn create_random(_: &(), rng: &mut dyn RngCore) -> Self {
        TracedGene {
            id: rng.next_u64(),
            from_crossover: false,
            mutations: 0,
        }
    }

    fn mutate(&mut self, _: &mut dyn RngCore) {
        self.mutations += 1;
    }

    fn crossover(parent_a: &Self, parent_b: &Self, _: &mut dyn RngCore) -> Offspring<Self> {
        Offspring {
            child1: TracedGene {
                id: parent_a.id,
                from_crossover: true,
                mutations: 0,
            },
            child2: TracedGene {
                id: parent_b.id,
                from_crossover: true,
                mutations: 0,
            },
        }
    }

    fn calculate_fitness(&self) -> f64 {
        1.0
    }
}

/// The visiting order of the cities in a travelling salesman problem. The fitness is the inverse
/// of the tour length. The distance matrix is the shared context.
#[derive(Clone, Debug)]
pub(crate) struct TspPath {
    pub order: Vec<usize>,
    distances: Arc<Vec<Vec<f64>>>,
}

impl TspPath {
    /// The length of the closed tour.
    pub fn distance(&self) -> f64 {
        let n = self.order.len();
        (0..n)
            .map(|j| self.distances[self.order[j]][self.order[(j + 1) % n]])
            .sum()
    }

    /// Build the distance matrix for cities placed on a circle. The shortest tour visits the
    /// cities by increasing or decreasing index.
    pub fn circle_distances(number_of_cities: usize) -> Arc<Vec<Vec<f64>>> {
        let cities: Vec<(f64, f64)> = (0..number_of_cities)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / number_of_cities as f64;
                (angle.cos(), angle.sin())
            })
            .collect();
        Arc::new(
            cities
                .iter()
                .map(|a| {
                    cities
                        .iter()
                        .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                        .collect()
                })
                .collect(),
        )
    }
}

impl Genotype for TspPath {
    type Fitness = f64;
    type Context = Arc<Vec<Vec<f64>>>;

    fn create_random(context: &Self::Context, rng: &mut dyn RngCore) -> Self {
        let mut order: Vec<usize> = (0..context.len()).collect();
        order.shuffle(rng);
        TspPath {
            order,
            distances: context.clone(),
        }
    }

    fn mutate(&mut self, rng: &mut dyn RngCore) {
        single_swap_mutation(&mut self.order, rng);
    }

    fn crossover(parent_a: &Self, parent_b: &Self, rng: &mut dyn RngCore) -> Offspring<Self> {
        let (a, b) = single_point_crossover(&parent_a.order, &parent_b.order, rng);
        Offspring {
            child1: TspPath {
                order: a,
                distances: parent_a.distances.clone(),
            },
            child2: TspPath {
                order: b,
                distances: parent_a.distances.clone(),
            },
        }
    }

    fn calculate_fitness(&self) -> f64 {
        if self.order.len() < 2 {
            return 1.0;
        }
        1.0 / self.distance()
    }
}
