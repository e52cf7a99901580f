use std::error::Error;
use std::sync::Arc;

use log::{info, LevelFilter};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use genepool::algorithms::{
    Algorithm, GenePool, GenePoolArg, MaxGeneration, StoppingConditionType,
};
use genepool::core::{Genotype, Offspring};
use genepool::operators::ordered::{single_point_crossover, single_swap_mutation};
use genepool::operators::Selection;

/// The distances between each pair of cities.
type DistanceMatrix = Arc<Vec<Vec<f64>>>;

/// The order the salesman visits the cities in.
#[derive(Clone, Debug)]
struct Tour {
    cities: Vec<usize>,
    distances: DistanceMatrix,
}

impl Tour {
    /// The length of the closed tour.
    fn length(&self) -> f64 {
        let n = self.cities.len();
        (0..n)
            .map(|i| self.distances[self.cities[i]][self.cities[(i + 1) % n]])
            .sum()
    }
}

impl Genotype for Tour {
    type Fitness = f64;
    type Context = DistanceMatrix;

    fn create_random(context: &DistanceMatrix, rng: &mut dyn RngCore) -> Self {
        let mut cities: Vec<usize> = (0..context.len()).collect();
        cities.shuffle(rng);
        Tour {
            cities,
            distances: Arc::clone(context),
        }
    }

    fn mutate(&mut self, rng: &mut dyn RngCore) {
        single_swap_mutation(&mut self.cities, rng);
    }

    fn crossover(parent_a: &Self, parent_b: &Self, rng: &mut dyn RngCore) -> Offspring<Self> {
        let (a, b) = single_point_crossover(&parent_a.cities, &parent_b.cities, rng);
        Offspring {
            child1: Tour {
                cities: a,
                distances: Arc::clone(&parent_a.distances),
            },
            child2: Tour {
                cities: b,
                distances: Arc::clone(&parent_a.distances),
            },
        }
    }

    fn calculate_fitness(&self) -> f64 {
        1.0 / self.length()
    }
}

/// Place the cities randomly in a 100x100 square and calculate their Euclidean distances.
fn random_cities(number_of_cities: usize, seed: u64) -> DistanceMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..number_of_cities)
        .map(|_| (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect();
    Arc::new(
        points
            .iter()
            .map(|a| {
                points
                    .iter()
                    .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                    .collect()
            })
            .collect(),
    )
}

/// Solve a travelling salesman problem with 20 random cities. The tour length is minimised by
/// maximising its inverse.
///
/// `cargo run --example tsp --release`
fn main() -> Result<(), Box<dyn Error>> {
    // Add log
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let mut args = GenePoolArg::new(200);
    args.mutation_rate = 0.1;
    args.selection = Selection::Tournament(5);
    args.parallel = Some(true);
    args.seed = Some(10);

    let mut pool = GenePool::<Tour>::new(random_cities(20, 1), args)?;
    pool.run(&StoppingConditionType::MaxGeneration(MaxGeneration(500)))?;

    let best = pool.best_gene()?;
    info!("Best tour {:?} with length {:.2}", best.cities, best.length());

    Ok(())
}
