use std::error::Error;

use log::{info, LevelFilter};
use rand::{Rng, RngCore};

use genepool::algorithms::{
    Algorithm, MaxGeneration, NonDominatedGenePool, NonDominatedGenePoolArg,
    StoppingConditionType,
};
use genepool::core::{Genotype, Offspring};

/// The bound of the variable.
const MAX_X: i64 = 10000;

/// A solution of the Schaffer's study with one integer variable.
#[derive(Clone, Debug)]
struct Schaffer {
    x: i64,
}

impl Genotype for Schaffer {
    type Fitness = Vec<f64>;
    type Context = ();

    fn create_random(_: &(), rng: &mut dyn RngCore) -> Self {
        Schaffer {
            x: rng.gen_range(-MAX_X..=MAX_X),
        }
    }

    fn mutate(&mut self, rng: &mut dyn RngCore) {
        let step = rng.gen_range(0..=100);
        if self.x + step <= MAX_X {
            self.x += step;
        } else {
            self.x -= step;
        }
    }

    fn crossover(parent_a: &Self, parent_b: &Self, rng: &mut dyn RngCore) -> Offspring<Self> {
        let diff = (parent_b.x - parent_a.x) as f64 / 10.0;
        let r = rng.gen_range(1..=10) as f64;
        Offspring {
            child1: Schaffer {
                x: parent_a.x + (r * diff) as i64,
            },
            child2: Schaffer {
                x: parent_a.x + ((10.0 - r) * diff) as i64,
            },
        }
    }

    fn calculate_fitness(&self) -> Vec<f64> {
        let x = self.x as f64;
        vec![-x.powi(2), -(x - 2.0).powi(2)]
    }
}

/// Solve the Schaffer's problem where the following 2 objectives are maximised:
/// - `f_1(x) = -x^2`
/// - `f_2(x) = -(x - 2)^2`
///
/// The variable `x` is an integer bounded to -10000 and 10000. The optimal solutions are expected
/// to lie in the [0; 2] range.
///
/// `cargo run --example schaffer --release`
fn main() -> Result<(), Box<dyn Error>> {
    // Add log
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let mut args = NonDominatedGenePoolArg::new(100);
    args.mutation_rate = 0.2;
    // to reproduce results
    args.seed = Some(10);
    info!("Options: {}", serde_json::to_string(&args)?);

    let mut pool = NonDominatedGenePool::<Schaffer>::new((), args)?;
    pool.run(&StoppingConditionType::MaxGeneration(MaxGeneration(100)))?;

    let mut front: Vec<(i64, &[f64])> = pool
        .best_genes()
        .into_iter()
        .map(|g| g.x)
        .zip(pool.best_fitness())
        .collect();
    front.sort_by_key(|(x, _)| *x);
    front.dedup_by_key(|(x, _)| *x);
    for (x, fitness) in front {
        info!("x = {x:>3} -> f_1 = {:>5}, f_2 = {:>5}", fitness[0], fitness[1]);
    }

    Ok(())
}
