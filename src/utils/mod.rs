pub use crowding_distance::{set_crowding_distance, CrowdingDistanceType};
pub use fast_non_dominated_sort::{fast_non_dominated_sort, NonDominatedSortResults};
pub use vectors::{argmax, argsort, vector_max, vector_min, Sort};

mod crowding_distance;
mod fast_non_dominated_sort;
mod vectors;
