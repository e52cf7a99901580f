//! Crossover and mutation operators for ordered genes, where a genotype is a permutation of a
//! fixed set of items (for example the visiting order of cities in a travelling salesman
//! problem). Both operators preserve the permutation.
use rand::{Rng, RngCore};

/// Single-point crossover for permutations. A cut point is drawn uniformly in `0..=len`; each
/// child copies the genes of one parent up to the cut point, then appends the missing items in
/// the order they appear in the other parent.
///
/// # Arguments
///
/// * `parent_a`: The first parent.
/// * `parent_b`: The second parent. This must be a permutation of the same items of `parent_a`.
/// * `rng`: The random number generator.
///
/// returns: `(Vec<T>, Vec<T>)`. The two children.
pub fn single_point_crossover<T: Clone + PartialEq>(
    parent_a: &[T],
    parent_b: &[T],
    rng: &mut dyn RngCore,
) -> (Vec<T>, Vec<T>) {
    let cut = rng.gen_range(0..=parent_a.len().min(parent_b.len()));
    (
        fill_from(&parent_a[..cut], parent_b),
        fill_from(&parent_b[..cut], parent_a),
    )
}

/// Copy the prefix and append the items of `other` not yet in the child.
fn fill_from<T: Clone + PartialEq>(prefix: &[T], other: &[T]) -> Vec<T> {
    let mut child = prefix.to_vec();
    for item in other {
        if !child.contains(item) {
            child.push(item.clone());
        }
    }
    child
}

/// Swap two genes at random positions. The two positions may coincide, in which case the gene
/// is left unchanged.
///
/// # Arguments
///
/// * `gene`: The gene to mutate.
/// * `rng`: The random number generator.
pub fn single_swap_mutation<T>(gene: &mut [T], rng: &mut dyn RngCore) {
    if gene.is_empty() {
        return;
    }
    let a = rng.gen_range(0..gene.len());
    let b = rng.gen_range(0..gene.len());
    gene.swap(a, b);
}
