use crate::core::EvoError;

/// Define the sort type
#[derive(PartialEq)]
pub enum Sort {
    /// Sort values in ascending order
    Ascending,
    /// Sort values in descending order
    Descending,
}

/// Returns the indices that would sort an array. The sort is stable: equal values keep their
/// order with [`Sort::Ascending`].
///
/// # Arguments
///
/// * `data`: The vector to sort.
/// * `sort_type`: Specify whether to sort in ascending or descending order.
///
/// returns: `Vec<usize>`. The vector with the indices.
pub fn argsort(data: &[f64], sort_type: Sort) -> Vec<usize> {
    let mut indices = (0..data.len()).collect::<Vec<_>>();
    indices.sort_by(|a, b| data[*a].total_cmp(&data[*b]));

    if sort_type == Sort::Descending {
        indices.reverse();
    }
    indices
}

/// Calculate the vector minimum value.
///
/// # Arguments
///
/// * `v`: The vector.
///
/// returns: `Result<f64, EvoError>`
pub fn vector_min(v: &[f64]) -> Result<f64, EvoError> {
    v.iter()
        .copied()
        .min_by(|a, b| a.total_cmp(b))
        .ok_or(EvoError::EmptyPopulation("vector_min".to_string()))
}

/// Calculate the vector maximum value.
///
/// # Arguments
///
/// * `v`: The vector.
///
/// returns: `Result<f64, EvoError>`
pub fn vector_max(v: &[f64]) -> Result<f64, EvoError> {
    v.iter()
        .copied()
        .max_by(|a, b| a.total_cmp(b))
        .ok_or(EvoError::EmptyPopulation("vector_max".to_string()))
}

/// Get the index of the first largest value.
///
/// # Arguments
///
/// * `v`: The vector.
///
/// returns: `Option<usize>`. `None` if the vector is empty.
pub fn argmax(v: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, value) in v.iter().enumerate() {
        match best {
            Some(b) if v[b] >= *value => {}
            _ => best = Some(i),
        }
    }
    best
}
