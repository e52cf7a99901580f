use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Get the random number generator. If no seed is provided, the generator is seeded from the
/// operating system entropy source.
///
/// # Arguments
///
/// * `seed`: The optional seed number.
///
/// returns: `Box<dyn RngCore>`
pub(crate) fn get_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    let rng = match seed {
        None => ChaCha8Rng::from_entropy(),
        Some(s) => ChaCha8Rng::seed_from_u64(s),
    };
    Box::new(rng)
}

/// Check that a probability is in the [0, 1] range.
///
/// # Arguments
///
/// * `value`: The probability.
///
/// returns: `bool`
pub(crate) fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

#[cfg(test)]
mod test {
    use rand::Rng;

    use crate::core::utils::{get_rng, is_probability};

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut rng1 = get_rng(Some(7));
        let mut rng2 = get_rng(Some(7));
        let a: Vec<u32> = (0..10).map(|_| rng1.gen_range(0..1000)).collect();
        let b: Vec<u32> = (0..10).map(|_| rng2.gen_range(0..1000)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_probability() {
        assert!(is_probability(0.0));
        assert!(is_probability(1.0));
        assert!(!is_probability(-0.1));
        assert!(!is_probability(1.01));
        assert!(!is_probability(f64::NAN));
    }
}
