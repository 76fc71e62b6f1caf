//! Injectable source of uniform randomness.

use rand::Rng;

/// Supplies uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::test_support::SequenceRandom;

    #[test]
    fn test_sequence_cycles() {
        let mut rng = SequenceRandom::new([0.1, 0.9]);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.9);
        assert_eq!(rng.next_unit(), 0.1);
    }

    #[test]
    fn test_empty_sequence_yields_zero() {
        let mut rng = SequenceRandom::new(Vec::new());
        assert_eq!(rng.next_unit(), 0.0);
    }

    #[test]
    fn test_rng_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
