//! Adapter from the `rand` ecosystem to [`RandomSource`].

use rand::RngCore;

use crate::traits::RandomSource;

/// Wraps any [`RngCore`] as a 32-bit [`RandomSource`].
///
/// Each draw is one `next_u32()`, so `max_value()` is `u32::MAX`.
///
/// ```
/// use densemat::{Matrix, RandSource};
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let mut rng = RandSource(SmallRng::seed_from_u64(3));
/// let m = Matrix::random(2, 2, &mut rng, 0.0, 1.0).unwrap();
/// assert!(m.iter().all(|&x| (0.0..=1.0).contains(&x)));
/// ```
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

impl<R: RngCore> RandomSource for RandSource<R> {
    #[inline]
    fn generate(&mut self) -> u64 {
        u64::from(self.0.next_u32())
    }

    #[inline]
    fn max_value(&self) -> u64 {
        u64::from(u32::MAX)
    }
}
