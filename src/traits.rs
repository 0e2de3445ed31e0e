/// A bounded stream of pseudo-random integers.
///
/// This is the capability [`Matrix::randomize`](crate::Matrix::randomize)
/// consumes: each draw is normalized as `generate() / max_value()`, so an
/// implementation must keep every draw within `0..=max_value()`.
///
/// Implemented by [`Prng`](crate::Prng) and, with the `rand` feature, by
/// [`RandSource`](crate::RandSource).
///
/// ```
/// use densemat::{Prng, RandomSource};
///
/// fn unit_draw(src: &mut impl RandomSource) -> f32 {
///     src.generate() as f32 / src.max_value() as f32
/// }
///
/// let x = unit_draw(&mut Prng::new(7));
/// assert!((0.0..=1.0).contains(&x));
/// ```
pub trait RandomSource {
    /// Advance the stream and return the next draw.
    fn generate(&mut self) -> u64;

    /// Largest value [`generate`](RandomSource::generate) can return.
    fn max_value(&self) -> u64;
}

