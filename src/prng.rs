//! Deterministic linear-congruential generator.
//!
//! The recurrence is `curr = (a * curr + c) mod m`, and each draw is
//! `curr & max`. Two generators built from the same seed and [`LcgParams`]
//! produce identical sequences, which is what makes randomized matrices
//! reproducible.
//!
//! ```
//! use densemat::{LcgParams, Prng};
//!
//! let mut a = Prng::new(42);
//! let mut b = Prng::with_params(42, LcgParams::default());
//! for _ in 0..100 {
//!     assert_eq!(a.generate(), b.generate());
//! }
//! ```

use crate::traits::RandomSource;

/// Recurrence constants for [`Prng`].
///
/// The defaults are the classic ANSI C `rand()` constants with a 31-bit
/// output mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcgParams {
    /// Multiplier (default: 1103515245).
    pub a: u64,
    /// Increment (default: 12345).
    pub c: u64,
    /// Modulus (default: 2^31). Zero means no reduction beyond 64-bit wrap.
    pub m: u64,
    /// Output mask applied to the state (default: `0x7FFF_FFFF`).
    pub max: u64,
}

impl Default for LcgParams {
    fn default() -> Self {
        Self {
            a: 1_103_515_245,
            c: 12_345,
            m: 1 << 31,
            max: 0x7FFF_FFFF,
        }
    }
}

/// Linear-congruential pseudo-random generator.
///
/// Not `Clone`: a copy forks the sequence. Use [`Prng::fork`] to do that
/// explicitly.
#[derive(Debug)]
pub struct Prng {
    params: LcgParams,
    curr: u64,
}

impl Prng {
    /// Generator with the default [`LcgParams`].
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, LcgParams::default())
    }

    /// Generator with explicit recurrence constants.
    ///
    /// ```
    /// use densemat::{LcgParams, Prng};
    ///
    /// let params = LcgParams { a: 5, c: 3, m: 16, max: 0xF };
    /// let mut g = Prng::with_params(1, params);
    /// assert_eq!(g.generate(), 8); // (5 * 1 + 3) % 16
    /// assert_eq!(g.generate(), 11); // (5 * 8 + 3) % 16
    /// ```
    pub fn with_params(seed: u64, params: LcgParams) -> Self {
        log::trace!("prng seeded with {seed} ({params:?})");
        Self { params, curr: seed }
    }

    /// Recurrence constants in use.
    #[inline]
    pub fn params(&self) -> &LcgParams {
        &self.params
    }

    /// Most recently produced raw state (the seed before the first draw).
    #[inline]
    pub fn state(&self) -> u64 {
        self.curr
    }

    /// Copy of this generator at its current position.
    pub fn fork(&self) -> Self {
        Self {
            params: self.params,
            curr: self.curr,
        }
    }

    /// Advance the recurrence and return `curr & max`.
    #[inline]
    pub fn generate(&mut self) -> u64 {
        let LcgParams { a, c, m, max } = self.params;
        let next = a.wrapping_mul(self.curr).wrapping_add(c);
        self.curr = if m == 0 { next } else { next % m };
        self.curr & max
    }

    /// The output mask, i.e. the largest possible draw.
    #[inline]
    pub fn max_value(&self) -> u64 {
        self.params.max
    }
}

impl RandomSource for Prng {
    #[inline]
    fn generate(&mut self) -> u64 {
        Prng::generate(self)
    }

    #[inline]
    fn max_value(&self) -> u64 {
        Prng::max_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let p = LcgParams::default();
        assert_eq!(p.a, 1103515245);
        assert_eq!(p.c, 12345);
        assert_eq!(p.m, 2147483648);
        assert_eq!(p.max, 0x7FFFFFFF);
    }

    #[test]
    fn first_draws_match_recurrence() {
        let mut g = Prng::new(0);
        // (1103515245 * 0 + 12345) % 2^31
        assert_eq!(g.generate(), 12345);
        let expected = (1103515245u64 * 12345 + 12345) % (1 << 31);
        assert_eq!(g.generate(), expected);
        assert_eq!(g.state(), expected);
    }

    #[test]
    fn deterministic_sequences() {
        let mut a = Prng::new(123_456);
        let mut b = Prng::new(123_456);
        for _ in 0..1000 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Prng::new(1);
        let mut b = Prng::new(2);
        let same = (0..100).filter(|_| a.generate() == b.generate()).count();
        assert!(same < 100);
    }

    #[test]
    fn draws_within_mask() {
        let mut g = Prng::new(99);
        for _ in 0..1000 {
            assert!(g.generate() <= g.max_value());
        }
    }

    #[test]
    fn mask_selects_low_bits() {
        let params = LcgParams {
            max: 0xFF,
            ..LcgParams::default()
        };
        let mut g = Prng::with_params(5, params);
        for _ in 0..100 {
            let x = g.generate();
            assert_eq!(x, g.state() & 0xFF);
        }
    }

    #[test]
    fn zero_modulus_wraps() {
        let params = LcgParams {
            a: 2,
            c: 1,
            m: 0,
            max: u64::MAX,
        };
        let mut g = Prng::with_params(u64::MAX, params);
        // 2 * (2^64 - 1) + 1 wraps to 2^64 - 1
        assert_eq!(g.generate(), u64::MAX);
    }

    #[test]
    fn large_multiplier_does_not_overflow() {
        let params = LcgParams {
            a: u64::MAX,
            c: 7,
            m: 1000,
            max: u64::MAX,
        };
        let mut g = Prng::with_params(u64::MAX, params);
        let x = g.generate();
        assert!(x < 1000);
    }

    #[test]
    fn fork_continues_same_sequence() {
        let mut g = Prng::new(11);
        g.generate();
        let mut h = g.fork();
        for _ in 0..50 {
            assert_eq!(g.generate(), h.generate());
        }
    }
}
