//! # densemat
//!
//! Small dense matrix value type for numeric prototyping: linear-algebra
//! exercises, toy neural-network forward passes, reproducible randomized
//! tests.
//!
//! ## Quick start
//!
//! ```
//! use densemat::{Matrix, Prng};
//!
//! let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
//! let b = Matrix::from_rows(3, 1, &[1.0, 0.0, 0.0]).unwrap();
//! let c = a.mul(&b).unwrap();
//! assert_eq!(c.as_slice(), &[1.0, 4.0, 7.0]);
//!
//! // Reproducible random weights and a ReLU layer
//! let mut g = Prng::new(42);
//! let w = Matrix::random(3, 3, &mut g, -1.0, 1.0).unwrap();
//! let h = w.mul(&b).unwrap().apply(|x| x.max(0.0));
//! assert_eq!(h.shape(), (3, 1));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: [`Matrix`], an owned row-major `Vec<f32>` with runtime
//!   extents. Arithmetic (`add`, `sub`, `mul`, `hadamard`, `scale`),
//!   `apply`, `sum`, `transpose`, concatenation (`expand`), sub-region
//!   extraction (`slice`), and a bordered text rendering. Every fallible
//!   operation returns [`MatrixError`] and leaves its operands untouched.
//!
//! - [`prng`]: [`Prng`], a deterministic linear-congruential generator
//!   configured by [`LcgParams`].
//!
//! - [`traits`]: [`RandomSource`], the `generate()` / `max_value()`
//!   capability that [`Matrix::randomize`] draws from.
//!
//! - [`io`]: binary `save` / `load` (requires `std`).
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Binary persistence, `std::error::Error` impls |
//! | `rand`  | yes     | [`RandSource`] adapter for any `rand::RngCore` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
pub mod io;
pub mod matrix;
pub mod prng;
#[cfg(feature = "rand")]
mod rand_source;
pub mod traits;

#[cfg(feature = "std")]
pub use io::PersistError;
pub use matrix::{Matrix, MatrixError};
pub use prng::{LcgParams, Prng};
#[cfg(feature = "rand")]
pub use rand_source::RandSource;
pub use traits::RandomSource;
