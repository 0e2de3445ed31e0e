use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::traits::RandomSource;

use super::{Matrix, MatrixError};

// ── Aggregation ─────────────────────────────────────────────────────

impl Matrix {
    /// Sum of all elements, accumulated in row-major order from `0.0`.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let mut m = Matrix::zeros(2, 2);
    /// m.fill(5.0);
    /// assert_eq!(m.sum(), 20.0);
    /// ```
    pub fn sum(&self) -> f32 {
        let mut s = 0.0_f32;
        for &x in &self.data {
            s += x;
        }
        s
    }
}

// ── Map / fill ──────────────────────────────────────────────────────

impl Matrix {
    /// Apply `f` to every element, producing a new matrix of the same shape.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 4.0, 9.0, 16.0]).unwrap();
    /// let r = m.apply(f32::sqrt);
    /// assert_eq!(r.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn apply(&self, f: impl Fn(f32) -> f32) -> Matrix {
        let data: Vec<f32> = self.data.iter().map(|&x| f(x)).collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Transposed copy; `self` is left unchanged.
    ///
    /// This is the only transpose: there is no in-place variant.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), (3, 2));
    /// assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    /// ```
    pub fn transpose(&self) -> Matrix {
        let n = self.ncols;
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self.data[j * n + i])
    }
}

// ── Random fill ─────────────────────────────────────────────────────

impl Matrix {
    /// Overwrite every element with a draw scaled into `[min, max]`.
    ///
    /// Each element takes `generate() / max_value() * (max - min) + min`,
    /// one draw per element in row-major order. Fails with
    /// [`MatrixError::InvalidRange`] (before drawing anything) if
    /// `max < min` or either bound is NaN.
    ///
    /// ```
    /// use densemat::{Matrix, Prng};
    /// let mut g = Prng::new(1);
    /// let mut m = Matrix::zeros(3, 3);
    /// m.randomize(&mut g, -1.0, 1.0).unwrap();
    /// assert!(m.iter().all(|&x| (-1.0..=1.0).contains(&x)));
    /// ```
    pub fn randomize(
        &mut self,
        rng: &mut impl RandomSource,
        min: f32,
        max: f32,
    ) -> Result<(), MatrixError> {
        if !(max >= min) {
            return Err(MatrixError::InvalidRange { min, max });
        }
        log::trace!(
            "randomizing {}x{} matrix into [{min}, {max}]",
            self.nrows,
            self.ncols
        );
        self.fill_random(rng, min, max - min);
        Ok(())
    }

    /// [`randomize`](Matrix::randomize) over `[0, 1]`.
    pub fn randomize_unit(&mut self, rng: &mut impl RandomSource) {
        self.fill_random(rng, 0.0, 1.0);
    }

    fn fill_random(&mut self, rng: &mut impl RandomSource, min: f32, span: f32) {
        let top = rng.max_value() as f32;
        for x in self.data.iter_mut() {
            *x = rng.generate() as f32 / top * span + min;
        }
    }

    /// New `nrows x ncols` matrix filled by [`randomize`](Matrix::randomize).
    pub fn random(
        nrows: usize,
        ncols: usize,
        rng: &mut impl RandomSource,
        min: f32,
        max: f32,
    ) -> Result<Matrix, MatrixError> {
        let mut m = Matrix::try_zeros(nrows, ncols)?;
        m.randomize(rng, min, max)?;
        Ok(m)
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl Matrix {
    /// Bordered grid with five decimals per element and right-aligned
    /// columns.
    ///
    /// Fails with [`MatrixError::Empty`] when either extent is zero.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(1, 2, &[1.0, -0.5]).unwrap();
    /// let s = m.render().unwrap();
    /// assert_eq!(s.lines().nth(1), Some("│ 1.00000 -0.50000 │"));
    /// assert!(Matrix::new().render().is_err());
    /// ```
    pub fn render(&self) -> Result<String, MatrixError> {
        if self.is_empty() {
            return Err(MatrixError::Empty);
        }
        Ok(alloc::format!("{self}"))
    }
}

/// Same grid as [`Matrix::render`]. A matrix with a zero extent draws an
/// empty box.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;
        let row = |i: usize| &self.data[i * n..(i + 1) * n];

        let mut widths: Vec<usize> = alloc::vec![0; n];
        for i in 0..m {
            for (j, &x) in row(i).iter().enumerate() {
                let w = WriteCounting::count(|wc| write!(wc, "{x:.5}"));
                if w > widths[j] {
                    widths[j] = w;
                }
            }
        }
        let inner: usize = widths.iter().map(|w| w + 1).sum();

        writeln!(f, "┌ {:inner$}┐", "")?;
        for i in 0..m {
            write!(f, "│ ")?;
            for (j, &x) in row(i).iter().enumerate() {
                write!(f, "{x:>width$.5} ", width = widths[j])?;
            }
            writeln!(f, "│")?;
        }
        write!(f, "└ {:inner$}┘", "")
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Prng;
    use alloc::format;
    use alloc::string::ToString;

    #[test]
    fn sum() {
        let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.sum(), 10.0);
        assert_eq!(Matrix::new().sum(), 0.0);
    }

    #[test]
    fn fill_then_sum() {
        let mut m = Matrix::zeros(2, 2);
        m.fill(5.0);
        assert_eq!(m.sum(), 20.0);
    }

    #[test]
    fn sum_row_major_order() {
        // 1e8 + 1 rounds back to 1e8 in f32, so order is visible.
        let m = Matrix::from_rows(2, 2, &[1e8, 1.0, -1e8, 1.0]).unwrap();
        assert_eq!(m.sum(), 1.0);
        assert_eq!(m.transpose().sum(), 2.0);
    }

    #[test]
    fn apply() {
        let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let r = m.apply(|x| x * x + 1.0);
        assert_eq!(r.shape(), (2, 2));
        assert_eq!(r.as_slice(), &[2.0, 5.0, 10.0, 17.0]);
        assert_eq!(m[(0, 0)], 1.0);
    }

    fn relu(x: f32) -> f32 {
        if x > 0.0 {
            x
        } else {
            0.0
        }
    }

    #[test]
    fn apply_fn_pointer() {
        let m = Matrix::from_rows(1, 3, &[-1.0, 0.0, 2.0]).unwrap();
        assert_eq!(m.apply(relu).as_slice(), &[0.0, 0.0, 2.0]);
    }

    #[test]
    fn transpose() {
        let m = Matrix::from_fn(2, 3, |i, j| (i * 3 + j) as f32);
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t[(j, i)], m[(i, j)]);
            }
        }
        assert_eq!(m.shape(), (2, 3));
    }

    #[test]
    fn transpose_involution() {
        let m = Matrix::from_fn(4, 7, |i, j| (i as f32).sin() + j as f32);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(Matrix::zeros(0, 3).transpose().shape(), (3, 0));
    }

    #[test]
    fn randomize_reproducible() {
        let mut a = Matrix::zeros(4, 4);
        let mut b = Matrix::zeros(4, 4);
        a.randomize(&mut Prng::new(77), -2.0, 3.0).unwrap();
        b.randomize(&mut Prng::new(77), -2.0, 3.0).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| (-2.0..=3.0).contains(&x)));
    }

    #[test]
    fn randomize_draw_order() {
        let mut g = Prng::new(5);
        let mut expected = Prng::new(5);
        let top = expected.max_value() as f32;
        let mut m = Matrix::zeros(2, 3);
        m.randomize(&mut g, 0.0, 1.0).unwrap();
        for &x in m.iter() {
            assert_eq!(x, expected.generate() as f32 / top * 1.0 + 0.0);
        }
    }

    #[test]
    fn randomize_unit_matches_default_range() {
        let mut a = Matrix::zeros(3, 2);
        let mut b = Matrix::zeros(3, 2);
        a.randomize_unit(&mut Prng::new(8));
        b.randomize(&mut Prng::new(8), 0.0, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn randomize_degenerate_range() {
        let mut m = Matrix::zeros(2, 2);
        m.randomize(&mut Prng::new(3), 4.0, 4.0).unwrap();
        assert!(m.iter().all(|&x| x == 4.0));
    }

    #[test]
    fn randomize_invalid_range() {
        let mut g = Prng::new(3);
        let state = g.state();
        let mut m = Matrix::zeros(2, 2);
        m.fill(7.0);
        assert_eq!(
            m.randomize(&mut g, 1.0, 0.0).unwrap_err(),
            MatrixError::InvalidRange { min: 1.0, max: 0.0 }
        );
        assert!(m.randomize(&mut g, 0.0, f32::NAN).is_err());
        assert!(m.iter().all(|&x| x == 7.0));
        assert_eq!(g.state(), state);
    }

    #[test]
    fn random_constructor() {
        let m = Matrix::random(3, 2, &mut Prng::new(9), 0.0, 1.0).unwrap();
        let mut n = Matrix::zeros(3, 2);
        n.randomize(&mut Prng::new(9), 0.0, 1.0).unwrap();
        assert_eq!(m, n);
    }

    #[test]
    fn display_layout() {
        let m = Matrix::from_rows(2, 2, &[1.0, 2.5, -3.0, 4.0]).unwrap();
        let s = m.to_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("┌{}┐", " ".repeat(18)));
        assert_eq!(lines[1], "│  1.00000 2.50000 │");
        assert_eq!(lines[2], "│ -3.00000 4.00000 │");
        assert_eq!(lines[3], format!("└{}┘", " ".repeat(18)));
    }

    #[test]
    fn display_alignment() {
        let m = Matrix::from_rows(2, 2, &[1.0, 100.0, 1000.0, 2.0]).unwrap();
        let s = m.render().unwrap();
        let widths: Vec<usize> = s.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn render_empty() {
        assert_eq!(Matrix::new().render(), Err(MatrixError::Empty));
        assert_eq!(Matrix::zeros(0, 3).render(), Err(MatrixError::Empty));
    }

    #[test]
    fn display_empty_box() {
        assert_eq!(Matrix::new().to_string(), "┌ ┐\n└ ┘");
        assert_eq!(Matrix::zeros(0, 3).to_string(), "┌    ┐\n└    ┘");
        assert_eq!(Matrix::zeros(2, 0).to_string(), "┌ ┐\n│ │\n│ │\n└ ┘");
    }
}
