use alloc::vec;
use core::ops::{Add, Mul, MulAssign, Sub};

use super::{element_count, Matrix, MatrixError};

impl Matrix {
    fn check_same_shape(&self, rhs: &Matrix, op: &'static str) -> Result<(), MatrixError> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::ShapeMismatch {
                op,
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, rhs: &Matrix, f: impl Fn(f32, f32) -> f32) -> Matrix {
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    // ── Element-wise ────────────────────────────────────────────────

    /// Element-wise sum. Shapes must be identical.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let a = Matrix::from_rows(1, 2, &[1.0, 2.0]).unwrap();
    /// let b = Matrix::from_rows(1, 2, &[10.0, 20.0]).unwrap();
    /// assert_eq!(a.add(&b).unwrap().as_slice(), &[11.0, 22.0]);
    /// ```
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(rhs, "add")?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Element-wise difference `self - rhs`. Shapes must be identical.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let a = Matrix::from_rows(1, 2, &[5.0, 5.0]).unwrap();
    /// let b = Matrix::from_rows(1, 2, &[1.0, 2.0]).unwrap();
    /// assert_eq!(a.sub(&b).unwrap().as_slice(), &[4.0, 3.0]);
    /// ```
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(rhs, "sub")?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Element-wise (Hadamard) product. Shapes must be identical.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let h = a.hadamard(&a).unwrap();
    /// assert_eq!(h.as_slice(), &[1.0, 4.0, 9.0, 16.0]);
    /// ```
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(rhs, "hadamard")?;
        Ok(self.zip_with(rhs, |a, b| a * b))
    }

    // ── Matrix product: (M×N) * (N×P) → (M×P) ──────────────────────

    /// Matrix product. Requires `self.ncols() == rhs.nrows()`.
    ///
    /// Each output cell accumulates from `0.0` over `k = 0..n` in order, so
    /// results are bit-reproducible.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
    /// let b = Matrix::from_rows(3, 1, &[1.0, 0.0, 0.0]).unwrap();
    /// let c = a.mul(&b).unwrap();
    /// assert_eq!(c.shape(), (3, 1));
    /// assert_eq!(c.as_slice(), &[1.0, 4.0, 7.0]);
    /// ```
    pub fn mul(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::ShapeMismatch {
                op: "mul",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![0.0_f32; element_count(m, p)?];
        for i in 0..m {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                for j in 0..p {
                    data[i * p + j] += a_ik * rhs.data[k * p + j];
                }
            }
        }
        Ok(Matrix {
            data,
            nrows: m,
            ncols: p,
        })
    }

    /// Multiply every element by `a`.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(1, 3, &[1.0, -2.0, 3.0]).unwrap();
    /// assert_eq!(m.scale(2.0).as_slice(), &[2.0, -4.0, 6.0]);
    /// ```
    pub fn scale(&self, a: f32) -> Matrix {
        self.apply(|x| x * a)
    }

    // ── In place ────────────────────────────────────────────────────

    /// `self += rhs`. Leaves `self` untouched on shape mismatch.
    pub fn add_in_place(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        self.check_same_shape(rhs, "add")?;
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// `self -= rhs`. Leaves `self` untouched on shape mismatch.
    pub fn sub_in_place(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        self.check_same_shape(rhs, "sub")?;
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a -= b;
        }
        Ok(())
    }

    /// `self *= a`, element-wise.
    pub fn scale_in_place(&mut self, a: f32) {
        for x in self.data.iter_mut() {
            *x *= a;
        }
    }
}

// ── Operator sugar ──────────────────────────────────────────────────
//
// Matrix-matrix operators are fallible, so their output is a `Result`.
// No `Mul<f32> for Matrix`: it would shadow the inherent `mul` on owned
// receivers.

impl Add<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;
    fn add(self, rhs: &Matrix) -> Self::Output {
        Matrix::add(self, rhs)
    }
}

impl Sub<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;
    fn sub(self, rhs: &Matrix) -> Self::Output {
        Matrix::sub(self, rhs)
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;
    fn mul(self, rhs: &Matrix) -> Self::Output {
        Matrix::mul(self, rhs)
    }
}

impl Mul<f32> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: f32) -> Matrix {
        self.scale(rhs)
    }
}

impl Mul<&Matrix> for f32 {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs.scale(self)
    }
}

impl Mul<Matrix> for f32 {
    type Output = Matrix;
    fn mul(self, mut rhs: Matrix) -> Matrix {
        rhs.scale_in_place(self);
        rhs
    }
}

impl MulAssign<f32> for Matrix {
    fn mul_assign(&mut self, rhs: f32) {
        self.scale_in_place(rhs);
    }
}
