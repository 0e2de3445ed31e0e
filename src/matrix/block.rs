use alloc::vec::Vec;
use core::ops::Range;

use super::{range_pair, Matrix, MatrixError};

impl Matrix {
    /// Concatenate `other` after `self` along `axis`.
    ///
    /// Axis 0 stacks rows (column counts must match), axis 1 appends columns
    /// (row counts must match). `self`'s elements keep their indices.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let a = Matrix::from_rows(1, 2, &[1.0, 2.0]).unwrap();
    /// let b = Matrix::from_rows(1, 2, &[3.0, 4.0]).unwrap();
    ///
    /// let v = a.expand(&b, 0).unwrap();
    /// assert_eq!(v.shape(), (2, 2));
    /// assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    ///
    /// let h = a.expand(&b, 1).unwrap();
    /// assert_eq!(h.shape(), (1, 4));
    /// assert_eq!(h.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn expand(&self, other: &Matrix, axis: usize) -> Result<Matrix, MatrixError> {
        let mismatch = MatrixError::ShapeMismatch {
            op: "expand",
            left: self.shape(),
            right: other.shape(),
        };
        match axis {
            0 => {
                if self.ncols != other.ncols {
                    return Err(mismatch);
                }
                let nrows = self.nrows.checked_add(other.nrows).ok_or(
                    MatrixError::SizeOverflow {
                        rows: usize::MAX,
                        cols: self.ncols,
                    },
                )?;
                let mut data = Vec::with_capacity(self.len() + other.len());
                data.extend_from_slice(&self.data);
                data.extend_from_slice(&other.data);
                Ok(Matrix {
                    data,
                    nrows,
                    ncols: self.ncols,
                })
            }
            1 => {
                if self.nrows != other.nrows {
                    return Err(mismatch);
                }
                let ncols = self.ncols.checked_add(other.ncols).ok_or(
                    MatrixError::SizeOverflow {
                        rows: self.nrows,
                        cols: usize::MAX,
                    },
                )?;
                let mut data = Vec::with_capacity(self.len() + other.len());
                for i in 0..self.nrows {
                    data.extend_from_slice(self.row_slice(i)?);
                    data.extend_from_slice(other.row_slice(i)?);
                }
                Ok(Matrix {
                    data,
                    nrows: self.nrows,
                    ncols,
                })
            }
            _ => Err(MatrixError::InvalidAxis(axis)),
        }
    }

    /// Copy out the half-open region `rows x cols`.
    ///
    /// Both ranges must be non-empty and lie within the matrix; otherwise
    /// fails with [`MatrixError::RegionOutOfBounds`].
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| (i * 3 + j) as f32);
    /// let s = m.slice(1..3, 1..3).unwrap();
    /// assert_eq!(s.as_slice(), &[4.0, 5.0, 7.0, 8.0]);
    /// assert!(m.slice(2..2, 0..1).is_err());
    /// ```
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Matrix, MatrixError> {
        if rows.start >= rows.end
            || cols.start >= cols.end
            || rows.end > self.nrows
            || cols.end > self.ncols
        {
            return Err(MatrixError::RegionOutOfBounds {
                rows: range_pair(&rows),
                cols: range_pair(&cols),
                shape: self.shape(),
            });
        }
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for i in rows.clone() {
            data.extend_from_slice(&self.row_slice(i)?[cols.clone()]);
        }
        Ok(Matrix {
            data,
            nrows: rows.len(),
            ncols: cols.len(),
        })
    }

    /// First `n` rows.
    pub fn top_rows(&self, n: usize) -> Result<Matrix, MatrixError> {
        self.slice(0..n, 0..self.ncols)
    }

    /// Rows from `start` to the end.
    pub fn rows_from(&self, start: usize) -> Result<Matrix, MatrixError> {
        self.slice(start..self.nrows, 0..self.ncols)
    }

    /// First `n` columns.
    pub fn left_cols(&self, n: usize) -> Result<Matrix, MatrixError> {
        self.slice(0..self.nrows, 0..n)
    }

    /// Columns from `start` to the end.
    pub fn cols_from(&self, start: usize) -> Result<Matrix, MatrixError> {
        self.slice(0..self.nrows, start..self.ncols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat4x5() -> Matrix {
        Matrix::from_fn(4, 5, |i, j| (i * 5 + j) as f32)
    }

    #[test]
    fn slice_extract() {
        let m = mat4x5();
        let b = m.slice(1..3, 1..4).unwrap();
        assert_eq!(b.shape(), (2, 3));
        assert_eq!(b[(0, 0)], 6.0);
        assert_eq!(b[(0, 2)], 8.0);
        assert_eq!(b[(1, 0)], 11.0);
        assert_eq!(b[(1, 2)], 13.0);
    }

    #[test]
    fn slice_full() {
        let m = mat4x5();
        assert_eq!(m.slice(0..4, 0..5).unwrap(), m);
    }

    #[test]
    fn slice_single() {
        let m = mat4x5();
        let s = m.slice(2..3, 3..4).unwrap();
        assert_eq!(s.shape(), (1, 1));
        assert_eq!(s[(0, 0)], 13.0);
    }

    #[test]
    fn slice_invalid_regions() {
        let m = mat4x5();
        for (rows, cols) in [(2..2, 0..1), (3..1, 0..1), (0..1, 4..4), (0..5, 0..1), (0..1, 0..6)] {
            assert_eq!(
                m.slice(rows.clone(), cols.clone()).unwrap_err(),
                MatrixError::RegionOutOfBounds {
                    rows: (rows.start, rows.end),
                    cols: (cols.start, cols.end),
                    shape: (4, 5),
                }
            );
        }
    }

    #[test]
    fn slice_does_not_alias() {
        let m = mat4x5();
        let mut s = m.slice(0..1, 0..1).unwrap();
        s[(0, 0)] = -1.0;
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn expand_rows() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_rows(1, 2, &[5.0, 6.0]).unwrap();
        let e = a.expand(&b, 0).unwrap();
        assert_eq!(e.shape(), (3, 2));
        assert_eq!(e.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn expand_cols() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_rows(2, 1, &[5.0, 6.0]).unwrap();
        let e = a.expand(&b, 1).unwrap();
        assert_eq!(e.shape(), (2, 3));
        assert_eq!(e.as_slice(), &[1.0, 2.0, 5.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn expand_mismatch() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(3, 3);
        let err = MatrixError::ShapeMismatch {
            op: "expand",
            left: (2, 2),
            right: (3, 3),
        };
        assert_eq!(a.expand(&b, 0).unwrap_err(), err);
        assert_eq!(a.expand(&b, 1).unwrap_err(), err);
    }

    #[test]
    fn expand_invalid_axis() {
        let a = Matrix::zeros(2, 2);
        assert_eq!(a.expand(&a, 2).unwrap_err(), MatrixError::InvalidAxis(2));
    }

    #[test]
    fn expand_onto_empty_rows() {
        let a = Matrix::zeros(0, 3);
        let b = Matrix::from_rows(1, 3, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(a.expand(&b, 0).unwrap(), b);
    }

    #[test]
    fn expand_extent_overflow() {
        let a = Matrix::zeros(usize::MAX, 0);
        let b = Matrix::zeros(1, 0);
        assert_eq!(
            a.expand(&b, 0).unwrap_err(),
            MatrixError::SizeOverflow {
                rows: usize::MAX,
                cols: 0
            }
        );
        let c = Matrix::zeros(0, usize::MAX);
        assert_eq!(
            c.expand(&Matrix::zeros(0, 1), 1).unwrap_err(),
            MatrixError::SizeOverflow {
                rows: 0,
                cols: usize::MAX
            }
        );
    }

    #[test]
    fn expand_then_slice_back() {
        let a = mat4x5();
        let b = Matrix::from_fn(2, 5, |i, j| -((i * 5 + j) as f32));
        let e = a.expand(&b, 0).unwrap();
        assert_eq!(e.top_rows(4).unwrap(), a);
        assert_eq!(e.rows_from(4).unwrap(), b);

        let c = Matrix::from_fn(4, 2, |i, j| (i + j) as f32 * 0.5);
        let e = a.expand(&c, 1).unwrap();
        assert_eq!(e.left_cols(5).unwrap(), a);
        assert_eq!(e.cols_from(5).unwrap(), c);
    }
}
