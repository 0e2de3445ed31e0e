mod block;
mod ops;
mod util;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut, Range};

/// Errors from matrix construction, access, and arithmetic.
///
/// Every fallible [`Matrix`] operation checks its preconditions before
/// touching any buffer, so on error all operands are left unchanged.
///
/// ```
/// use densemat::{Matrix, MatrixError};
///
/// let a = Matrix::zeros(2, 3);
/// let b = Matrix::zeros(2, 2);
/// assert_eq!(
///     a.add(&b).unwrap_err(),
///     MatrixError::ShapeMismatch { op: "add", left: (2, 3), right: (2, 2) },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixError {
    /// Literal element count does not match `rows * cols`.
    ElementCount { expected: usize, got: usize },
    /// Operand shapes are incompatible for `op`.
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Axis is neither 0 (rows) nor 1 (columns).
    InvalidAxis(usize),
    /// Element index outside the matrix extents.
    OutOfBounds {
        row: usize,
        col: usize,
        shape: (usize, usize),
    },
    /// Sub-region is empty, inverted, or extends past the matrix extents.
    RegionOutOfBounds {
        rows: (usize, usize),
        cols: (usize, usize),
        shape: (usize, usize),
    },
    /// Random range with `max < min` (or a NaN bound).
    InvalidRange { min: f32, max: f32 },
    /// Operation is undefined on a matrix with a zero extent.
    Empty,
    /// Requested extents whose element count does not fit in `usize`.
    /// An extent that itself overflows is reported as `usize::MAX`.
    SizeOverflow { rows: usize, cols: usize },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ElementCount { expected, got } => {
                write!(f, "expected {expected} elements, got {got}")
            }
            Self::ShapeMismatch { op, left, right } => write!(
                f,
                "shape mismatch in {op}: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Self::InvalidAxis(axis) => write!(f, "invalid axis {axis}, expected 0 or 1"),
            Self::OutOfBounds { row, col, shape } => write!(
                f,
                "index ({row}, {col}) out of bounds for {}x{} matrix",
                shape.0, shape.1
            ),
            Self::RegionOutOfBounds { rows, cols, shape } => write!(
                f,
                "region [{}, {}) x [{}, {}) invalid for {}x{} matrix",
                rows.0, rows.1, cols.0, cols.1, shape.0, shape.1
            ),
            Self::InvalidRange { min, max } => {
                write!(f, "invalid range: max {max} is less than min {min}")
            }
            Self::Empty => write!(f, "matrix has a zero extent"),
            Self::SizeOverflow { rows, cols } => {
                write!(f, "{rows}x{cols} matrix is too large to address")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}

/// Dense `f32` matrix with runtime dimensions.
///
/// Row-major `Vec<f32>` storage: element `(row, col)` lives at
/// `row * ncols + col`. The buffer always holds exactly `nrows * ncols`
/// elements, and a 0×0 matrix owns an empty (never absent) buffer.
/// `Clone` is a deep copy.
///
/// # Examples
///
/// ```
/// use densemat::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(a.read_at(0, 1), Ok(2.0));
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let z = Matrix::zeros(3, 3);
/// assert_eq!(z.sum(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    pub(crate) data: Vec<f32>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl Matrix {
    /// Create a 0×0 matrix with an empty buffer.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::new();
    /// assert_eq!(m.shape(), (0, 0));
    /// assert!(m.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `nrows x ncols` matrix filled with `0.0`.
    ///
    /// # Panics
    ///
    /// If `nrows * ncols` overflows `usize`. See [`try_zeros`](Matrix::try_zeros).
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::zeros(2, 3);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m.read_at(1, 2), Ok(0.0));
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        match Self::try_zeros(nrows, ncols) {
            Ok(m) => m,
            Err(e) => panic!("{e}"),
        }
    }

    /// Checked [`zeros`](Matrix::zeros): fails with
    /// [`MatrixError::SizeOverflow`] instead of panicking.
    ///
    /// ```
    /// use densemat::{Matrix, MatrixError};
    /// assert_eq!(Matrix::try_zeros(2, 2).unwrap().len(), 4);
    /// assert_eq!(
    ///     Matrix::try_zeros(usize::MAX, 2).unwrap_err(),
    ///     MatrixError::SizeOverflow { rows: usize::MAX, cols: 2 },
    /// );
    /// ```
    pub fn try_zeros(nrows: usize, ncols: usize) -> Result<Self, MatrixError> {
        let len = element_count(nrows, ncols)?;
        Ok(Self {
            data: vec![0.0; len],
            nrows,
            ncols,
        })
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Fails with [`MatrixError::ElementCount`] if
    /// `row_major.len() != nrows * ncols`, or with
    /// [`MatrixError::SizeOverflow`] if that product overflows.
    ///
    /// ```
    /// use densemat::{Matrix, MatrixError};
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    ///
    /// let bad = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0]);
    /// assert_eq!(bad.unwrap_err(), MatrixError::ElementCount { expected: 4, got: 3 });
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[f32]) -> Result<Self, MatrixError> {
        check_len(nrows, ncols, row_major.len())?;
        Ok(Self {
            data: row_major.to_vec(),
            nrows,
            ncols,
        })
    }

    /// Create a matrix from an owned `Vec<f32>` in row-major order.
    ///
    /// Same length rule as [`from_rows`](Matrix::from_rows), without copying.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<f32>) -> Result<Self, MatrixError> {
        check_len(nrows, ncols, data.len())?;
        Ok(Self { data, nrows, ncols })
    }

    /// Create a matrix by calling `f(row, col)` for each element, in
    /// row-major order.
    ///
    /// # Panics
    ///
    /// If `nrows * ncols` overflows `usize`.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| if i == j { 1.0 } else { 0.0 });
    /// assert_eq!(m[(1, 1)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let len = match element_count(nrows, ncols) {
            Ok(len) => len,
            Err(e) => panic!("{e}"),
        };
        let mut data = Vec::with_capacity(len);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }
}

/// `nrows * ncols`, or [`MatrixError::SizeOverflow`].
pub(crate) fn element_count(nrows: usize, ncols: usize) -> Result<usize, MatrixError> {
    nrows
        .checked_mul(ncols)
        .ok_or(MatrixError::SizeOverflow {
            rows: nrows,
            cols: ncols,
        })
}

fn check_len(nrows: usize, ncols: usize, got: usize) -> Result<(), MatrixError> {
    let expected = element_count(nrows, ncols)?;
    if got != expected {
        return Err(MatrixError::ElementCount { expected, got });
    }
    Ok(())
}

// ── Accessors ───────────────────────────────────────────────────────

impl Matrix {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix has no elements (either extent is zero).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Extent along `axis`: 0 for rows, 1 for columns.
    ///
    /// ```
    /// use densemat::{Matrix, MatrixError};
    /// let m = Matrix::zeros(2, 5);
    /// assert_eq!(m.dim(0), Ok(2));
    /// assert_eq!(m.dim(1), Ok(5));
    /// assert_eq!(m.dim(2), Err(MatrixError::InvalidAxis(2)));
    /// ```
    pub fn dim(&self, axis: usize) -> Result<usize, MatrixError> {
        match axis {
            0 => Ok(self.nrows),
            1 => Ok(self.ncols),
            _ => Err(MatrixError::InvalidAxis(axis)),
        }
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                shape: self.shape(),
            });
        }
        Ok(row * self.ncols + col)
    }

    /// Mutable reference to element `(row, col)`.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let mut m = Matrix::zeros(2, 2);
    /// *m.at(1, 0).unwrap() = 3.5;
    /// assert_eq!(m.read_at(1, 0), Ok(3.5));
    /// assert!(m.at(2, 0).is_err());
    /// ```
    pub fn at(&mut self, row: usize, col: usize) -> Result<&mut f32, MatrixError> {
        let k = self.offset(row, col)?;
        Ok(&mut self.data[k])
    }

    /// Value of element `(row, col)`.
    pub fn read_at(&self, row: usize, col: usize) -> Result<f32, MatrixError> {
        let k = self.offset(row, col)?;
        Ok(self.data[k])
    }

    /// The whole buffer in row-major order.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Elements in row-major order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, f32> {
        self.data.iter()
    }

    /// Row `row` as a slice.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m.row_slice(1), Ok(&[4.0, 5.0, 6.0][..]));
    /// assert!(m.row_slice(2).is_err());
    /// ```
    pub fn row_slice(&self, row: usize) -> Result<&[f32], MatrixError> {
        if row >= self.nrows {
            return Err(MatrixError::OutOfBounds {
                row,
                col: 0,
                shape: self.shape(),
            });
        }
        let first = row * self.ncols;
        Ok(&self.data[first..first + self.ncols])
    }

    /// Exact equality: same shape and bitwise-equal IEEE values (`NaN`
    /// never compares equal). Same as `==`.
    pub fn equals(&self, other: &Matrix) -> bool {
        self == other
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    /// Panics with the [`MatrixError`] message when out of bounds.
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        match self.offset(row, col) {
            Ok(k) => &self.data[k],
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        match self.at(row, col) {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }
}

fn range_pair(r: &Range<usize>) -> (usize, usize) {
    (r.start, r.end)
}
