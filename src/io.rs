//! Binary persistence.
//!
//! Layout, with no header magic, version, or padding:
//!
//! | Field   | Type                          |
//! |---------|-------------------------------|
//! | rows    | `usize`, native endian        |
//! | cols    | `usize`, native endian        |
//! | payload | `rows * cols` × `f32`, native endian, row-major |
//!
//! Files are therefore only portable between machines with the same pointer
//! width and byte order. Values round-trip bit-for-bit.
//!
//! ```no_run
//! use densemat::{Matrix, Prng};
//!
//! let m = Matrix::random(4, 4, &mut Prng::new(1), 0.0, 1.0)?;
//! m.save("weights.bin")?;
//! let back = Matrix::load("weights.bin")?;
//! assert_eq!(back, m);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::Matrix;

const DIM_BYTES: usize = core::mem::size_of::<usize>();
const ELEM_BYTES: usize = core::mem::size_of::<f32>();

/// Errors from saving or loading a matrix.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying I/O failure (missing file, permissions, ...).
    Io(io::Error),
    /// Stream ended before the header or payload was complete.
    Truncated { expected: usize, got: usize },
    /// Header extents whose payload size does not fit in `usize`.
    SizeOverflow { rows: usize, cols: usize },
    /// File continues past the end of the payload.
    TrailingBytes,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Truncated { expected, got } => {
                write!(f, "truncated matrix data: expected {expected} bytes, got {got}")
            }
            Self::SizeOverflow { rows, cols } => {
                write!(f, "corrupt header: {rows}x{cols} matrix is too large")
            }
            Self::TrailingBytes => write!(f, "corrupt data: trailing bytes after matrix"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl PersistError {
    /// Whether the stored bytes are malformed, as opposed to an I/O failure.
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Read exactly `len` bytes, reporting a short read as [`PersistError::Truncated`].
///
/// Reads through `take` so a corrupt header cannot force a huge allocation
/// up front.
fn read_bytes(reader: &mut impl Read, len: usize) -> Result<Vec<u8>, PersistError> {
    let mut buf = Vec::with_capacity(len.min(1 << 20));
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(PersistError::Truncated {
            expected: len,
            got: buf.len(),
        });
    }
    Ok(buf)
}

impl Matrix {
    /// Write dims then payload to `writer`.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), PersistError> {
        writer.write_all(&self.nrows().to_ne_bytes())?;
        writer.write_all(&self.ncols().to_ne_bytes())?;
        for x in self.iter() {
            writer.write_all(&x.to_ne_bytes())?;
        }
        Ok(())
    }

    /// Read one matrix from `reader`, leaving any following bytes unread.
    pub fn read_from(reader: &mut impl Read) -> Result<Matrix, PersistError> {
        let header = read_bytes(reader, 2 * DIM_BYTES)?;
        let mut raw = [0u8; DIM_BYTES];
        raw.copy_from_slice(&header[..DIM_BYTES]);
        let rows = usize::from_ne_bytes(raw);
        raw.copy_from_slice(&header[DIM_BYTES..]);
        let cols = usize::from_ne_bytes(raw);

        let payload_len = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(ELEM_BYTES))
            .ok_or(PersistError::SizeOverflow { rows, cols })?;
        let payload = read_bytes(reader, payload_len)?;
        let data = payload
            .chunks_exact(ELEM_BYTES)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        Ok(Matrix {
            data,
            nrows: rows,
            ncols: cols,
        })
    }

    /// Write this matrix to the file at `path`, replacing its contents.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::debug!(
            "saved {}x{} matrix to {} ({} bytes)",
            self.nrows(),
            self.ncols(),
            path.display(),
            2 * DIM_BYTES + self.len() * ELEM_BYTES
        );
        Ok(())
    }

    /// Read a matrix from the file at `path`.
    ///
    /// The file must hold exactly one matrix: a short payload fails with
    /// [`PersistError::Truncated`], extra bytes with
    /// [`PersistError::TrailingBytes`].
    pub fn load(path: impl AsRef<Path>) -> Result<Matrix, PersistError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let m = Matrix::read_from(&mut reader)?;
        let mut probe = [0u8; 1];
        if reader.read(&mut probe)? != 0 {
            return Err(PersistError::TrailingBytes);
        }
        log::debug!(
            "loaded {}x{} matrix from {}",
            m.nrows(),
            m.ncols(),
            path.display()
        );
        Ok(m)
    }
}
