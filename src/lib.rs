//! This crate reads and writes dense N-dimensional arrays in the [IDX file
//! format], the format the [MNIST database] is distributed in.
//!
//! [IDX file format]: http://yann.lecun.com/exdb/mnist/
//! [MNIST database]: http://yann.lecun.com/exdb/mnist/
//!
//! An IDX file is a four-byte magic number (two zero bytes, a type code, and
//! the number of dimensions), followed by the length of each axis as a
//! big-endian `u32`, followed by the elements in row-major order, each stored
//! big-endian. There is no trailer; a file must end exactly after the last
//! element.
//!
//! See [`ReadIdxExt`] and [`WriteIdxExt`] for reading/writing IDX data from
//! streams and byte buffers, and [`read_idx`] and [`write_idx`] for
//! convenience functions that open the file by path.
//!
//! When the element type isn't known in advance, decode into an
//! [`IdxArray`]. With the `ndarray` feature (enabled by default), the same
//! traits are implemented for [`ndarray`]'s `ArrayBase`, so files can be read
//! directly into e.g. `Array3<u8>`.
//!
//! [`ndarray`]: https://github.com/rust-ndarray/ndarray
//!
//! # Limitations
//!
//! * Only the six element types defined by the format are supported: `u8`,
//!   `i8`, `i16`, `i32`, `f32`, and `f64` (see [`ElementType`]). Arrays of
//!   other types can't be encoded.
//!
//! * Arrays with no elements can't be encoded, since the format can't
//!   distinguish them from a scalar. They can be decoded, though.
//!
//! * The whole array is read into memory; there's no support for streaming
//!   partial reads.

mod idx;

pub use crate::idx::elements::{ElementType, IdxElement};
pub use crate::idx::header::{
    FormatHeaderError, Header, ParseHeaderError, ReadHeaderError, Section, MAX_NDIM,
};
pub use crate::idx::{
    IdxArray, IdxData, IdxShapeError, ReadIdxError, ReadIdxExt, WriteIdxError, WriteIdxExt,
};

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Read an IDX file located at the specified path.
///
/// This is a convenience function for using `File::open` followed by
/// [`ReadIdxExt::read_idx`].
///
/// # Example
///
/// ```no_run
/// use ndarray_idx::{read_idx, IdxArray};
///
/// let labels: IdxArray = read_idx("train-labels-idx1-ubyte")?;
/// println!("{} labels", labels.len());
/// # Ok::<_, ndarray_idx::ReadIdxError>(())
/// ```
pub fn read_idx<P, T>(path: P) -> Result<T, ReadIdxError>
where
    P: AsRef<Path>,
    T: ReadIdxExt,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "reading IDX file");
    T::read_idx(BufReader::new(File::open(path)?))
}

/// Writes an array to an IDX file at the specified path.
///
/// This function will create the file if it does not exist, or overwrite it
/// if it does. The file is created before the array is checked, so if the
/// array can't be encoded, the file is left truncated.
///
/// This is a convenience function for `BufWriter::new(File::create(path)?)`
/// followed by [`WriteIdxExt::write_idx`] and a final flush.
///
/// # Example
///
/// ```no_run
/// use ndarray_idx::{write_idx, IdxArray};
///
/// let labels = IdxArray::new(vec![5], vec![5u8, 0, 4, 1, 9])?;
/// write_idx("labels.idx", &labels)?;
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn write_idx<P, T>(path: P, array: &T) -> Result<(), WriteIdxError>
where
    P: AsRef<Path>,
    T: WriteIdxExt + ?Sized,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "writing IDX file");
    let mut writer = BufWriter::new(File::create(path)?);
    array.write_idx(&mut writer)?;
    writer.flush()?;
    Ok(())
}
