mod array;
pub mod elements;
pub mod header;
#[cfg(feature = "ndarray")]
mod ndarray_ext;

pub use self::array::{IdxArray, IdxData, IdxShapeError};

use self::elements::ElementType;
use self::header::{
    read_up_to, FormatHeaderError, Header, ParseHeaderError, ReadHeaderError, Section,
};
use std::error::Error;
use std::fmt;
use std::io;
use tracing::trace;

/// An error reading an IDX file.
#[derive(Debug)]
pub enum ReadIdxError {
    /// An error caused by I/O.
    Io(io::Error),
    /// The stream ended before the end of the named section.
    Truncated {
        section: Section,
        expected: usize,
        found: usize,
    },
    /// An error parsing the magic number.
    ParseHeader(ParseHeaderError),
    /// The number of bytes of data overflows `usize`.
    LengthOverflow,
    /// Extra bytes follow the data.
    TrailingData,
    /// The element type in the file doesn't match the requested type.
    WrongElementType {
        expected: ElementType,
        found: ElementType,
    },
    /// The number of dimensions in the file doesn't match the requested
    /// dimensionality.
    WrongNdim { expected: usize, found: usize },
    /// The shape can't be represented by the requested array type.
    #[cfg(feature = "ndarray")]
    Shape(::ndarray::ShapeError),
}

impl Error for ReadIdxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use ReadIdxError::*;
        match self {
            Io(err) => Some(err),
            Truncated { .. } => None,
            ParseHeader(err) => Some(err),
            LengthOverflow => None,
            TrailingData => None,
            WrongElementType { .. } => None,
            WrongNdim { .. } => None,
            #[cfg(feature = "ndarray")]
            Shape(err) => Some(err),
        }
    }
}

impl fmt::Display for ReadIdxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ReadIdxError::*;
        match self {
            Io(err) => write!(f, "I/O error: {}", err),
            Truncated {
                section,
                expected,
                found,
            } => write!(
                f,
                "truncated {}: expected {} bytes, found {}",
                section, expected, found
            ),
            ParseHeader(err) => write!(f, "error parsing header: {}", err),
            LengthOverflow => write!(f, "overflow computing length of data from shape"),
            TrailingData => write!(f, "superfluous data after the end of the array"),
            WrongElementType { expected, found } => write!(
                f,
                "element type mismatch: expected {}, found {}",
                expected, found
            ),
            WrongNdim { expected, found } => write!(
                f,
                "ndim mismatch: expected {} dimensions, found {}",
                expected, found
            ),
            #[cfg(feature = "ndarray")]
            Shape(err) => write!(f, "shape error: {}", err),
        }
    }
}

impl From<io::Error> for ReadIdxError {
    fn from(err: io::Error) -> ReadIdxError {
        ReadIdxError::Io(err)
    }
}

impl From<ReadHeaderError> for ReadIdxError {
    fn from(err: ReadHeaderError) -> ReadIdxError {
        match err {
            ReadHeaderError::Io(err) => ReadIdxError::Io(err),
            ReadHeaderError::Truncated {
                section,
                expected,
                found,
            } => ReadIdxError::Truncated {
                section,
                expected,
                found,
            },
            ReadHeaderError::Parse(err) => ReadIdxError::ParseHeader(err),
        }
    }
}

#[cfg(feature = "ndarray")]
impl From<::ndarray::ShapeError> for ReadIdxError {
    fn from(err: ::ndarray::ShapeError) -> ReadIdxError {
        ReadIdxError::Shape(err)
    }
}

/// An error writing an IDX file.
#[derive(Debug)]
pub enum WriteIdxError {
    /// An error caused by I/O.
    Io(io::Error),
    /// The array has no elements.
    EmptyArray,
    /// The shape of the array can't be represented in the header.
    FormatHeader(FormatHeaderError),
}

impl Error for WriteIdxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WriteIdxError::Io(err) => Some(err),
            WriteIdxError::EmptyArray => None,
            WriteIdxError::FormatHeader(err) => Some(err),
        }
    }
}

impl fmt::Display for WriteIdxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WriteIdxError::Io(err) => write!(f, "I/O error: {}", err),
            WriteIdxError::EmptyArray => write!(f, "cannot encode an empty array"),
            WriteIdxError::FormatHeader(err) => write!(f, "error formatting header: {}", err),
        }
    }
}

impl From<io::Error> for WriteIdxError {
    fn from(err: io::Error) -> WriteIdxError {
        WriteIdxError::Io(err)
    }
}

impl From<FormatHeaderError> for WriteIdxError {
    fn from(err: FormatHeaderError) -> WriteIdxError {
        WriteIdxError::FormatHeader(err)
    }
}

/// Extension trait for reading arrays from IDX files.
///
/// # Example
///
/// ```
/// use ndarray_idx::{IdxArray, ReadIdxExt};
///
/// let bytes = [0x00u8, 0x00, 0x08, 0x01, 0x00, 0x00, 0x00, 0x03, 0x0A, 0x0B, 0xFF];
/// let arr = IdxArray::from_idx_bytes(&bytes)?;
/// assert_eq!(arr.shape(), &[3]);
/// assert_eq!(arr.as_slice::<u8>(), Some(&[10, 11, 255][..]));
/// # Ok::<_, ndarray_idx::ReadIdxError>(())
/// ```
pub trait ReadIdxExt: Sized {
    /// Reads the array from `reader` in IDX format.
    ///
    /// The whole stream is consumed: it's an error for `reader` to hold any
    /// bytes after the end of the array.
    fn read_idx<R: io::Read>(reader: R) -> Result<Self, ReadIdxError>;

    /// Decodes the array from a complete IDX file held in memory.
    fn from_idx_bytes(bytes: &[u8]) -> Result<Self, ReadIdxError> {
        Self::read_idx(bytes)
    }
}

/// Extension trait for writing arrays to IDX files.
///
/// # Example
///
/// ```
/// use ndarray_idx::{IdxArray, WriteIdxExt};
///
/// let arr = IdxArray::new(vec![3], vec![10u8, 11, 255])?;
/// assert_eq!(
///     arr.to_idx_bytes()?,
///     [0x00u8, 0x00, 0x08, 0x01, 0x00, 0x00, 0x00, 0x03, 0x0A, 0x0B, 0xFF],
/// );
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub trait WriteIdxExt {
    /// Writes the array to `writer` in IDX format.
    fn write_idx<W: io::Write>(&self, writer: W) -> Result<(), WriteIdxError>;

    /// Encodes the array as a complete IDX file in memory.
    fn to_idx_bytes(&self) -> Result<Vec<u8>, WriteIdxError> {
        let mut out = Vec::new();
        self.write_idx(&mut out)?;
        Ok(out)
    }
}

/// Builds the header for an array, rejecting arrays the format can't
/// represent.
pub(crate) fn header_for(
    element_type: ElementType,
    shape: &[usize],
    len: usize,
) -> Result<Header, WriteIdxError> {
    if len == 0 {
        return Err(WriteIdxError::EmptyArray);
    }
    Ok(Header::from_shape(element_type, shape)?)
}

/// Reads exactly the number of data bytes described by `header` and checks
/// that the stream ends there.
pub(crate) fn read_data<R: io::Read>(
    mut reader: R,
    header: &Header,
) -> Result<Vec<u8>, ReadIdxError> {
    let len = header.data_len().ok_or(ReadIdxError::LengthOverflow)?;
    trace!(len, "reading IDX data");
    let bytes = read_up_to(&mut reader, len)?;
    if bytes.len() < len {
        return Err(ReadIdxError::Truncated {
            section: Section::Data,
            expected: len,
            found: bytes.len(),
        });
    }
    check_for_trailing_data(&mut reader)?;
    Ok(bytes)
}

/// Returns `Ok(_)` iff `reader` has no more bytes.
///
/// Consumes at most one byte.
fn check_for_trailing_data<R: io::Read>(reader: &mut R) -> Result<(), ReadIdxError> {
    let mut buf = [0; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(_) => return Err(ReadIdxError::TrailingData),
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err.into()),
        }
    }
}

impl ReadIdxExt for IdxArray {
    fn read_idx<R: io::Read>(mut reader: R) -> Result<Self, ReadIdxError> {
        let header = Header::from_reader(&mut reader)?;
        let shape = header.dims().ok_or(ReadIdxError::LengthOverflow)?;
        let bytes = read_data(&mut reader, &header)?;
        let data = IdxData::from_be_bytes(header.element_type(), bytes);
        Ok(IdxArray::from_parts_unchecked(shape, data))
    }
}

impl WriteIdxExt for IdxArray {
    fn write_idx<W: io::Write>(&self, mut writer: W) -> Result<(), WriteIdxError> {
        let header = header_for(self.element_type(), self.shape(), self.len())?;
        header.write(&mut writer)?;
        self.data().write_be(&mut writer)?;
        Ok(())
    }
}
