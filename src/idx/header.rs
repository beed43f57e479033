use super::elements::ElementType;
use byteorder::{BigEndian, ByteOrder};
use num_traits::ToPrimitive;
use std::error::Error;
use std::fmt;
use std::io::{self, Read};
use tracing::debug;

/// Number of bytes in the magic number (two zero bytes, type code, number of
/// dimensions).
const MAGIC_LEN: usize = 4;

/// Number of bytes in the representation of each axis length.
const AXIS_LEN_NUM_BYTES: usize = 4;

/// Maximum number of dimensions representable in the header.
pub const MAX_NDIM: usize = u8::MAX as usize;

/// Upper bound on the buffer preallocated for a read, so that a corrupt
/// header can't trigger a huge allocation before the data is known to exist.
const MAX_PREALLOC: usize = 1 << 20;

/// Part of an IDX stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// The four-byte magic number.
    Magic,
    /// The big-endian axis lengths following the magic number.
    Dimensions,
    /// The element data.
    Data,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Section::Magic => write!(f, "magic number"),
            Section::Dimensions => write!(f, "dimension sizes"),
            Section::Data => write!(f, "data"),
        }
    }
}

#[derive(Debug)]
pub enum ParseHeaderError {
    /// The first two bytes of the magic number are not both zero.
    MagicBytes { first: u8, second: u8 },
    /// The third byte of the magic number is not a known type code.
    UnknownTypeCode(u8),
}

impl Error for ParseHeaderError {}

impl fmt::Display for ParseHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ParseHeaderError::*;
        match self {
            MagicBytes { first, second } => write!(
                f,
                "incorrect first two bytes of the magic number: {:#04x} {:#04x}",
                first, second
            ),
            UnknownTypeCode(code) => write!(f, "unknown data type code: {:#04x}", code),
        }
    }
}

#[derive(Debug)]
pub enum ReadHeaderError {
    Io(io::Error),
    Truncated {
        section: Section,
        expected: usize,
        found: usize,
    },
    Parse(ParseHeaderError),
}

impl Error for ReadHeaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadHeaderError::Io(err) => Some(err),
            ReadHeaderError::Truncated { .. } => None,
            ReadHeaderError::Parse(err) => Some(err),
        }
    }
}

impl fmt::Display for ReadHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadHeaderError::Io(err) => write!(f, "I/O error: {}", err),
            ReadHeaderError::Truncated {
                section,
                expected,
                found,
            } => write!(
                f,
                "truncated {}: expected {} bytes, found {}",
                section, expected, found
            ),
            ReadHeaderError::Parse(err) => write!(f, "error parsing header: {}", err),
        }
    }
}

impl From<io::Error> for ReadHeaderError {
    fn from(err: io::Error) -> ReadHeaderError {
        ReadHeaderError::Io(err)
    }
}

impl From<ParseHeaderError> for ReadHeaderError {
    fn from(err: ParseHeaderError) -> ReadHeaderError {
        ReadHeaderError::Parse(err)
    }
}

/// An error building a header for an array whose shape the format can't
/// represent.
#[derive(Debug)]
pub enum FormatHeaderError {
    /// The number of dimensions exceeds [`MAX_NDIM`].
    TooManyDimensions(usize),
    /// An axis length exceeds `u32::MAX`.
    DimensionTooLarge { axis: usize, len: usize },
}

impl Error for FormatHeaderError {}

impl fmt::Display for FormatHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatHeaderError::TooManyDimensions(ndim) => write!(
                f,
                "cannot encode array with {} dimensions; at most {} are supported",
                ndim, MAX_NDIM
            ),
            FormatHeaderError::DimensionTooLarge { axis, len } => write!(
                f,
                "cannot encode axis {} of length {}; the maximum axis length is {}",
                axis,
                len,
                u32::MAX
            ),
        }
    }
}

/// Reads from `reader` until `len` bytes have been read or the end of the
/// stream is reached, and returns the bytes read.
pub(crate) fn read_up_to<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// The header of an IDX file: element type and the length of each axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    element_type: ElementType,
    shape: Vec<u32>,
}

impl Header {
    /// Creates a header for an array of `element_type` with the given shape.
    ///
    /// Returns an error if the shape has more than [`MAX_NDIM`] axes or any
    /// axis is longer than `u32::MAX`.
    pub fn from_shape(
        element_type: ElementType,
        shape: &[usize],
    ) -> Result<Self, FormatHeaderError> {
        if shape.len() > MAX_NDIM {
            return Err(FormatHeaderError::TooManyDimensions(shape.len()));
        }
        let shape = shape
            .iter()
            .enumerate()
            .map(|(axis, &len)| {
                len.to_u32()
                    .ok_or(FormatHeaderError::DimensionTooLarge { axis, len })
            })
            .collect::<Result<Vec<u32>, _>>()?;
        Ok(Header {
            element_type,
            shape,
        })
    }

    /// Reads and validates the magic number and axis lengths, leaving
    /// `reader` positioned at the start of the data.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ReadHeaderError> {
        let magic = read_up_to(&mut reader, MAGIC_LEN)?;
        if magic.len() < MAGIC_LEN {
            return Err(ReadHeaderError::Truncated {
                section: Section::Magic,
                expected: MAGIC_LEN,
                found: magic.len(),
            });
        }
        if magic[0] != 0 || magic[1] != 0 {
            return Err(ParseHeaderError::MagicBytes {
                first: magic[0],
                second: magic[1],
            }
            .into());
        }
        let element_type =
            ElementType::from_code(magic[2]).ok_or(ParseHeaderError::UnknownTypeCode(magic[2]))?;
        let ndim = usize::from(magic[3]);

        let dims_len = ndim * AXIS_LEN_NUM_BYTES;
        let dims = read_up_to(&mut reader, dims_len)?;
        if dims.len() < dims_len {
            return Err(ReadHeaderError::Truncated {
                section: Section::Dimensions,
                expected: dims_len,
                found: dims.len(),
            });
        }
        let mut shape = vec![0; ndim];
        BigEndian::read_u32_into(&dims, &mut shape);

        debug!(%element_type, ?shape, "parsed IDX header");
        Ok(Header {
            element_type,
            shape,
        })
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Axis lengths as stored in the file.
    pub fn shape(&self) -> &[u32] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Axis lengths as `usize`, or `None` if one doesn't fit.
    pub fn dims(&self) -> Option<Vec<usize>> {
        self.shape.iter().map(|len| len.to_usize()).collect()
    }

    /// Total number of elements, or `None` if it overflows `usize`.
    ///
    /// This is 1 for a header with no dimensions.
    pub fn num_elements(&self) -> Option<usize> {
        if self.shape.contains(&0) {
            return Some(0);
        }
        self.shape
            .iter()
            .try_fold(1usize, |acc, len| acc.checked_mul(len.to_usize()?))
    }

    /// Number of bytes of element data following the header, or `None` if it
    /// overflows `usize`.
    pub fn data_len(&self) -> Option<usize> {
        self.num_elements()?.checked_mul(self.element_type.width())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let ndim = self.shape.len();
        debug_assert!(ndim <= MAX_NDIM);
        let mut out = vec![0; MAGIC_LEN + ndim * AXIS_LEN_NUM_BYTES];
        out[2] = self.element_type.code();
        out[3] = ndim as u8;
        BigEndian::write_u32_into(&self.shape, &mut out[MAGIC_LEN..]);
        out
    }

    pub fn write<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        debug!(element_type = %self.element_type, shape = ?self.shape, "writing IDX header");
        writer.write_all(&self.to_bytes())
    }
}
