//! Element types supported by the IDX format.

use crate::IdxData;
use std::fmt;
use std::io;

/// The numeric representation of the elements in an IDX file.
///
/// This is a closed set: the format defines exactly these six element types,
/// each identified on the wire by a one-byte type code. Multi-byte types are
/// always stored big-endian.
///
/// | Code   | Type                 | Width |
/// |--------|----------------------|-------|
/// | `0x08` | [`ElementType::U8`]  | 1     |
/// | `0x09` | [`ElementType::I8`]  | 1     |
/// | `0x0B` | [`ElementType::I16`] | 2     |
/// | `0x0C` | [`ElementType::I32`] | 4     |
/// | `0x0D` | [`ElementType::F32`] | 4     |
/// | `0x0E` | [`ElementType::F64`] | 8     |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Unsigned byte.
    U8,
    /// Signed byte.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// IEEE 754 single-precision float.
    F32,
    /// IEEE 754 double-precision float.
    F64,
}

impl ElementType {
    /// All element types, in type code order.
    pub const ALL: [ElementType; 6] = [
        ElementType::U8,
        ElementType::I8,
        ElementType::I16,
        ElementType::I32,
        ElementType::F32,
        ElementType::F64,
    ];

    /// Looks up the element type for a type code.
    ///
    /// Returns `None` if `code` is not one of the six codes defined by the
    /// format.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x08 => Some(ElementType::U8),
            0x09 => Some(ElementType::I8),
            0x0B => Some(ElementType::I16),
            0x0C => Some(ElementType::I32),
            0x0D => Some(ElementType::F32),
            0x0E => Some(ElementType::F64),
            _ => None,
        }
    }

    /// Returns the type code written in the third byte of the header.
    pub fn code(self) -> u8 {
        match self {
            ElementType::U8 => 0x08,
            ElementType::I8 => 0x09,
            ElementType::I16 => 0x0B,
            ElementType::I32 => 0x0C,
            ElementType::F32 => 0x0D,
            ElementType::F64 => 0x0E,
        }
    }

    /// Number of bytes taken up by one element on the wire.
    pub fn width(self) -> usize {
        match self {
            ElementType::U8 | ElementType::I8 => 1,
            ElementType::I16 => 2,
            ElementType::I32 | ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }

    /// Name of the corresponding Rust primitive.
    pub fn name(self) -> &'static str {
        match self {
            ElementType::U8 => "u8",
            ElementType::I8 => "i8",
            ElementType::I16 => "i16",
            ElementType::I32 => "i32",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (type code {:#04x})", self.name(), self.code())
    }
}

mod private {
    pub trait Sealed {}
}

/// An array element type that can be read from or written to an IDX file.
///
/// This trait is sealed; it is implemented for exactly the six Rust
/// primitives that have an IDX representation (`u8`, `i8`, `i16`, `i32`,
/// `f32`, `f64`). Other numeric types such as `u16`, `i64`, or `bool` have no
/// type code, so arrays of them cannot be encoded:
///
/// ```compile_fail
/// use ndarray_idx::IdxArray;
///
/// let arr = IdxArray::new(vec![3], vec![1u16, 2, 3]);
/// ```
pub trait IdxElement: Copy + private::Sealed {
    /// The element type recorded in the header.
    const ELEMENT_TYPE: ElementType;

    /// Decodes a buffer of big-endian elements.
    ///
    /// The length of `bytes` must be a multiple of the element width.
    fn read_be_vec(bytes: Vec<u8>) -> Vec<Self>;

    /// Writes the elements of `slice` to `writer` in big-endian order.
    fn write_be_slice<W: io::Write>(slice: &[Self], writer: W) -> io::Result<()>;

    /// Wraps the elements in the matching variant of `IdxData`.
    fn into_data(vec: Vec<Self>) -> IdxData;

    /// Unwraps `data` if it holds this element type.
    fn from_data(data: IdxData) -> Result<Vec<Self>, IdxData>;

    /// Borrows the elements of `data` if it holds this element type.
    fn data_as_slice(data: &IdxData) -> Option<&[Self]>;
}

mod primitive;
