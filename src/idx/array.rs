//! Owned, dynamically-typed array decoded from or encoded to IDX.

use super::elements::{ElementType, IdxElement};
use std::error::Error;
use std::fmt;
use std::io;

/// Flat element buffer of an [`IdxArray`], one variant per element type.
#[derive(Clone, Debug, PartialEq)]
pub enum IdxData {
    U8(Vec<u8>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Expands `$body` once per variant with `$vec` bound to the inner `Vec`
/// and `$elem` to its element type.
macro_rules! for_each_variant {
    ($data:expr, |$vec:ident: $elem:ident| $body:expr) => {
        match $data {
            IdxData::U8($vec) => {
                type $elem = u8;
                $body
            }
            IdxData::I8($vec) => {
                type $elem = i8;
                $body
            }
            IdxData::I16($vec) => {
                type $elem = i16;
                $body
            }
            IdxData::I32($vec) => {
                type $elem = i32;
                $body
            }
            IdxData::F32($vec) => {
                type $elem = f32;
                $body
            }
            IdxData::F64($vec) => {
                type $elem = f64;
                $body
            }
        }
    };
}

impl IdxData {
    /// Returns the element type of the buffer.
    pub fn element_type(&self) -> ElementType {
        for_each_variant!(self, |_vec: A| A::ELEMENT_TYPE)
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        match self {
            IdxData::U8(vec) => vec.len(),
            IdxData::I8(vec) => vec.len(),
            IdxData::I16(vec) => vec.len(),
            IdxData::I32(vec) => vec.len(),
            IdxData::F32(vec) => vec.len(),
            IdxData::F64(vec) => vec.len(),
        }
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes a payload of big-endian elements of type `element_type`.
    pub(crate) fn from_be_bytes(element_type: ElementType, bytes: Vec<u8>) -> IdxData {
        match element_type {
            ElementType::U8 => u8::into_data(u8::read_be_vec(bytes)),
            ElementType::I8 => i8::into_data(i8::read_be_vec(bytes)),
            ElementType::I16 => i16::into_data(i16::read_be_vec(bytes)),
            ElementType::I32 => i32::into_data(i32::read_be_vec(bytes)),
            ElementType::F32 => f32::into_data(f32::read_be_vec(bytes)),
            ElementType::F64 => f64::into_data(f64::read_be_vec(bytes)),
        }
    }

    /// Writes all elements to `writer` in big-endian order.
    pub(crate) fn write_be<W: io::Write>(&self, writer: W) -> io::Result<()> {
        for_each_variant!(self, |vec: A| A::write_be_slice(vec, writer))
    }
}

impl<A: IdxElement> From<Vec<A>> for IdxData {
    fn from(vec: Vec<A>) -> IdxData {
        A::into_data(vec)
    }
}

/// An error constructing an [`IdxArray`] from a shape and a buffer.
#[derive(Debug)]
pub struct IdxShapeError {
    shape: Vec<usize>,
    len: usize,
}

impl Error for IdxShapeError {}

impl fmt::Display for IdxShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "buffer of {} elements does not match shape {:?}",
            self.len, self.shape
        )
    }
}

/// A dense, row-major, N-dimensional array with one of the IDX element types.
///
/// This is the value produced by decoding an IDX stream without knowing the
/// element type in advance. An empty shape represents a scalar holding
/// exactly one element.
///
/// # Example
///
/// ```
/// use ndarray_idx::{IdxArray, ReadIdxExt, WriteIdxExt};
///
/// let arr = IdxArray::new(vec![2, 2], vec![1i16, -2, 3, -4])?;
/// let bytes = arr.to_idx_bytes()?;
/// assert_eq!(&bytes[..4], &[0x00, 0x00, 0x0B, 0x02]);
/// assert_eq!(IdxArray::from_idx_bytes(&bytes)?, arr);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IdxArray {
    shape: Vec<usize>,
    data: IdxData,
}

impl IdxArray {
    /// Creates an array from its shape and row-major element buffer.
    ///
    /// Returns an error if the buffer length is not the product of `shape`.
    pub fn new<T: Into<IdxData>>(shape: Vec<usize>, data: T) -> Result<Self, IdxShapeError> {
        let data = data.into();
        if num_elements(&shape) == Some(data.len()) {
            Ok(IdxArray { shape, data })
        } else {
            Err(IdxShapeError {
                shape,
                len: data.len(),
            })
        }
    }

    /// Creates a zero-dimensional array holding `value`.
    pub fn scalar<A: IdxElement>(value: A) -> Self {
        IdxArray {
            shape: Vec::new(),
            data: A::into_data(vec![value]),
        }
    }

    /// The caller must ensure that `data.len()` is the product of `shape`.
    pub(crate) fn from_parts_unchecked(shape: Vec<usize>, data: IdxData) -> Self {
        debug_assert_eq!(num_elements(&shape), Some(data.len()));
        IdxArray { shape, data }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions (0 for a scalar).
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if any axis has length zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    pub fn data(&self) -> &IdxData {
        &self.data
    }

    /// Borrows the elements if they are of type `A`.
    pub fn as_slice<A: IdxElement>(&self) -> Option<&[A]> {
        A::data_as_slice(&self.data)
    }

    /// Returns the elements if they are of type `A`, or gives back the array
    /// unchanged.
    pub fn into_vec<A: IdxElement>(self) -> Result<Vec<A>, Self> {
        let IdxArray { shape, data } = self;
        A::from_data(data).map_err(|data| IdxArray { shape, data })
    }

    pub fn into_parts(self) -> (Vec<usize>, IdxData) {
        (self.shape, self.data)
    }
}

/// Product of the axis lengths, or `None` on overflow. A zero-length axis
/// makes the product zero whatever the other axes are.
fn num_elements(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &len| acc.checked_mul(len))
}
