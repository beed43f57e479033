//! `ReadIdxExt` and `WriteIdxExt` for `ndarray` arrays.

use super::elements::IdxElement;
use super::header::Header;
use super::{header_for, read_data, IdxArray, ReadIdxError, ReadIdxExt, WriteIdxError, WriteIdxExt};
use ndarray::{ArrayBase, ArrayD, Data, DataOwned, Dimension, IxDyn};
use std::io;

impl<A, S, D> WriteIdxExt for ArrayBase<S, D>
where
    A: IdxElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    /// Writes the array to `writer` in IDX format.
    ///
    /// Elements are written in logical (row-major) order whatever the memory
    /// layout of the array.
    fn write_idx<W: io::Write>(&self, mut writer: W) -> Result<(), WriteIdxError> {
        let header = header_for(A::ELEMENT_TYPE, self.shape(), self.len())?;
        header.write(&mut writer)?;
        if let Some(slice) = self.as_slice() {
            A::write_be_slice(slice, &mut writer)?;
        } else {
            let elems: Vec<A> = self.iter().copied().collect();
            A::write_be_slice(&elems, &mut writer)?;
        }
        Ok(())
    }
}

impl<A, S, D> ReadIdxExt for ArrayBase<S, D>
where
    A: IdxElement,
    S: DataOwned<Elem = A>,
    D: Dimension,
{
    /// Reads the array from `reader` in IDX format.
    ///
    /// The element type and (for fixed-dimensional `D`) the number of
    /// dimensions are checked against the header before any data is read.
    fn read_idx<R: io::Read>(mut reader: R) -> Result<Self, ReadIdxError> {
        let header = Header::from_reader(&mut reader)?;
        if header.element_type() != A::ELEMENT_TYPE {
            return Err(ReadIdxError::WrongElementType {
                expected: A::ELEMENT_TYPE,
                found: header.element_type(),
            });
        }
        if let Some(ndim) = D::NDIM {
            if ndim != header.ndim() {
                return Err(ReadIdxError::WrongNdim {
                    expected: ndim,
                    found: header.ndim(),
                });
            }
        }
        let shape = header.dims().ok_or(ReadIdxError::LengthOverflow)?;
        let data = A::read_be_vec(read_data(&mut reader, &header)?);
        Ok(ArrayBase::from_shape_vec(IxDyn(&shape), data)?.into_dimensionality()?)
    }
}

impl IdxArray {
    /// Converts the array into an `ndarray` array with element type `A`.
    ///
    /// Fails the same way as reading the file directly into `ArrayD<A>`
    /// would: if the elements aren't of type `A`, or if the shape is too
    /// large for `ndarray`.
    pub fn into_ndarray<A: IdxElement>(self) -> Result<ArrayD<A>, ReadIdxError> {
        let found = self.element_type();
        let (shape, data) = self.into_parts();
        let vec = A::from_data(data).map_err(|_| ReadIdxError::WrongElementType {
            expected: A::ELEMENT_TYPE,
            found,
        })?;
        Ok(ArrayD::from_shape_vec(IxDyn(&shape), vec)?)
    }
}

impl<A, S, D> From<&ArrayBase<S, D>> for IdxArray
where
    A: IdxElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    /// Copies the elements in logical (row-major) order.
    fn from(arr: &ArrayBase<S, D>) -> IdxArray {
        let data = A::into_data(arr.iter().copied().collect());
        IdxArray::from_parts_unchecked(arr.shape().to_vec(), data)
    }
}
