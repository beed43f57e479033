//! Trait implementations for primitive element types.

use super::{private::Sealed, ElementType, IdxElement};
use crate::IdxData;
use byteorder::{BigEndian, ByteOrder};
use std::io;

/// Number of elements converted per `write_all` call for multi-byte types.
const WRITE_CHUNK_LEN: usize = 4096;

macro_rules! impl_data_conversions {
    ($variant:ident) => {
        fn into_data(vec: Vec<Self>) -> IdxData {
            IdxData::$variant(vec)
        }

        fn from_data(data: IdxData) -> Result<Vec<Self>, IdxData> {
            match data {
                IdxData::$variant(vec) => Ok(vec),
                other => Err(other),
            }
        }

        fn data_as_slice(data: &IdxData) -> Option<&[Self]> {
            match data {
                IdxData::$variant(vec) => Some(vec.as_slice()),
                _ => None,
            }
        }
    };
}

impl Sealed for u8 {}

impl IdxElement for u8 {
    const ELEMENT_TYPE: ElementType = ElementType::U8;

    fn read_be_vec(bytes: Vec<u8>) -> Vec<Self> {
        bytes
    }

    fn write_be_slice<W: io::Write>(slice: &[Self], mut writer: W) -> io::Result<()> {
        writer.write_all(slice)
    }

    impl_data_conversions!(U8);
}

impl Sealed for i8 {}

impl IdxElement for i8 {
    const ELEMENT_TYPE: ElementType = ElementType::I8;

    fn read_be_vec(bytes: Vec<u8>) -> Vec<Self> {
        bytes.into_iter().map(|byte| byte as i8).collect()
    }

    fn write_be_slice<W: io::Write>(slice: &[Self], mut writer: W) -> io::Result<()> {
        let mut buf = Vec::with_capacity(slice.len().min(WRITE_CHUNK_LEN));
        for chunk in slice.chunks(WRITE_CHUNK_LEN) {
            buf.clear();
            buf.extend(chunk.iter().map(|&elem| elem as u8));
            writer.write_all(&buf)?;
        }
        Ok(())
    }

    impl_data_conversions!(I8);
}

macro_rules! impl_primitive_multi_byte {
    ($elem:ty, $variant:ident, $zero:expr, $read_into:ident, $write_into:ident) => {
        impl Sealed for $elem {}

        impl IdxElement for $elem {
            const ELEMENT_TYPE: ElementType = ElementType::$variant;

            fn read_be_vec(bytes: Vec<u8>) -> Vec<Self> {
                let width = Self::ELEMENT_TYPE.width();
                debug_assert_eq!(bytes.len() % width, 0);
                let mut out = vec![$zero; bytes.len() / width];
                BigEndian::$read_into(&bytes, &mut out);
                out
            }

            fn write_be_slice<W: io::Write>(slice: &[Self], mut writer: W) -> io::Result<()> {
                let width = Self::ELEMENT_TYPE.width();
                let mut buf = vec![0; slice.len().min(WRITE_CHUNK_LEN) * width];
                for chunk in slice.chunks(WRITE_CHUNK_LEN) {
                    let bytes = &mut buf[..chunk.len() * width];
                    BigEndian::$write_into(chunk, bytes);
                    writer.write_all(bytes)?;
                }
                Ok(())
            }

            impl_data_conversions!($variant);
        }
    };
}

impl_primitive_multi_byte!(i16, I16, 0, read_i16_into, write_i16_into);
impl_primitive_multi_byte!(i32, I32, 0, read_i32_into, write_i32_into);
impl_primitive_multi_byte!(f32, F32, 0., read_f32_into, write_f32_into);
impl_primitive_multi_byte!(f64, F64, 0., read_f64_into, write_f64_into);
