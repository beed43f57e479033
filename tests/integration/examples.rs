//! Decoding and encoding of hand-written IDX byte strings.

use ndarray_idx::{
    ElementType, FormatHeaderError, IdxArray, IdxData, ParseHeaderError, ReadIdxError,
    ReadIdxExt, Section, WriteIdxError, WriteIdxExt,
};

fn decode(bytes: &[u8]) -> Result<IdxArray, ReadIdxError> {
    IdxArray::from_idx_bytes(bytes)
}

#[test]
fn truncated_magic() {
    for bytes in [&b""[..], b"\x00", b"\x00\x00", b"\x00\x00\x08"] {
        match decode(bytes) {
            Err(ReadIdxError::Truncated {
                section: Section::Magic,
                expected: 4,
                found,
            }) => assert_eq!(found, bytes.len()),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

#[test]
fn bad_magic() {
    for bytes in [b"\x01\x00\x08\x00", b"\x00\x01\x08\x00"] {
        assert!(matches!(
            decode(bytes),
            Err(ReadIdxError::ParseHeader(ParseHeaderError::MagicBytes { .. }))
        ));
    }
}

#[test]
fn unknown_type_code() {
    let err = decode(b"\x00\x00\x01\x00").unwrap_err();
    assert!(matches!(
        err,
        ReadIdxError::ParseHeader(ParseHeaderError::UnknownTypeCode(0x01))
    ));
    assert_eq!(
        err.to_string(),
        "error parsing header: unknown data type code: 0x01"
    );
}

#[test]
fn truncated_dimensions() {
    assert!(matches!(
        decode(b"\x00\x00\x08\x01\x00\x00\x00"),
        Err(ReadIdxError::Truncated {
            section: Section::Dimensions,
            expected: 4,
            found: 3,
        })
    ));
}

#[test]
fn truncated_data() {
    let err = decode(b"\x00\x00\x08\x01\x00\x00\x00\x02\x01").unwrap_err();
    assert!(matches!(
        err,
        ReadIdxError::Truncated {
            section: Section::Data,
            expected: 2,
            found: 1,
        }
    ));
    assert_eq!(err.to_string(), "truncated data: expected 2 bytes, found 1");
}

#[test]
fn truncated_multi_byte_data() {
    // Two `i32`s declared, seven bytes supplied.
    assert!(matches!(
        decode(b"\x00\x00\x0C\x01\x00\x00\x00\x02\x00\x00\x00\x01\x00\x00\x00"),
        Err(ReadIdxError::Truncated {
            section: Section::Data,
            expected: 8,
            found: 7,
        })
    ));
}

#[test]
fn trailing_data() {
    assert!(matches!(
        decode(b"\x00\x00\x08\x01\x00\x00\x00\x02\x01\x02\x03\x04"),
        Err(ReadIdxError::TrailingData)
    ));
}

#[test]
fn read_u8() {
    let arr = decode(b"\x00\x00\x08\x01\x00\x00\x00\x03\x0A\x0B\xFF").unwrap();
    assert_eq!(arr.element_type(), ElementType::U8);
    assert_eq!(arr.shape(), &[3]);
    assert_eq!(arr.data(), &IdxData::U8(vec![0x0A, 0x0B, 0xFF]));
}

#[test]
fn read_i8() {
    let arr = decode(b"\x00\x00\x09\x01\x00\x00\x00\x04\xFE\xFF\x00\xAA").unwrap();
    assert_eq!(arr.shape(), &[4]);
    assert_eq!(arr.data(), &IdxData::I8(vec![-2, -1, 0, -86]));
}

#[test]
fn read_i16() {
    let arr = decode(b"\x00\x00\x0B\x01\x00\x00\x00\x02\xF0\x05\x00\xFF").unwrap();
    assert_eq!(arr.shape(), &[2]);
    assert_eq!(arr.data(), &IdxData::I16(vec![-4091, 255]));
}

#[test]
fn read_i32() {
    let arr = decode(
        b"\x00\x00\x0C\x01\x00\x00\x00\x03\
          \x00\xFF\x00\xFF\
          \x80\x00\x00\x00\
          \x00\x00\x00\x00",
    )
    .unwrap();
    assert_eq!(arr.shape(), &[3]);
    assert_eq!(arr.data(), &IdxData::I32(vec![0x00FF00FF, i32::MIN, 0]));
}

#[test]
fn read_f32() {
    let arr = decode(b"\x00\x00\x0D\x01\x00\x00\x00\x02\x3F\xC0\x00\x00\xC1\x20\x00\x00").unwrap();
    assert_eq!(arr.data(), &IdxData::F32(vec![1.5, -10.]));
}

#[test]
fn read_f64() {
    let arr = decode(
        b"\x00\x00\x0E\x01\x00\x00\x00\x05\
          \x3F\xF0\x00\x00\x00\x00\x00\x00\
          \x40\x00\x00\x00\x00\x00\x00\x00\
          \xC0\x00\x00\x00\x00\x00\x00\x00\
          \x00\x00\x00\x00\x00\x00\x00\x00\
          \x80\x00\x00\x00\x00\x00\x00\x00",
    )
    .unwrap();
    let elems = arr.as_slice::<f64>().unwrap();
    assert_eq!(elems, &[1., 2., -2., 0., -0.]);
    assert!(elems[3].is_sign_positive());
    assert!(elems[4].is_sign_negative());
}

#[test]
fn read_2d() {
    let arr = decode(b"\x00\x00\x08\x02\x00\x00\x00\x02\x00\x00\x00\x03\x01\x02\x03\x04\x05\x06")
        .unwrap();
    assert_eq!(arr.shape(), &[2, 3]);
    assert_eq!(arr.as_slice::<u8>(), Some(&[1, 2, 3, 4, 5, 6][..]));
}

#[test]
fn read_scalar() {
    let arr = decode(b"\x00\x00\x0B\x00\x12\x34").unwrap();
    assert_eq!(arr.ndim(), 0);
    assert_eq!(arr, IdxArray::scalar(0x1234i16));
}

#[test]
fn read_zero_length_axis() {
    let arr = decode(b"\x00\x00\x0D\x02\x00\x00\x00\x05\x00\x00\x00\x00").unwrap();
    assert_eq!(arr.shape(), &[5, 0]);
    assert!(arr.is_empty());
    assert_eq!(arr.element_type(), ElementType::F32);
}

#[test]
fn read_length_overflow() {
    assert!(matches!(
        decode(
            b"\x00\x00\x08\x03\
              \xFF\xFF\xFF\xFF\
              \xFF\xFF\xFF\xFF\
              \xFF\xFF\xFF\xFF"
        ),
        Err(ReadIdxError::LengthOverflow)
    ));
}

#[test]
fn read_zero_length_axis_with_huge_axes() {
    let arr = decode(
        b"\x00\x00\x08\x04\
          \xFF\xFF\xFF\xFF\
          \xFF\xFF\xFF\xFF\
          \xFF\xFF\xFF\xFF\
          \x00\x00\x00\x00",
    )
    .unwrap();
    let max = u32::MAX as usize;
    assert_eq!(arr.shape(), &[max, max, max, 0]);
    assert!(arr.is_empty());
    assert_eq!(arr.data(), &IdxData::U8(Vec::new()));
}

#[test]
fn write_u8() {
    let arr = IdxArray::new(vec![3], vec![0x0Au8, 0x0B, 0xFF]).unwrap();
    assert_eq!(
        arr.to_idx_bytes().unwrap(),
        b"\x00\x00\x08\x01\x00\x00\x00\x03\x0A\x0B\xFF"
    );
}

#[test]
fn write_i8() {
    let arr = IdxArray::new(vec![4], vec![-2i8, -1, 0, -86]).unwrap();
    assert_eq!(
        arr.to_idx_bytes().unwrap(),
        b"\x00\x00\x09\x01\x00\x00\x00\x04\xFE\xFF\x00\xAA"
    );
}

#[test]
fn write_i16() {
    let arr = IdxArray::new(vec![2], vec![-4091i16, 255]).unwrap();
    assert_eq!(
        arr.to_idx_bytes().unwrap(),
        b"\x00\x00\x0B\x01\x00\x00\x00\x02\xF0\x05\x00\xFF"
    );
}

#[test]
fn write_i32() {
    let arr = IdxArray::new(vec![3], vec![0x00FF00FFi32, i32::MIN, 0]).unwrap();
    assert_eq!(
        arr.to_idx_bytes().unwrap(),
        &b"\x00\x00\x0C\x01\x00\x00\x00\x03\
           \x00\xFF\x00\xFF\
           \x80\x00\x00\x00\
           \x00\x00\x00\x00"[..]
    );
}

#[test]
fn write_f64() {
    let arr = IdxArray::new(vec![5], vec![1f64, 2., -2., 0., -0.]).unwrap();
    assert_eq!(
        arr.to_idx_bytes().unwrap(),
        &b"\x00\x00\x0E\x01\x00\x00\x00\x05\
           \x3F\xF0\x00\x00\x00\x00\x00\x00\
           \x40\x00\x00\x00\x00\x00\x00\x00\
           \xC0\x00\x00\x00\x00\x00\x00\x00\
           \x00\x00\x00\x00\x00\x00\x00\x00\
           \x80\x00\x00\x00\x00\x00\x00\x00"[..]
    );
}

#[test]
fn write_large() {
    const LEN: usize = 0x0001_0000;
    let arr = IdxArray::new(vec![LEN], vec![0u8; LEN]).unwrap();
    let bytes = arr.to_idx_bytes().unwrap();
    assert_eq!(&bytes[..8], b"\x00\x00\x08\x01\x00\x01\x00\x00");
    assert_eq!(bytes.len(), 8 + LEN);
    assert!(bytes[8..].iter().all(|&b| b == 0));
}

#[test]
fn write_scalar() {
    let arr = IdxArray::scalar(-1i32);
    assert_eq!(
        arr.to_idx_bytes().unwrap(),
        b"\x00\x00\x0C\x00\xFF\xFF\xFF\xFF"
    );
}

#[test]
fn write_empty() {
    let arr = IdxArray::new(vec![0], Vec::<u8>::new()).unwrap();
    let mut out = Vec::<u8>::new();
    let err = arr.write_idx(&mut out).unwrap_err();
    assert!(matches!(err, WriteIdxError::EmptyArray));
    assert!(out.is_empty());
}

#[test]
fn write_too_many_dimensions() {
    let arr = IdxArray::new(vec![1; 256], vec![1u8]).unwrap();
    let mut out = Vec::<u8>::new();
    assert!(matches!(
        arr.write_idx(&mut out),
        Err(WriteIdxError::FormatHeader(
            FormatHeaderError::TooManyDimensions(256)
        ))
    ));
    assert!(out.is_empty());
}

#[test]
fn write_max_dimensions() {
    let arr = IdxArray::new(vec![1; 255], vec![7u8]).unwrap();
    let bytes = arr.to_idx_bytes().unwrap();
    assert_eq!(&bytes[..4], b"\x00\x00\x08\xFF");
    assert_eq!(bytes.len(), 4 + 255 * 4 + 1);
    assert_eq!(IdxArray::from_idx_bytes(&bytes).unwrap(), arr);
}
