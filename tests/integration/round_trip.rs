//! Tests that decoded data match the original encoded data, and that
//! re-encoding decoded bytes reproduces them exactly.

use crate::sample_array;
use ndarray_idx::{ElementType, IdxArray, ReadIdxExt, WriteIdxExt};

const SHAPES: &[&[usize]] = &[&[], &[1], &[3], &[2, 2], &[1, 1, 1], &[2, 3, 4]];

#[test]
fn round_trip_all_types_and_shapes() {
    for &element_type in &ElementType::ALL {
        for &shape in SHAPES {
            let original = sample_array(element_type, shape);
            let bytes = original.to_idx_bytes().unwrap();
            let width = element_type.width();
            assert_eq!(
                bytes.len(),
                4 + 4 * shape.len() + original.len() * width,
                "{} {:?}",
                element_type,
                shape,
            );

            let decoded = IdxArray::from_idx_bytes(&bytes).unwrap();
            assert_eq!(decoded, original, "{} {:?}", element_type, shape);

            let reencoded = decoded.to_idx_bytes().unwrap();
            assert_eq!(reencoded, bytes, "{} {:?}", element_type, shape);
        }
    }
}

#[test]
fn round_trip_through_stream() {
    let original = sample_array(ElementType::F64, &[4, 5]);
    let mut stream = Vec::<u8>::new();
    original.write_idx(&mut stream).unwrap();
    let decoded = IdxArray::read_idx(&stream[..]).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn round_trip_special_floats() {
    let original = IdxArray::new(
        vec![6],
        vec![
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::MIN_POSITIVE,
            f32::MAX,
            -0.,
            f32::EPSILON,
        ],
    )
    .unwrap();
    let decoded = IdxArray::from_idx_bytes(&original.to_idx_bytes().unwrap()).unwrap();
    assert_eq!(decoded, original);
    assert!(decoded.as_slice::<f32>().unwrap()[4].is_sign_negative());
}

#[test]
fn nan_bit_pattern_is_preserved() {
    let bytes = b"\x00\x00\x0E\x01\x00\x00\x00\x01\x7F\xF8\x00\x00\x00\x00\x00\x01";
    let decoded = IdxArray::from_idx_bytes(bytes).unwrap();
    assert!(decoded.as_slice::<f64>().unwrap()[0].is_nan());
    assert_eq!(decoded.to_idx_bytes().unwrap(), bytes);
}
