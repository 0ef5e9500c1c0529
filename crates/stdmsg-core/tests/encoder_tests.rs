use stdmsg_core::{encode_message, BigInt, Value, ValueMap};

/// Helper: encode and return the raw bytes.
fn enc(value: &Value) -> Vec<u8> {
    encode_message(value).expect("encode failed").to_vec()
}

/// Assert the exact byte layout produced for a value.
fn assert_encode(value: Value, expected: &[u8]) {
    let bytes = enc(&value);
    assert_eq!(
        bytes, expected,
        "Encode mismatch:\n  value:    {value:?}\n  got:      {bytes:?}\n  expected: {expected:?}"
    );
}

// ============================================================================
// Tag-only values
// ============================================================================

#[test]
fn encode_null() {
    assert_encode(Value::Null, &[0]);
}

#[test]
fn encode_true() {
    assert_encode(Value::Bool(true), &[1]);
}

#[test]
fn encode_false() {
    assert_encode(Value::Bool(false), &[2]);
}

// ============================================================================
// Fixed-width integers
// ============================================================================

#[test]
fn encode_int32() {
    assert_encode(Value::Int32(42), &[3, 42, 0, 0, 0]);
}

#[test]
fn encode_negative_int32() {
    assert_encode(Value::Int32(-2), &[3, 0xfe, 0xff, 0xff, 0xff]);
}

#[test]
fn encode_int64() {
    assert_encode(
        Value::Int64(0x0102030405060708),
        &[4, 8, 7, 6, 5, 4, 3, 2, 1],
    );
}

#[test]
fn int64_is_not_aligned() {
    // Only floats and arrays are padded; int64 follows its tag directly.
    assert_eq!(enc(&Value::Int64(1)).len(), 9);
}

// ============================================================================
// Float64
// ============================================================================

#[test]
fn encode_float64_root() {
    let mut expected = vec![6, 0, 0, 0, 0, 0, 0, 0];
    expected.extend_from_slice(&3.25f64.to_le_bytes());
    assert_encode(Value::Float64(3.25), &expected);
}

#[test]
fn encode_float64_keeps_negative_zero() {
    let bytes = enc(&Value::Float64(-0.0));
    assert_eq!(&bytes[8..], &(-0.0f64).to_le_bytes());
}

#[test]
fn encode_float64_inside_list_after_null() {
    // list tag, size, null tag, float tag -> 4 bytes, pad 4 more
    let mut expected = vec![12, 2, 0, 6, 0, 0, 0, 0];
    expected.extend_from_slice(&1.5f64.to_le_bytes());
    assert_encode(
        Value::List(vec![Value::Null, Value::Float64(1.5)]),
        &expected,
    );
}

#[test]
fn encode_float64_already_aligned_gets_no_padding() {
    // [int32, float]: 12 2 | 3 xx xx xx xx | 6 -> 8 bytes, no pad
    let bytes = enc(&Value::List(vec![Value::Int32(0), Value::Float64(2.0)]));
    assert_eq!(bytes.len(), 16);
    assert_eq!(bytes[7], 6);
    assert_eq!(&bytes[8..], &2.0f64.to_le_bytes());
}

// ============================================================================
// BigInt
// ============================================================================

#[test]
fn encode_bigint_255_as_ff() {
    assert_encode(Value::BigInt(BigInt::from(255)), &[5, 2, b'f', b'f']);
}

#[test]
fn encode_bigint_negative_has_leading_minus() {
    assert_encode(Value::BigInt(BigInt::from(-1)), &[5, 2, b'-', b'1']);
}

#[test]
fn encode_bigint_zero() {
    assert_encode(Value::BigInt(BigInt::from(0)), &[5, 1, b'0']);
}

#[test]
fn encode_bigint_large_is_lowercase_hex() {
    let n: BigInt = BigInt::from(u64::MAX) * 16 + 10;
    let bytes = enc(&Value::BigInt(n));
    assert_eq!(bytes[0], 5);
    assert_eq!(bytes[1], 17);
    assert_eq!(&bytes[2..], b"ffffffffffffffffa");
}

// ============================================================================
// Strings and byte buffers
// ============================================================================

#[test]
fn encode_empty_string() {
    assert_encode(Value::from(""), &[7, 0]);
}

#[test]
fn encode_ascii_string() {
    assert_encode(Value::from("hi"), &[7, 2, b'h', b'i']);
}

#[test]
fn encode_string_size_is_byte_length() {
    // "é" is one char, two UTF-8 bytes.
    assert_encode(Value::from("\u{e9}"), &[7, 2, 0xc3, 0xa9]);
}

#[test]
fn encode_bytes() {
    assert_encode(Value::Bytes(vec![0xde, 0xad]), &[8, 2, 0xde, 0xad]);
}

#[test]
fn encode_bytes_not_aligned() {
    let bytes = enc(&Value::List(vec![Value::Null, Value::Bytes(vec![1])]));
    assert_eq!(bytes, vec![12, 2, 0, 8, 1, 1]);
}

// ============================================================================
// Typed arrays
// ============================================================================

#[test]
fn encode_empty_int32_array_still_aligns() {
    // tag, size 0, then pad to 4
    assert_encode(Value::Int32Array(vec![]), &[9, 0, 0, 0]);
}

#[test]
fn encode_int32_array() {
    assert_encode(
        Value::Int32Array(vec![1, 2]),
        &[9, 2, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0],
    );
}

#[test]
fn encode_int64_array() {
    let mut expected = vec![10, 1, 0, 0, 0, 0, 0, 0];
    expected.extend_from_slice(&(-5i64).to_le_bytes());
    assert_encode(Value::Int64Array(vec![-5]), &expected);
}

#[test]
fn encode_float64_array() {
    let mut expected = vec![11, 2, 0, 0, 0, 0, 0, 0];
    expected.extend_from_slice(&0.5f64.to_le_bytes());
    expected.extend_from_slice(&(-0.25f64).to_le_bytes());
    assert_encode(Value::Float64Array(vec![0.5, -0.25]), &expected);
}

#[test]
fn encode_int32_array_with_wide_size_prefix() {
    // tag(1) + size(3) = 4 -> already aligned
    let items: Vec<i32> = (0..300).collect();
    let bytes = enc(&Value::Int32Array(items));
    assert_eq!(&bytes[..4], &[9, 254, 44, 1]);
    assert_eq!(bytes.len(), 4 + 300 * 4);
    assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
    assert_eq!(&bytes[8..12], &[1, 0, 0, 0]);
}

// ============================================================================
// Lists and maps
// ============================================================================

#[test]
fn encode_empty_list() {
    assert_encode(Value::List(vec![]), &[12, 0]);
}

#[test]
fn encode_mixed_list() {
    assert_encode(
        Value::List(vec![
            Value::from("a"),
            Value::Int32(42),
            Value::Null,
            Value::Bool(true),
        ]),
        &[12, 4, 7, 1, b'a', 3, 42, 0, 0, 0, 0, 1],
    );
}

#[test]
fn encode_empty_map() {
    assert_encode(Value::Map(ValueMap::new()), &[13, 0]);
}

#[test]
fn encode_single_entry_map() {
    let map: ValueMap = [("x", 1)].into_iter().collect();
    assert_encode(Value::Map(map), &[13, 1, 7, 1, b'x', 3, 1, 0, 0, 0]);
}

#[test]
fn encode_map_pairs_in_insertion_order() {
    let map: ValueMap = [("x", 1), ("y", 2)].into_iter().collect();
    assert_encode(
        Value::Map(map),
        &[13, 2, 7, 1, b'x', 3, 1, 0, 0, 0, 7, 1, b'y', 3, 2, 0, 0, 0],
    );
}

#[test]
fn encode_map_with_non_string_keys() {
    let mut map = ValueMap::new();
    map.insert(Value::Null, true);
    map.insert(Value::Int32Array(vec![7]), false);
    assert_encode(
        Value::Map(map),
        &[13, 2, 0, 1, 9, 1, 0, 0, 7, 0, 0, 0, 2],
    );
}

#[test]
fn encode_list_size_uses_variable_width_prefix() {
    let bytes = enc(&Value::List(vec![Value::Null; 254]));
    assert_eq!(&bytes[..4], &[12, 254, 254, 0]);
    assert_eq!(bytes.len(), 4 + 254);
}

#[test]
fn encoding_is_deterministic() {
    let map: ValueMap = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
    let value = Value::List(vec![Value::Map(map), Value::Float64(9.0)]);
    assert_eq!(enc(&value), enc(&value.clone()));
}
