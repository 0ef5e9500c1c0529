//! Standard message decoder: reads tagged binary back into a [`Value`] tree.
//!
//! The decoder consumes exactly one value from the front of the input and
//! ignores anything after it. Failures abort the whole call with a
//! [`CorruptionError`]; no partial tree is returned.
//!
//! # Key design decisions
//!
//! - **Root-relative alignment**: the input length is captured once in
//!   [`decode_message_with`] and handed unchanged to every recursive
//!   [`read_value`] call, so padding is always computed from the first byte
//!   of the message regardless of nesting depth.
//! - **Counts checked before allocation**: a declared list, map or array
//!   length that cannot fit in the remaining bytes is rejected up front rather
//!   than trusted for `Vec::with_capacity`.
//! - **Duplicate map keys**: the last occurrence in the stream wins.

use bytes::Buf;
use num_bigint::BigInt;

use crate::codec::CodecConfig;
use crate::error::{CorruptionError, Result};
use crate::types::{Tag, Value, ValueMap};
use crate::wire::{
    read_alignment, read_f64, read_i32, read_i64, read_size, read_sized_bytes, read_u8, take,
};

/// Decode one value using the default [`CodecConfig`].
pub fn decode_message(data: &[u8]) -> Result<Value> {
    decode_message_with(data, &CodecConfig::default())
}

/// Decode one value from the start of `data`.
pub fn decode_message_with(data: &[u8], config: &CodecConfig) -> Result<Value> {
    let mut buf = data;
    match read_value(&mut buf, data.len(), 0, config) {
        Ok(value) => {
            tracing::trace!(
                len = data.len(),
                trailing = buf.remaining(),
                category = value.category(),
                "decoded message"
            );
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, len = data.len(), "decode failed");
            Err(err.into())
        }
    }
}

/// Read one tagged value from `buf`.
///
/// `original_len` is the length of the whole message `buf` was sliced from,
/// and `depth` is the number of enclosing lists and maps.
pub fn read_value(
    buf: &mut &[u8],
    original_len: usize,
    depth: usize,
    config: &CodecConfig,
) -> std::result::Result<Value, CorruptionError> {
    let offset = original_len - buf.remaining();
    let byte = read_u8(buf, "value type")?;
    let tag = Tag::try_from(byte).map_err(|tag| CorruptionError::InvalidTag { tag, offset })?;

    let value = match tag {
        Tag::Null => Value::Null,
        Tag::True => Value::Bool(true),
        Tag::False => Value::Bool(false),
        Tag::Int32 => Value::Int32(read_i32(buf, "int32")?),
        Tag::Int64 => Value::Int64(read_i64(buf, "int64")?),
        Tag::Float64 => {
            read_alignment(buf, original_len, 8, "float64 padding")?;
            Value::Float64(read_f64(buf, "float64")?)
        }
        Tag::BigInt => {
            let text = read_sized_bytes(buf, "bigint")?;
            Value::BigInt(parse_hex_bigint(text)?)
        }
        Tag::String => {
            let len = read_size(buf, "string")?;
            let start = original_len - buf.remaining();
            let bytes = take(buf, len, "string")?;
            let s = std::str::from_utf8(bytes)
                .map_err(|_| CorruptionError::InvalidUtf8 { offset: start })?;
            Value::String(s.to_owned())
        }
        Tag::Bytes => Value::Bytes(read_sized_bytes(buf, "byte buffer")?.to_vec()),
        Tag::Int32Array => {
            let len = read_size(buf, "int32 array")?;
            read_alignment(buf, original_len, 4, "int32 array padding")?;
            let mut payload = take(buf, len.saturating_mul(4), "int32 array")?;
            Value::Int32Array((0..len).map(|_| payload.get_i32_le()).collect())
        }
        Tag::Int64Array => {
            let len = read_size(buf, "int64 array")?;
            read_alignment(buf, original_len, 8, "int64 array padding")?;
            let mut payload = take(buf, len.saturating_mul(8), "int64 array")?;
            Value::Int64Array((0..len).map(|_| payload.get_i64_le()).collect())
        }
        Tag::Float64Array => {
            let len = read_size(buf, "float64 array")?;
            read_alignment(buf, original_len, 8, "float64 array padding")?;
            let mut payload = take(buf, len.saturating_mul(8), "float64 array")?;
            Value::Float64Array((0..len).map(|_| payload.get_f64_le()).collect())
        }
        Tag::List => {
            check_depth(depth, config)?;
            let len = read_size(buf, "list")?;
            check_count(buf, len, 1, "list")?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(read_value(buf, original_len, depth + 1, config)?);
            }
            Value::List(items)
        }
        Tag::Map => {
            check_depth(depth, config)?;
            let len = read_size(buf, "map")?;
            check_count(buf, len, 2, "map")?;
            let mut map = ValueMap::with_capacity(len);
            for _ in 0..len {
                let key = read_value(buf, original_len, depth + 1, config)?;
                let val = read_value(buf, original_len, depth + 1, config)?;
                map.insert(key, val);
            }
            Value::Map(map)
        }
    };
    Ok(value)
}

/// Parse signed hexadecimal digits. `_` separators are rejected even though
/// `num-bigint` would skip them.
fn parse_hex_bigint(text: &[u8]) -> std::result::Result<BigInt, CorruptionError> {
    let parsed = if text.contains(&b'_') {
        None
    } else {
        BigInt::parse_bytes(text, 16)
    };
    parsed.ok_or_else(|| CorruptionError::InvalidBigInt {
        text: String::from_utf8_lossy(text).into_owned(),
    })
}

fn check_depth(depth: usize, config: &CodecConfig) -> std::result::Result<(), CorruptionError> {
    if depth >= config.max_depth {
        return Err(CorruptionError::DepthExceeded {
            limit: config.max_depth,
        });
    }
    Ok(())
}

/// Every list element takes at least one byte and every map pair at least two.
fn check_count(
    buf: &[u8],
    declared: usize,
    min_entry_size: usize,
    stage: &'static str,
) -> std::result::Result<(), CorruptionError> {
    if declared.saturating_mul(min_entry_size) > buf.remaining() {
        return Err(CorruptionError::LengthOverrun {
            stage,
            declared,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}
