//! Standard message encoder: writes a [`Value`] tree as tagged binary.
//!
//! Each value is a tag byte followed by its payload:
//!
//! - **Tag only**: null, true, false
//! - **Fixed width**: int32 (4 bytes), int64 (8 bytes)
//! - **Aligned**: float64 pads to an 8-byte boundary before its payload
//! - **Sized**: string, bytes and bigint text carry a size prefix
//! - **Typed arrays**: size prefix, padding to the element width, then elements
//! - **Containers**: lists and maps carry a count, then each child recursively
//!
//! # Example
//! ```
//! use stdmsg_core::{encode_message, Value};
//! let bytes = encode_message(&Value::Int32(42)).unwrap();
//! assert_eq!(bytes.as_ref(), &[3, 42, 0, 0, 0]);
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MessageTypeError, Result};
use crate::types::Value;
use crate::wire::{write_alignment, write_size};

/// Encode a value into a freshly allocated buffer.
pub fn encode_message(value: &Value) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    if let Err(err) = write_value(&mut buf, value) {
        tracing::debug!(error = %err, category = value.category(), "encode failed");
        return Err(err.into());
    }
    tracing::trace!(len = buf.len(), category = value.category(), "encoded message");
    Ok(buf.freeze())
}

/// Append one tagged value to `buf`.
///
/// Alignment is computed against `buf.len()`, so `buf` must hold exactly the
/// bytes of the message being built, starting at its first byte.
pub fn write_value(buf: &mut BytesMut, value: &Value) -> std::result::Result<(), MessageTypeError> {
    buf.put_u8(value.tag() as u8);
    match value {
        Value::Null | Value::Bool(_) => {}
        Value::Int32(n) => buf.put_i32_le(*n),
        Value::Int64(n) => buf.put_i64_le(*n),
        Value::Float64(f) => {
            write_alignment(buf, 8);
            buf.put_f64_le(*f);
        }
        Value::BigInt(n) => write_sized(buf, n.to_str_radix(16).as_bytes())?,
        Value::String(s) => write_sized(buf, s.as_bytes())?,
        Value::Bytes(b) => write_sized(buf, b)?,
        Value::Int32Array(items) => {
            write_size(buf, items.len())?;
            write_alignment(buf, 4);
            buf.reserve(items.len() * 4);
            for n in items {
                buf.put_i32_le(*n);
            }
        }
        Value::Int64Array(items) => {
            write_size(buf, items.len())?;
            write_alignment(buf, 8);
            buf.reserve(items.len() * 8);
            for n in items {
                buf.put_i64_le(*n);
            }
        }
        Value::Float64Array(items) => {
            write_size(buf, items.len())?;
            write_alignment(buf, 8);
            buf.reserve(items.len() * 8);
            for f in items {
                buf.put_f64_le(*f);
            }
        }
        Value::List(items) => {
            write_size(buf, items.len())?;
            for item in items {
                write_value(buf, item)?;
            }
        }
        Value::Map(map) => {
            write_size(buf, map.len())?;
            for (key, val) in map.iter() {
                write_value(buf, key)?;
                write_value(buf, val)?;
            }
        }
    }
    Ok(())
}

fn write_sized(buf: &mut BytesMut, bytes: &[u8]) -> std::result::Result<(), MessageTypeError> {
    write_size(buf, bytes.len())?;
    buf.put_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn encoded(value: Value) -> Vec<u8> {
        encode_message(&value).unwrap().to_vec()
    }

    #[test]
    fn float_after_tag_is_padded_to_eight() {
        let bytes = encoded(Value::Float64(1.0));
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 6);
        assert_eq!(&bytes[1..8], &[0; 7]);
        assert_eq!(&bytes[8..], &1.0f64.to_le_bytes());
    }

    #[test]
    fn int32_array_pads_after_size() {
        // tag, size=2, pad 2 -> payload at offset 4
        let bytes = encoded(Value::Int32Array(vec![1, -1]));
        assert_eq!(bytes, vec![9, 2, 0, 0, 1, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn bigint_is_hex_text() {
        let bytes = encoded(Value::BigInt(BigInt::from(255)));
        assert_eq!(bytes, vec![5, 2, b'f', b'f']);

        let bytes = encoded(Value::BigInt(BigInt::from(-1)));
        assert_eq!(bytes, vec![5, 2, b'-', b'1']);
    }
}
