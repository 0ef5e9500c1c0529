//! Wire primitives: size prefixes, alignment padding and fixed-width scalars.
//!
//! All multi-byte integers and floats are little-endian.
//!
//! Size prefix layout:
//! ```text
//! 0..=253        │ len                   (1 byte)
//! 254..=65535    │ 0xFE │ len as u16 LE  (3 bytes)
//! 65536..        │ 0xFF │ len as u32 LE  (5 bytes)
//! ```
//!
//! Alignment is measured from the first byte of the whole message, never from
//! the start of a nested value. Writers get this for free because they append
//! to the single output buffer; readers receive the original input length and
//! derive the absolute offset as `original_len - remaining`.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{CorruptionError, MessageTypeError};

/// Largest size written as a single byte.
pub const MAX_INLINE_SIZE: usize = 253;

/// Marker byte for a two-byte size.
pub const SIZE_U16_MARKER: u8 = 254;

/// Marker byte for a four-byte size.
pub const SIZE_U32_MARKER: u8 = 255;

/// Write a variable-width size prefix.
pub fn write_size(buf: &mut BytesMut, len: usize) -> Result<(), MessageTypeError> {
    if len <= MAX_INLINE_SIZE {
        buf.put_u8(len as u8);
    } else if len <= u16::MAX as usize {
        buf.put_u8(SIZE_U16_MARKER);
        buf.put_u16_le(len as u16);
    } else {
        let len32 = u32::try_from(len).map_err(|_| MessageTypeError::TooLarge { len })?;
        buf.put_u8(SIZE_U32_MARKER);
        buf.put_u32_le(len32);
    }
    Ok(())
}

/// Pad with zero bytes until the buffer length is a multiple of `alignment`.
pub fn write_alignment(buf: &mut BytesMut, alignment: usize) {
    let rem = buf.len() % alignment;
    if rem != 0 {
        buf.put_bytes(0, alignment - rem);
    }
}

fn ensure(buf: &[u8], needed: usize, stage: &'static str) -> Result<(), CorruptionError> {
    if buf.remaining() < needed {
        return Err(CorruptionError::Truncated {
            stage,
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

/// Read a variable-width size prefix.
pub fn read_size(buf: &mut &[u8], stage: &'static str) -> Result<usize, CorruptionError> {
    ensure(buf, 1, stage)?;
    match buf.get_u8() {
        SIZE_U16_MARKER => {
            ensure(buf, 2, stage)?;
            Ok(buf.get_u16_le() as usize)
        }
        SIZE_U32_MARKER => {
            ensure(buf, 4, stage)?;
            Ok(buf.get_u32_le() as usize)
        }
        small => Ok(small as usize),
    }
}

/// Skip the padding a writer inserted before an aligned payload.
pub fn read_alignment(
    buf: &mut &[u8],
    original_len: usize,
    alignment: usize,
    stage: &'static str,
) -> Result<(), CorruptionError> {
    let consumed = original_len - buf.remaining();
    let pad = (alignment - consumed % alignment) % alignment;
    ensure(buf, pad, stage)?;
    buf.advance(pad);
    Ok(())
}

pub fn read_u8(buf: &mut &[u8], stage: &'static str) -> Result<u8, CorruptionError> {
    ensure(buf, 1, stage)?;
    Ok(buf.get_u8())
}

pub fn read_i32(buf: &mut &[u8], stage: &'static str) -> Result<i32, CorruptionError> {
    ensure(buf, 4, stage)?;
    Ok(buf.get_i32_le())
}

pub fn read_i64(buf: &mut &[u8], stage: &'static str) -> Result<i64, CorruptionError> {
    ensure(buf, 8, stage)?;
    Ok(buf.get_i64_le())
}

pub fn read_f64(buf: &mut &[u8], stage: &'static str) -> Result<f64, CorruptionError> {
    ensure(buf, 8, stage)?;
    Ok(buf.get_f64_le())
}

/// Split off the next `len` bytes without copying.
pub fn take<'a>(
    buf: &mut &'a [u8],
    len: usize,
    stage: &'static str,
) -> Result<&'a [u8], CorruptionError> {
    ensure(buf, len, stage)?;
    let whole: &'a [u8] = buf;
    let (head, tail) = whole.split_at(len);
    *buf = tail;
    Ok(head)
}

/// Read a size prefix followed by that many raw bytes.
pub fn read_sized_bytes<'a>(
    buf: &mut &'a [u8],
    stage: &'static str,
) -> Result<&'a [u8], CorruptionError> {
    let len = read_size(buf, stage)?;
    take(buf, len, stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size_bytes(len: usize) -> Vec<u8> {
        let mut buf = BytesMut::new();
        write_size(&mut buf, len).unwrap();
        buf.to_vec()
    }

    #[test]
    fn size_widths_at_boundaries() {
        assert_eq!(size_bytes(0), vec![0]);
        assert_eq!(size_bytes(253), vec![253]);
        assert_eq!(size_bytes(254), vec![254, 254, 0]);
        assert_eq!(size_bytes(255), vec![254, 255, 0]);
        assert_eq!(size_bytes(65535), vec![254, 255, 255]);
        assert_eq!(size_bytes(65536), vec![255, 0, 0, 1, 0]);
    }

    #[test]
    fn size_roundtrip_at_boundaries() {
        for len in [0, 1, 253, 254, 255, 256, 65535, 65536, 1 << 24] {
            let bytes = size_bytes(len);
            let mut cursor = bytes.as_slice();
            assert_eq!(read_size(&mut cursor, "size").unwrap(), len);
            assert!(cursor.is_empty());
        }
    }

    #[test]
    fn two_byte_size_reads_unsigned() {
        let mut cursor: &[u8] = &[254, 0xff, 0xff];
        assert_eq!(read_size(&mut cursor, "size").unwrap(), 65535);
    }

    #[test]
    fn truncated_size_is_corruption() {
        let mut cursor: &[u8] = &[255];
        let err = read_size(&mut cursor, "size").unwrap_err();
        assert_eq!(
            err,
            CorruptionError::Truncated {
                stage: "size",
                needed: 4,
                remaining: 0
            }
        );

        let mut cursor: &[u8] = &[254, 1];
        assert!(read_size(&mut cursor, "size").is_err());

        let mut cursor: &[u8] = &[];
        assert!(read_size(&mut cursor, "size").is_err());
    }

    #[test]
    fn alignment_pads_to_multiple() {
        let mut buf = BytesMut::new();
        buf.put_u8(6);
        write_alignment(&mut buf, 8);
        assert_eq!(buf.len(), 8);
        assert!(buf[1..].iter().all(|&b| b == 0));

        write_alignment(&mut buf, 8);
        assert_eq!(buf.len(), 8);

        buf.put_u8(9);
        buf.put_u8(2);
        write_alignment(&mut buf, 4);
        assert_eq!(buf.len(), 12);
    }

    #[test]
    fn read_alignment_uses_absolute_offset() {
        let data = [0u8; 16];
        // 3 bytes consumed from the message start, skip 5.
        let mut cursor = &data[3..];
        read_alignment(&mut cursor, data.len(), 8, "align").unwrap();
        assert_eq!(cursor.len(), 8);

        // Already aligned, nothing to skip.
        read_alignment(&mut cursor, data.len(), 8, "align").unwrap();
        assert_eq!(cursor.len(), 8);

        // The same slice seen as a message of its own needs no padding.
        let mut cursor = &data[3..];
        read_alignment(&mut cursor, 13, 8, "align").unwrap();
        assert_eq!(cursor.len(), 13);
    }

    #[test]
    fn read_alignment_past_end_is_corruption() {
        let data = [0u8; 4];
        let mut cursor = &data[..];
        cursor.advance(1);
        assert!(matches!(
            read_alignment(&mut cursor, data.len(), 8, "align"),
            Err(CorruptionError::Truncated { needed: 7, .. })
        ));
    }

    #[test]
    fn scalars_are_little_endian() {
        let mut cursor: &[u8] = &[0x2a, 0, 0, 0];
        assert_eq!(read_i32(&mut cursor, "int32").unwrap(), 42);

        let mut cursor: &[u8] = &[0xff; 8];
        assert_eq!(read_i64(&mut cursor, "int64").unwrap(), -1);

        let bytes = 1.5f64.to_le_bytes();
        let mut cursor: &[u8] = &bytes;
        assert_eq!(read_f64(&mut cursor, "float64").unwrap(), 1.5);
    }

    #[test]
    fn short_scalar_read_is_corruption() {
        let mut cursor: &[u8] = &[1, 2, 3];
        assert!(matches!(
            read_i32(&mut cursor, "int32"),
            Err(CorruptionError::Truncated { stage: "int32", needed: 4, remaining: 3 })
        ));
    }

    #[test]
    fn take_splits_without_copy() {
        let data = [1u8, 2, 3, 4];
        let mut cursor = &data[..];
        let head = take(&mut cursor, 3, "bytes").unwrap();
        assert_eq!(head, &[1, 2, 3]);
        assert_eq!(cursor, &[4]);
        assert!(take(&mut cursor, 2, "bytes").is_err());
    }
}
