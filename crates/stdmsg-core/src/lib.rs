//! # stdmsg-core
//!
//! Pure-Rust implementation of the **standard message codec**, the compact
//! self-describing binary format used to pass dynamically-typed values across
//! language boundaries on message channels.
//!
//! The format is fixed by its peer implementations; this crate reproduces it
//! byte for byte: one tag byte per value, variable-width size prefixes,
//! little-endian scalars, and zero padding that aligns 8-byte floats and
//! numeric arrays relative to the start of the message.
//!
//! ## Quick start
//!
//! ```rust
//! use stdmsg_core::{decode_message, encode_message, Value};
//!
//! let message = Value::List(vec![
//!     Value::from("a"),
//!     Value::Int32(42),
//!     Value::Null,
//!     Value::Bool(true),
//! ]);
//! let bytes = encode_message(&message).unwrap();
//! assert_eq!(bytes.as_ref(), &[12, 4, 7, 1, b'a', 3, 42, 0, 0, 0, 0, 1]);
//!
//! let back = decode_message(&bytes).unwrap();
//! assert_eq!(back, message);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: `Value`, `ValueMap` and the `Tag` table
//! - [`wire`]: size prefixes, alignment and scalar primitives
//! - [`encoder`]: `Value` → bytes
//! - [`decoder`]: bytes → `Value`
//! - [`codec`]: `MessageCodec` trait, `StandardMessageCodec`, `CodecConfig`
//! - [`ser`]: any `serde::Serialize` type → `Value`, rejecting unsupported categories
//! - [`json`]: JSON ↔ `Value` conversion for tooling
//! - [`error`]: type and corruption errors

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod ser;
pub mod types;
pub mod wire;

pub use codec::{CodecConfig, MessageCodec, StandardMessageCodec, DEFAULT_MAX_DEPTH};
pub use decoder::{decode_message, decode_message_with};
pub use encoder::encode_message;
pub use error::{CodecError, CorruptionError, MessageTypeError, Result};
pub use json::{from_json, to_json};
pub use ser::{encode, to_value};
pub use types::{Tag, Value, ValueMap};

pub use num_bigint::BigInt;
