//! Error types for standard message encoding and decoding.
//!
//! The two failure families never overlap: [`MessageTypeError`] is raised only
//! while encoding and means the caller handed over something the wire format
//! cannot carry; [`CorruptionError`] is raised only while decoding and means
//! the byte stream is malformed. Both abort the whole call.

use std::fmt::Display;

use thiserror::Error;

/// The value to encode has no representation in the standard message format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageTypeError {
    /// A category of value the format does not support (e.g. `i16`, `char`, structs).
    #[error("type {category} is not supported by StandardMessageCodec")]
    Unsupported { category: String },

    /// A string, buffer or collection whose length does not fit the 32-bit size field.
    #[error("length {len} exceeds the 32-bit size field")]
    TooLarge { len: usize },

    /// Free-form message raised through `serde::ser::Error::custom`.
    #[error("{0}")]
    Custom(String),
}

impl MessageTypeError {
    pub(crate) fn unsupported(category: impl Into<String>) -> Self {
        MessageTypeError::Unsupported {
            category: category.into(),
        }
    }
}

impl serde::ser::Error for MessageTypeError {
    fn custom<T: Display>(msg: T) -> Self {
        MessageTypeError::Custom(msg.to_string())
    }
}

/// The byte stream does not hold a well-formed standard message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorruptionError {
    /// Fewer bytes remain than the current read requires.
    #[error("truncated message while reading {stage}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        stage: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A declared element or pair count cannot possibly fit in the remaining input.
    #[error("{stage} declares {declared} entries but only {remaining} bytes remain")]
    LengthOverrun {
        stage: &'static str,
        declared: usize,
        remaining: usize,
    },

    /// The type discriminator byte is not one of the known tags.
    #[error("invalid message value type {tag} at offset {offset}")]
    InvalidTag { tag: u8, offset: usize },

    /// A bigint payload is not a base-16 integer.
    #[error("invalid hexadecimal encoding for bigint: {text:?}")]
    InvalidBigInt { text: String },

    /// A string payload is not valid UTF-8.
    #[error("string payload at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    /// Lists and maps are nested deeper than the decoder allows.
    #[error("message nesting exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
}

/// Errors returned by the codec entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("failed to encode message: {0}")]
    Type(#[from] MessageTypeError),

    #[error("failed to decode data to message: {0}")]
    Corrupt(#[from] CorruptionError),
}

impl CodecError {
    /// True when the caller passed an unencodable value.
    pub fn is_type_error(&self) -> bool {
        matches!(self, CodecError::Type(_))
    }

    /// True when the input bytes were malformed.
    pub fn is_corruption(&self) -> bool {
        matches!(self, CodecError::Corrupt(_))
    }
}

/// Convenience alias used throughout stdmsg-core.
pub type Result<T> = std::result::Result<T, CodecError>;
