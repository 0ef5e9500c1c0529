//! The codec object handed to the transport layer.

use bytes::Bytes;

use crate::decoder::decode_message_with;
use crate::encoder::encode_message;
use crate::error::Result;
use crate::types::Value;

/// Default limit on nested lists and maps accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A two-way mapping between [`Value`]s and byte buffers.
///
/// This is the whole surface a message channel needs: it frames and ships the
/// bytes, the codec gives them meaning.
pub trait MessageCodec {
    fn encode_message(&self, message: &Value) -> Result<Bytes>;
    fn decode_message(&self, data: &[u8]) -> Result<Value>;
}

/// Decoder limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum number of nested lists and maps. Default: 512.
    pub max_depth: usize,
}

impl CodecConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The standard binary message codec.
///
/// Holds only immutable configuration, so a single instance can be shared
/// freely across threads and reused for any number of calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardMessageCodec {
    config: CodecConfig,
}

impl StandardMessageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl MessageCodec for StandardMessageCodec {
    fn encode_message(&self, message: &Value) -> Result<Bytes> {
        encode_message(message)
    }

    fn decode_message(&self, data: &[u8]) -> Result<Value> {
        decode_message_with(data, &self.config)
    }
}
