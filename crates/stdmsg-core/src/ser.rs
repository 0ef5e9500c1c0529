//! Serde bridge: builds a [`Value`] from any `Serialize` type.
//!
//! This is where the encoder meets caller-supplied dynamic data, so it is
//! where unsupported categories are rejected. The accepted set matches what
//! peer implementations exchange:
//!
//! | Rust | Value |
//! |---|---|
//! | `()`, `None` | `Null` |
//! | `bool` | `Bool` |
//! | `i32` | `Int32` |
//! | `i64` | `Int64` |
//! | `f64` | `Float64` |
//! | `str`, `String` | `String` |
//! | `serialize_bytes` (e.g. `serde_bytes`) | `Bytes` |
//! | sequences, tuples | `List` |
//! | maps | `Map` |
//! | `Some(x)`, newtype structs | the inner value |
//!
//! Narrow or unsigned integers, `i128`, `f32`, `char`, structs and enums fail
//! with [`MessageTypeError::Unsupported`]. Typed arrays and bigints have no
//! serde equivalent; construct them as [`Value`] directly.

use bytes::Bytes;
use serde::ser::{self, Impossible, Serialize};

use crate::encoder::encode_message;
use crate::error::MessageTypeError;
use crate::types::{Value, ValueMap};

/// Convert a `Serialize` value into a [`Value`] tree.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// Convert and encode in one step.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> crate::Result<Bytes> {
    let value = to_value(value).inspect_err(|err| {
        tracing::debug!(error = %err, "value rejected by serializer");
    })?;
    encode_message(&value)
}

type Result<T> = std::result::Result<T, MessageTypeError>;

type Unsupported = Impossible<Value, MessageTypeError>;

fn unsupported<T>(category: impl Into<String>) -> Result<T> {
    Err(MessageTypeError::unsupported(category))
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = MessageTypeError;

    type SerializeSeq = ListSerializer;
    type SerializeTuple = ListSerializer;
    type SerializeTupleStruct = Unsupported;
    type SerializeTupleVariant = Unsupported;
    type SerializeMap = MapSerializer;
    type SerializeStruct = Unsupported;
    type SerializeStructVariant = Unsupported;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, _v: i8) -> Result<Value> {
        unsupported("i8")
    }

    fn serialize_i16(self, _v: i16) -> Result<Value> {
        unsupported("i16")
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int64(v))
    }

    fn serialize_i128(self, _v: i128) -> Result<Value> {
        unsupported("i128")
    }

    fn serialize_u8(self, _v: u8) -> Result<Value> {
        unsupported("u8")
    }

    fn serialize_u16(self, _v: u16) -> Result<Value> {
        unsupported("u16")
    }

    fn serialize_u32(self, _v: u32) -> Result<Value> {
        unsupported("u32")
    }

    fn serialize_u64(self, _v: u64) -> Result<Value> {
        unsupported("u64")
    }

    fn serialize_u128(self, _v: u128) -> Result<Value> {
        unsupported("u128")
    }

    fn serialize_f32(self, _v: f32) -> Result<Value> {
        unsupported("f32")
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float64(v))
    }

    fn serialize_char(self, _v: char) -> Result<Value> {
        unsupported("char")
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        unsupported(format!("unit struct {name}"))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        unsupported(format!("enum {name}::{variant}"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Value> {
        unsupported(format!("enum {name}::{variant}"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ListSerializer> {
        Ok(ListSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<ListSerializer> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, name: &'static str, _len: usize) -> Result<Unsupported> {
        unsupported(format!("tuple struct {name}"))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Unsupported> {
        unsupported(format!("enum {name}::{variant}"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapSerializer> {
        Ok(MapSerializer {
            map: ValueMap::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Unsupported> {
        unsupported(format!("struct {name}"))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Unsupported> {
        unsupported(format!("enum {name}::{variant}"))
    }
}

struct ListSerializer {
    items: Vec<Value>,
}

impl ser::SerializeSeq for ListSerializer {
    type Ok = Value;
    type Error = MessageTypeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTuple for ListSerializer {
    type Ok = Value;
    type Error = MessageTypeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

struct MapSerializer {
    map: ValueMap,
    next_key: Option<Value>,
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = MessageTypeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        self.next_key = Some(key.serialize(ValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| MessageTypeError::Custom("map value serialized before its key".into()))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.map))
    }
}
