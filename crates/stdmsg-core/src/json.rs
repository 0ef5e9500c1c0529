//! JSON bridge used by the command-line tool.
//!
//! `from_json` is lossless for everything JSON can express. `to_json` is a
//! display form: the standard format has categories JSON lacks, so those are
//! flattened (bigints become their hex text, byte buffers and typed arrays
//! become number arrays, non-finite floats become `null`, and non-string map
//! keys are rendered as their compact JSON text).

use serde_json::{Map, Number, Value as Json};

use crate::types::{Value, ValueMap};
use num_bigint::BigInt;

/// Convert parsed JSON into a [`Value`].
///
/// Integers take the narrowest wire type that holds them: `Int32`, then
/// `Int64`, then `BigInt` for unsigned values above `i64::MAX`. All other
/// numbers become `Float64`.
pub fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => number_to_value(n),
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::List(items.iter().map(from_json).collect()),
        Json::Object(fields) => {
            let mut map = ValueMap::with_capacity(fields.len());
            for (key, val) in fields {
                map.insert(key.as_str(), from_json(val));
            }
            Value::Map(map)
        }
    }
}

fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return match i32::try_from(i) {
            Ok(small) => Value::Int32(small),
            Err(_) => Value::Int64(i),
        };
    }
    if let Some(u) = n.as_u64() {
        return Value::BigInt(BigInt::from(u));
    }
    Value::Float64(n.as_f64().unwrap_or(f64::NAN))
}

/// Render a [`Value`] as JSON for display.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int32(n) => Json::from(*n),
        Value::Int64(n) => Json::from(*n),
        Value::BigInt(n) => Json::String(n.to_str_radix(16)),
        Value::Float64(f) => float_to_json(*f),
        Value::String(s) => Json::String(s.clone()),
        Value::Bytes(b) => Json::Array(b.iter().map(|&x| Json::from(x)).collect()),
        Value::Int32Array(items) => Json::Array(items.iter().map(|&x| Json::from(x)).collect()),
        Value::Int64Array(items) => Json::Array(items.iter().map(|&x| Json::from(x)).collect()),
        Value::Float64Array(items) => {
            Json::Array(items.iter().map(|&x| float_to_json(x)).collect())
        }
        Value::List(items) => Json::Array(items.iter().map(to_json).collect()),
        Value::Map(map) => {
            let mut fields = Map::with_capacity(map.len());
            for (key, val) in map.iter() {
                fields.insert(key_to_string(key), to_json(val));
            }
            Json::Object(fields)
        }
    }
}

fn float_to_json(f: f64) -> Json {
    Number::from_f64(f).map_or(Json::Null, Json::Number)
}

fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => to_json(other).to_string(),
    }
}
