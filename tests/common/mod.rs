//! Shared helpers for integration tests

#![allow(dead_code)]

use packtree::{Arena, Variant};
use serde_json::{Map, Number, Value};

/// Convert a decoded tree into a `serde_json::Value` for comparison
///
/// Binary payloads become arrays of byte values. Duplicate map keys keep
/// their first occurrence, matching `Arena::get`.
pub fn to_json<'de>(arena: &Arena<'de>, value: &Variant<'de>) -> Value {
    match *value {
        Variant::Null => Value::Null,
        Variant::Bool(b) => Value::Bool(b),
        Variant::Int(v) => Value::from(v),
        Variant::UInt(v) => Value::from(v),
        Variant::Float32(v) => float(f64::from(v)),
        Variant::Float64(v) => float(v),
        Variant::Str(s) => Value::String(arena.text(s).to_owned()),
        Variant::Bin(b) => Value::Array(arena.bytes(b).iter().map(|&x| Value::from(x)).collect()),
        Variant::Array(array) => {
            Value::Array(arena.elements(array).map(|v| to_json(arena, v)).collect())
        }
        Variant::Map(map) => {
            let mut object = Map::new();
            for (key, v) in arena.entries(map) {
                object
                    .entry(key.to_owned())
                    .or_insert_with(|| to_json(arena, v));
            }
            Value::Object(object)
        }
    }
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

/// Encode any serializable value as MessagePack, structs as maps
pub fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Vec<u8> {
    rmp_serde::to_vec_named(value).expect("fixture encodes")
}

/// Decode with copying storage and convert to JSON
pub fn decode_json(input: &[u8]) -> packtree::Result<Value> {
    let mut arena = Arena::new();
    let root = packtree::deserialize(input, &mut arena)?;
    Ok(to_json(&arena, &root))
}

/// `depth` arrays nested inside each other around a single nil
pub fn nested_arrays(depth: usize) -> Vec<u8> {
    let mut bytes = vec![0x91; depth];
    bytes.push(0xc0);
    bytes
}
