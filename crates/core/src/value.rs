//! Metadata value model.
//!
//! Record metadata is a tagged variant type rather than an opaque JSON
//! blob, so callers get round-trip fidelity without runtime type
//! ambiguity. The enum mirrors the JSON data model:
//!
//! 1. `Null` - absence of value
//! 2. `Bool` - boolean
//! 3. `Int` - 64-bit signed integer
//! 4. `Float` - 64-bit IEEE-754 floating point
//! 5. `String` - UTF-8 string
//! 6. `Array` - ordered sequence of values
//! 7. `Object` - string-keyed map of values
//!
//! ## Equality Rules
//!
//! - Different variants are never equal (no type coercion): `Int(1) != Float(1.0)`
//! - Floats use IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//!
//! Serialization is untagged, so a `Value` encodes as plain JSON and a
//! plain JSON document decodes back into the same `Value`. Integral JSON
//! numbers become `Int`, fractional ones become `Float`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A metadata value attached to a vector record.
///
/// `Object` keys are kept in a `BTreeMap` so serialized metadata is
/// byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of value.
    Null,
    /// Boolean true or false.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit IEEE-754 floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// String-keyed map of values.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Variant name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object reference.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Convert a `serde_json::Value` into a `Value`.
    ///
    /// Integral numbers map to `Int`; everything else that is numeric maps
    /// to `Float`. Numbers above `i64::MAX` lose precision as `Float`.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert this `Value` into a `serde_json::Value`.
    ///
    /// A non-finite `Float` has no JSON representation and becomes null.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Value::into_json).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into_json())).collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<V: Into<Value>> FromIterator<(String, V)> for Value {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "Null");
        assert_eq!(Value::Int(1).type_name(), "Int");
        assert_eq!(Value::Float(1.0).type_name(), "Float");
        assert_eq!(Value::Object(BTreeMap::new()).type_name(), "Object");
    }

    #[test]
    fn test_no_type_coercion() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Bool(true), Value::Int(1));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::String("a".into()).as_str(), Some("a"));
        assert_eq!(Value::Int(42).as_str(), None);
    }

    #[test]
    fn test_untagged_json_roundtrip() {
        let value: Value = [
            ("label".to_string(), Value::String("doc".into())),
            ("rank".to_string(), Value::Int(3)),
            ("score".to_string(), Value::Float(0.5)),
            (
                "tags".to_string(),
                Value::Array(vec![Value::String("a".into()), Value::Null]),
            ),
        ]
        .into_iter()
        .collect();

        let encoded = serde_json::to_string(&value).unwrap();
        assert_eq!(
            encoded,
            r#"{"label":"doc","rank":3,"score":0.5,"tags":["a",null]}"#
        );

        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_integral_json_number_decodes_as_int() {
        let decoded: Value = serde_json::from_str("7").unwrap();
        assert_eq!(decoded, Value::Int(7));

        let decoded: Value = serde_json::from_str("7.5").unwrap();
        assert_eq!(decoded, Value::Float(7.5));
    }

    #[test]
    fn test_from_json_conversion() {
        let json = serde_json::json!({"n": 1, "f": 2.5, "nested": {"ok": true}});
        let value = Value::from_json(json.clone());

        let obj = value.as_object().unwrap();
        assert_eq!(obj["n"], Value::Int(1));
        assert_eq!(obj["f"], Value::Float(2.5));
        assert_eq!(obj["nested"].as_object().unwrap()["ok"], Value::Bool(true));

        assert_eq!(value.into_json(), json);
    }

    #[test]
    fn test_non_finite_float_becomes_json_null() {
        assert_eq!(Value::Float(f64::NAN).into_json(), serde_json::Value::Null);
    }
}
