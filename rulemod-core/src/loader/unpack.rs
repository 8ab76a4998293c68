// Typed field access over loosely-typed JSON objects
//
// Each helper records a path-qualified error instead of failing, and returns
// `None` (or the supplied default) so the caller can keep going.

use crate::diagnostics::Diagnostics;
use crate::error::SchemaError;
use serde_json::{Map, Value};

pub type Object = Map<String, Value>;

pub const TYPE_OBJECT: &str = "object";
pub const TYPE_ARRAY: &str = "array";
pub const TYPE_STRING: &str = "string";
pub const TYPE_NUMBER: &str = "number";
pub const TYPE_INTEGER: &str = "integer";

/// JSON type name of a value, as used in error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => TYPE_NUMBER,
        Value::String(_) => TYPE_STRING,
        Value::Array(_) => TYPE_ARRAY,
        Value::Object(_) => TYPE_OBJECT,
    }
}

fn type_error(expected: &'static str, value: &Value) -> SchemaError {
    SchemaError::InvalidType {
        expected,
        actual: type_name(value),
    }
}

/// The value as an object, or a type error at the current location.
pub fn as_object<'a>(diag: &mut Diagnostics, value: &'a Value) -> Option<&'a Object> {
    match value {
        Value::Object(obj) => Some(obj),
        other => {
            diag.error(type_error(TYPE_OBJECT, other));
            None
        }
    }
}

fn require<'a>(diag: &mut Diagnostics, obj: &'a Object, key: &str) -> Option<&'a Value> {
    let value = obj.get(key);
    if value.is_none() {
        diag.error(SchemaError::MissingKey(key.to_string()));
    }
    value
}

pub fn require_string<'a>(diag: &mut Diagnostics, obj: &'a Object, key: &str) -> Option<&'a str> {
    match require(diag, obj, key)? {
        Value::String(s) => Some(s),
        other => {
            diag.error_at_key(key, type_error(TYPE_STRING, other));
            None
        }
    }
}

/// A required string which must also be non-empty (attribute names).
pub fn require_name<'a>(diag: &mut Diagnostics, obj: &'a Object, key: &str) -> Option<&'a str> {
    let name = require_string(diag, obj, key)?;
    if name.is_empty() {
        diag.error_at_key(key, SchemaError::EmptyValue);
        return None;
    }
    Some(name)
}

pub fn require_object<'a>(diag: &mut Diagnostics, obj: &'a Object, key: &str) -> Option<&'a Object> {
    match require(diag, obj, key)? {
        Value::Object(o) => Some(o),
        other => {
            diag.error_at_key(key, type_error(TYPE_OBJECT, other));
            None
        }
    }
}

pub fn require_array<'a>(diag: &mut Diagnostics, obj: &'a Object, key: &str) -> Option<&'a [Value]> {
    match require(diag, obj, key)? {
        Value::Array(a) => Some(a),
        other => {
            diag.error_at_key(key, type_error(TYPE_ARRAY, other));
            None
        }
    }
}

/// One of `allowed`, or an error if the key is missing, not a string, or unknown.
pub fn require_enum<'a>(
    diag: &mut Diagnostics,
    obj: &'a Object,
    key: &str,
    allowed: &'static [&'static str],
) -> Option<&'a str> {
    let value = require_string(diag, obj, key)?;
    if !allowed.iter().any(|candidate| *candidate == value) {
        diag.error_at_key(
            key,
            SchemaError::InvalidEnum {
                value: value.to_string(),
                allowed,
            },
        );
        return None;
    }
    Some(value)
}

/// An optional string; empty strings count as unset.
pub fn optional_string<'a>(diag: &mut Diagnostics, obj: &'a Object, key: &str) -> Option<&'a str> {
    match obj.get(key)? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => {
            diag.error_at_key(key, type_error(TYPE_STRING, other));
            None
        }
    }
}

pub fn optional_number(diag: &mut Diagnostics, obj: &Object, key: &str, default: f64) -> f64 {
    match obj.get(key) {
        None => default,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(other) => {
            diag.error_at_key(key, type_error(TYPE_NUMBER, other));
            default
        }
    }
}

pub fn optional_integer(diag: &mut Diagnostics, obj: &Object, key: &str) -> Option<i64> {
    let value = obj.get(key)?;
    match value.as_i64() {
        Some(n) => Some(n),
        None => {
            diag.error_at_key(key, type_error(TYPE_INTEGER, value));
            None
        }
    }
}

pub fn optional_object<'a>(diag: &mut Diagnostics, obj: &'a Object, key: &str) -> Option<&'a Object> {
    match obj.get(key)? {
        Value::Object(o) => Some(o),
        other => {
            diag.error_at_key(key, type_error(TYPE_OBJECT, other));
            None
        }
    }
}

pub fn optional_array<'a>(diag: &mut Diagnostics, obj: &'a Object, key: &str) -> Option<&'a [Value]> {
    match obj.get(key)? {
        Value::Array(a) => Some(a),
        other => {
            diag.error_at_key(key, type_error(TYPE_ARRAY, other));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(obj) => obj,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_require_string_errors() {
        let obj = object(json!({"a": "x", "b": 1}));
        let mut diag = Diagnostics::new("doc", None);
        assert_eq!(require_string(&mut diag, &obj, "a"), Some("x"));
        assert_eq!(require_string(&mut diag, &obj, "b"), None);
        assert_eq!(require_string(&mut diag, &obj, "c"), None);

        let report = diag.finish().unwrap();
        let lines: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "doc:b: expected string, got number",
                "doc:(root): missing required key \"c\"",
            ]
        );
    }

    #[test]
    fn test_require_enum_rejects_unknown() {
        let obj = object(json!({"type": "bogus"}));
        let mut diag = Diagnostics::new("doc", None);
        assert_eq!(require_enum(&mut diag, &obj, "type", &["tag", "attr"]), None);
        assert_eq!(diag.error_count(), 1);
    }

    #[test]
    fn test_optional_number_falls_back() {
        let obj = object(json!({"mult": "two", "add": 3}));
        let mut diag = Diagnostics::new("doc", None);
        assert_eq!(optional_number(&mut diag, &obj, "mult", 1.0), 1.0);
        assert_eq!(optional_number(&mut diag, &obj, "add", 0.0), 3.0);
        assert_eq!(optional_number(&mut diag, &obj, "min", -5.0), -5.0);
        assert_eq!(diag.error_count(), 1);
    }

    #[test]
    fn test_optional_integer_rejects_fractions() {
        let obj = object(json!({"a": 2, "b": 2.5}));
        let mut diag = Diagnostics::new("doc", None);
        assert_eq!(optional_integer(&mut diag, &obj, "a"), Some(2));
        assert_eq!(optional_integer(&mut diag, &obj, "b"), None);
        assert_eq!(optional_integer(&mut diag, &obj, "c"), None);
        assert_eq!(diag.error_count(), 1);
    }

    #[test]
    fn test_optional_string_treats_empty_as_unset() {
        let obj = object(json!({"value": ""}));
        let mut diag = Diagnostics::new("doc", None);
        assert_eq!(optional_string(&mut diag, &obj, "value"), None);
        assert!(diag.finish().is_none());
    }
}
