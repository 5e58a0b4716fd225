//! Type coercion from raw driver values to semantic scalars.
//!
//! Casts are lenient: numeric text parses by its leading numeric prefix (else zero), booleans
//! read as 0/1, null becomes the type's zero value, and floats truncate toward zero for `int`.

use crate::error::ConfigError;
use crate::metadata::{DeclaredType, Scalar, SemanticType};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn numeric_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("numeric pattern is valid")
    })
}

/// Coerce `raw` to the type named by `declared` (a semantic name or a native driver type name).
pub fn convert(raw: &Value, declared: &str) -> Result<Scalar, ConfigError> {
    let declared = DeclaredType::from_name(declared)?;
    Ok(coerce(raw, declared.semantic()))
}

/// Coerce `raw` to a declared type already resolved from metadata.
pub fn convert_declared(raw: &Value, declared: DeclaredType) -> Scalar {
    coerce(raw, declared.semantic())
}

pub fn coerce(raw: &Value, target: SemanticType) -> Scalar {
    match target {
        SemanticType::Int => Scalar::Int(cast_int(raw)),
        SemanticType::Float => Scalar::Float(cast_float(raw)),
        SemanticType::String => Scalar::String(cast_string(raw)),
    }
}

fn cast_int(raw: &Value) -> i64 {
    match raw {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| u as i64))
            .unwrap_or_else(|| n.as_f64().map(|f| f as i64).unwrap_or(0)),
        Value::String(s) => cast_int_str(s),
        Value::Array(a) => i64::from(!a.is_empty()),
        Value::Object(o) => i64::from(!o.is_empty()),
    }
}

fn cast_float(raw: &Value) -> f64 {
    match raw {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => cast_float_str(s),
        Value::Array(a) => f64::from(u8::from(!a.is_empty())),
        Value::Object(o) => f64::from(u8::from(!o.is_empty())),
    }
}

fn cast_string(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn cast_int_str(s: &str) -> i64 {
    let s = s.trim_start();
    if let Ok(n) = s.parse::<i64>() {
        return n;
    }
    cast_float_str(s) as i64
}

pub(crate) fn cast_float_str(s: &str) -> f64 {
    numeric_prefix()
        .find(s.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
