//! Declarative marker parsing: `@ORMLite/<Key>(<json payload>)`.
//!
//! Markers are attached to a class or a property as plain text. Each marker contributes
//! key/value attributes: an object payload contributes each of its keys, any other payload is
//! stored under the marker key. Keys are case-insensitive and stored lower-cased.

use crate::error::ConfigError;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@ORMLite/(\w+)\(").expect("marker pattern is valid"))
}

/// Attributes collected from all markers of one declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerAttributes {
    values: HashMap<String, Value>,
}

impl MarkerAttributes {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(&key.to_ascii_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String attribute; present-but-not-a-string is a malformed marker.
    pub fn string(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ConfigError::MalformedMarker {
                marker: key.to_string(),
                reason: format!("expected a string, got {}", other),
            }),
        }
    }

    /// Boolean attribute; absent reads as false.
    pub fn flag(&self, key: &str) -> Result<bool, ConfigError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(ConfigError::MalformedMarker {
                marker: key.to_string(),
                reason: format!("expected a boolean, got {}", other),
            }),
        }
    }

    fn insert(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_ascii_lowercase(), value);
    }
}

/// Parse every marker found in `doc`. Text without markers yields empty attributes.
///
/// A payload is exactly one JSON value followed by `)`, so markers may share a line.
pub fn parse_markers(doc: &str) -> Result<MarkerAttributes, ConfigError> {
    let mut attrs = MarkerAttributes::default();
    let mut cursor = 0;
    while let Some(caps) = marker_pattern().captures_at(doc, cursor) {
        let (key, open) = match (caps.get(1), caps.get(0)) {
            (Some(key), Some(open)) => (key.as_str(), open.end()),
            _ => break,
        };
        let (payload, consumed) = read_payload(key, &doc[open..])?;
        cursor = open + consumed;
        match payload {
            Value::Object(map) => {
                for (k, v) in map {
                    attrs.insert(&k, v);
                }
            }
            other => attrs.insert(key, other),
        }
    }
    Ok(attrs)
}

/// One JSON value and the closing parenthesis; returns the value and the bytes consumed.
fn read_payload(key: &str, rest: &str) -> Result<(Value, usize), ConfigError> {
    let malformed = |reason: String| ConfigError::MalformedMarker {
        marker: format!("@ORMLite/{}", key),
        reason,
    };
    let close = closing_paren(rest).ok_or_else(|| malformed("missing ')'".to_string()))?;
    let raw = rest[..close].trim();
    let payload: Value =
        serde_json::from_str(raw).map_err(|e| malformed(format!("{}: {}", raw, e)))?;
    Ok((payload, close + 1))
}

/// Byte offset of the `)` that closes a payload, skipping JSON strings and nested brackets.
fn closing_paren(rest: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' | '(' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}
