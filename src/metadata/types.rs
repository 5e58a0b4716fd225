//! Type vocabulary: semantic coercion targets, native driver type names, and coerced scalars.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three coercion targets every column value resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Int,
    Float,
    String,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Int => "int",
            SemanticType::Float => "float",
            SemanticType::String => "string",
        }
    }

    /// Parse a semantic type name ("int", "float", "string"), case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "int" => Some(SemanticType::Int),
            "float" => Some(SemanticType::Float),
            "string" => Some(SemanticType::String),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native column type names reported by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeType {
    VarString,
    String,
    Blob,
    LongLong,
    Long,
    Short,
    DateTime,
    Date,
    Double,
    Timestamp,
    NewDecimal,
}

impl NativeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeType::VarString => "VAR_STRING",
            NativeType::String => "STRING",
            NativeType::Blob => "BLOB",
            NativeType::LongLong => "LONGLONG",
            NativeType::Long => "LONG",
            NativeType::Short => "SHORT",
            NativeType::DateTime => "DATETIME",
            NativeType::Date => "DATE",
            NativeType::Double => "DOUBLE",
            NativeType::Timestamp => "TIMESTAMP",
            NativeType::NewDecimal => "NEWDECIMAL",
        }
    }

    /// Fixed native-to-semantic table.
    pub fn semantic(&self) -> SemanticType {
        match self {
            NativeType::VarString
            | NativeType::String
            | NativeType::Blob
            | NativeType::DateTime
            | NativeType::Date => SemanticType::String,
            NativeType::LongLong | NativeType::Long | NativeType::Short | NativeType::Timestamp => {
                SemanticType::Int
            }
            NativeType::Double | NativeType::NewDecimal => SemanticType::Float,
        }
    }
}

impl FromStr for NativeType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "VAR_STRING" => NativeType::VarString,
            "STRING" => NativeType::String,
            "BLOB" => NativeType::Blob,
            "LONGLONG" => NativeType::LongLong,
            "LONG" => NativeType::Long,
            "SHORT" => NativeType::Short,
            "DATETIME" => NativeType::DateTime,
            "DATE" => NativeType::Date,
            "DOUBLE" => NativeType::Double,
            "TIMESTAMP" => NativeType::Timestamp,
            "NEWDECIMAL" => NativeType::NewDecimal,
            _ => return Err(ConfigError::UnmappedNativeType(s.to_string())),
        })
    }
}

/// Type recorded on a property: either a semantic type or a native driver type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Semantic(SemanticType),
    Native(NativeType),
}

impl DeclaredType {
    /// Semantic names win; anything else must be a known native name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match SemanticType::parse(name) {
            Some(t) => Ok(DeclaredType::Semantic(t)),
            None => name.parse().map(DeclaredType::Native),
        }
    }

    pub fn semantic(&self) -> SemanticType {
        match self {
            DeclaredType::Semantic(t) => *t,
            DeclaredType::Native(n) => n.semantic(),
        }
    }
}

impl From<SemanticType> for DeclaredType {
    fn from(t: SemanticType) -> Self {
        DeclaredType::Semantic(t)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Semantic(t) => f.write_str(t.as_str()),
            DeclaredType::Native(n) => f.write_str(n.as_str()),
        }
    }
}

/// A value after coercion to its semantic type; handed to `Entity::assign`.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub fn semantic(&self) -> SemanticType {
        match self {
            Scalar::Int(_) => SemanticType::Int,
            Scalar::Float(_) => SemanticType::Float,
            Scalar::String(_) => SemanticType::String,
        }
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Scalar::Int(n) => *n,
            Scalar::Float(f) => *f as i64,
            Scalar::String(s) => crate::service::cast_int_str(s),
        }
    }

    pub fn as_float(&self) -> f64 {
        match self {
            Scalar::Int(n) => *n as f64,
            Scalar::Float(f) => *f,
            Scalar::String(s) => crate::service::cast_float_str(s),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::String(s) => s,
        }
    }
}
