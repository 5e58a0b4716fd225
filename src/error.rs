//! Typed errors: configuration faults, argument faults and driver faults.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrmError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed marker '{marker}': {reason}")]
    MalformedMarker { marker: String, reason: String },
    #[error("entity {entity} declares no table")]
    MissingTable { entity: &'static str },
    #[error("entity {entity} names identifier column '{column}' but no property maps to it")]
    UnknownIdentifier { entity: &'static str, column: String },
    #[error("unmapped native type: {0}")]
    UnmappedNativeType(String),
    #[error("invalid database url: {0}")]
    InvalidDatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum OrmError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("driver: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl OrmError {
    /// Wrap any driver-side failure without altering it.
    pub fn driver<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        OrmError::Driver(err.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, OrmError::Config(_))
    }
}

impl From<rusqlite::Error> for OrmError {
    fn from(err: rusqlite::Error) -> Self {
        OrmError::driver(err)
    }
}
