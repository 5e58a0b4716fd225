//! ormlite: a thin object-relational mapping core.
//!
//! Entity metadata is resolved from declarative markers, fluent builders synthesize
//! parameterized SQL, and fetched rows are hydrated back into typed entities.

pub mod case;
pub mod driver;
pub mod error;
pub mod manager;
pub mod metadata;
pub mod registry;
pub mod service;
pub mod settings;
pub mod sql;

pub use driver::{Connection, Row, SqliteConnection, Statement};
pub use error::{ConfigError, OrmError, Result};
pub use manager::EntityManager;
pub use metadata::{
    ClassDescriptor, DeclaredType, Entity, EntityMetadata, MetadataResolver, NativeType,
    PropertyDecl, PropertyDescriptor, Scalar, SemanticType,
};
pub use registry::Registry;
pub use service::{convert, ExecutionEngine, Repository};
pub use settings::Settings;
pub use sql::{
    DeleteBuilder, InsertBuilder, OrderDirection, Params, QueryBuilder, SelectBuilder,
    UpdateBuilder,
};
