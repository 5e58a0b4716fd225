//! ExecutionEngine: prepares and runs SQL against the shared connection and hydrates rows.

use crate::driver::{Connection, Row, Statement};
use crate::error::Result;
use crate::metadata::{Entity, EntityMetadata, MetadataResolver};
use crate::service::convert_declared;
use crate::sql::Params;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Execution substrate for one entity type. Builders delegate SQL storage, parameter
/// binding, execution and hydration to it.
pub struct ExecutionEngine<'m, E: Entity> {
    connection: &'m dyn Connection,
    metadata: Arc<EntityMetadata>,
    sql: String,
    params: Params,
    statement: Option<Box<dyn Statement + 'm>>,
    _entity: PhantomData<E>,
}

impl<'m, E: Entity> ExecutionEngine<'m, E> {
    /// Resolves `E`'s metadata eagerly; a malformed declaration fails here.
    pub fn new(connection: &'m dyn Connection, resolver: &MetadataResolver) -> Result<Self> {
        let metadata = resolver.metadata::<E>()?;
        Ok(Self {
            connection,
            metadata,
            sql: String::new(),
            params: Params::new(),
            statement: None,
            _entity: PhantomData,
        })
    }

    pub fn table(&self) -> &str {
        &self.metadata.class.table
    }

    pub fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind or rebind a named parameter; rebinding overwrites the earlier value.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn parameters(&self) -> &Params {
        &self.params
    }

    /// Prepare the current SQL and run it with the current parameters.
    pub fn execute(&mut self) -> Result<bool> {
        tracing::debug!(sql = %self.sql, params = ?self.params, "query");
        let mut statement = self.connection.prepare(&self.sql)?;
        let executed = statement.execute(&self.params)?;
        self.statement = Some(statement);
        Ok(executed)
    }

    pub fn last_insert_id(&self) -> Result<String> {
        self.connection.last_insert_id()
    }

    /// Execute, then hydrate every returned row into a new `E`.
    pub fn get_result(&mut self) -> Result<Vec<E>> {
        self.execute()?;
        let rows = match self.statement.as_mut() {
            Some(statement) => statement.fetch_all()?,
            None => Vec::new(),
        };
        let entities: Vec<E> = rows.iter().map(|row| hydrate(&self.metadata, row)).collect();
        tracing::debug!(entity = E::entity_name(), rows = entities.len(), "hydrated");
        Ok(entities)
    }
}

/// Build an `E` from one row. Columns no property maps to are ignored; properties without
/// a matching column keep their default value.
pub fn hydrate<E: Entity>(metadata: &EntityMetadata, row: &Row) -> E {
    let mut entity = E::default();
    for property in &metadata.properties {
        if let Some(raw) = row.get(&property.column) {
            entity.assign(&property.property_name, convert_declared(raw, property.ty));
        }
    }
    entity
}
