//! EntityManager: owns the connection handle and the metadata cache, hands out builders.

use crate::driver::{Connection, SqliteConnection};
use crate::error::Result;
use crate::metadata::{Entity, EntityMetadata, MetadataResolver};
use crate::service::{ExecutionEngine, Repository};
use crate::settings::{DatabaseTarget, Settings};
use crate::sql::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
use std::sync::Arc;

/// Every builder and repository created from one manager shares its single connection.
pub struct EntityManager {
    connection: Box<dyn Connection>,
    metadata: MetadataResolver,
}

impl EntityManager {
    pub fn new(connection: impl Connection + 'static) -> Self {
        Self {
            connection: Box::new(connection),
            metadata: MetadataResolver::new(),
        }
    }

    /// Open the SQLite database named by `settings.database_url`.
    pub fn connect(settings: &Settings) -> Result<Self> {
        let connection = match settings.database()? {
            DatabaseTarget::InMemory => SqliteConnection::open_in_memory()?,
            DatabaseTarget::File(path) => SqliteConnection::open(path)?,
        };
        tracing::info!(url = %settings.database_url, "connected");
        Ok(Self::new(connection))
    }

    pub fn connection(&self) -> &dyn Connection {
        self.connection.as_ref()
    }

    pub fn metadata_resolver(&self) -> &MetadataResolver {
        &self.metadata
    }

    pub fn class_metadata<E: Entity>(&self) -> Result<Arc<EntityMetadata>> {
        Ok(self.metadata.metadata::<E>()?)
    }

    pub fn create_engine<E: Entity>(&self) -> Result<ExecutionEngine<'_, E>> {
        ExecutionEngine::new(self.connection(), &self.metadata)
    }

    pub fn create_query_builder<E: Entity>(&self) -> Result<SelectBuilder<'_, E>> {
        Ok(SelectBuilder::new(self.create_engine()?))
    }

    pub fn create_update_builder<E: Entity>(&self) -> Result<UpdateBuilder<'_, E>> {
        Ok(UpdateBuilder::new(self.create_engine()?))
    }

    pub fn create_insert_builder<E: Entity>(&self) -> Result<InsertBuilder<'_, E>> {
        Ok(InsertBuilder::new(self.create_engine()?))
    }

    pub fn create_delete_builder<E: Entity>(&self) -> Result<DeleteBuilder<'_, E>> {
        Ok(DeleteBuilder::new(self.create_engine()?))
    }

    pub fn repository<E: Entity>(&self) -> Repository<'_, E> {
        Repository::new(self)
    }
}
