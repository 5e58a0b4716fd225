//! Repository: common lookups composed from a select builder.

use crate::error::Result;
use crate::manager::EntityManager;
use crate::metadata::Entity;
use crate::sql::{QueryBuilder, SelectBuilder};
use serde_json::Value;
use std::marker::PhantomData;

pub struct Repository<'m, E: Entity> {
    manager: &'m EntityManager,
    _entity: PhantomData<E>,
}

impl<'m, E: Entity> Repository<'m, E> {
    pub fn new(manager: &'m EntityManager) -> Self {
        Self {
            manager,
            _entity: PhantomData,
        }
    }

    pub fn entity_manager(&self) -> &'m EntityManager {
        self.manager
    }

    /// Look up by identifier. A class without an identifier yields `None` without a query.
    pub fn find(&self, id: impl Into<Value>) -> Result<Option<E>> {
        let metadata = self.manager.class_metadata::<E>()?;
        let Some(column) = metadata.class.id_column.as_deref() else {
            return Ok(None);
        };
        let mut query = self.manager.create_query_builder::<E>()?;
        query
            .where_clause(format!("{} = :{}", column, column))
            .set_parameter(column, id);
        query.get_one_or_null_result()
    }

    /// All rows whose columns equal every given value.
    pub fn find_by<I, K, V>(&self, filters: I) -> Result<Vec<E>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.filtered(filters)?.get_result()
    }

    /// First row matching the filters, or `None`.
    pub fn find_one_by<I, K, V>(&self, filters: I) -> Result<Option<E>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.filtered(filters)?.get_one_or_null_result()
    }

    pub fn find_all(&self) -> Result<Vec<E>> {
        self.manager.create_query_builder::<E>()?.get_result()
    }

    fn filtered<I, K, V>(&self, filters: I) -> Result<SelectBuilder<'m, E>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut query = self.manager.create_query_builder::<E>()?;
        for (column, value) in filters {
            let column = column.as_ref();
            query
                .where_clause(format!("{} = :{}", column, column))
                .set_parameter(column, value);
        }
        Ok(query)
    }
}
