//! INSERT builder; pair with `last_insert_id` to read the generated key.

use crate::metadata::Entity;
use crate::service::ExecutionEngine;
use crate::sql::{QueryBuilder, QueryCore};
use serde_json::Value;

pub struct InsertBuilder<'m, E: Entity> {
    core: QueryCore<'m, E>,
    columns: Vec<String>,
}

impl<'m, E: Entity> InsertBuilder<'m, E> {
    pub fn new(engine: ExecutionEngine<'m, E>) -> Self {
        Self {
            core: QueryCore::new(engine),
            columns: Vec::new(),
        }
    }

    /// Insert `value` into `column`, bound under the column's name.
    pub fn insert_parameter(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let column = column.into();
        if !self.columns.contains(&column) {
            self.columns.push(column.clone());
        }
        self.set_parameter(column, value)
    }
}

impl<'m, E: Entity> QueryBuilder<'m, E> for InsertBuilder<'m, E> {
    fn core(&self) -> &QueryCore<'m, E> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut QueryCore<'m, E> {
        &mut self.core
    }

    fn generate(&mut self) {
        let placeholders: Vec<String> = self.columns.iter().map(|c| format!(":{}", c)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table(),
            self.columns.join(", "),
            placeholders.join(", ")
        );
        self.set_sql(sql);
    }
}
