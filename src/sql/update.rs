//! UPDATE builder: `column = :column` assignments bound as parameters of the same name.

use crate::metadata::Entity;
use crate::service::ExecutionEngine;
use crate::sql::{QueryBuilder, QueryCore};
use serde_json::Value;

pub struct UpdateBuilder<'m, E: Entity> {
    core: QueryCore<'m, E>,
    assignments: Vec<String>,
}

impl<'m, E: Entity> UpdateBuilder<'m, E> {
    pub fn new(engine: ExecutionEngine<'m, E>) -> Self {
        Self {
            core: QueryCore::new(engine),
            assignments: Vec::new(),
        }
    }

    /// Record `column` as an assignment target and bind `value` under the same name.
    /// Re-assigning a column keeps its first position and rebinds the value.
    pub fn update_parameter(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let column = column.into();
        if !self.assignments.contains(&column) {
            self.assignments.push(column.clone());
        }
        self.set_parameter(column, value)
    }

    pub fn assignments(&self) -> &[String] {
        &self.assignments
    }
}

impl<'m, E: Entity> QueryBuilder<'m, E> for UpdateBuilder<'m, E> {
    fn core(&self) -> &QueryCore<'m, E> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut QueryCore<'m, E> {
        &mut self.core
    }

    fn generate(&mut self) {
        let set = self
            .assignments
            .iter()
            .map(|c| format!("{} = :{}", c, c))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("UPDATE {} SET {}", self.table(), set);
        if let Some(where_sql) = self.core.where_sql() {
            sql.push(' ');
            sql.push_str(&where_sql);
        }
        self.set_sql(sql);
    }
}
