use crate::metadata::Entity;
use crate::service::ExecutionEngine;
use crate::sql::{QueryBuilder, QueryCore};

/// `DELETE FROM <table> [WHERE ...]`. Without a fragment every row is deleted.
pub struct DeleteBuilder<'m, E: Entity> {
    core: QueryCore<'m, E>,
}

impl<'m, E: Entity> DeleteBuilder<'m, E> {
    pub fn new(engine: ExecutionEngine<'m, E>) -> Self {
        Self {
            core: QueryCore::new(engine),
        }
    }
}

impl<'m, E: Entity> QueryBuilder<'m, E> for DeleteBuilder<'m, E> {
    fn core(&self) -> &QueryCore<'m, E> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut QueryCore<'m, E> {
        &mut self.core
    }

    fn generate(&mut self) {
        let sql = match self.core.where_sql() {
            Some(where_sql) => format!("DELETE FROM {} {}", self.table(), where_sql),
            None => format!("DELETE FROM {}", self.table()),
        };
        self.set_sql(sql);
    }
}
