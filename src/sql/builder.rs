//! Fluent query builders: shared predicate state and the polymorphic generate step.

use crate::error::{OrmError, Result};
use crate::metadata::Entity;
use crate::service::ExecutionEngine;
use crate::sql::Params;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Sort direction for ORDER BY clauses.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl FromStr for OrderDirection {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(OrderDirection::Asc),
            "DESC" => Ok(OrderDirection::Desc),
            _ => Err(OrmError::InvalidArgument(format!(
                "order direction must be ASC or DESC, got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

/// State every builder shares: the execution engine and the ANDed WHERE fragments.
pub struct QueryCore<'m, E: Entity> {
    pub(crate) engine: ExecutionEngine<'m, E>,
    predicates: Vec<String>,
}

impl<'m, E: Entity> QueryCore<'m, E> {
    pub fn new(engine: ExecutionEngine<'m, E>) -> Self {
        Self {
            engine,
            predicates: Vec::new(),
        }
    }

    pub fn engine(&self) -> &ExecutionEngine<'m, E> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ExecutionEngine<'m, E> {
        &mut self.engine
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    /// `WHERE a AND b ...`, or `None` when no fragment was added.
    pub fn where_sql(&self) -> Option<String> {
        if self.predicates.is_empty() {
            None
        } else {
            Some(format!("WHERE {}", self.predicates.join(" AND ")))
        }
    }
}

/// Common builder contract. Implementors supply `generate`; everything else is shared.
pub trait QueryBuilder<'m, E: Entity>: Sized {
    fn core(&self) -> &QueryCore<'m, E>;

    fn core_mut(&mut self) -> &mut QueryCore<'m, E>;

    /// Synthesize the statement from the accumulated state and store it as the current SQL.
    fn generate(&mut self);

    /// Append a raw fragment; all fragments are joined with AND. Disjunction must be written
    /// inside a single fragment.
    fn where_clause(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.core_mut().predicates.push(fragment.into());
        self
    }

    fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.core_mut().engine.set_parameter(name, value);
        self
    }

    fn set_sql(&mut self, sql: impl Into<String>) {
        self.core_mut().engine.set_sql(sql);
    }

    fn sql<'a>(&'a self) -> &'a str
    where
        'm: 'a,
    {
        self.core().engine.sql()
    }

    fn table<'a>(&'a self) -> &'a str
    where
        'm: 'a,
    {
        self.core().engine.table()
    }

    fn parameters<'a>(&'a self) -> &'a Params
    where
        'm: 'a,
    {
        self.core().engine.parameters()
    }

    /// Generate, prepare and run the statement.
    fn execute(&mut self) -> Result<bool> {
        self.generate();
        self.core_mut().engine.execute()
    }

    fn last_insert_id(&self) -> Result<String> {
        self.core().engine.last_insert_id()
    }

    /// Generate, execute and hydrate every row.
    fn get_result(&mut self) -> Result<Vec<E>> {
        self.generate();
        self.core_mut().engine.get_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_case_insensitive() {
        assert_eq!("asc".parse::<OrderDirection>().unwrap(), OrderDirection::Asc);
        assert_eq!("Desc".parse::<OrderDirection>().unwrap(), OrderDirection::Desc);
    }

    #[test]
    fn other_directions_are_invalid_arguments() {
        let err = "sideways".parse::<OrderDirection>().unwrap_err();
        assert!(matches!(err, OrmError::InvalidArgument(_)));
    }
}
