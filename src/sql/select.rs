//! SELECT builder with grouping, ordering and pagination.

use crate::error::Result;
use crate::metadata::Entity;
use crate::service::ExecutionEngine;
use crate::sql::{OrderDirection, QueryBuilder, QueryCore};

pub struct SelectBuilder<'m, E: Entity> {
    core: QueryCore<'m, E>,
    order_asc: Vec<String>,
    order_desc: Vec<String>,
    group_by: Vec<String>,
    limit: i64,
    offset: i64,
}

impl<'m, E: Entity> SelectBuilder<'m, E> {
    pub fn new(engine: ExecutionEngine<'m, E>) -> Self {
        Self {
            core: QueryCore::new(engine),
            order_asc: Vec::new(),
            order_desc: Vec::new(),
            group_by: Vec::new(),
            limit: 0,
            offset: 0,
        }
    }

    /// `direction` is ASC or DESC in any case; anything else is an invalid argument and
    /// leaves the builder untouched.
    pub fn order_by(&mut self, column: impl Into<String>, direction: &str) -> Result<&mut Self> {
        match direction.parse::<OrderDirection>()? {
            OrderDirection::Asc => self.order_asc.push(column.into()),
            OrderDirection::Desc => self.order_desc.push(column.into()),
        }
        Ok(self)
    }

    pub fn group_by(&mut self, column: impl Into<String>) -> &mut Self {
        self.group_by.push(column.into());
        self
    }

    /// LIMIT is emitted only when `max` is strictly positive.
    pub fn set_max_result(&mut self, max: i64) -> &mut Self {
        self.limit = max;
        self
    }

    /// OFFSET is emitted only when `offset` is strictly positive.
    pub fn set_offset(&mut self, offset: i64) -> &mut Self {
        self.offset = offset;
        self
    }

    pub fn max_result(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Constrain to one row; the first hydrated entity, or `None` on an empty result.
    pub fn get_one_or_null_result(&mut self) -> Result<Option<E>> {
        self.set_max_result(1);
        Ok(self.get_result()?.into_iter().next())
    }

    /// ASC group first, then DESC group, each carrying its own keyword.
    fn order_sql(&self) -> Option<String> {
        let mut groups = Vec::with_capacity(2);
        if !self.order_asc.is_empty() {
            groups.push(format!("{} {}", self.order_asc.join(", "), OrderDirection::Asc));
        }
        if !self.order_desc.is_empty() {
            groups.push(format!("{} {}", self.order_desc.join(", "), OrderDirection::Desc));
        }
        if groups.is_empty() {
            None
        } else {
            Some(format!("ORDER BY {}", groups.join(", ")))
        }
    }
}

impl<'m, E: Entity> QueryBuilder<'m, E> for SelectBuilder<'m, E> {
    fn core(&self) -> &QueryCore<'m, E> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut QueryCore<'m, E> {
        &mut self.core
    }

    fn generate(&mut self) {
        let mut parts = vec![format!("SELECT * FROM {}", self.table())];
        parts.extend(self.core.where_sql());
        if !self.group_by.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by.join(", ")));
        }
        parts.extend(self.order_sql());
        if self.limit > 0 {
            parts.push(format!("LIMIT {}", self.limit));
        }
        if self.offset > 0 {
            parts.push(format!("OFFSET {}", self.offset));
        }
        let sql = parts.join(" ");
        self.set_sql(sql);
    }
}
