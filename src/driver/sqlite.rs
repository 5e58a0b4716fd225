//! Bundled SQLite driver. SQLite understands `:name` placeholders natively.

use crate::driver::{Connection, Row, Statement};
use crate::error::{OrmError, Result};
use crate::sql::{value_from_sqlite, BindValue, Params};
use std::path::Path;

#[derive(Debug)]
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    /// Open a SQLite database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: rusqlite::Connection::open(path)?,
        })
    }

    /// Open an in-memory SQLite database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: rusqlite::Connection::open_in_memory()?,
        })
    }

    /// Run one or more `;`-separated statements without parameters (DDL, fixtures).
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        tracing::debug!(sql = %sql, "batch");
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}

impl Connection for SqliteConnection {
    fn prepare<'c>(&'c self, sql: &str) -> Result<Box<dyn Statement + 'c>> {
        let stmt = self.conn.prepare(sql)?;
        Ok(Box::new(SqliteStatement {
            stmt,
            rows: Vec::new(),
        }))
    }

    fn last_insert_id(&self) -> Result<String> {
        Ok(self.conn.last_insert_rowid().to_string())
    }
}

/// Prepared statement; rows are buffered at execution so they can be fetched afterwards.
pub struct SqliteStatement<'c> {
    stmt: rusqlite::Statement<'c>,
    rows: Vec<Row>,
}

impl Statement for SqliteStatement<'_> {
    fn execute(&mut self, params: &Params) -> Result<bool> {
        for (name, value) in params {
            // Parameters the statement does not mention are not bound.
            if let Some(index) = self.stmt.parameter_index(&format!(":{}", name))? {
                self.stmt.raw_bind_parameter(index, BindValue::from_json(value))?;
            }
        }
        for index in 1..=self.stmt.parameter_count() {
            if let Some(name) = self.stmt.parameter_name(index) {
                if !params.contains_key(name.trim_start_matches([':', '@', '$'])) {
                    return Err(OrmError::InvalidArgument(format!(
                        "no value bound for parameter {}",
                        name
                    )));
                }
            }
        }

        self.rows.clear();
        let columns: Vec<String> = self
            .stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        if columns.is_empty() {
            self.stmt.raw_execute()?;
            return Ok(true);
        }

        let mut cursor = self.stmt.raw_query();
        while let Some(row) = cursor.next()? {
            let mut fetched = Row::new();
            for (i, name) in columns.iter().enumerate() {
                fetched.insert(name.clone(), value_from_sqlite(row.get_ref(i)?));
            }
            self.rows.push(fetched);
        }
        Ok(true)
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        Ok(std::mem::take(&mut self.rows))
    }
}
