//! Driver boundary: the narrow connection capability the core consumes.

mod sqlite;

pub use sqlite::{SqliteConnection, SqliteStatement};

use crate::error::Result;
use crate::sql::Params;
use serde_json::{Map, Value};

/// One fetched row: column name to raw value.
pub type Row = Map<String, Value>;

pub trait Connection {
    /// Prepare `sql` (named `:placeholders`) for execution.
    fn prepare<'c>(&'c self, sql: &str) -> Result<Box<dyn Statement + 'c>>;

    /// Identifier generated by the most recent insert on this connection.
    fn last_insert_id(&self) -> Result<String>;
}

pub trait Statement {
    /// Run the statement with `params`. Driver faults propagate as errors.
    fn execute(&mut self, params: &Params) -> Result<bool>;

    /// All rows produced by the last `execute`, as associative rows.
    fn fetch_all(&mut self) -> Result<Vec<Row>>;
}
