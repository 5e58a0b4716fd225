// Shared fixtures: mapped entities, an in-memory SQLite database, and a recording connection.

#![allow(dead_code)]

use ormlite::{
    Connection, Entity, EntityManager, Params, PropertyDecl, Row, Scalar, SemanticType,
    SqliteConnection, Statement,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub age: i64,
    pub score: f64,
    pub dept: String,
    pub status: String,
}

impl Entity for User {
    const MARKERS: &'static str = r#"
        Application users.
        @ORMLite/Table({"table": "users"})
    "#;

    fn properties() -> &'static [PropertyDecl] {
        const PROPS: &[PropertyDecl] = &[
            PropertyDecl::new("id", SemanticType::Int).with_markers(r#"@ORMLite/Id(true)"#),
            PropertyDecl::new("userName", SemanticType::String),
            PropertyDecl::new("age", SemanticType::Int),
            PropertyDecl::new("score", SemanticType::Float)
                .with_markers(r#"@ORMLite/Type("NEWDECIMAL")"#),
            PropertyDecl::new("dept", SemanticType::String)
                .with_markers(r#"@ORMLite/Column({"column": "department"})"#),
            PropertyDecl::new("status", SemanticType::String),
        ];
        PROPS
    }

    fn assign(&mut self, property: &str, value: Scalar) {
        match property {
            "id" => self.id = value.as_int(),
            "userName" => self.user_name = value.into_string(),
            "age" => self.age = value.as_int(),
            "score" => self.score = value.as_float(),
            "dept" => self.dept = value.into_string(),
            "status" => self.status = value.into_string(),
            _ => {}
        }
    }
}

/// Mapped without any identifier.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AuditEntry {
    pub message: String,
}

impl Entity for AuditEntry {
    const MARKERS: &'static str = r#"@ORMLite/Table("audit_log")"#;

    fn properties() -> &'static [PropertyDecl] {
        const PROPS: &[PropertyDecl] = &[PropertyDecl::new("message", SemanticType::String)];
        PROPS
    }

    fn assign(&mut self, property: &str, value: Scalar) {
        if property == "message" {
            self.message = value.into_string();
        }
    }
}

pub const SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_name TEXT NOT NULL,
        age INTEGER NOT NULL DEFAULT 0,
        score REAL NOT NULL DEFAULT 0,
        department TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'new'
    );
    CREATE TABLE audit_log (message TEXT NOT NULL);
";

pub const SEED: &str = "
    INSERT INTO users (user_name, age, score, department, status) VALUES
        ('alice', 34, 9.5, 'eng', 'active'),
        ('bob', 28, 7.25, 'eng', 'active'),
        ('carol', 41, 8.0, 'ops', 'inactive');
";

/// Manager over a fresh in-memory database with the users table seeded.
pub fn seeded_manager() -> EntityManager {
    let conn = SqliteConnection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(SEED).unwrap();
    EntityManager::new(conn)
}

/// What a `RecordingConnection` saw.
#[derive(Debug, Default)]
pub struct Recorded {
    pub prepared: Vec<String>,
    pub executed: Vec<Params>,
}

/// Connection that records statements and replays canned rows.
#[derive(Clone, Default)]
pub struct RecordingConnection {
    pub log: Rc<RefCell<Recorded>>,
    pub rows: Vec<Row>,
}

impl RecordingConnection {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            log: Rc::default(),
            rows,
        }
    }
}

struct RecordingStatement {
    log: Rc<RefCell<Recorded>>,
    rows: Vec<Row>,
}

impl Connection for RecordingConnection {
    fn prepare<'c>(&'c self, sql: &str) -> ormlite::Result<Box<dyn Statement + 'c>> {
        self.log.borrow_mut().prepared.push(sql.to_string());
        Ok(Box::new(RecordingStatement {
            log: Rc::clone(&self.log),
            rows: self.rows.clone(),
        }))
    }

    fn last_insert_id(&self) -> ormlite::Result<String> {
        Ok("42".to_string())
    }
}

impl Statement for RecordingStatement {
    fn execute(&mut self, params: &Params) -> ormlite::Result<bool> {
        self.log.borrow_mut().executed.push(params.clone());
        Ok(true)
    }

    fn fetch_all(&mut self) -> ormlite::Result<Vec<Row>> {
        Ok(std::mem::take(&mut self.rows))
    }
}

pub fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("row fixture must be an object, got {}", other),
    }
}
