//! Example consumer: maps a `books` table, seeds it, and runs a few lookups.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Set `DATABASE_URL=sqlite://books.db` to keep the data on disk.

use ormlite::settings::DatabaseTarget;
use ormlite::{
    Entity, EntityManager, PropertyDecl, QueryBuilder, Scalar, SemanticType, Settings,
    SqliteConnection,
};

#[derive(Debug, Default)]
struct Book {
    id: i64,
    title: String,
    page_count: i64,
    price: f64,
}

impl Entity for Book {
    const MARKERS: &'static str = r#"@ORMLite/Table({"table": "books"})"#;

    fn properties() -> &'static [PropertyDecl] {
        const PROPS: &[PropertyDecl] = &[
            PropertyDecl::new("id", SemanticType::Int).with_markers(r#"@ORMLite/Id(true)"#),
            PropertyDecl::new("title", SemanticType::String),
            PropertyDecl::new("pageCount", SemanticType::Int),
            PropertyDecl::new("price", SemanticType::Float)
                .with_markers(r#"@ORMLite/Type("NEWDECIMAL")"#),
        ];
        PROPS
    }

    fn assign(&mut self, property: &str, value: Scalar) {
        match property {
            "id" => self.id = value.as_int(),
            "title" => self.title = value.into_string(),
            "pageCount" => self.page_count = value.as_int(),
            "price" => self.price = value.as_float(),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ormlite=info")),
        )
        .init();

    let settings = Settings::from_env();
    let conn = match settings.database()? {
        DatabaseTarget::InMemory => SqliteConnection::open_in_memory()?,
        DatabaseTarget::File(path) => SqliteConnection::open(path)?,
    };
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS books (id INTEGER PRIMARY KEY, title TEXT, page_count INTEGER, price REAL)",
    )?;
    let manager = EntityManager::new(conn);

    for (title, pages, price) in [("Dune", 412, 9.99), ("Emma", 474, 4.5), ("Ubik", 202, 7.25)] {
        let mut insert = manager.create_insert_builder::<Book>()?;
        insert
            .insert_parameter("title", title)
            .insert_parameter("page_count", pages)
            .insert_parameter("price", price);
        insert.execute()?;
        tracing::info!(id = %insert.last_insert_id()?, title, "inserted");
    }

    let books = manager.repository::<Book>();
    if let Some(book) = books.find(1)? {
        tracing::info!(id = book.id, ?book, "found by id");
    }

    let mut query = manager.create_query_builder::<Book>()?;
    query
        .where_clause("page_count > :pages")
        .set_parameter("pages", 300)
        .order_by("price", "desc")?;
    for book in query.get_result()? {
        tracing::info!(title = %book.title, pages = book.page_count, price = book.price, "long book");
    }

    let mut update = manager.create_update_builder::<Book>()?;
    update
        .update_parameter("price", 5.0)
        .where_clause("title = :title")
        .set_parameter("title", "Emma");
    update.execute()?;

    let cheap = books.find_by([("price", serde_json::json!(5.0))])?;
    tracing::info!(count = cheap.len(), "repriced");
    Ok(())
}
