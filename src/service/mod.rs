//! Execution, coercion and the read-oriented repository facade.

mod convert;
mod engine;
mod repository;

pub use convert::{coerce, convert, convert_declared};
pub(crate) use convert::{cast_float_str, cast_int_str};
pub use engine::{hydrate, ExecutionEngine};
pub use repository::Repository;
