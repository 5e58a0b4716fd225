//! SQL builders: identifiers from entity metadata, values as named parameters.

mod builder;
mod delete;
mod insert;
pub mod params;
mod select;
mod update;

pub use builder::*;
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use params::*;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;
