//! Entity metadata: static declarations, marker parsing, and resolved descriptors.

pub mod entity;
pub mod marker;
pub mod resolved;
pub mod resolver;
pub mod types;

pub use entity::*;
pub use marker::*;
pub use resolved::*;
pub use resolver::*;
pub use types::*;
