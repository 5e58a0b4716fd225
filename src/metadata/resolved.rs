//! Resolved descriptors: markers validated and flattened for runtime use.

use crate::metadata::DeclaredType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub table: String,
    /// Absent when no identifier is declared; lookups by id then report "no identifier".
    pub id_column: Option<String>,
    pub id_type: Option<DeclaredType>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub property_name: String,
    pub column: String,
    pub ty: DeclaredType,
    pub is_identifier: bool,
}

/// Everything known about one entity type, shared behind an `Arc` by the resolver cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityMetadata {
    pub class: ClassDescriptor,
    pub properties: Vec<PropertyDescriptor>,
}

impl EntityMetadata {
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.property_name == name)
    }

    pub fn property_by_column(&self, column: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.column == column)
    }

    /// The identifier property, if the class has one.
    pub fn identifier(&self) -> Option<&PropertyDescriptor> {
        let column = self.class.id_column.as_deref()?;
        self.property_by_column(column)
    }
}
