//! Static entity declarations: the shape the resolver reads instead of runtime reflection.

use crate::metadata::{Scalar, SemanticType};

/// One declared property: its name, its static type and the marker text attached to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: &'static str,
    pub ty: SemanticType,
    pub markers: &'static str,
}

impl PropertyDecl {
    pub const fn new(name: &'static str, ty: SemanticType) -> Self {
        PropertyDecl {
            name,
            ty,
            markers: "",
        }
    }

    pub const fn with_markers(self, markers: &'static str) -> Self {
        PropertyDecl { markers, ..self }
    }
}

/// A mapped domain type.
///
/// ```
/// use ormlite::{Entity, PropertyDecl, Scalar, SemanticType};
///
/// #[derive(Default)]
/// struct User {
///     user_id: i64,
///     name: String,
/// }
///
/// impl Entity for User {
///     const MARKERS: &'static str = r#"@ORMLite/Table({"table": "users"})"#;
///
///     fn properties() -> &'static [PropertyDecl] {
///         const PROPS: &[PropertyDecl] = &[
///             PropertyDecl::new("userId", SemanticType::Int).with_markers(r#"@ORMLite/Id(true)"#),
///             PropertyDecl::new("name", SemanticType::String),
///         ];
///         PROPS
///     }
///
///     fn assign(&mut self, property: &str, value: Scalar) {
///         match property {
///             "userId" => self.user_id = value.as_int(),
///             "name" => self.name = value.into_string(),
///             _ => {}
///         }
///     }
/// }
/// ```
pub trait Entity: Default + 'static {
    /// Class-level marker text, e.g. `@ORMLite/Table({"table": "users"})`.
    const MARKERS: &'static str = "";

    /// Declared properties in declaration order.
    fn properties() -> &'static [PropertyDecl];

    /// Hydration setter: store an already-coerced value into the named property.
    fn assign(&mut self, property: &str, value: Scalar);

    fn entity_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}
