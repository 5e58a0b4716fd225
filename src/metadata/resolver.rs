//! MetadataResolver: turns an entity's static declaration into cached descriptors.

use crate::case::to_snake_case;
use crate::error::ConfigError;
use crate::metadata::{
    parse_markers, ClassDescriptor, DeclaredType, Entity, EntityMetadata, PropertyDescriptor,
};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Resolves and caches metadata per entity type for the resolver's lifetime.
///
/// Declarations are static, so a cached entry never goes stale. Two callers missing the
/// cache at once compute the same descriptor; the first insert wins.
#[derive(Debug, Default)]
pub struct MetadataResolver {
    cache: RwLock<HashMap<TypeId, Arc<EntityMetadata>>>,
}

impl MetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class descriptor and property descriptors for `E`.
    pub fn metadata<E: Entity>(&self) -> Result<Arc<EntityMetadata>, ConfigError> {
        let key = TypeId::of::<E>();
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(hit));
        }

        tracing::trace!(entity = E::entity_name(), "resolving entity metadata");
        let resolved = Arc::new(build_metadata::<E>()?);
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(key).or_insert(resolved)))
    }

    pub fn resolve<E: Entity>(&self) -> Result<ClassDescriptor, ConfigError> {
        Ok(self.metadata::<E>()?.class.clone())
    }

    pub fn resolve_properties<E: Entity>(&self) -> Result<Vec<PropertyDescriptor>, ConfigError> {
        Ok(self.metadata::<E>()?.properties.clone())
    }

    pub fn is_cached<E: Entity>(&self) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<E>())
    }
}

fn build_metadata<E: Entity>() -> Result<EntityMetadata, ConfigError> {
    let mut properties = resolve_properties::<E>()?;
    let class_attrs = parse_markers(E::MARKERS)?;
    let table = class_attrs
        .string("table")?
        .ok_or(ConfigError::MissingTable {
            entity: E::entity_name(),
        })?
        .to_string();

    let (id_column, id_type) = match class_attrs.string("id")? {
        Some(column) => {
            let prop = properties
                .iter_mut()
                .find(|p| p.column == column)
                .ok_or_else(|| ConfigError::UnknownIdentifier {
                    entity: E::entity_name(),
                    column: column.to_string(),
                })?;
            prop.is_identifier = true;
            (Some(prop.column.clone()), Some(prop.ty))
        }
        None => {
            let mut flagged = properties.iter_mut().filter(|p| p.is_identifier);
            let first = flagged
                .next()
                .map(|p| (Some(p.column.clone()), Some(p.ty)))
                .unwrap_or((None, None));
            // Only the first flagged property acts as the identifier.
            for extra in flagged {
                tracing::warn!(
                    entity = E::entity_name(),
                    property = %extra.property_name,
                    "ignoring additional identifier flag"
                );
                extra.is_identifier = false;
            }
            first
        }
    };

    Ok(EntityMetadata {
        class: ClassDescriptor {
            table,
            id_column,
            id_type,
        },
        properties,
    })
}

fn resolve_properties<E: Entity>() -> Result<Vec<PropertyDescriptor>, ConfigError> {
    E::properties()
        .iter()
        .map(|decl| {
            let attrs = parse_markers(decl.markers)?;
            let column = attrs
                .string("column")?
                .map(str::to_string)
                .unwrap_or_else(|| to_snake_case(decl.name));
            let ty = match attrs.string("type")? {
                Some(name) => DeclaredType::from_name(name)?,
                None => DeclaredType::Semantic(decl.ty),
            };
            Ok(PropertyDescriptor {
                property_name: decl.name.to_string(),
                column,
                ty,
                is_identifier: attrs.flag("id")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{NativeType, PropertyDecl, Scalar, SemanticType};

    #[derive(Default)]
    struct Account;

    impl Entity for Account {
        const MARKERS: &'static str = r#"
            Accounts of the billing system.
            @ORMLite/Table({"table": "accounts"})
        "#;

        fn properties() -> &'static [PropertyDecl] {
            const PROPS: &[PropertyDecl] = &[
                PropertyDecl::new("accountId", SemanticType::Int)
                    .with_markers(r#"@ORMLite/Id(true)"#),
                PropertyDecl::new("displayName", SemanticType::String),
                PropertyDecl::new("balance", SemanticType::String)
                    .with_markers(r#"@ORMLite/Type("NEWDECIMAL")"#),
                PropertyDecl::new("ownerEmail", SemanticType::String)
                    .with_markers(r#"@ORMLite/Column({"column": "email"})"#),
            ];
            PROPS
        }

        fn assign(&mut self, _: &str, _: Scalar) {}
    }

    #[derive(Default)]
    struct LogLine;

    impl Entity for LogLine {
        const MARKERS: &'static str = r#"@ORMLite/Table("log_lines")"#;

        fn properties() -> &'static [PropertyDecl] {
            const PROPS: &[PropertyDecl] = &[PropertyDecl::new("message", SemanticType::String)];
            PROPS
        }

        fn assign(&mut self, _: &str, _: Scalar) {}
    }

    #[derive(Default)]
    struct ExplicitId;

    impl Entity for ExplicitId {
        const MARKERS: &'static str = r#"@ORMLite/Table({"table": "tokens", "id": "token"})"#;

        fn properties() -> &'static [PropertyDecl] {
            const PROPS: &[PropertyDecl] = &[
                PropertyDecl::new("rowId", SemanticType::Int),
                PropertyDecl::new("token", SemanticType::String),
            ];
            PROPS
        }

        fn assign(&mut self, _: &str, _: Scalar) {}
    }

    #[derive(Default)]
    struct TwoIds;

    impl Entity for TwoIds {
        const MARKERS: &'static str = r#"@ORMLite/Table({"table": "pairs"})"#;

        fn properties() -> &'static [PropertyDecl] {
            const PROPS: &[PropertyDecl] = &[
                PropertyDecl::new("left", SemanticType::Int).with_markers(r#"@ORMLite/Id(true)"#),
                PropertyDecl::new("right", SemanticType::Int).with_markers(r#"@ORMLite/Id(true)"#),
            ];
            PROPS
        }

        fn assign(&mut self, _: &str, _: Scalar) {}
    }

    #[derive(Default)]
    struct NoTable;

    impl Entity for NoTable {
        fn properties() -> &'static [PropertyDecl] {
            &[]
        }

        fn assign(&mut self, _: &str, _: Scalar) {}
    }

    #[derive(Default)]
    struct BadType;

    impl Entity for BadType {
        const MARKERS: &'static str = r#"@ORMLite/Table("bad")"#;

        fn properties() -> &'static [PropertyDecl] {
            const PROPS: &[PropertyDecl] = &[PropertyDecl::new("shape", SemanticType::String)
                .with_markers(r#"@ORMLite/Type("GEOMETRY")"#)];
            PROPS
        }

        fn assign(&mut self, _: &str, _: Scalar) {}
    }

    #[test]
    fn resolves_table_and_flagged_identifier() {
        let resolver = MetadataResolver::new();
        let class = resolver.resolve::<Account>().unwrap();
        assert_eq!(class.table, "accounts");
        assert_eq!(class.id_column.as_deref(), Some("account_id"));
        assert_eq!(class.id_type, Some(DeclaredType::Semantic(SemanticType::Int)));
    }

    #[test]
    fn properties_keep_declaration_order_and_defaults() {
        let props = MetadataResolver::new().resolve_properties::<Account>().unwrap();
        let columns: Vec<_> = props.iter().map(|p| p.column.as_str()).collect();
        assert_eq!(columns, ["account_id", "display_name", "balance", "email"]);
        assert_eq!(props[1].ty, DeclaredType::Semantic(SemanticType::String));
        assert_eq!(props[2].ty, DeclaredType::Native(NativeType::NewDecimal));
        assert!(props[0].is_identifier);
        assert!(!props[3].is_identifier);
    }

    #[test]
    fn no_identifier_is_absent_not_an_error() {
        let class = MetadataResolver::new().resolve::<LogLine>().unwrap();
        assert_eq!(class.table, "log_lines");
        assert_eq!(class.id_column, None);
        assert_eq!(class.id_type, None);
    }

    #[test]
    fn class_level_identifier_wins() {
        let meta = MetadataResolver::new().metadata::<ExplicitId>().unwrap();
        assert_eq!(meta.class.id_column.as_deref(), Some("token"));
        assert_eq!(meta.identifier().map(|p| p.property_name.as_str()), Some("token"));
    }

    #[test]
    fn first_flagged_identifier_is_adopted() {
        let meta = MetadataResolver::new().metadata::<TwoIds>().unwrap();
        assert_eq!(meta.class.id_column.as_deref(), Some("left"));
        assert_eq!(meta.class.id_type, Some(DeclaredType::Semantic(SemanticType::Int)));
        let flags: Vec<_> = meta.properties.iter().map(|p| p.is_identifier).collect();
        assert_eq!(flags, [true, false]);
    }

    #[test]
    fn missing_table_is_rejected() {
        let err = MetadataResolver::new().resolve::<NoTable>().unwrap_err();
        assert!(matches!(err, ConfigError::MissingTable { .. }));
    }

    #[test]
    fn unknown_type_override_fails_at_resolution() {
        let err = MetadataResolver::new().resolve::<BadType>().unwrap_err();
        assert!(matches!(err, ConfigError::UnmappedNativeType(ref n) if n == "GEOMETRY"));
    }

    #[test]
    fn resolution_is_cached_and_repeatable() {
        let resolver = MetadataResolver::new();
        assert!(!resolver.is_cached::<Account>());
        let first = resolver.metadata::<Account>().unwrap();
        assert!(resolver.is_cached::<Account>());
        let second = resolver.metadata::<Account>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *MetadataResolver::new().metadata::<Account>().unwrap());
    }
}
