// src/registry.rs
//! Host-populated registry of type definitions.
//!
//! TypeRegistry is the single source of type metadata: every type the host
//! wants synthesized is registered up front with its namespace, kind, and
//! (for records) ordered constructor recipes. Eligibility is the
//! `generatable` allow-list flag, and namespace listing is an in-memory
//! filter, so no discovery can fail at synthesis time.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::types::{TypeExpr, TypeId};
use crate::value::Value;

/// Why a factory refused the synthesized arguments.
///
/// A rejection abandons the current constructor and moves on to the next
/// recipe; it never surfaces to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionRejected {
    pub reason: String,
}

impl ConstructionRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Factory invoked once every parameter of a recipe has synthesized.
///
/// `Rc` rather than `Arc`: synthesis is single-threaded.
pub type Factory = Rc<dyn Fn(&[Value]) -> Result<Value, ConstructionRejected>>;

/// One way to build a record: an ordered parameter recipe plus an optional
/// validating factory. Without a factory the record is assembled directly as
/// [`Value::Record`] from the synthesized arguments.
#[derive(Clone)]
pub struct ConstructorDef {
    pub params: Vec<TypeExpr>,
    pub factory: Option<Factory>,
}

impl fmt::Debug for ConstructorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDef")
            .field("params", &self.params)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

/// What kind of type a definition describes.
#[derive(Debug, Clone)]
pub enum TypeDefKind {
    /// Closed set of named constants
    Enum { variants: Vec<String> },
    /// Abstract target, resolved to a concrete implementation at synthesis
    /// time. `extends` lists parent interfaces for assignability.
    Interface { extends: Vec<TypeId> },
    /// Concrete type built through constructor recipes. `implements` lists
    /// the interfaces this record is assignable to.
    Record {
        implements: Vec<TypeId>,
        constructors: Vec<ConstructorDef>,
    },
}

/// A registered type.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub id: TypeId,
    pub name: String,
    /// Module grouping used to discover sibling implementations
    pub namespace: String,
    /// Allow-list flag: whether this type may be a synthesis target
    pub generatable: bool,
    pub kind: TypeDefKind,
}

impl TypeDef {
    pub fn is_concrete(&self) -> bool {
        matches!(self.kind, TypeDefKind::Record { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeDefKind::Interface { .. })
    }
}

/// Host-populated table of type definitions.
///
/// IDs are indices into the definition vector; names resolve through a
/// lookup map. The table is meant to be built once at startup and treated
/// as immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    type_defs: Vec<TypeDef>,
    type_by_name: FxHashMap<String, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(
        &mut self,
        namespace: &str,
        name: &str,
        generatable: bool,
        kind: TypeDefKind,
    ) -> TypeId {
        let id = TypeId::new(self.type_defs.len() as u32);
        self.type_defs.push(TypeDef {
            id,
            name: name.to_string(),
            namespace: namespace.to_string(),
            generatable,
            kind,
        });
        self.type_by_name.insert(name.to_string(), id);
        id
    }

    /// Register an enum with its declared constants.
    pub fn register_enum(&mut self, namespace: &str, name: &str, variants: &[&str]) -> TypeId {
        let variants = variants.iter().map(|v| v.to_string()).collect();
        self.register(namespace, name, true, TypeDefKind::Enum { variants })
    }

    /// Register an interface (abstract synthesis target).
    pub fn register_interface(&mut self, namespace: &str, name: &str) -> TypeId {
        self.register_interface_extending(namespace, name, &[])
    }

    /// Register an interface that extends parent interfaces.
    pub fn register_interface_extending(
        &mut self,
        namespace: &str,
        name: &str,
        extends: &[TypeId],
    ) -> TypeId {
        let kind = TypeDefKind::Interface {
            extends: extends.to_vec(),
        };
        self.register(namespace, name, false, kind)
    }

    /// Register a record. Constructor recipes are attached afterwards with
    /// [`add_constructor`](Self::add_constructor), so a recipe can reference
    /// the record's own id.
    pub fn register_record(
        &mut self,
        namespace: &str,
        name: &str,
        generatable: bool,
        implements: &[TypeId],
    ) -> TypeId {
        let kind = TypeDefKind::Record {
            implements: implements.to_vec(),
            constructors: Vec::new(),
        };
        self.register(namespace, name, generatable, kind)
    }

    /// Attach a constructor recipe that assembles a plain [`Value::Record`].
    pub fn add_constructor(&mut self, id: TypeId, params: Vec<TypeExpr>) {
        self.push_constructor(
            id,
            ConstructorDef {
                params,
                factory: None,
            },
        );
    }

    /// Attach a constructor recipe with a validating factory.
    pub fn add_constructor_with(&mut self, id: TypeId, params: Vec<TypeExpr>, factory: Factory) {
        self.push_constructor(
            id,
            ConstructorDef {
                params,
                factory: Some(factory),
            },
        );
    }

    fn push_constructor(&mut self, id: TypeId, ctor: ConstructorDef) {
        match &mut self.type_defs[id.index() as usize].kind {
            TypeDefKind::Record { constructors, .. } => constructors.push(ctor),
            _ => panic!("constructors only apply to records"),
        }
    }

    /// Get a type definition by id.
    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.type_defs[id.index() as usize]
    }

    /// Look up a type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.type_by_name.get(name).copied()
    }

    /// All type descriptors visible under a namespace.
    pub fn types_in_namespace<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a TypeDef> + 'a {
        self.type_defs
            .iter()
            .filter(move |def| def.namespace == namespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.type_defs.iter()
    }

    pub fn len(&self) -> usize {
        self.type_defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = TypeRegistry::new();
        let id = registry.register_record("shop", "Product", true, &[]);

        assert_eq!(registry.lookup("Product"), Some(id));
        assert_eq!(registry.get(id).name, "Product");
        assert_eq!(registry.get(id).namespace, "shop");
        assert!(registry.get(id).generatable);
        assert!(registry.get(id).is_concrete());
    }

    #[test]
    fn lookup_unknown_name() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.lookup("Missing"), None);
    }

    #[test]
    fn constructors_attach_in_declaration_order() {
        let mut registry = TypeRegistry::new();
        let id = registry.register_record("shop", "Product", true, &[]);
        registry.add_constructor(id, vec![TypeExpr::I64, TypeExpr::Str]);
        registry.add_constructor(id, vec![TypeExpr::Str]);

        match &registry.get(id).kind {
            TypeDefKind::Record { constructors, .. } => {
                assert_eq!(constructors.len(), 2);
                assert_eq!(constructors[0].params.len(), 2);
                assert_eq!(constructors[1].params, vec![TypeExpr::Str]);
            }
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "constructors only apply to records")]
    fn constructor_on_interface_panics() {
        let mut registry = TypeRegistry::new();
        let id = registry.register_interface("shop", "PaymentMethod");
        registry.add_constructor(id, vec![]);
    }

    #[test]
    fn namespace_listing_filters_by_namespace() {
        let mut registry = TypeRegistry::new();
        registry.register_record("shop", "Product", true, &[]);
        registry.register_record("shop", "Cart", true, &[]);
        registry.register_record("geometry", "Rectangle", true, &[]);

        let shop: Vec<&str> = registry
            .types_in_namespace("shop")
            .map(|def| def.name.as_str())
            .collect();
        assert_eq!(shop, vec!["Product", "Cart"]);
        assert_eq!(registry.types_in_namespace("billing").count(), 0);
    }

    #[test]
    fn factory_rejection_reason_is_kept() {
        let rejected = ConstructionRejected::new("negative id");
        assert_eq!(rejected.reason, "negative id");
    }
}
