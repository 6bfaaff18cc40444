// src/types.rs
//! Requested-type expressions and type identifiers.
//!
//! A [`TypeExpr`] describes what the caller wants synthesized: a primitive
//! kind, a named registry type, a fixed-size array, or a container. Container
//! expressions carry their declared element-type context only when they appear
//! as constructor parameters; a container requested directly has none, and
//! synthesizes as an empty instance.

/// Unique identifier for a type registered in a
/// [`TypeRegistry`](crate::registry::TypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn new(index: u32) -> Self {
        TypeId(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// A requested type: what the synthesizer dispatches on.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Primitive kinds
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    /// Lowercase alphabetic string, length 3..=10
    Str,
    /// An enum, interface, or record registered in the registry
    Named(TypeId),
    /// Fixed-size array with a single element type, length 0..=2
    Array(Box<TypeExpr>),
    /// Ordered, duplicate-permitting sequence. The payload is the declared
    /// element-type context, present only on constructor parameters.
    Seq(Option<Box<TypeExpr>>),
    /// Deduplicating, unordered set. Element context as for `Seq`.
    Set(Option<Box<TypeExpr>>),
}

impl TypeExpr {
    /// A sequence with a declared element type.
    pub fn seq_of(elem: TypeExpr) -> Self {
        TypeExpr::Seq(Some(Box::new(elem)))
    }

    /// A set with a declared element type.
    pub fn set_of(elem: TypeExpr) -> Self {
        TypeExpr::Set(Some(Box::new(elem)))
    }

    /// An array of the given element type.
    pub fn array_of(elem: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(elem))
    }

    /// True for the container kinds whose fill comes from generic element
    /// context (`Seq`/`Set`). Arrays are not containers in this sense: their
    /// element type is part of the expression itself.
    pub fn is_container(&self) -> bool {
        matches!(self, TypeExpr::Seq(_) | TypeExpr::Set(_))
    }

    /// Strip a container's element context, leaving its raw form.
    ///
    /// Applied to declared element types that are themselves parameterized
    /// containers: the element degrades to the raw container, which
    /// synthesizes as an empty instance. Non-container expressions are
    /// returned unchanged.
    pub fn raw(&self) -> TypeExpr {
        match self {
            TypeExpr::Seq(_) => TypeExpr::Seq(None),
            TypeExpr::Set(_) => TypeExpr::Set(None),
            other => other.clone(),
        }
    }

    /// Short kind name for error messages and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeExpr::Bool => "bool",
            TypeExpr::I8 => "i8",
            TypeExpr::I16 => "i16",
            TypeExpr::I32 => "i32",
            TypeExpr::I64 => "i64",
            TypeExpr::F32 => "f32",
            TypeExpr::F64 => "f64",
            TypeExpr::Char => "char",
            TypeExpr::Str => "string",
            TypeExpr::Named(_) => "named",
            TypeExpr::Array(_) => "array",
            TypeExpr::Seq(_) => "seq",
            TypeExpr::Set(_) => "set",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containers_are_containers() {
        assert!(TypeExpr::Seq(None).is_container());
        assert!(TypeExpr::set_of(TypeExpr::I32).is_container());
        assert!(!TypeExpr::array_of(TypeExpr::I32).is_container());
        assert!(!TypeExpr::Str.is_container());
    }

    #[test]
    fn raw_strips_element_context() {
        assert_eq!(TypeExpr::seq_of(TypeExpr::Str).raw(), TypeExpr::Seq(None));
        assert_eq!(TypeExpr::set_of(TypeExpr::I64).raw(), TypeExpr::Set(None));
        assert_eq!(TypeExpr::Seq(None).raw(), TypeExpr::Seq(None));
    }

    #[test]
    fn raw_keeps_non_containers() {
        assert_eq!(TypeExpr::I32.raw(), TypeExpr::I32);
        let arr = TypeExpr::array_of(TypeExpr::Bool);
        assert_eq!(arr.raw(), arr);
    }

    #[test]
    fn type_id_round_trips_index() {
        assert_eq!(TypeId::new(7).index(), 7);
    }
}
