// src/implementations.rs
//! Implementation discovery for interface targets.
//!
//! For each registered interface the index records the concrete, generatable
//! types in the interface's own namespace that are assignable to it. The
//! registered set is static after startup, so the index is built once per
//! registry and reused for every synthesis call.

use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;

use crate::registry::{TypeDef, TypeDefKind, TypeRegistry};
use crate::types::TypeId;

/// Per-interface candidate sets, computed once from a [`TypeRegistry`].
#[derive(Debug, Clone, Default)]
pub struct ImplementationIndex {
    candidates: FxHashMap<TypeId, Vec<TypeId>>,
}

impl ImplementationIndex {
    /// Scan the registry once and record candidates for every interface.
    ///
    /// A candidate must live in the interface's namespace, be concrete, be on
    /// the generatable allow-list, be assignable to the interface, and not be
    /// the interface itself.
    pub fn build(registry: &TypeRegistry) -> Self {
        let mut candidates: FxHashMap<TypeId, Vec<TypeId>> = FxHashMap::default();
        for target in registry.iter() {
            if !target.is_interface() {
                continue;
            }
            let found: Vec<TypeId> = registry
                .types_in_namespace(&target.namespace)
                .filter(|def| def.id != target.id)
                .filter(|def| def.is_concrete())
                .filter(|def| def.generatable)
                .filter(|def| is_assignable(registry, def, target.id))
                .map(|def| def.id)
                .collect();
            tracing::trace!(
                interface = %target.name,
                count = found.len(),
                "discovered implementation candidates"
            );
            candidates.insert(target.id, found);
        }
        Self { candidates }
    }

    /// Candidates discovered for an interface (empty for unknown targets).
    pub fn candidates(&self, target: TypeId) -> &[TypeId] {
        self.candidates
            .get(&target)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pick one candidate uniformly at random, or `None` when the candidate
    /// set is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R, target: TypeId) -> Option<TypeId> {
        self.candidates.get(&target)?.choose(rng).copied()
    }
}

/// Whether `def` is assignable to interface `target`, following record
/// `implements` and interface `extends` edges transitively.
fn is_assignable(registry: &TypeRegistry, def: &TypeDef, target: TypeId) -> bool {
    let parents: &[TypeId] = match &def.kind {
        TypeDefKind::Record { implements, .. } => implements,
        TypeDefKind::Interface { extends } => extends,
        TypeDefKind::Enum { .. } => return false,
    };
    parents
        .iter()
        .any(|&parent| parent == target || is_assignable(registry, registry.get(parent), target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn discovers_tagged_concrete_implementations() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("geometry", "Shape");
        let rectangle = registry.register_record("geometry", "Rectangle", true, &[shape]);
        let triangle = registry.register_record("geometry", "Triangle", true, &[shape]);

        let index = ImplementationIndex::build(&registry);
        assert_eq!(index.candidates(shape), &[rectangle, triangle]);
    }

    #[test]
    fn skips_untagged_and_foreign_namespace_types() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("geometry", "Shape");
        registry.register_record("geometry", "Sketch", false, &[shape]);
        registry.register_record("drafting", "Blueprint", true, &[shape]);
        let circle = registry.register_record("geometry", "Circle", true, &[shape]);

        let index = ImplementationIndex::build(&registry);
        assert_eq!(index.candidates(shape), &[circle]);
    }

    #[test]
    fn skips_non_assignable_siblings() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("geometry", "Shape");
        registry.register_record("geometry", "Legend", true, &[]);
        registry.register_enum("geometry", "Color", &["Red"]);

        let index = ImplementationIndex::build(&registry);
        assert!(index.candidates(shape).is_empty());
    }

    #[test]
    fn assignability_is_transitive_over_extends() {
        let mut registry = TypeRegistry::new();
        let drawable = registry.register_interface("geometry", "Drawable");
        let shape = registry.register_interface_extending("geometry", "Shape", &[drawable]);
        let rectangle = registry.register_record("geometry", "Rectangle", true, &[shape]);

        let index = ImplementationIndex::build(&registry);
        assert_eq!(index.candidates(drawable), &[rectangle]);
    }

    #[test]
    fn pick_returns_none_for_empty_candidate_set() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("geometry", "Shape");

        let index = ImplementationIndex::build(&registry);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(index.pick(&mut rng, shape), None);
    }

    #[test]
    fn pick_covers_every_candidate() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("geometry", "Shape");
        let rectangle = registry.register_record("geometry", "Rectangle", true, &[shape]);
        let triangle = registry.register_record("geometry", "Triangle", true, &[shape]);

        let index = ImplementationIndex::build(&registry);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = Vec::new();
        for _ in 0..100 {
            let picked = index.pick(&mut rng, shape).unwrap();
            if !seen.contains(&picked) {
                seen.push(picked);
            }
        }
        assert!(seen.contains(&rectangle));
        assert!(seen.contains(&triangle));
    }
}
