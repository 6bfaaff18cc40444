// src/synth.rs
//! The recursive value synthesizer.
//!
//! [`Synthesizer`] owns the dispatch ladder over requested types: leaves go to
//! the primitive pool, interfaces resolve through the implementation index,
//! containers fill through the collection factory, and records walk their
//! constructor recipes in declaration order with per-constructor failure
//! containment. Recursion is bounded by [`SynthConfig::max_depth`]; past the
//! bound every node collapses to its canonical default, which is the sole
//! mechanism that terminates self-referential type graphs.

use rand::{Rng, RngCore};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::collections::ContainerKind;
use crate::error::SynthError;
use crate::implementations::ImplementationIndex;
use crate::primitives;
use crate::registry::{ConstructorDef, TypeDef, TypeDefKind, TypeRegistry};
use crate::types::{TypeExpr, TypeId};
use crate::value::Value;

/// Per-type active-recursion counters, scoped to one top-level call.
///
/// A counter exists only while its record type is on the active call stack.
/// The depth bound is the only truncation mechanism; the counters are kept
/// balanced but never consulted.
pub(crate) type Visiting = FxHashMap<TypeId, usize>;

/// Tuning for a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Recursion distance from the requested type past which nodes collapse
    /// to their canonical defaults.
    pub max_depth: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

/// Recursive synthesis engine.
///
/// Borrows the registry and the RNG exclusively, vends one value per
/// [`generate_value_of_type`](Self::generate_value_of_type) call. The
/// implementation index is built once at construction.
pub struct Synthesizer<'a> {
    registry: &'a TypeRegistry,
    implementations: ImplementationIndex,
    pub(crate) rng: &'a mut dyn RngCore,
    config: SynthConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(registry: &'a TypeRegistry, rng: &'a mut dyn RngCore) -> Self {
        Self::with_config(registry, rng, SynthConfig::default())
    }

    pub fn with_config(
        registry: &'a TypeRegistry,
        rng: &'a mut dyn RngCore,
        config: SynthConfig,
    ) -> Self {
        Self {
            registry,
            implementations: ImplementationIndex::build(registry),
            rng,
            config,
        }
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Synthesize one structurally valid value assignable to `target`.
    pub fn generate_value_of_type(&mut self, target: &TypeExpr) -> Result<Value, SynthError> {
        let mut visiting = Visiting::default();
        let value = self.generate(target, 0, &mut visiting);
        debug_assert!(visiting.is_empty(), "visiting counters must drain");
        value
    }

    /// By-name convenience over
    /// [`generate_value_of_type`](Self::generate_value_of_type).
    pub fn generate_by_name(&mut self, name: &str) -> Result<Value, SynthError> {
        let id = self
            .registry
            .lookup(name)
            .ok_or_else(|| SynthError::UnknownType(name.to_string()))?;
        self.generate_value_of_type(&TypeExpr::Named(id))
    }

    pub(crate) fn generate(
        &mut self,
        expr: &TypeExpr,
        depth: usize,
        visiting: &mut Visiting,
    ) -> Result<Value, SynthError> {
        if depth > self.config.max_depth {
            return Ok(Value::default_for(expr));
        }
        if let Some(leaf) = primitives::leaf_value(&mut *self.rng, expr) {
            return Ok(leaf);
        }
        match expr {
            TypeExpr::Array(elem) => self.generate_array(elem, depth, visiting),
            // A container requested directly carries no usable element
            // context; it stays empty. Filling happens only on the
            // constructor-argument path through the collection factory.
            TypeExpr::Seq(_) => Ok(Value::Seq(Vec::new())),
            TypeExpr::Set(_) => Ok(Value::Set(Vec::new())),
            TypeExpr::Named(id) => self.generate_named(*id, depth, visiting),
            _ => unreachable!("leaf kinds are handled by the primitive pool"),
        }
    }

    /// Fixed-size array: length uniform in 0..=2, each element independent.
    fn generate_array(
        &mut self,
        elem: &TypeExpr,
        depth: usize,
        visiting: &mut Visiting,
    ) -> Result<Value, SynthError> {
        let len = self.rng.gen_range(0..=2);
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.generate(elem, depth + 1, visiting)?);
        }
        Ok(Value::Array(items))
    }

    fn generate_named(
        &mut self,
        id: TypeId,
        depth: usize,
        visiting: &mut Visiting,
    ) -> Result<Value, SynthError> {
        let def = self.registry.get(id);
        match &def.kind {
            TypeDefKind::Enum { variants } => Ok(self.pick_variant(id, variants)),
            TypeDefKind::Interface { .. } => {
                let Some(chosen) = self.implementations.pick(&mut *self.rng, id) else {
                    return Err(SynthError::NoImplementationFound(def.name.clone()));
                };
                self.generate(&TypeExpr::Named(chosen), depth + 1, visiting)
            }
            TypeDefKind::Record { constructors, .. } => {
                if !def.generatable {
                    return Err(SynthError::NotGeneratable(def.name.clone()));
                }
                *visiting.entry(id).or_insert(0) += 1;
                let value = self.try_constructors(def, constructors, depth, visiting);
                leave(visiting, id);
                Ok(value)
            }
        }
    }

    /// Uniform pick among declared constants; an empty enum degrades to the
    /// absence-value.
    fn pick_variant(&mut self, id: TypeId, variants: &[String]) -> Value {
        use rand::seq::SliceRandom;
        match variants.choose(&mut *self.rng) {
            Some(variant) => Value::Enum {
                ty: id,
                variant: variant.clone(),
            },
            None => Value::Nil,
        }
    }

    /// Walk the record's recipes in declaration order.
    ///
    /// A failed parameter or a factory rejection abandons the current recipe
    /// only; exhausting every recipe degrades the node to `Nil` instead of
    /// failing the caller.
    fn try_constructors(
        &mut self,
        def: &TypeDef,
        constructors: &[ConstructorDef],
        depth: usize,
        visiting: &mut Visiting,
    ) -> Value {
        for ctor in constructors {
            let args = match self.synthesize_args(ctor, depth, visiting) {
                Ok(args) => args,
                Err(err) => {
                    tracing::trace!(ty = %def.name, %err, "parameter failed, abandoning constructor");
                    continue;
                }
            };
            match &ctor.factory {
                None => {
                    return Value::Record {
                        ty: def.id,
                        fields: args.into_vec(),
                    };
                }
                Some(factory) => match factory(&args) {
                    Ok(value) => return value,
                    Err(rejected) => {
                        tracing::debug!(
                            ty = %def.name,
                            reason = %rejected.reason,
                            "constructor rejected, trying next"
                        );
                    }
                },
            }
        }
        tracing::debug!(ty = %def.name, "constructors exhausted, degrading to default");
        Value::Nil
    }

    /// Synthesize one recipe's arguments in order. Container parameters
    /// route through the collection factory with their declared element
    /// context; everything else recurses one level deeper.
    fn synthesize_args(
        &mut self,
        ctor: &ConstructorDef,
        depth: usize,
        visiting: &mut Visiting,
    ) -> Result<SmallVec<[Value; 4]>, SynthError> {
        let mut args = SmallVec::new();
        for param in &ctor.params {
            let value = match param {
                TypeExpr::Seq(ctx) => {
                    self.create_and_fill(ContainerKind::Seq, ctx.as_deref(), depth, visiting)?
                }
                TypeExpr::Set(ctx) => {
                    self.create_and_fill(ContainerKind::Set, ctx.as_deref(), depth, visiting)?
                }
                other => self.generate(other, depth + 1, visiting)?,
            };
            args.push(value);
        }
        Ok(args)
    }
}

/// Decrement a visiting counter on exit, dropping the entry once it drains.
fn leave(visiting: &mut Visiting, id: TypeId) {
    match visiting.get_mut(&id) {
        Some(count) if *count > 1 => *count -= 1,
        _ => {
            visiting.remove(&id);
        }
    }
}
