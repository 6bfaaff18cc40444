// src/collections.rs
//! Container synthesis — the collection factory.
//!
//! Containers are filled only on the constructor-argument path, where the
//! declared element-type context is known. Set-like kinds produce a
//! deduplicating container; every other container kind produces an ordered
//! sequence.

use rand::Rng;

use crate::error::SynthError;
use crate::synth::{Synthesizer, Visiting};
use crate::types::TypeExpr;
use crate::value::Value;

/// The two container shapes the synthesizer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Seq,
    Set,
}

impl<'a> Synthesizer<'a> {
    /// Build and fill a container from a constructor parameter's declared
    /// element-type context.
    ///
    /// Element resolution: a concrete context type is used as-is; a context
    /// type that is itself a parameterized container degrades to its raw
    /// form; with no context at all the element type falls back to string.
    /// Fill count is uniform in 1..=3; element failures propagate to the
    /// owning constructor trial.
    pub(crate) fn create_and_fill(
        &mut self,
        kind: ContainerKind,
        elem_ctx: Option<&TypeExpr>,
        depth: usize,
        visiting: &mut Visiting,
    ) -> Result<Value, SynthError> {
        let elem = match elem_ctx {
            Some(ctx) => ctx.raw(),
            None => TypeExpr::Str,
        };
        let count = self.rng.gen_range(1..=3);
        let mut items: Vec<Value> = Vec::with_capacity(count);
        for _ in 0..count {
            let value = self.generate(&elem, depth + 1, visiting)?;
            match kind {
                ContainerKind::Seq => items.push(value),
                ContainerKind::Set => {
                    if !items.contains(&value) {
                        items.push(value);
                    }
                }
            }
        }
        Ok(match kind {
            ContainerKind::Seq => Value::Seq(items),
            ContainerKind::Set => Value::Set(items),
        })
    }
}
