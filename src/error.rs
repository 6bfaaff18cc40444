// src/error.rs
//! Typed failures for value synthesis.

use thiserror::Error;

/// Errors surfaced to callers of
/// [`Synthesizer::generate_value_of_type`](crate::synth::Synthesizer::generate_value_of_type).
///
/// Constructor exhaustion and empty enums are not errors: those nodes degrade
/// to [`Value::Nil`](crate::value::Value::Nil). Inside a constructor trial
/// these errors only abandon that one recipe; at the top level they reach the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthError {
    /// A record type was requested but is not on the generatable allow-list.
    #[error("type '{0}' is not registered as generatable")]
    NotGeneratable(String),

    /// An interface has no generatable concrete implementations in its
    /// namespace.
    #[error("no generatable implementations for interface '{0}'")]
    NoImplementationFound(String),

    /// A name with no entry in the registry.
    #[error("unknown type '{0}'")]
    UnknownType(String),
}
