// src/value.rs
//! Synthesized values and canonical defaults.

use crate::registry::TypeRegistry;
use crate::types::{TypeExpr, TypeId};

/// A structurally valid value produced by one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence-value for reference-like types
    Nil,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    /// One constant of a registered enum
    Enum { ty: TypeId, variant: String },
    Array(Vec<Value>),
    Seq(Vec<Value>),
    /// Deduplicated on insert, so it never holds equal values
    Set(Vec<Value>),
    /// A record assembled from its synthesized constructor arguments
    Record { ty: TypeId, fields: Vec<Value> },
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Canonical default/zero for a requested type.
    ///
    /// Returned when the depth bound is reached and when a record exhausts
    /// its constructors: zero for numerics, false, '\0', the empty string,
    /// empty containers for `Seq`/`Set`, and `Nil` for arrays and named
    /// types.
    pub fn default_for(expr: &TypeExpr) -> Value {
        match expr {
            TypeExpr::Bool => Value::Bool(false),
            TypeExpr::I8 => Value::I8(0),
            TypeExpr::I16 => Value::I16(0),
            TypeExpr::I32 => Value::I32(0),
            TypeExpr::I64 => Value::I64(0),
            TypeExpr::F32 => Value::F32(0.0),
            TypeExpr::F64 => Value::F64(0.0),
            TypeExpr::Char => Value::Char('\0'),
            TypeExpr::Str => Value::Str(String::new()),
            TypeExpr::Seq(_) => Value::Seq(Vec::new()),
            TypeExpr::Set(_) => Value::Set(Vec::new()),
            TypeExpr::Named(_) | TypeExpr::Array(_) => Value::Nil,
        }
    }

    /// Render with registry context, so records and enum constants show
    /// their registered names.
    pub fn render(&self, registry: &TypeRegistry) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::I8(v) => v.to_string(),
            Value::I16(v) => v.to_string(),
            Value::I32(v) => v.to_string(),
            Value::I64(v) => v.to_string(),
            Value::F32(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::Char(c) => format!("'{c}'"),
            Value::Str(s) => format!("\"{s}\""),
            Value::Enum { ty, variant } => {
                format!("{}::{}", registry.get(*ty).name, variant)
            }
            Value::Array(items) => format!("[{}]", render_items(items, registry)),
            Value::Seq(items) => format!("seq[{}]", render_items(items, registry)),
            Value::Set(items) => format!("set{{{}}}", render_items(items, registry)),
            Value::Record { ty, fields } => {
                format!("{}({})", registry.get(*ty).name, render_items(fields, registry))
            }
        }
    }
}

fn render_items(items: &[Value], registry: &TypeRegistry) -> String {
    items
        .iter()
        .map(|item| item.render(registry))
        .collect::<Vec<_>>()
        .join(", ")
}
