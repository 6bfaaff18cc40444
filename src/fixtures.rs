// src/fixtures.rs
//! Sample domain registry used by the demo binary and integration tests.
//!
//! Two namespaces: `shop` (Example, Product, Cart, BinaryTreeNode, plus the
//! negative-test types PaymentMethod and Voucher) and `geometry` (the Shape
//! interface with its Rectangle and Triangle implementations, and the Color
//! enum). Product carries two recipes: the first rejects negative ids, so
//! roughly half of all draws exercise the multi-constructor fallback.

use std::rc::Rc;

use crate::registry::{ConstructionRejected, Factory, TypeRegistry};
use crate::types::{TypeExpr, TypeId};
use crate::value::Value;

/// Names of the generatable sample types, in demo output order.
pub const SAMPLE_TYPES: &[&str] = &[
    "Example",
    "Cart",
    "BinaryTreeNode",
    "Product",
    "Rectangle",
    "Shape",
    "Triangle",
    "Color",
];

/// Build the sample registry.
pub fn sample_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();

    let example = registry.register_record("shop", "Example", true, &[]);
    registry.add_constructor(example, vec![TypeExpr::I32]);

    let product = registry.register_record("shop", "Product", true, &[]);
    registry.add_constructor_with(
        product,
        vec![TypeExpr::I64, TypeExpr::Str],
        positive_id_factory(product),
    );
    registry.add_constructor(product, vec![TypeExpr::I64, TypeExpr::Str]);

    let cart = registry.register_record("shop", "Cart", true, &[]);
    registry.add_constructor(cart, vec![TypeExpr::seq_of(TypeExpr::Named(product))]);

    let node = registry.register_record("shop", "BinaryTreeNode", true, &[]);
    registry.add_constructor(
        node,
        vec![TypeExpr::I32, TypeExpr::Named(node), TypeExpr::Named(node)],
    );

    // Negative-test types: an interface nothing implements and a record
    // kept off the allow-list.
    registry.register_interface("shop", "PaymentMethod");
    registry.register_record("shop", "Voucher", false, &[]);

    let shape = registry.register_interface("geometry", "Shape");
    let rectangle = registry.register_record("geometry", "Rectangle", true, &[shape]);
    registry.add_constructor(rectangle, vec![TypeExpr::F64, TypeExpr::F64]);
    let triangle = registry.register_record("geometry", "Triangle", true, &[shape]);
    registry.add_constructor(
        triangle,
        vec![TypeExpr::F64, TypeExpr::F64, TypeExpr::F64],
    );
    registry.register_enum("geometry", "Color", &["Red", "Green", "Blue"]);

    registry
}

/// A validating Product recipe: rejects negative ids, otherwise assembles
/// the plain record.
fn positive_id_factory(product: TypeId) -> Factory {
    Rc::new(move |args: &[Value]| match args {
        [Value::I64(id), Value::Str(_)] if *id < 0 => {
            Err(ConstructionRejected::new("negative id"))
        }
        _ => Ok(Value::Record {
            ty: product,
            fields: args.to_vec(),
        }),
    })
}
