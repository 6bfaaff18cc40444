// src/primitives.rs
//! Random leaf values — the primitive value pool.
//!
//! Every producer is uniform across the kind's full representable range;
//! floats use the generator's default distribution. Strings are lowercase
//! alphabetic with length uniform in 3..=10.

use rand::Rng;

use crate::types::TypeExpr;
use crate::value::Value;

/// Produce a leaf value for the requested kind, or `None` when the kind is
/// not a leaf. The returned value is always of the exact requested kind.
pub fn leaf_value<R: Rng + ?Sized>(rng: &mut R, expr: &TypeExpr) -> Option<Value> {
    let value = match expr {
        TypeExpr::Bool => Value::Bool(rng.gen()),
        TypeExpr::I8 => Value::I8(rng.gen()),
        TypeExpr::I16 => Value::I16(rng.gen()),
        TypeExpr::I32 => Value::I32(rng.gen()),
        TypeExpr::I64 => Value::I64(rng.gen()),
        TypeExpr::F32 => Value::F32(rng.gen()),
        TypeExpr::F64 => Value::F64(rng.gen()),
        TypeExpr::Char => Value::Char(random_char(rng)),
        TypeExpr::Str => Value::Str(random_string(rng)),
        _ => return None,
    };
    Some(value)
}

/// Uniform over the 26 lowercase Latin letters.
pub fn random_char<R: Rng + ?Sized>(rng: &mut R) -> char {
    (b'a' + rng.gen_range(0..26u8)) as char
}

/// Lowercase alphabetic string with length uniform in 3..=10.
pub fn random_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(3..=10);
    (0..len).map(|_| random_char(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn leaf_values_match_requested_kind() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            leaf_value(&mut rng, &TypeExpr::Bool),
            Some(Value::Bool(_))
        ));
        assert!(matches!(leaf_value(&mut rng, &TypeExpr::I8), Some(Value::I8(_))));
        assert!(matches!(
            leaf_value(&mut rng, &TypeExpr::I16),
            Some(Value::I16(_))
        ));
        assert!(matches!(
            leaf_value(&mut rng, &TypeExpr::I32),
            Some(Value::I32(_))
        ));
        assert!(matches!(
            leaf_value(&mut rng, &TypeExpr::I64),
            Some(Value::I64(_))
        ));
        assert!(matches!(
            leaf_value(&mut rng, &TypeExpr::F32),
            Some(Value::F32(_))
        ));
        assert!(matches!(
            leaf_value(&mut rng, &TypeExpr::F64),
            Some(Value::F64(_))
        ));
        assert!(matches!(
            leaf_value(&mut rng, &TypeExpr::Char),
            Some(Value::Char(_))
        ));
        assert!(matches!(
            leaf_value(&mut rng, &TypeExpr::Str),
            Some(Value::Str(_))
        ));
    }

    #[test]
    fn non_leaf_kinds_yield_none() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(leaf_value(&mut rng, &TypeExpr::Seq(None)), None);
        assert_eq!(leaf_value(&mut rng, &TypeExpr::array_of(TypeExpr::I32)), None);
        assert_eq!(
            leaf_value(&mut rng, &TypeExpr::Named(crate::types::TypeId::new(0))),
            None
        );
    }

    #[test]
    fn chars_are_lowercase_latin() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = random_char(&mut rng);
            assert!(c.is_ascii_lowercase(), "unexpected char: {c:?}");
        }
    }

    #[test]
    fn strings_are_lowercase_with_bounded_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let s = random_string(&mut rng);
            assert!((3..=10).contains(&s.len()), "unexpected length: {}", s.len());
            assert!(s.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn string_lengths_cover_full_range() {
        // With 2000 draws every length in 3..=10 should appear.
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 11];
        for _ in 0..2000 {
            seen[random_string(&mut rng).len()] = true;
        }
        for len in 3..=10 {
            assert!(seen[len], "length {len} never drawn");
        }
    }

    #[test]
    fn leaves_are_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(123);
        let mut b = StdRng::seed_from_u64(123);
        for expr in [TypeExpr::I64, TypeExpr::Str, TypeExpr::Bool, TypeExpr::F64] {
            assert_eq!(leaf_value(&mut a, &expr), leaf_value(&mut b, &expr));
        }
    }
}
