//! Value sequence resolution.
//!
//! Turns the per-enumerator slots of a declaration into concrete values with
//! the usual auto-increment rule: an implicit enumerator takes its
//! predecessor's value plus one (zero for the first), an explicit one takes
//! its own value and becomes the new baseline.
//!
//! ```text
//!   A = 10,  B,   C,   D = -1,  E
//!   10       11   12   -1       0
//! ```

use serde::Serialize;

use crate::discriminant::Discriminant;
use crate::error::{ReflectError, ReflectResult};
use crate::tokenize::Clause;

/// One declaration position's value specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnumeratorSlot<V> {
    /// The value computed by the host for an enumerator with an initializer.
    Explicit(V),
    /// No initializer: previous value plus one, or zero.
    Implicit,
}

impl<V: Discriminant> EnumeratorSlot<V> {
    /// Slot for a scanned clause whose initializer, if any, is an integer literal.
    ///
    /// Initializers that need evaluation (`1 << 2`, `(A | B)`, constants)
    /// are rejected; their values must come from the host.
    pub fn from_clause(clause: &Clause<'_>) -> ReflectResult<Self> {
        match clause.initializer {
            None => Ok(Self::Implicit),
            Some(literal) => V::parse_literal(literal).map(Self::Explicit),
        }
    }
}

/// Resolve a slot sequence into one value per enumerator, in declaration order.
///
/// Fails only when an implicit slot would step past the largest value of
/// the representation.
pub fn resolve_values<V: Discriminant>(slots: &[EnumeratorSlot<V>]) -> ReflectResult<Vec<V>> {
    let mut values = Vec::with_capacity(slots.len());
    // None once the baseline is the representation's maximum.
    let mut next = Some(V::ZERO);

    for (index, slot) in slots.iter().enumerate() {
        let value = match *slot {
            EnumeratorSlot::Explicit(value) => value,
            EnumeratorSlot::Implicit => next.ok_or_else(|| ReflectError::DiscriminantOverflow {
                index,
                repr: V::REPR,
            })?,
        };
        values.push(value);
        next = value.successor();
    }

    Ok(values)
}

/// Derive slots for every clause of a scanned declaration.
pub fn slots_from_clauses<V: Discriminant>(
    clauses: &[Clause<'_>],
) -> ReflectResult<Vec<EnumeratorSlot<V>>> {
    clauses.iter().map(EnumeratorSlot::from_clause).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use EnumeratorSlot::{Explicit, Implicit};

    #[test]
    fn test_all_implicit_counts_from_zero() {
        let values = resolve_values::<i8>(&[Implicit, Implicit, Implicit, Implicit]).unwrap();
        assert_eq!(values, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_explicit_resets_baseline() {
        let values = resolve_values::<u32>(&[Explicit(10), Implicit, Implicit]).unwrap();
        assert_eq!(values, vec![10, 11, 12]);
    }

    #[test]
    fn test_negative_start() {
        let values = resolve_values::<i16>(&[Explicit(-1), Explicit(1), Implicit, Implicit]).unwrap();
        assert_eq!(values, vec![-1, 1, 2, 3]);
    }

    #[test]
    fn test_auto_increment_collision_is_kept() {
        // B auto-increments to 1, then C is explicitly 1 as well.
        let values = resolve_values::<i32>(&[Implicit, Implicit, Explicit(1), Implicit]).unwrap();
        assert_eq!(values, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_maximum_value_is_exact() {
        let values = resolve_values::<u64>(&[Explicit(0), Explicit(u64::MAX)]).unwrap();
        assert_eq!(values, vec![0, u64::MAX]);
    }

    #[test]
    fn test_implicit_after_maximum_overflows() {
        let err = resolve_values::<u8>(&[Explicit(u8::MAX), Implicit]).unwrap_err();
        assert!(matches!(
            err,
            ReflectError::DiscriminantOverflow { index: 1, repr: "u8" }
        ));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let slots = [Implicit, Explicit(7i64), Implicit, Explicit(-3), Implicit];
        let first = resolve_values(&slots).unwrap();
        let second = resolve_values(&slots).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![0, 7, 8, -3, -2]);
    }

    #[test]
    fn test_empty_slots() {
        assert!(resolve_values::<u8>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_slots_from_literal_clauses() {
        let clauses = [
            Clause { name: "A", initializer: Some("10") },
            Clause { name: "B", initializer: None },
            Clause { name: "C", initializer: Some("- 1") },
        ];
        let slots = slots_from_clauses::<i32>(&clauses).unwrap();
        assert_eq!(slots, vec![Explicit(10), Implicit, Explicit(-1)]);
    }

    #[test]
    fn test_slots_reject_expressions() {
        let clauses = [Clause { name: "SourSweet", initializer: Some("(Sour | Sweet)") }];
        assert!(slots_from_clauses::<u64>(&clauses).is_err());
    }
}
