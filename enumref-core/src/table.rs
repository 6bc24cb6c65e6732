//! The reflection table and its query facade.
//!
//! A table is built once from aligned values and names and never changes
//! afterwards. It keeps three views of the same enumerators:
//!
//! - positional: declaration order, the only ordering key
//! - by value: every enumerator with that value, in declaration order, so
//!   the first-declared one wins when values alias
//! - by name: unique
//!
//! All lookups are total. A missing name, value or index yields `None`.

use std::collections::HashMap;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use tracing::{debug, warn};

use crate::discriminant::Discriminant;
use crate::error::{ReflectError, ReflectResult};
use crate::iter::{Enumerator, Enumerators};
use crate::resolve::{resolve_values, slots_from_clauses, EnumeratorSlot};
use crate::tokenize::{scan_clauses, tokenize_names};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<V> {
    pub(crate) value: V,
    pub(crate) name: String,
}

/// Immutable index/value/name mapping for one enum type.
#[derive(Debug, Clone)]
pub struct ReflectionTable<V> {
    type_name: String,
    by_index: Vec<Entry<V>>,
    by_value: HashMap<V, Vec<usize>>,
    by_name: HashMap<String, usize>,
}

impl<V: Discriminant> ReflectionTable<V> {
    /// Build a table from values and names aligned by position.
    ///
    /// # Errors
    ///
    /// - [`ReflectError::StructuralMismatch`] if the lengths differ
    /// - [`ReflectError::DuplicateName`] if a name repeats
    pub fn build<N: AsRef<str>>(
        type_name: impl Into<String>,
        values: &[V],
        names: &[N],
    ) -> ReflectResult<Self> {
        let type_name = type_name.into();
        if values.len() != names.len() {
            return Err(ReflectError::mismatch(
                type_name,
                values.len(),
                names.len(),
                "value and name counts differ",
            ));
        }

        let mut by_index: Vec<Entry<V>> = Vec::with_capacity(values.len());
        let mut by_value: HashMap<V, Vec<usize>> = HashMap::with_capacity(values.len());
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(names.len());

        for (index, (&value, name)) in values.iter().zip(names).enumerate() {
            let name = name.as_ref();
            if let Some(&first_index) = by_name.get(name) {
                return Err(ReflectError::DuplicateName {
                    type_name,
                    name: name.to_string(),
                    first_index,
                    second_index: index,
                });
            }
            by_name.insert(name.to_string(), index);

            let bucket = by_value.entry(value).or_default();
            if let Some(&canonical) = bucket.first() {
                warn!(
                    enum_name = %type_name,
                    alias = %name,
                    canonical = %by_index[canonical].name,
                    value = %value,
                    "enumerator aliases an earlier value"
                );
            }
            bucket.push(index);

            by_index.push(Entry {
                value,
                name: name.to_string(),
            });
        }

        debug!(enum_name = %type_name, count = by_index.len(), repr = V::REPR, "reflection table built");

        Ok(Self {
            type_name,
            by_index,
            by_value,
            by_name,
        })
    }

    /// Build a table from resolved values and the raw declaration text.
    pub fn from_values(type_name: &str, values: &[V], declaration: &str) -> ReflectResult<Self> {
        let names = tokenize_names(type_name, declaration, values.len())?;
        Self::build(type_name, values, &names)
    }

    /// Resolve `slots`, then build against the raw declaration text.
    pub fn from_slots(
        type_name: &str,
        slots: &[EnumeratorSlot<V>],
        declaration: &str,
    ) -> ReflectResult<Self> {
        let values = resolve_values(slots)?;
        Self::from_values(type_name, &values, declaration)
    }

    /// Build from declaration text alone.
    ///
    /// Only works when every initializer is an integer literal; anything
    /// that needs evaluation is reported as [`ReflectError::InvalidLiteral`].
    pub fn from_declaration(type_name: &str, declaration: &str) -> ReflectResult<Self> {
        let clauses = scan_clauses(type_name, declaration)?;
        let slots = slots_from_clauses(&clauses)?;
        let values = resolve_values(&slots)?;
        let names: Vec<&str> = clauses.iter().map(|clause| clause.name).collect();
        Self::build(type_name, &values, &names)
    }

    /// Name of the enum type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Number of enumerators.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    /// Enumerator at a declaration position.
    pub fn get(&self, index: usize) -> Option<Enumerator<'_, V>> {
        (index < self.len()).then(|| Enumerator::new(self, index))
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.by_index.get(index).map(|entry| entry.name.as_str())
    }

    pub fn value_at(&self, index: usize) -> Option<V> {
        self.by_index.get(index).map(|entry| entry.value)
    }

    /// Declaration index of the first enumerator with `value`.
    pub fn index_of_value(&self, value: V) -> Option<usize> {
        self.by_value
            .get(&value)
            .and_then(|bucket| bucket.first())
            .copied()
    }

    /// Name of the first-declared enumerator with `value`.
    pub fn name_of(&self, value: V) -> Option<&str> {
        self.index_of_value(value).and_then(|index| self.name_at(index))
    }

    pub fn find_by_value(&self, value: V) -> Option<Enumerator<'_, V>> {
        self.index_of_value(value).and_then(|index| self.get(index))
    }

    /// Declaration index of the enumerator named exactly `name`.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn value_of(&self, name: &str) -> Option<V> {
        self.index_of_name(name).and_then(|index| self.value_at(index))
    }

    pub fn find_by_name(&self, name: &str) -> Option<Enumerator<'_, V>> {
        self.index_of_name(name).and_then(|index| self.get(index))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn contains_value(&self, value: V) -> bool {
        self.by_value.contains_key(&value)
    }

    /// Every enumerator sharing `value`, first-declared first.
    pub fn aliases_of(&self, value: V) -> impl Iterator<Item = Enumerator<'_, V>> + '_ {
        self.by_value
            .get(&value)
            .into_iter()
            .flatten()
            .map(move |&index| Enumerator::new(self, index))
    }

    /// Enumerators in declaration order; `.rev()` walks backwards.
    pub fn iter(&self) -> Enumerators<'_, V> {
        Enumerators::new(self)
    }

    /// Copy of this table with every value widened to `i128`.
    ///
    /// Lets tables of different representations live side by side.
    pub fn widened(&self) -> ReflectionTable<i128> {
        ReflectionTable {
            type_name: self.type_name.clone(),
            by_index: self
                .by_index
                .iter()
                .map(|entry| Entry {
                    value: entry.value.widen(),
                    name: entry.name.clone(),
                })
                .collect(),
            by_value: self
                .by_value
                .iter()
                .map(|(value, bucket)| (value.widen(), bucket.clone()))
                .collect(),
            by_name: self.by_name.clone(),
        }
    }

    pub(crate) fn entry(&self, index: usize) -> &Entry<V> {
        &self.by_index[index]
    }
}

impl<'a, V: Discriminant> IntoIterator for &'a ReflectionTable<V> {
    type Item = Enumerator<'a, V>;
    type IntoIter = Enumerators<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Discriminant> Serialize for ReflectionTable<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let enumerators: Vec<Enumerator<'_, V>> = self.iter().collect();
        let mut state = serializer.serialize_struct("ReflectionTable", 4)?;
        state.serialize_field("name", &self.type_name)?;
        state.serialize_field("repr", V::REPR)?;
        state.serialize_field("count", &self.len())?;
        state.serialize_field("enumerators", &enumerators)?;
        state.end()
    }
}
