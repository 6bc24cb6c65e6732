//! Borrowed enumerator views and declaration-order iteration.

use std::fmt;
use std::iter::FusedIterator;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::discriminant::Discriminant;
use crate::table::ReflectionTable;

/// One enumerator of a table: its index, value and name.
///
/// Holds only a table reference and a position, so it is `Copy` and
/// cannot outlive the table.
pub struct Enumerator<'a, V> {
    table: &'a ReflectionTable<V>,
    index: usize,
}

impl<'a, V: Discriminant> Enumerator<'a, V> {
    /// `index` must be in bounds for `table`.
    pub(crate) fn new(table: &'a ReflectionTable<V>, index: usize) -> Self {
        debug_assert!(index < table.len());
        Self { table, index }
    }

    /// Declaration position, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> V {
        self.table.entry(self.index).value
    }

    pub fn name(&self) -> &'a str {
        &self.table.entry(self.index).name
    }

    /// The table this enumerator belongs to.
    pub fn table(&self) -> &'a ReflectionTable<V> {
        self.table
    }

    /// True unless an earlier enumerator has the same value.
    pub fn is_first_of_value(&self) -> bool {
        self.table.index_of_value(self.value()) == Some(self.index)
    }

    /// The enumerator declared right after this one.
    pub fn following(&self) -> Option<Self> {
        self.table.get(self.index + 1)
    }

    /// The enumerator declared right before this one.
    pub fn preceding(&self) -> Option<Self> {
        self.index.checked_sub(1).and_then(|index| self.table.get(index))
    }
}

impl<V> Clone for Enumerator<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Enumerator<'_, V> {}

impl<V> PartialEq for Enumerator<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.index == other.index
    }
}

impl<V> Eq for Enumerator<'_, V> {}

impl<V: Discriminant> fmt::Debug for Enumerator<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerator")
            .field("index", &self.index)
            .field("value", &self.value())
            .field("name", &self.name())
            .finish()
    }
}

impl<V: Discriminant> fmt::Display for Enumerator<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.table.type_name(), self.name())
    }
}

impl<V: Discriminant> Serialize for Enumerator<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Enumerator", 3)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("name", self.name())?;
        state.end()
    }
}

/// Iterator over a table's enumerators in declaration order.
///
/// Double-ended: `rev()` walks from the last declared enumerator back to
/// the first.
pub struct Enumerators<'a, V> {
    table: &'a ReflectionTable<V>,
    front: usize,
    back: usize,
}

impl<'a, V: Discriminant> Enumerators<'a, V> {
    pub(crate) fn new(table: &'a ReflectionTable<V>) -> Self {
        Self {
            table,
            front: 0,
            back: table.len(),
        }
    }
}

impl<V> Clone for Enumerators<'_, V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, V: Discriminant> Iterator for Enumerators<'a, V> {
    type Item = Enumerator<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = Enumerator::new(self.table, self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<V: Discriminant> DoubleEndedIterator for Enumerators<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(Enumerator::new(self.table, self.back))
    }
}

impl<V: Discriminant> ExactSizeIterator for Enumerators<'_, V> {}

impl<V: Discriminant> FusedIterator for Enumerators<'_, V> {}

#[cfg(test)]
mod tests {
    use crate::table::ReflectionTable;

    fn suits() -> ReflectionTable<i8> {
        ReflectionTable::from_values("CardSuit", &[0, 1, 2, 3], "Spades, Hearts, Diamonds, Clubs")
            .unwrap()
    }

    #[test]
    fn test_forward_iteration() {
        let table = suits();
        let triples: Vec<(usize, i8, &str)> =
            table.iter().map(|e| (e.index(), e.value(), e.name())).collect();
        assert_eq!(
            triples,
            vec![(0, 0, "Spades"), (1, 1, "Hearts"), (2, 2, "Diamonds"), (3, 3, "Clubs")]
        );
    }

    #[test]
    fn test_backward_iteration() {
        let table = suits();
        let indices: Vec<usize> = table.iter().rev().map(|e| e.index()).collect();
        assert_eq!(indices, vec![3, 2, 1, 0]);
        for e in table.iter().rev() {
            assert_eq!(table.name_at(e.index()), Some(e.name()));
            assert_eq!(table.value_at(e.index()), Some(e.value()));
        }
    }

    #[test]
    fn test_meeting_in_the_middle() {
        let table = suits();
        let mut it = table.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next().map(|e| e.name()), Some("Spades"));
        assert_eq!(it.next_back().map(|e| e.name()), Some("Clubs"));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next_back().map(|e| e.name()), Some("Diamonds"));
        assert_eq!(it.next().map(|e| e.name()), Some("Hearts"));
        assert!(it.next().is_none());
        assert!(it.next_back().is_none());
    }

    #[test]
    fn test_stepping_between_neighbours() {
        let table = suits();
        let first = table.get(0).unwrap();
        assert!(first.preceding().is_none());
        let second = first.following().unwrap();
        assert_eq!(second.name(), "Hearts");
        assert_eq!(second.preceding(), Some(first));
        assert!(table.get(3).unwrap().following().is_none());
    }

    #[test]
    fn test_display_and_canonical_flag() {
        let table = ReflectionTable::from_values("Ports", &[22, 22], "SecureShell, SSH").unwrap();
        let ssh = table.find_by_name("SSH").unwrap();
        assert_eq!(ssh.to_string(), "Ports::SSH");
        assert!(!ssh.is_first_of_value());
        assert!(table.get(0).unwrap().is_first_of_value());
    }

    #[test]
    fn test_borrowed_for_loop() {
        let table = suits();
        let mut count = 0;
        for enumerator in &table {
            assert_eq!(enumerator.index(), count);
            count += 1;
        }
        assert_eq!(count, table.len());
    }
}
