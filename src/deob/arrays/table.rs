//! Name to parsed array mapping

use crate::deob::arrays::element::{Element, ParsedArray};
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};

/// Arrays recovered from declarations, keyed by declared name.
///
/// Iteration is in name order. Inserting a name that is already present replaces
/// the earlier array (last declaration wins); later mutation of an array in the
/// source is not tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArrayTable {
    arrays: BTreeMap<String, ParsedArray>,
}

impl ArrayTable {
    pub fn new() -> Self {
        ArrayTable {
            arrays: BTreeMap::new(),
        }
    }

    /// Store `array` under `name`, returning the array it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, array: ParsedArray) -> Option<ParsedArray> {
        self.arrays.insert(name.into(), array)
    }

    pub fn get(&self, name: &str) -> Option<&ParsedArray> {
        self.arrays.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arrays.contains_key(name)
    }

    /// The literal at `index` of array `name`.
    ///
    /// `None` if the array is unknown, the index is out of range, or the element
    /// there is itself a nested array.
    pub fn literal(&self, name: &str, index: usize) -> Option<&str> {
        self.arrays
            .get(name)
            .and_then(|array| array.get(index))
            .and_then(Element::as_literal)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParsedArray> {
        self.arrays.iter()
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArrayTable {
    type Item = (&'a String, &'a ParsedArray);
    type IntoIter = btree_map::Iter<'a, String, ParsedArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.arrays.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deob::testing::factories::{arr, lit};

    #[test]
    fn test_insert_overwrites() {
        let mut table = ArrayTable::new();
        assert!(table.insert("x", vec![lit("1")]).is_none());
        let previous = table.insert("x", vec![lit("2")]);
        assert_eq!(previous, Some(vec![lit("1")]));
        assert_eq!(table.get("x"), Some(&vec![lit("2")]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_literal_lookup() {
        let mut table = ArrayTable::new();
        table.insert("x", vec![lit("a"), arr(vec![lit("b")])]);
        assert_eq!(table.literal("x", 0), Some("a"));
        assert_eq!(table.literal("x", 1), None);
        assert_eq!(table.literal("x", 2), None);
        assert_eq!(table.literal("y", 0), None);
    }

    #[test]
    fn test_names_are_sorted() {
        let mut table = ArrayTable::new();
        table.insert("b", vec![lit("1")]);
        table.insert("a", vec![lit("2")]);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
