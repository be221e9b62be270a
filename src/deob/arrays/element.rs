//! Parsed array elements

use serde::Serialize;
use std::fmt;

/// A parsed array: the elements of one bracketed list, in source order.
pub type ParsedArray = Vec<Element>;

/// One element of a parsed array literal.
///
/// Nesting mirrors the brackets of the source exactly: every `[` opens one
/// `Array` level, every `]` closes the current one. Literals keep their source
/// text verbatim, quotes included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Element {
    Literal(String),
    Array(Vec<Element>),
}

impl Element {
    pub fn literal(value: impl Into<String>) -> Self {
        Element::Literal(value.into())
    }

    /// Number of leaf literals contained in this element, recursively.
    ///
    /// Each raw element handed to the parser becomes exactly one leaf, so this is
    /// also the number of raw elements the element was built from. The parser
    /// uses it to move its cursor past a nested list it has just parsed.
    pub fn consumed_len(&self) -> usize {
        match self {
            Element::Literal(_) => 1,
            Element::Array(items) => items.iter().map(Element::consumed_len).sum(),
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Element::Literal(value) => Some(value),
            Element::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Element]> {
        match self {
            Element::Literal(_) => None,
            Element::Array(items) => Some(items),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Literal(value) => f.write_str(value),
            Element::Array(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deob::testing::factories::{arr, lit};

    #[test]
    fn test_consumed_len_of_literal() {
        assert_eq!(lit("a").consumed_len(), 1);
    }

    #[test]
    fn test_consumed_len_counts_nested_leaves() {
        let element = arr(vec![lit("a"), arr(vec![lit("b"), arr(vec![lit("c")])]), lit("d")]);
        assert_eq!(element.consumed_len(), 4);
    }

    #[test]
    fn test_consumed_len_of_empty_array() {
        assert_eq!(arr(vec![]).consumed_len(), 0);
    }

    #[test]
    fn test_display_mirrors_brackets() {
        let element = arr(vec![lit("1"), arr(vec![lit("2"), lit("3")])]);
        assert_eq!(element.to_string(), "[1, [2, 3]]");
    }

    #[test]
    fn test_serializes_untagged() {
        let element = arr(vec![lit("a"), arr(vec![lit("b")])]);
        assert_eq!(serde_json::to_string(&element).unwrap(), r#"["a",["b"]]"#);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(lit("x").as_literal(), Some("x"));
        assert!(lit("x").as_array().is_none());
        assert_eq!(arr(vec![lit("x")]).as_array().map(<[Element]>::len), Some(1));
    }
}
