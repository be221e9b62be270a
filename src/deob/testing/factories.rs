//! Factories for token streams and array elements

use crate::deob::arrays::Element;
use crate::deob::pipeline::stream::TokenStream;

/// Build a token stream from string slices.
pub fn mk_stream(tokens: &[&str]) -> TokenStream {
    TokenStream::from(tokens.to_vec())
}

/// A literal element.
pub fn lit(value: &str) -> Element {
    Element::literal(value)
}

/// A nested array element.
pub fn arr(items: Vec<Element>) -> Element {
    Element::Array(items)
}

/// Render elements as the raw pieces of a declaration body.
///
/// Every nested array puts its `[` on its first leaf and its `]` on its last,
/// so `[a, [b, c], d]` renders as `["a", "[b", "c]", "d"]`. Nested arrays must
/// be non-empty; an empty list has no leaf to carry its brackets.
pub fn render_pieces(elements: &[Element]) -> Vec<String> {
    let mut pieces = Vec::new();
    for element in elements {
        render_into(element, &mut pieces);
    }
    pieces
}

fn render_into(element: &Element, pieces: &mut Vec<String>) {
    match element {
        Element::Literal(value) => pieces.push(value.clone()),
        Element::Array(items) => {
            let start = pieces.len();
            for item in items {
                render_into(item, pieces);
            }
            if pieces.len() > start {
                pieces[start].insert(0, '[');
                if let Some(last) = pieces.last_mut() {
                    last.push(']');
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pieces() {
        let elements = vec![lit("a"), arr(vec![lit("b"), lit("c")]), lit("d")];
        assert_eq!(render_pieces(&elements), vec!["a", "[b", "c]", "d"]);
    }

    #[test]
    fn test_render_nested_edges() {
        let elements = vec![arr(vec![arr(vec![lit("a")]), lit("b")])];
        assert_eq!(render_pieces(&elements), vec!["[[a]", "b]"]);
    }
}
