//! Array declaration extraction
//!
//! Matches tokens of the form `[var|let|const] name = [ ... ]` and parses the
//! bracketed element list. This is pattern matching, not a grammar: the element
//! list is split on every comma, so commas inside quoted strings split elements
//! too, and a declaration spanning several tokens is not recognized.

use crate::deob::arrays::element::ParsedArray;
use crate::deob::arrays::nested::parse_nested;
use crate::deob::arrays::table::ArrayTable;
use crate::deob::error::DeobError;
use crate::deob::pipeline::stream::TokenStream;
use once_cell::sync::Lazy;
use regex::Regex;

static ARRAY_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:(?:var|let|const)\s+)?(\w+)\s*=\s*\[(.*)\]").unwrap()
});

/// A single recognized declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayDeclaration<'a> {
    pub name: &'a str,
    /// Text between the outermost brackets.
    pub body: &'a str,
}

/// Match an array declaration at the start of `token`.
pub fn match_declaration(token: &str) -> Option<ArrayDeclaration<'_>> {
    let caps = ARRAY_DECLARATION.captures(token)?;
    Some(ArrayDeclaration {
        name: caps.get(1)?.as_str(),
        body: caps.get(2)?.as_str(),
    })
}

/// Split a declaration body into raw pieces and parse them.
///
/// Pieces are split on commas and stripped of leading whitespace. An empty body
/// (`[]`) parses to an empty array.
pub fn parse_body(body: &str) -> Result<ParsedArray, DeobError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let pieces: Vec<&str> = body.split(',').map(str::trim_start).collect();
    parse_nested(&pieces)
}

/// Collect every array declaration in `stream` into an [`ArrayTable`].
///
/// Tokens that are not declarations contribute nothing. When a name is declared
/// more than once, the last declaration wins.
pub fn find_arrays(stream: &TokenStream) -> Result<ArrayTable, DeobError> {
    let mut table = ArrayTable::new();
    for token in stream {
        let Some(declaration) = match_declaration(token) else {
            continue;
        };
        let array = parse_body(declaration.body)?;
        tracing::trace!(name = declaration.name, elements = array.len(), "found array");
        if table.insert(declaration.name, array).is_some() {
            tracing::debug!(name = declaration.name, "array redeclared, keeping the later one");
        }
    }
    tracing::debug!(arrays = table.len(), "array extraction complete");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deob::testing::factories::{arr, lit, mk_stream};

    #[test]
    fn test_var_declaration() {
        let table = find_arrays(&mk_stream(&["var x = [1, 2, 3]"])).unwrap();
        assert_eq!(table.get("x"), Some(&vec![lit("1"), lit("2"), lit("3")]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_declaration_keywords_optional() {
        let table = find_arrays(&mk_stream(&[
            "let a = [1];",
            "const b = [2];",
            "c=[3];",
            "  d = [4];",
        ]))
        .unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_keyword_prefix_not_stripped_from_name() {
        let declaration = match_declaration("variable = [1]").unwrap();
        assert_eq!(declaration.name, "variable");
    }

    #[test]
    fn test_trailing_semicolon_excluded_from_body() {
        let declaration = match_declaration(r#"var _0x1 = ["a", "b"];"#).unwrap();
        assert_eq!(declaration.name, "_0x1");
        assert_eq!(declaration.body, r#""a", "b""#);
    }

    #[test]
    fn test_nested_declaration() {
        let table = find_arrays(&mk_stream(&["var m = [[1, 2], [3, 4]];"])).unwrap();
        assert_eq!(
            table.get("m"),
            Some(&vec![
                arr(vec![lit("1"), lit("2")]),
                arr(vec![lit("3"), lit("4")]),
            ])
        );
    }

    #[test]
    fn test_empty_array() {
        let table = find_arrays(&mk_stream(&["var e = [];"])).unwrap();
        assert_eq!(table.get("e"), Some(&vec![]));
    }

    #[test]
    fn test_non_declarations_ignored() {
        let table = find_arrays(&mk_stream(&[
            "foo(x[1]);",
            "if (a == [1]) {}",
            "var s = 'text';",
        ]))
        .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_last_declaration_wins() {
        let table = find_arrays(&mk_stream(&["var x = [1];", "var x = [2, 3];"])).unwrap();
        assert_eq!(table.get("x"), Some(&vec![lit("2"), lit("3")]));
    }

    #[test]
    fn test_pieces_lose_leading_whitespace_only() {
        let parsed = parse_body("a,\t b ,\n\tc").unwrap();
        assert_eq!(parsed, vec![lit("a"), lit("b "), lit("c")]);
    }

    #[test]
    fn test_tab_before_nested_list() {
        let table = find_arrays(&mk_stream(&["var x = [1,\t[2, 3], 4];"])).unwrap();
        assert_eq!(
            table.get("x"),
            Some(&vec![lit("1"), arr(vec![lit("2"), lit("3")]), lit("4")])
        );
    }

    #[test]
    fn test_overly_nested_declaration_is_an_error() {
        let token = format!("var x = {}];", "[".repeat(100_000));
        let result = find_arrays(&mk_stream(&[token.as_str()]));
        assert!(matches!(result, Err(DeobError::InvalidInput(_))));
    }
}
