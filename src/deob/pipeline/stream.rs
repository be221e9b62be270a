//! Token stream representation shared by every pipeline stage
//!
//! A `TokenStream` is an ordered list of source fragments. Order is significant
//! and is preserved end-to-end: every stage maps tokens in input order and
//! produces a fresh stream, never mutating the one it was given.

use serde::Serialize;

/// An ordered sequence of tokens.
///
/// A token is a fragment of source text, usually a statement carrying its
/// delimiter as a suffix (`"var a = 1;"`).
///
/// # Examples
///
/// ```ignore
/// let stream = TokenStream::from_source("a = 1;\nb = 2;");
/// assert_eq!(stream.tokens(), &["a = 1;", "b = 2;"]);
/// assert_eq!(stream.join(), "a = 1;\nb = 2;");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenStream(Vec<String>);

impl TokenStream {
    pub fn new(tokens: Vec<String>) -> Self {
        TokenStream(tokens)
    }

    /// Builds a stream with one token per source line (line terminators dropped).
    ///
    /// A source without any line break yields a single token holding the whole blob.
    pub fn from_source(source: &str) -> Self {
        TokenStream(source.lines().map(str::to_string).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when there is nothing to contribute: no tokens, or only empty ones.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|token| token.is_empty())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Joins the tokens with newlines, the output form of the pipeline.
    pub fn join(&self) -> String {
        self.0.join("\n")
    }

    /// Concatenates the tokens without any separator.
    pub fn concat(&self) -> String {
        self.0.concat()
    }
}

impl From<&str> for TokenStream {
    fn from(source: &str) -> Self {
        TokenStream(vec![source.to_string()])
    }
}

impl From<String> for TokenStream {
    fn from(source: String) -> Self {
        TokenStream(vec![source])
    }
}

impl From<Vec<String>> for TokenStream {
    fn from(tokens: Vec<String>) -> Self {
        TokenStream(tokens)
    }
}

impl From<Vec<&str>> for TokenStream {
    fn from(tokens: Vec<&str>) -> Self {
        TokenStream(tokens.into_iter().map(str::to_string).collect())
    }
}

impl FromIterator<String> for TokenStream {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        TokenStream(iter.into_iter().collect())
    }
}

impl IntoIterator for TokenStream {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_splits_lines() {
        let stream = TokenStream::from_source("a = 1;\r\nb = 2;\n");
        assert_eq!(stream.tokens(), &["a = 1;", "b = 2;"]);
    }

    #[test]
    fn test_from_source_single_blob() {
        let stream = TokenStream::from_source("a = 1; b = 2;");
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_from_empty_source() {
        let stream = TokenStream::from_source("");
        assert!(stream.is_empty());
        assert!(stream.is_blank());
    }

    #[test]
    fn test_is_blank_with_empty_tokens() {
        let stream = TokenStream::from(vec!["", ""]);
        assert!(!stream.is_empty());
        assert!(stream.is_blank());
    }

    #[test]
    fn test_join_and_concat() {
        let stream = TokenStream::from(vec!["a;", "b;"]);
        assert_eq!(stream.join(), "a;\nb;");
        assert_eq!(stream.concat(), "a;b;");
    }

    #[test]
    fn test_serializes_as_list() {
        let stream = TokenStream::from(vec!["a;", "b;"]);
        assert_eq!(serde_json::to_string(&stream).unwrap(), r#"["a;","b;"]"#);
    }
}
