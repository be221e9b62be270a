//! Array reference mapper for TokenStream pipeline
//!
//! Replaces `name[index]` with the double-quoted literal stored at that index,
//! for every array in an [`ArrayTable`]. Arrays are processed one at a time in
//! table order, each as a full pass over the token.
//!
//! References that cannot be resolved (index out of range, or pointing at a
//! nested array) are left untouched.
//!
//! Indices are resolved against the array as declared. If the source mutates the
//! array afterwards (`push`/`shift` rotation and the like) the substituted values
//! are stale; that is accepted, this stage does not model execution.
//!
//! # Chained references
//!
//! A literal may itself mention its own array: with `x = ["x[1]", "b"]`,
//! replacing `x[0]` exposes `x[1]`. Replacing until no reference is left gives
//! `"b"`. That fixpoint is computed per array up front rather than by rescanning
//! tokens: each literal's content is expanded once, innermost references first,
//! and memoized. Inserted text is the expanded content, so a token pass scans
//! left to right once and leaves nothing new to resolve for that array.
//!
//! # Termination
//!
//! Every literal is expanded at most once. A reference to a literal whose own
//! expansion is still in progress is a cycle (`x = ["x[0]"]`) and stays as
//! written, as does a reference whose content would grow past
//! [`MAX_EXPANSION_LEN`] bytes.

use crate::deob::arrays::element::Element;
use crate::deob::arrays::table::ArrayTable;
use crate::deob::error::DeobError;
use crate::deob::pipeline::mapper::StreamMapper;
use crate::deob::pipeline::stream::TokenStream;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Longest expanded literal content that is substituted, in bytes.
pub const MAX_EXPANSION_LEN: usize = 1 << 20;

/// A mapper that inlines array references.
pub struct ArrayReferencesMapper {
    /// Reference pattern per array, with the expanded content of each index.
    arrays: Vec<(Regex, Vec<Option<String>>)>,
    substituted: usize,
}

impl ArrayReferencesMapper {
    pub fn new(table: &ArrayTable) -> Self {
        let arrays = table
            .iter()
            .filter_map(|(name, array)| {
                let pattern = format!(r"\b{}\[([0-9]+)\]", regex::escape(name));
                // names are \w+ so this only fails on size limits
                let pattern = Regex::new(&pattern).ok()?;
                let contents = expand_array(&pattern, array);
                Some((pattern, contents))
            })
            .collect();
        ArrayReferencesMapper {
            arrays,
            substituted: 0,
        }
    }

    /// Number of references replaced so far.
    pub fn substituted(&self) -> usize {
        self.substituted
    }

    fn substitute(&mut self, token: String) -> String {
        let mut token = token;
        let mut count = 0;
        for (pattern, contents) in &self.arrays {
            let (replaced, n) = replace_references(pattern, &token, |index| {
                let content = contents.get(index)?.as_deref()?;
                Some(format!("\"{content}\""))
            });
            count += n;
            if let Cow::Owned(replaced) = replaced {
                token = replaced;
            }
        }
        if count > 0 {
            tracing::trace!(count, "substituted array references");
        }
        self.substituted += count;
        token
    }
}

impl StreamMapper for ArrayReferencesMapper {
    fn name(&self) -> &str {
        "array-references"
    }

    fn map_token(&mut self, token: String) -> Result<Vec<String>, DeobError> {
        Ok(vec![self.substitute(token)])
    }
}

/// Replace each match of `pattern` whose index `lookup` resolves. Returns the
/// new text and the number of replacements.
fn replace_references<'t>(
    pattern: &Regex,
    text: &'t str,
    lookup: impl Fn(usize) -> Option<String>,
) -> (Cow<'t, str>, usize) {
    let mut count = 0;
    let replaced = pattern.replace_all(text, |caps: &Captures| {
        match caps[1].parse::<usize>().ok().and_then(&lookup) {
            Some(replacement) => {
                count += 1;
                replacement
            }
            None => caps[0].to_string(),
        }
    });
    (replaced, count)
}

enum Slot {
    Pending,
    /// Expansion in progress; references back to it are cycles.
    Active,
    /// `None` for nested elements and oversized expansions.
    Done(Option<String>),
}

/// Expanded content of every element of one array, `None` where an element
/// cannot be substituted.
///
/// Depth-first with an explicit stack, so a long chain of references does not
/// recurse.
fn expand_array(pattern: &Regex, array: &[Element]) -> Vec<Option<String>> {
    let contents: Vec<Option<String>> = array
        .iter()
        .map(|element| element.as_literal().map(string_content))
        .collect();
    let mut slots: Vec<Slot> = contents
        .iter()
        .map(|content| match content {
            Some(_) => Slot::Pending,
            None => Slot::Done(None),
        })
        .collect();

    for root in 0..contents.len() {
        // (index, references already expanded)
        let mut stack = vec![(root, false)];
        while let Some((index, ready)) = stack.pop() {
            let Some(content) = contents[index].as_deref() else {
                continue;
            };
            if ready {
                let (expanded, _) = replace_references(pattern, content, |k| match slots.get(k) {
                    Some(Slot::Done(Some(done))) => Some(done.clone()),
                    _ => None,
                });
                let expanded = expanded.into_owned();
                let fits = expanded.len() <= MAX_EXPANSION_LEN;
                slots[index] = Slot::Done(fits.then_some(expanded));
            } else if matches!(slots[index], Slot::Pending) {
                slots[index] = Slot::Active;
                stack.push((index, true));
                for caps in pattern.captures_iter(content) {
                    if let Ok(k) = caps[1].parse::<usize>() {
                        if matches!(slots.get(k), Some(Slot::Pending)) {
                            stack.push((k, false));
                        }
                    }
                }
            }
        }
    }

    slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Done(content) => content,
            Slot::Pending | Slot::Active => None,
        })
        .collect()
}

/// Wrap a literal in double quotes.
///
/// A double-quoted literal (`"a"`) is kept as is. A single-quoted one (`'a'`)
/// is re-quoted: `\'` loses its backslash and a bare `"` gains one. Anything
/// else is wrapped, with bare `"` escaped.
pub fn quote_literal(value: &str) -> String {
    format!("\"{}\"", string_content(value))
}

/// The text of a literal, escaped to sit between double quotes.
fn string_content(value: &str) -> String {
    if let Some(inner) = strip_quotes(value, '"') {
        return inner.to_string();
    }
    let single = strip_quotes(value, '\'');
    let text = single.unwrap_or(value);

    let mut content = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') if single.is_some() => content.push('\''),
                Some(escaped) => {
                    content.push('\\');
                    content.push(escaped);
                }
                // a lone trailing backslash would escape the closing quote
                None => content.push_str("\\\\"),
            },
            '"' => content.push_str("\\\""),
            c => content.push(c),
        }
    }
    content
}

fn strip_quotes(value: &str, quote: char) -> Option<&str> {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

/// Replace every resolvable `name[index]` in `stream` using `table`.
pub fn substitute_array_references(table: &ArrayTable, stream: TokenStream) -> TokenStream {
    let mut mapper = ArrayReferencesMapper::new(table);
    let output: TokenStream = stream
        .into_iter()
        .map(|token| mapper.substitute(token))
        .collect();
    tracing::debug!(substituted = mapper.substituted(), "array references resolved");
    output
}
