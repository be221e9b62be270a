//! Nested array parser
//!
//! Rebuilds the structure of a bracketed list from its comma-split pieces. The
//! input is flat: `[a, [b, c], d]` arrives as `["a", "[b", "c]", "d"]` with the
//! outer brackets already removed. Brackets live on the pieces themselves, a `[`
//! prefix opening a nested list and a `]` suffix closing one.
//!
//! # Algorithm
//!
//! A single cursor walks the flat list once while a stack holds the levels that
//! are still open:
//!
//! 1. Every leading `[` of a piece opens a level on the stack.
//! 2. What is left of the piece, minus any trailing `]`, is appended as a literal
//!    to the innermost open level.
//! 3. Every trailing `]` closes the innermost level, which is appended as one
//!    element to the level below it. A close with only the top level left ends
//!    the parse; whatever follows is ignored.
//! 4. Running out of pieces closes every level still open.
//!
//! Each piece becomes exactly one leaf, so a level opened at piece `start` and
//! closed after piece `end` has a [`Element::consumed_len`] of `end - start`.
//!
//! Nesting deeper than [`MAX_NESTING`] levels is rejected rather than built:
//! every tree walk over [`Element`] (drop included) recurses once per level.

use crate::deob::arrays::element::{Element, ParsedArray};
use crate::deob::error::DeobError;

/// Deepest nesting [`parse_nested`] accepts, the top level not counted.
pub const MAX_NESTING: usize = 256;

/// Parse a flat list of raw element pieces into nested elements.
///
/// Fails with `InvalidInput` if `pieces` is empty or opens more than
/// [`MAX_NESTING`] levels. Parsing stops at the first piece that closes the top
/// level; any pieces after it are ignored.
///
/// # Examples
///
/// ```ignore
/// let parsed = parse_nested(&["a", "[b", "c]", "d"])?;
/// // [a, [b, c], d]
/// ```
pub fn parse_nested<S: AsRef<str>>(pieces: &[S]) -> Result<ParsedArray, DeobError> {
    if pieces.is_empty() {
        return Err(DeobError::InvalidInput(
            "cannot parse an empty element list".to_string(),
        ));
    }

    let mut levels = Levels::default();
    for (cursor, piece) in pieces.iter().enumerate() {
        let piece: &str = piece.as_ref();
        let opened = piece.trim_start_matches('[');
        let opens = piece.len() - opened.len();
        if levels.depth() + opens > MAX_NESTING {
            return Err(DeobError::InvalidInput(format!(
                "array nesting deeper than {MAX_NESTING} levels"
            )));
        }
        for _ in 0..opens {
            levels.open(cursor);
        }

        let value = opened.trim_end_matches(']');
        let closes = opened.len() - value.len();
        levels.push(Element::literal(value));
        for _ in 0..closes {
            if !levels.close(cursor + 1) {
                return Ok(levels.top);
            }
        }
    }
    Ok(levels.finish(pieces.len()))
}

/// A nested level still waiting for its closing bracket.
struct OpenLevel {
    /// Cursor of the piece that opened it.
    start: usize,
    elements: Vec<Element>,
}

#[derive(Default)]
struct Levels {
    top: Vec<Element>,
    nested: Vec<OpenLevel>,
}

impl Levels {
    fn depth(&self) -> usize {
        self.nested.len()
    }

    fn open(&mut self, start: usize) {
        self.nested.push(OpenLevel {
            start,
            elements: Vec::new(),
        });
    }

    fn push(&mut self, element: Element) {
        match self.nested.last_mut() {
            Some(level) => level.elements.push(element),
            None => self.top.push(element),
        }
    }

    /// Close the innermost nested level after piece `end - 1`. Returns `false`
    /// when only the top level is left.
    fn close(&mut self, end: usize) -> bool {
        let Some(level) = self.nested.pop() else {
            return false;
        };
        let child = Element::Array(level.elements);
        debug_assert_eq!(child.consumed_len(), end - level.start);
        self.push(child);
        true
    }

    fn finish(mut self, end: usize) -> ParsedArray {
        while self.close(end) {}
        self.top
    }
}
