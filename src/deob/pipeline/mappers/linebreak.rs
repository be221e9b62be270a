//! Linebreak mapper for TokenStream pipeline
//!
//! Splits every token on a delimiter and re-appends the delimiter to each piece,
//! so `"a;b;"` becomes `["a;", "b;"]`. Applying a pass to a stream flattens: each
//! token is split independently and the pieces are concatenated in order.
//!
//! # Logic
//!
//! 1. Empty tokens contribute nothing
//! 2. A token without the delimiter passes through as-is
//! 3. Otherwise split on the delimiter, suffix every piece but the last with it
//! 4. Drop empty pieces (the remainder after a trailing delimiter)
//!
//! Concatenating the output reproduces the concatenation of the input.

use crate::deob::error::DeobError;
use crate::deob::pipeline::mapper::{walk_stream, StreamMapper};
use crate::deob::pipeline::stream::TokenStream;

/// Delimiter used when the caller supplies none.
pub const DEFAULT_DELIMITER: &str = ";";

/// A mapper that performs one delimiter pass over a stream.
pub struct LinebreakMapper {
    delimiter: String,
}

impl LinebreakMapper {
    /// Create a mapper for `delimiter`.
    ///
    /// Fails with `InvalidInput` for an empty delimiter, which cannot split anything.
    pub fn new(delimiter: impl Into<String>) -> Result<Self, DeobError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(DeobError::InvalidInput("empty delimiter".to_string()));
        }
        Ok(LinebreakMapper { delimiter })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl StreamMapper for LinebreakMapper {
    fn name(&self) -> &str {
        "linebreak"
    }

    fn map_token(&mut self, token: String) -> Result<Vec<String>, DeobError> {
        if token.is_empty() {
            return Ok(Vec::new());
        }
        Ok(split_token(&token, &self.delimiter))
    }
}

/// Split a single token on `delimiter`, keeping the delimiter as a suffix.
pub fn split_token(token: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() || !token.contains(delimiter) {
        return vec![token.to_string()];
    }
    let pieces: Vec<&str> = token.split(delimiter).collect();
    let last = pieces.len() - 1;
    pieces
        .into_iter()
        .enumerate()
        .map(|(idx, piece)| {
            if idx < last {
                format!("{piece}{delimiter}")
            } else {
                piece.to_string()
            }
        })
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Split `input` on each delimiter in turn.
///
/// Every delimiter is applied as a full pass over the current stream before the
/// next one. With no delimiters, [`DEFAULT_DELIMITER`] is used.
///
/// Returns `Ok(None)` when the input holds nothing to split (an empty string, an
/// empty stream, or a stream of empty tokens): there are no tokens to contribute.
///
/// # Examples
///
/// ```ignore
/// let tokens = generate_linebreaks("a;b,c", &[";", ","])?.unwrap();
/// assert_eq!(tokens.tokens(), &["a;", "b,", "c"]);
/// ```
pub fn generate_linebreaks<D: AsRef<str>>(
    input: impl Into<TokenStream>,
    delimiters: &[D],
) -> Result<Option<TokenStream>, DeobError> {
    let mut stream = input.into();
    if stream.is_blank() {
        return Ok(None);
    }

    if delimiters.is_empty() {
        stream = walk_stream(stream, &mut LinebreakMapper::new(DEFAULT_DELIMITER)?)?;
    } else {
        for delimiter in delimiters {
            stream = walk_stream(stream, &mut LinebreakMapper::new(delimiter.as_ref())?)?;
        }
    }
    Ok(Some(stream))
}
