//! Hex escape mapper for TokenStream pipeline
//!
//! Replaces `\xNN` escapes with the character whose code point is `NN`. The
//! escape is a backslash, a literal `x`, a digit, then one more alphanumeric
//! character: `\x41` matches, `\xA1` does not.
//!
//! Decoding repeats on the same token until no escape is left, so an escape
//! produced by a previous replacement (`\x5cx41` decodes the backslash first,
//! exposing `\x41`) is decoded as well. Each replacement turns four characters
//! into one, so the loop always terminates. Tokens are decoded independently;
//! an escape is never assembled across a token boundary.

use crate::deob::error::DeobError;
use crate::deob::pipeline::mapper::StreamMapper;
use crate::deob::pipeline::stream::TokenStream;
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\x([0-9][0-9a-zA-Z])").unwrap());

/// A mapper that decodes hex escapes in every token.
pub struct HexCharsMapper {
    decoded: usize,
}

impl HexCharsMapper {
    pub fn new() -> Self {
        HexCharsMapper { decoded: 0 }
    }

    /// Number of escapes replaced so far.
    pub fn decoded(&self) -> usize {
        self.decoded
    }
}

impl Default for HexCharsMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamMapper for HexCharsMapper {
    fn name(&self) -> &str {
        "hex-chars"
    }

    fn map_token(&mut self, token: String) -> Result<Vec<String>, DeobError> {
        let (decoded, count) = decode_counting(token);
        self.decoded += count;
        Ok(vec![decoded])
    }
}

/// Decode every hex escape in `token`.
pub fn decode_hex_chars(token: &str) -> String {
    decode_counting(token.to_string()).0
}

/// Decode every token of `stream`. Never fails; tokens without escapes pass through.
pub fn parse_hex_chars(stream: TokenStream) -> TokenStream {
    stream
        .into_iter()
        .map(|token| decode_counting(token).0)
        .collect()
}

fn decode_counting(mut token: String) -> (String, usize) {
    let mut count = 0;
    let mut from = 0;
    loop {
        let (escape, start, code) = match HEX_CHAR.captures_at(&token, from) {
            Some(caps) => (
                caps[0].to_string(),
                caps.get(0).map_or(from, |m| m.start()),
                u8::from_str_radix(&caps[1], 16),
            ),
            None => break,
        };
        match code {
            Ok(code) => {
                let ch = char::from(code).to_string();
                tracing::trace!(%escape, %ch, "decoded hex escape");
                token = token.replace(&escape, &ch);
                count += 1;
                from = 0;
            }
            // `\x1g` has the right shape but is not hex; leave it in place
            Err(_) => from = start + 1,
        }
    }
    (token, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deob::pipeline::mapper::walk_stream;
    use crate::deob::testing::factories::mk_stream;
    use rstest::rstest;

    #[rstest]
    #[case(r"\x41", "A")]
    #[case(r"\x6a\x51\x75\x65\x72\x79", "jQuery")]
    #[case(r#"console["\x6c\x6f\x67"]("hi")"#, r#"console["log"]("hi")"#)]
    #[case(r"\x20", " ")]
    #[case(r"\x3b", ";")]
    #[case(r"\x7E", "~")]
    fn test_decodes_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_hex_chars(input), expected);
    }

    #[rstest]
    #[case(r"\xA1")]
    #[case(r"\xff")]
    #[case(r"\xe9")]
    #[case(r"\x4")]
    #[case(r"A")]
    #[case(r"x41")]
    #[case("plain text")]
    fn test_leaves_non_matching_text(#[case] input: &str) {
        assert_eq!(decode_hex_chars(input), input);
    }

    #[test]
    fn test_non_hex_second_char_is_kept() {
        assert_eq!(decode_hex_chars(r"\x1g\x41"), r"\x1gA");
    }

    #[test]
    fn test_rescans_after_replacement() {
        // \x5c is a backslash, which forms a new escape with the following text
        assert_eq!(decode_hex_chars(r"\x5cx41"), "A");
    }

    #[test]
    fn test_repeated_escape_replaced_everywhere() {
        assert_eq!(decode_hex_chars(r"\x61-\x61-\x62"), "a-a-b");
    }

    #[test]
    fn test_decoding_is_per_token() {
        let stream = mk_stream(&[r"a\x", "41"]);
        assert_eq!(parse_hex_chars(stream.clone()), stream);
    }

    #[test]
    fn test_mapper_counts_replacements() {
        let mut mapper = HexCharsMapper::new();
        let stream = walk_stream(mk_stream(&[r"\x61\x62", "c", r"\x61"]), &mut mapper).unwrap();
        assert_eq!(stream, mk_stream(&["ab", "c", "a"]));
        assert_eq!(mapper.decoded(), 3);
    }

    #[test]
    fn test_idempotent_on_decoded_text() {
        let once = decode_hex_chars(r"var s = '\x48\x69\x1z';");
        assert_eq!(decode_hex_chars(&once), once);
    }
}
