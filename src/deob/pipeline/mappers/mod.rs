//! StreamMapper implementations for token transformations
//!
//! Each stage of the pipeline that maps tokens to tokens lives here, together
//! with a convenience function running it over a whole stream.

pub mod array_references;
pub mod hex_chars;
pub mod linebreak;

pub use array_references::{substitute_array_references, ArrayReferencesMapper};
pub use hex_chars::{decode_hex_chars, parse_hex_chars, HexCharsMapper};
pub use linebreak::{generate_linebreaks, split_token, LinebreakMapper, DEFAULT_DELIMITER};
