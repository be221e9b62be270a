//! Main module for deobfuscation functionality
//!
//! The processing pipeline, leaves first:
//!
//! 1. Linebreaking ([`pipeline::mappers::linebreak`]): raw text is cut into statement
//!    tokens on one or more delimiters, each token keeping its delimiter as a suffix.
//! 2. Hex decoding ([`pipeline::mappers::hex_chars`]): `\xNN` escapes are replaced by
//!    the character they encode, token by token.
//! 3. Array extraction ([`arrays::extraction`]): `name = [ ... ]` declarations are
//!    collected into an [`arrays::ArrayTable`], with nested lists parsed by
//!    [`arrays::nested`].
//! 4. Reference substitution ([`pipeline::mappers::array_references`]), opt-in:
//!    `name[3]` is replaced by the literal stored at that index.
//!
//! Every stage consumes a [`pipeline::TokenStream`] and produces a new one; nothing
//! here touches the filesystem. The text is only rewritten, never evaluated.

pub mod arrays;
pub mod error;
pub mod formats;
pub mod pipeline;
pub mod testing;

pub use error::DeobError;
