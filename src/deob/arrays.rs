//! Array literal recovery
//!
//! Obfuscators commonly hoist string literals into an array declared once
//! (`var _0x3f = ["log", "hello"];`) and index into it everywhere else. This
//! module finds those declarations and rebuilds their element lists, including
//! nested lists, so the references can be resolved later.
//!
//! - [`element`]: the recursive leaf-or-list [`Element`] structure
//! - [`table`]: the name to parsed array mapping
//! - [`nested`]: rebuilds nesting from a flat list of raw elements
//! - [`extraction`]: declaration matching over a token stream

pub mod element;
pub mod extraction;
pub mod nested;
pub mod table;

pub use element::{Element, ParsedArray};
pub use extraction::find_arrays;
pub use nested::{parse_nested, MAX_NESTING};
pub use table::ArrayTable;
