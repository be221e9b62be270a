//! Testing helpers
//!
//! Factories for building token streams and parsed arrays in tests, plus a
//! renderer that turns an element tree back into the flat, comma-split pieces
//! the nested array parser consumes.

pub mod factories;
