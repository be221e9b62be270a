//! Output formats
//!
//! Serializes an [`ExecutionOutput`](crate::deob::pipeline::ExecutionOutput) for
//! writing out: plain newline-joined text, or structured JSON / YAML.

pub mod registry;
pub mod structured;
pub mod text;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use text::TextFormatter;
