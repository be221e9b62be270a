//! Output formatter lookup
//!
//! Formatters are looked up by name when the executor serializes a run. The
//! built-in set is `text`, `json` and `yaml`; callers may register their own.

use crate::deob::pipeline::executor::ExecutionOutput;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No formatter is registered under this name.
    UnknownFormat(String),
    /// The formatter could not render the output.
    Serialization(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => write!(f, "Unknown output format '{name}'"),
            FormatError::Serialization(msg) => write!(f, "Could not serialize output: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders an [`ExecutionOutput`] as text.
pub trait Formatter: Send + Sync {
    /// Name the format is selected by.
    fn name(&self) -> &str;

    fn serialize(&self, output: &ExecutionOutput) -> Result<String, FormatError>;

    /// One-line summary for listings.
    fn description(&self) -> &str {
        ""
    }
}

/// Formatters by name, iterated in name order.
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// A registry with no formatters.
    pub fn new() -> Self {
        FormatRegistry {
            formatters: BTreeMap::new(),
        }
    }

    /// The built-in `text`, `json` and `yaml` formatters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::TextFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }

    /// Add `formatter` under its own name, replacing any formatter of that name.
    pub fn register(&mut self, formatter: impl Formatter + 'static) {
        let name = formatter.name().to_string();
        self.formatters.insert(name, Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|boxed| &**boxed)
    }

    /// Render `output` with the formatter called `format`.
    pub fn serialize(&self, output: &ExecutionOutput, format: &str) -> Result<String, FormatError> {
        match self.get(format) {
            Some(formatter) => formatter.serialize(output),
            None => Err(FormatError::UnknownFormat(format.to_string())),
        }
    }

    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
