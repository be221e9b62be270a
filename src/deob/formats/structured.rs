//! Structured output via serde

use crate::deob::formats::registry::{FormatError, Formatter};
use crate::deob::pipeline::executor::ExecutionOutput;

/// Pretty-printed JSON: a list of tokens, or an object of name to nested lists.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, output: &ExecutionOutput) -> Result<String, FormatError> {
        serde_json::to_string_pretty(output)
            .map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "JSON list of tokens, or JSON object of arrays"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, output: &ExecutionOutput) -> Result<String, FormatError> {
        serde_yaml::to_string(output).map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML sequence of tokens, or YAML mapping of arrays"
    }
}
