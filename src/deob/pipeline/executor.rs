//! Runs named configurations over raw source text
//!
//! Every run linebreaks first, then applies the stages of the chosen
//! [`PipelineSpec`], then produces the [`TargetSpec`]: the final tokens, or the
//! arrays declared in them. Only in-memory text goes in and out; reading and
//! writing files is left to the caller.

use crate::deob::arrays::{find_arrays, ArrayTable};
use crate::deob::error::DeobError;
use crate::deob::formats::{FormatError, FormatRegistry};
use crate::deob::pipeline::config::{ConfigRegistry, PipelineSpec, ProcessingConfig, TargetSpec};
use crate::deob::pipeline::mapper::walk_stream;
use crate::deob::pipeline::mappers::{
    generate_linebreaks, ArrayReferencesMapper, HexCharsMapper, DEFAULT_DELIMITER,
};
use crate::deob::pipeline::stream::TokenStream;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// No configuration is registered under this name.
    UnknownConfig(String),
    /// A stage rejected its input.
    Stage {
        stage: &'static str,
        source: DeobError,
    },
    /// The output could not be serialized.
    Format(FormatError),
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::UnknownConfig(name) => write!(f, "Unknown configuration '{name}'"),
            ExecutionError::Stage { stage, source } => write!(f, "Stage '{stage}' failed: {source}"),
            ExecutionError::Format(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecutionError::UnknownConfig(_) => None,
            ExecutionError::Stage { source, .. } => Some(source),
            ExecutionError::Format(err) => Some(err),
        }
    }
}

impl From<FormatError> for ExecutionError {
    fn from(err: FormatError) -> Self {
        ExecutionError::Format(err)
    }
}

fn in_stage(stage: &'static str) -> impl Fn(DeobError) -> ExecutionError {
    move |source| ExecutionError::Stage { stage, source }
}

/// What a run produced, per its [`TargetSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExecutionOutput {
    Tokens(TokenStream),
    Arrays(ArrayTable),
}

/// How raw input is linebroken before the other stages run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinebreakSettings {
    /// Applied in order; an empty list means the default `;`.
    pub delimiters: Vec<String>,
    /// Leave multi-line input as one token per line, only linebreaking input
    /// that arrives as a single line.
    pub single_line_only: bool,
}

impl Default for LinebreakSettings {
    fn default() -> Self {
        LinebreakSettings {
            delimiters: vec![DEFAULT_DELIMITER.to_string()],
            single_line_only: false,
        }
    }
}

impl From<&deob_config::LinebreakConfig> for LinebreakSettings {
    fn from(config: &deob_config::LinebreakConfig) -> Self {
        LinebreakSettings {
            delimiters: config.delimiters.clone(),
            single_line_only: config.single_line_only,
        }
    }
}

/// Runs configurations from a [`ConfigRegistry`] and serializes their output.
pub struct PipelineExecutor {
    registry: ConfigRegistry,
    formats: FormatRegistry,
    linebreak: LinebreakSettings,
}

impl PipelineExecutor {
    /// Built-in configurations and formats, default linebreaking.
    pub fn new() -> Self {
        Self::with_registry(ConfigRegistry::with_defaults())
    }

    pub fn with_registry(registry: ConfigRegistry) -> Self {
        PipelineExecutor {
            registry,
            formats: FormatRegistry::with_defaults(),
            linebreak: LinebreakSettings::default(),
        }
    }

    /// Built-in configurations with linebreaking taken from loaded settings.
    pub fn from_config(config: &deob_config::DeobConfig) -> Self {
        Self::new().with_linebreak(LinebreakSettings::from(&config.linebreak))
    }

    pub fn with_linebreak(mut self, linebreak: LinebreakSettings) -> Self {
        self.linebreak = linebreak;
        self
    }

    /// Run the configuration called `config_name` over `source`.
    pub fn execute(
        &self,
        config_name: &str,
        source: &str,
    ) -> Result<ExecutionOutput, ExecutionError> {
        let config = self
            .registry
            .get(config_name)
            .ok_or_else(|| ExecutionError::UnknownConfig(config_name.to_string()))?;
        tracing::debug!(
            config = %config.name,
            stages = ?config.spec.stage_names(),
            bytes = source.len(),
            "executing"
        );

        let stream = self.linebreak(TokenStream::from_source(source))?;
        let stream = run_stages(stream, config.spec)?;
        match config.target {
            TargetSpec::Tokens => Ok(ExecutionOutput::Tokens(stream)),
            TargetSpec::Arrays => find_arrays(&stream)
                .map(ExecutionOutput::Arrays)
                .map_err(in_stage("find-arrays")),
        }
    }

    /// Run `config_name` over `source` and render the result as `format`.
    pub fn execute_and_serialize(
        &self,
        config_name: &str,
        source: &str,
        format: &str,
    ) -> Result<String, ExecutionError> {
        let output = self.execute(config_name, source)?;
        Ok(self.formats.serialize(&output, format)?)
    }

    fn linebreak(&self, stream: TokenStream) -> Result<TokenStream, ExecutionError> {
        if self.linebreak.single_line_only && stream.len() > 1 {
            tracing::debug!(lines = stream.len(), "multi-line input, linebreaking skipped");
            return Ok(stream);
        }
        let broken = generate_linebreaks(stream, &self.linebreak.delimiters)
            .map_err(in_stage("linebreak"))?;
        Ok(broken.unwrap_or_default())
    }

    pub fn list_configs(&self) -> Vec<&ProcessingConfig> {
        self.registry.list_all()
    }

    pub fn list_formats(&self) -> Vec<String> {
        self.formats.list_formats()
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    pub fn linebreak_settings(&self) -> &LinebreakSettings {
        &self.linebreak
    }
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn run_stages(stream: TokenStream, spec: PipelineSpec) -> Result<TokenStream, ExecutionError> {
    if spec == PipelineSpec::Raw {
        return Ok(stream);
    }
    let stream = walk_stream(stream, &mut HexCharsMapper::new()).map_err(in_stage("hex-chars"))?;
    if spec == PipelineSpec::Decode {
        return Ok(stream);
    }
    let table = find_arrays(&stream).map_err(in_stage("find-arrays"))?;
    walk_stream(stream, &mut ArrayReferencesMapper::new(&table))
        .map_err(in_stage("array-references"))
}
