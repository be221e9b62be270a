//! Shared settings loader for the deobfuscate toolchain.
//!
//! `defaults/deob.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DeobConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

pub use config::{ConfigError, ValueKind};

const DEFAULT_TOML: &str = include_str!("../defaults/deob.default.toml");

/// Top-level configuration consumed by deobfuscate applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DeobConfig {
    pub linebreak: LinebreakConfig,
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
}

/// How raw input is cut into statement tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct LinebreakConfig {
    pub delimiters: Vec<String>,
    pub single_line_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub config: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

/// Builds a [`DeobConfig`] from the embedded defaults plus any number of layers.
///
/// Later layers win. Overrides set through [`Loader::set_override`] win over
/// every file layer regardless of the order they were added in.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a TOML settings file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_file(path.as_ref(), true)
    }

    /// Layer a TOML settings file, skipping it if absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_file(path.as_ref(), false)
    }

    /// Layer settings given as TOML text.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Override one dotted key, e.g. `linebreak.delimiters`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<DeobConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<DeobConfig, ConfigError> {
    Loader::new().build()
}
