//! Named processing configurations
//!
//! A configuration pairs a set of stages ([`PipelineSpec`]) with what the run
//! should hand back ([`TargetSpec`]). Linebreaking always runs first; it is
//! controlled by
//! [`LinebreakSettings`](crate::deob::pipeline::LinebreakSettings) instead.

use std::collections::BTreeMap;

/// A named configuration: stages plus target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub name: String,
    pub description: String,
    pub spec: PipelineSpec,
    pub target: TargetSpec,
}

impl ProcessingConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        spec: PipelineSpec,
        target: TargetSpec,
    ) -> Self {
        ProcessingConfig {
            name: name.into(),
            description: description.into(),
            spec,
            target,
        }
    }
}

/// Token stages run after linebreaking, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineSpec {
    /// Nothing beyond linebreaking.
    Raw,
    /// Hex escapes decoded.
    Decode,
    /// Hex escapes decoded, then array references inlined. Opt-in: indices are
    /// resolved against the arrays as declared.
    Resolve,
}

impl PipelineSpec {
    /// Names of the stages this spec runs, linebreaking included.
    pub fn stage_names(self) -> &'static [&'static str] {
        match self {
            PipelineSpec::Raw => &["linebreak"],
            PipelineSpec::Decode => &["linebreak", "hex-chars"],
            PipelineSpec::Resolve => &["linebreak", "hex-chars", "array-references"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSpec {
    /// The token stream after the last stage.
    Tokens,
    /// The arrays declared in that stream.
    Arrays,
}

const BUILTIN: &[(&str, &str, PipelineSpec, TargetSpec)] = &[
    (
        "default",
        "Linebreak and decode hex escapes",
        PipelineSpec::Decode,
        TargetSpec::Tokens,
    ),
    (
        "resolve",
        "Linebreak, decode hex escapes and inline array references",
        PipelineSpec::Resolve,
        TargetSpec::Tokens,
    ),
    (
        "arrays",
        "Linebreak, decode hex escapes and report the declared arrays",
        PipelineSpec::Decode,
        TargetSpec::Arrays,
    ),
    (
        "tokens-raw",
        "Linebreak only",
        PipelineSpec::Raw,
        TargetSpec::Tokens,
    ),
];

/// Configurations by name, iterated in name order.
#[derive(Debug, Clone)]
pub struct ConfigRegistry {
    configs: BTreeMap<String, ProcessingConfig>,
}

impl ConfigRegistry {
    /// A registry with no configurations.
    pub fn new() -> Self {
        ConfigRegistry {
            configs: BTreeMap::new(),
        }
    }

    /// The built-in `default`, `resolve`, `arrays` and `tokens-raw` configurations.
    pub fn with_defaults() -> Self {
        BUILTIN
            .iter()
            .map(|&(name, description, spec, target)| {
                ProcessingConfig::new(name, description, spec, target)
            })
            .collect()
    }

    /// Add `config`, returning the configuration it replaced, if any.
    pub fn register(&mut self, config: ProcessingConfig) -> Option<ProcessingConfig> {
        self.configs.insert(config.name.clone(), config)
    }

    pub fn get(&self, name: &str) -> Option<&ProcessingConfig> {
        self.configs.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    pub fn list_all(&self) -> Vec<&ProcessingConfig> {
        self.configs.values().collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FromIterator<ProcessingConfig> for ConfigRegistry {
    fn from_iter<I: IntoIterator<Item = ProcessingConfig>>(iter: I) -> Self {
        let mut registry = ConfigRegistry::new();
        for config in iter {
            registry.register(config);
        }
        registry
    }
}
