//! Pipeline architecture for deobfuscation
//!
//! This module provides:
//! - Config-based processing (`PipelineExecutor`) - for executing named configurations
//! - Transformation infrastructure (`TokenStream`, `StreamMapper`)
//! - The token-level stages as `StreamMapper` implementations

pub mod config;
pub mod executor;
pub mod mapper;
pub mod mappers;
pub mod stream;

pub use config::{ConfigRegistry, PipelineSpec, ProcessingConfig, TargetSpec};
pub use executor::{ExecutionError, ExecutionOutput, LinebreakSettings, PipelineExecutor};
pub use mapper::{walk_stream, StreamMapper};
pub use mappers::{ArrayReferencesMapper, HexCharsMapper, LinebreakMapper};
pub use stream::TokenStream;
