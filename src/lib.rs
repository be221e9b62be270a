//! # deobfuscate
//!
//! Normalizes obfuscated script source into a readable form: decodes `\xNN`
//! escapes, cuts the source into statement tokens, recovers array-literal
//! declarations (including nested ones) and optionally inlines indexed
//! references to those arrays.
//!
//! Start at [`deob::pipeline::PipelineExecutor`].

pub mod deob;
