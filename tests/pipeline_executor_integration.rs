//! Integration tests for PipelineExecutor
//!
//! These tests validate that the config-based executor:
//! 1. Produces the expected tokens and arrays on a realistic obfuscated script
//! 2. Only substitutes array references when asked to
//! 3. All default configs and formats work without errors

use deobfuscate::deob::arrays::Element;
use deobfuscate::deob::pipeline::{ExecutionOutput, LinebreakSettings, PipelineExecutor};
use rstest::rstest;

const STRING_ARRAY: &str = include_str!("fixtures/string_array.js");

fn lit(value: &str) -> Element {
    Element::Literal(value.to_string())
}

fn arr(items: Vec<Element>) -> Element {
    Element::Array(items)
}

#[test]
fn test_default_decodes_without_resolving() {
    let executor = PipelineExecutor::new();
    let output = executor
        .execute_and_serialize("default", STRING_ARRAY, "text")
        .unwrap();

    insta::assert_snapshot!(output, @r#"
    var _0x4a2f = ["log", "Hello", [1, 2], "world"];
    console[_0x4a2f[0]](_0x4a2f[1] + ", " + _0x4a2f[3]);
    var pairs = [[1, 2], [3, [4, 5]], 6];
    "#);
}

#[test]
fn test_resolve_inlines_references() {
    let executor = PipelineExecutor::new();
    let output = executor
        .execute_and_serialize("resolve", STRING_ARRAY, "text")
        .unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[1], r#"console["log"]("Hello" + ", " + "world");"#);
}

#[test]
fn test_arrays_recovered_with_nesting() {
    let executor = PipelineExecutor::new();
    let output = executor.execute("arrays", STRING_ARRAY).unwrap();

    let ExecutionOutput::Arrays(table) = output else {
        panic!("Expected Arrays output");
    };
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.get("_0x4a2f"),
        Some(&vec![
            lit(r#""log""#),
            lit(r#""Hello""#),
            arr(vec![lit("1"), lit("2")]),
            lit(r#""world""#),
        ])
    );
    assert_eq!(
        table.get("pairs"),
        Some(&vec![
            arr(vec![lit("1"), lit("2")]),
            arr(vec![lit("3"), arr(vec![lit("4"), lit("5")])]),
            lit("6"),
        ])
    );
}

#[test]
fn test_arrays_as_json() {
    let executor = PipelineExecutor::new();
    let json = executor
        .execute_and_serialize("arrays", STRING_ARRAY, "json")
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["pairs"], serde_json::json!([["1", "2"], ["3", ["4", "5"]], "6"]));
}

#[test]
fn test_single_line_blob_split_like_multiline_source() {
    let blob = STRING_ARRAY.replace('\n', "");
    let executor = PipelineExecutor::new();

    let from_blob = executor.execute("default", &blob).unwrap();
    let from_lines = executor.execute("default", STRING_ARRAY).unwrap();
    assert_eq!(from_blob, from_lines);
}

#[test]
fn test_single_line_only_with_comma_delimiter() {
    let executor = PipelineExecutor::new().with_linebreak(LinebreakSettings {
        delimiters: vec![";".into(), ",".into()],
        single_line_only: true,
    });

    let output = executor.execute("tokens-raw", "f(a, b); g()").unwrap();
    let ExecutionOutput::Tokens(stream) = output else {
        panic!("Expected Tokens output");
    };
    assert_eq!(stream.tokens(), &["f(a,", " b);", " g()"]);

    // multi-line input is left one token per line
    let output = executor.execute("tokens-raw", "f(a, b);\ng()").unwrap();
    let ExecutionOutput::Tokens(stream) = output else {
        panic!("Expected Tokens output");
    };
    assert_eq!(stream.tokens(), &["f(a, b);", "g()"]);
}

#[rstest]
fn test_every_config_and_format(
    #[values("default", "resolve", "arrays", "tokens-raw")] config: &str,
    #[values("text", "json", "yaml")] format: &str,
) {
    let executor = PipelineExecutor::new();
    let result = executor.execute_and_serialize(config, STRING_ARRAY, format);
    assert!(result.is_ok(), "{config}/{format} failed: {:?}", result.err());
}

#[test]
fn test_list_configs() {
    let executor = PipelineExecutor::new();
    let names: Vec<_> = executor
        .list_configs()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["arrays", "default", "resolve", "tokens-raw"]);
}
