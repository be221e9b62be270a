//! Plain text output
//!
//! Tokens are joined with newlines, the form the deobfuscated script is written
//! back in. An array table is rendered one declaration per line:
//!
//! ```text
//! _0x3f = ["log", ["a", "b"]]
//! ```

use crate::deob::arrays::Element;
use crate::deob::formats::registry::{FormatError, Formatter};
use crate::deob::pipeline::executor::ExecutionOutput;

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, output: &ExecutionOutput) -> Result<String, FormatError> {
        Ok(match output {
            ExecutionOutput::Tokens(stream) => stream.join(),
            ExecutionOutput::Arrays(table) => table
                .iter()
                .map(|(name, array)| format!("{name} = {}", Element::Array(array.clone())))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }

    fn description(&self) -> &str {
        "Newline-joined tokens, or one `name = [...]` line per array"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deob::arrays::ArrayTable;
    use crate::deob::testing::factories::{arr, lit, mk_stream};

    #[test]
    fn test_tokens_joined_by_newline() {
        let output = ExecutionOutput::Tokens(mk_stream(&["a();", " b();"]));
        insta::assert_snapshot!(TextFormatter.serialize(&output).unwrap(), @r"
        a();
         b();
        ");
    }

    #[test]
    fn test_array_table_lines() {
        let mut table = ArrayTable::new();
        table.insert("y", vec![lit("1")]);
        table.insert("x", vec![lit("\"a\""), arr(vec![lit("2"), lit("3")])]);
        let output = ExecutionOutput::Arrays(table);
        assert_eq!(
            TextFormatter.serialize(&output).unwrap(),
            "x = [\"a\", [2, 3]]\ny = [1]"
        );
    }

    #[test]
    fn test_empty_output() {
        let output = ExecutionOutput::Tokens(mk_stream(&[]));
        assert_eq!(TextFormatter.serialize(&output).unwrap(), "");
    }
}
