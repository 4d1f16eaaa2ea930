//! Restricted literal evaluation for environment values and instance files.
//!
//! Responsibilities:
//! - Parse a single literal expression (`parse_literal`) into a `ConfigValue`.
//! - Parse a file of `NAME = literal` statements (`parse_assignments`).
//!
//! Does NOT handle:
//! - Expressions of any kind: names other than `True`/`False`/`None`, calls,
//!   operators, attribute access and comprehensions are all rejected.
//! - Deciding what to do on failure; callers choose between fallback and abort.
//!
//! Invariants:
//! - Parsing never executes anything; the grammar only covers literals.
//! - Sequences, tuples and sets become arrays; mappings become objects.
//! - Errors report the byte offset plus 1-based line and column of the failure.

mod lexer;
mod parser;

use thiserror::Error;

use crate::types::ConfigValue;
use lexer::Lexer;
use parser::Parser;

/// Failure to parse literal text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct LiteralError {
    /// Byte offset of the offending token.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// Description of the problem.
    pub message: String,
}

impl LiteralError {
    pub(crate) fn at(src: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(src.len());
        let before = &src[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
            message: message.into(),
        }
    }
}

/// Parse one literal value such as `42`, `'text'`, `[1, 2]` or `{'a': True}`.
pub fn parse_literal(src: &str) -> Result<ConfigValue, LiteralError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(src, tokens).parse_single()
}

/// Parse `raw` as a literal, or keep it as a plain string if it is not one.
pub fn parse_or_string(raw: &str) -> ConfigValue {
    parse_literal(raw).unwrap_or_else(|_| ConfigValue::String(raw.to_string()))
}

/// Parse `NAME = literal` statements in source order.
///
/// Names are returned as written; filtering by naming convention is left to
/// the caller.
pub fn parse_assignments(src: &str) -> Result<Vec<(String, ConfigValue)>, LiteralError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(src, tokens).parse_statements()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constants() {
        assert_eq!(parse_literal("True").unwrap(), json!(true));
        assert_eq!(parse_literal("False").unwrap(), json!(false));
        assert_eq!(parse_literal("None").unwrap(), json!(null));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_literal("1234").unwrap(), json!(1234));
        assert_eq!(parse_literal("-17").unwrap(), json!(-17));
        assert_eq!(parse_literal("+3").unwrap(), json!(3));
        assert_eq!(parse_literal("1_000_000").unwrap(), json!(1_000_000));
        assert_eq!(parse_literal("0x1F").unwrap(), json!(31));
        assert_eq!(parse_literal("0o17").unwrap(), json!(15));
        assert_eq!(parse_literal("0b101").unwrap(), json!(5));
        assert_eq!(parse_literal("2.5").unwrap(), json!(2.5));
        assert_eq!(parse_literal("-1e3").unwrap(), json!(-1000.0));
        assert_eq!(parse_literal("-9223372036854775808").unwrap(), json!(i64::MIN));
        assert_eq!(parse_literal("18446744073709551615").unwrap(), json!(u64::MAX));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(parse_literal("0123").is_err());
        assert!(parse_literal("1__0").is_err());
        assert!(parse_literal("18446744073709551616").is_err());
        assert!(parse_literal("--1").is_err());
        assert!(parse_literal("1e999").is_err());
    }

    #[test]
    fn test_strings() {
        assert_eq!(parse_literal("'single'").unwrap(), json!("single"));
        assert_eq!(parse_literal("\"double\"").unwrap(), json!("double"));
        assert_eq!(parse_literal("'con' \"cat\"").unwrap(), json!("concat"));
        assert_eq!(parse_literal("'line\\nbreak'").unwrap(), json!("line\nbreak"));
        assert_eq!(parse_literal("u'unicode'").unwrap(), json!("unicode"));
    }

    #[test]
    fn test_containers() {
        assert_eq!(parse_literal("[1, 'two', None]").unwrap(), json!([1, "two", null]));
        assert_eq!(parse_literal("(1, 2,)").unwrap(), json!([1, 2]));
        assert_eq!(parse_literal("(1,)").unwrap(), json!([1]));
        assert_eq!(parse_literal("(1)").unwrap(), json!(1));
        assert_eq!(parse_literal("()").unwrap(), json!([]));
        assert_eq!(parse_literal("{}").unwrap(), json!({}));
        assert_eq!(parse_literal("{1, 2, 1}").unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_sign_before_parenthesized_number() {
        assert_eq!(parse_literal("-(1)").unwrap(), json!(-1));
        assert_eq!(parse_literal("+((2.5))").unwrap(), json!(2.5));
        assert_eq!(parse_literal("[-(3), 4]").unwrap(), json!([-3, 4]));
        assert!(parse_literal("-(1,)").is_err());
        assert!(parse_literal("-(-1)").is_err());
        assert!(parse_literal("-()").is_err());
        assert!(parse_literal("-(1").is_err());
    }

    #[test]
    fn test_sets_of_tuples() {
        assert_eq!(parse_literal("{(1, 2)}").unwrap(), json!([[1, 2]]));
        assert_eq!(parse_literal("{(1, 2), 3, (1, 2),}").unwrap(), json!([[1, 2], 3]));
        assert_eq!(parse_literal("{((1,), 'a')}").unwrap(), json!([[[1], "a"]]));
        assert!(parse_literal("{[1]}").is_err());
        assert!(parse_literal("{1, (2, [3])}").is_err());
        assert!(parse_literal("{({},)}").is_err());
    }

    #[test]
    fn test_nested_mapping() {
        let value = parse_literal(
            "{'complex': {'python': 'dict'}, 'with': ['list', 'and', 1234]}",
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"complex": {"python": "dict"}, "with": ["list", "and", 1234]})
        );
    }

    #[test]
    fn test_non_string_mapping_keys() {
        let value = parse_literal("{1: 'a', True: 'b', None: 'c', 'x': 1, 'x': 2}").unwrap();
        assert_eq!(value, json!({"1": "a", "True": "b", "None": "c", "x": 2}));
        assert!(parse_literal("{[1]: 'a'}").is_err());
    }

    #[test]
    fn test_rejects_expressions() {
        for src in [
            "This is just a string",
            "os.environ",
            "__import__('os')",
            "1 + 2",
            "[x for x in y]",
            "f'{secret}'",
            "",
        ] {
            assert!(parse_literal(src).is_err(), "{src:?} should not parse");
        }
    }

    #[test]
    fn test_parse_or_string_falls_back() {
        assert_eq!(parse_or_string("True"), json!(true));
        assert_eq!(parse_or_string("just text"), json!("just text"));
        assert_eq!(parse_or_string("'quoted'"), json!("quoted"));
    }

    #[test]
    fn test_surrounding_whitespace_allowed() {
        assert_eq!(parse_literal("  42 \n").unwrap(), json!(42));
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let src = format!("{}{}", "[".repeat(500), "]".repeat(500));
        let err = parse_literal(&src).unwrap_err();
        assert!(err.message.contains("nested too deeply"));
    }

    #[test]
    fn test_assignments() {
        let src = "# instance settings\nFOLDER = 'folder'\nlower = 1; OTHER = [\n  1,\n  2,\n]\n";
        let parsed = parse_assignments(src).unwrap();
        assert_eq!(
            parsed,
            vec![
                ("FOLDER".to_string(), json!("folder")),
                ("lower".to_string(), json!(1)),
                ("OTHER".to_string(), json!([1, 2])),
            ]
        );
    }

    #[test]
    fn test_assignment_errors_report_position() {
        let err = parse_assignments("A = 1\nB = os.getenv('X')\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 5);
        assert!(err.to_string().contains("line 2, column 5"));
    }

    #[test]
    fn test_assignment_requires_statement_end() {
        assert!(parse_assignments("A = 1 B = 2").is_err());
        assert!(parse_assignments("A == 1").is_err());
        assert!(parse_assignments("import os").is_err());
    }

    #[test]
    fn test_empty_file_has_no_assignments() {
        assert!(parse_assignments("\n# nothing here\n").unwrap().is_empty());
    }
}
