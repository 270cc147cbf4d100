use serde_json::Value;
use thiserror::Error;

/// Longest slice of malformed input quoted back in a syntax error
const EXCERPT_LEN: usize = 40;

/// Output layout for re-serialized JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    /// Single line, no insignificant whitespace
    Compact,
    /// Two spaces of indentation per nesting level
    Pretty,
}

/// Error types for JSON formatting
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid JSON at line {line}, column {column}: {message} (input: {excerpt:?})")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
        excerpt: String,
    },
    #[error("failed to serialize JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Validate `input` as JSON and re-serialize it in the requested style
///
/// Object keys come back in sorted order.
pub fn format_json(input: &str, style: JsonStyle) -> Result<String, JsonError> {
    let value: Value = serde_json::from_str(input).map_err(|e| JsonError::Syntax {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
        excerpt: excerpt(input),
    })?;

    let output = match style {
        JsonStyle::Compact => serde_json::to_string(&value),
        JsonStyle::Pretty => serde_json::to_string_pretty(&value),
    };
    output.map_err(JsonError::Serialize)
}

fn excerpt(input: &str) -> String {
    let trimmed = input.trim();
    match trimmed.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_uses_two_space_indent() {
        let out = format_json(r#"{"name":"x","items":[1,2]}"#, JsonStyle::Pretty).unwrap();
        let expected = "{\n  \"items\": [\n    1,\n    2\n  ],\n  \"name\": \"x\"\n}";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_compact_strips_whitespace() {
        let input = "{\n    \"a\" : 1,\n    \"b\" : [ true, null ]\n}";
        let out = format_json(input, JsonStyle::Compact).unwrap();
        assert_eq!(out, r#"{"a":1,"b":[true,null]}"#);
    }

    #[test]
    fn test_keys_are_sorted() {
        let out = format_json(r#"{"zeta":1,"alpha":2}"#, JsonStyle::Compact).unwrap();
        assert_eq!(out, r#"{"alpha":2,"zeta":1}"#);
    }

    #[test]
    fn test_scalar_documents() {
        assert_eq!(format_json("42", JsonStyle::Pretty).unwrap(), "42");
        assert_eq!(format_json(" \"s\" ", JsonStyle::Compact).unwrap(), "\"s\"");
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let result = format_json("{\n  \"a\": 1,\n  \"b\": }", JsonStyle::Pretty);
        match result {
            Err(JsonError::Syntax { line, excerpt, .. }) => {
                assert_eq!(line, 3);
                assert!(excerpt.starts_with("{"));
            }
            other => panic!("Expected JsonError::Syntax, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_syntax_error() {
        assert!(matches!(
            format_json("", JsonStyle::Compact),
            Err(JsonError::Syntax { .. })
        ));
    }

    #[test]
    fn test_excerpt_truncates_long_input() {
        let long = format!("[{}", "1,".repeat(100));
        match format_json(&long, JsonStyle::Compact) {
            Err(JsonError::Syntax { excerpt, .. }) => {
                assert!(excerpt.ends_with("..."));
                assert_eq!(excerpt.chars().count(), EXCERPT_LEN + 3);
            }
            other => panic!("Expected JsonError::Syntax, got {:?}", other),
        }
    }
}
