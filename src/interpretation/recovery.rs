// ABOUTME: Staged recovery of a JSON object from free-form vendor text
// ABOUTME: Strict parse, balanced braces, outer braces, lexical repair, keyword reconstruction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! JSON recovery pipeline
//!
//! Stages run in a fixed order and stop at the first one that yields a JSON
//! object. Only objects count: a bare number or string is not a record.
//!
//! 1. strict parse of the whole text
//! 2. each balanced `{...}` region in order (string literals are skipped)
//! 3. first `{` through last `}`
//! 4. lexical repair of the stage-2/3 candidates
//! 5. schema-specific keyword reconstruction, supplied by the caller

use std::fmt;

use serde_json::Value;

/// Stage that produced the recovered object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryStage {
    /// The whole text parsed as-is
    Strict,
    /// A brace-balanced region parsed
    BalancedBraces,
    /// First `{` through last `}` parsed
    OuterBraces,
    /// A candidate parsed after comment, quote, comma and truncation repair
    Repaired,
    /// No JSON found; an object was rebuilt from keywords in the text
    KeywordReconstruction,
}

impl RecoveryStage {
    /// Stable name for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::BalancedBraces => "balanced_braces",
            Self::OuterBraces => "outer_braces",
            Self::Repaired => "repaired",
            Self::KeywordReconstruction => "keyword_reconstruction",
        }
    }

    /// Whether the object was rebuilt rather than found in the text
    #[must_use]
    pub const fn is_reconstruction(&self) -> bool {
        matches!(self, Self::KeywordReconstruction)
    }
}

impl fmt::Display for RecoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON object recovered from vendor text
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredJson {
    /// Stage that succeeded
    pub stage: RecoveryStage,
    /// The object
    pub node: Value,
}

/// Run every stage in order; `reconstruct` is only invoked when stages 1-4 fail
pub fn recover_json<F>(text: &str, reconstruct: F) -> Option<RecoveredJson>
where
    F: FnOnce(&str) -> Option<Value>,
{
    recover_structured(text).or_else(|| {
        reconstruct(text)
            .filter(Value::is_object)
            .map(|node| RecoveredJson {
                stage: RecoveryStage::KeywordReconstruction,
                node,
            })
    })
}

/// Stages 1-4
#[must_use]
pub fn recover_structured(text: &str) -> Option<RecoveredJson> {
    let found = |stage, node| Some(RecoveredJson { stage, node });

    if let Some(node) = parse_object(text) {
        return found(RecoveryStage::Strict, node);
    }

    if let Some(node) = BalancedRegions::new(text).find_map(parse_object) {
        return found(RecoveryStage::BalancedBraces, node);
    }

    let outer = outer_object(text);
    if let Some(node) = outer.and_then(parse_object) {
        return found(RecoveryStage::OuterBraces, node);
    }

    let balanced = BalancedRegions::new(text).next();
    let tail = text.find('{').map(|start| &text[start..]);
    let mut tried: Vec<&str> = Vec::with_capacity(3);
    for candidate in [balanced, outer, tail].into_iter().flatten() {
        if tried.contains(&candidate) {
            continue;
        }
        tried.push(candidate);
        if let Some(node) = parse_object(&repair_json(candidate)) {
            return found(RecoveryStage::Repaired, node);
        }
    }

    None
}

/// Parse `text` as JSON, accepting only objects
#[must_use]
pub fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

/// First `{` through last `}`, when the last `}` follows the first `{`
#[must_use]
pub fn outer_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// First brace-balanced `{...}` region
#[must_use]
pub fn balanced_object(text: &str) -> Option<&str> {
    BalancedRegions::new(text).next()
}

/// Successive top-level brace-balanced regions of a text
///
/// Braces inside double-quoted string literals are ignored. Iteration stops at
/// the first region that never closes.
struct BalancedRegions<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> BalancedRegions<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }
}

impl<'a> Iterator for BalancedRegions<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor + self.text.get(self.cursor..)?.find('{')?;
        let mut depth = 0_usize;
        let mut in_string = false;
        let mut escaped = false;

        for (offset, ch) in self.text[start..].char_indices() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    in_string = false;
                }
                continue;
            }
            match ch {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = start + offset;
                        self.cursor = end + 1;
                        return Some(&self.text[start..=end]);
                    }
                }
                _ => {}
            }
        }

        self.cursor = self.text.len();
        None
    }
}

/// Lexical repair: strip comments, convert single-quoted strings, drop trailing
/// commas, and close a truncated object
#[must_use]
pub fn repair_json(candidate: &str) -> String {
    let without_comments = strip_comments(candidate);
    let quoted = normalize_quotes(&without_comments);
    let without_commas = remove_trailing_commas(&quoted);
    close_truncated(&without_commas)
}

/// Remove `//` line comments and `/* */` block comments outside string literals
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        let next = chars.peek().copied();
        match (ch, next) {
            ('"' | '\'', _) => {
                quote = Some(ch);
                out.push(ch);
            }
            ('/', Some('/')) => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for c in chars.by_ref() {
                    if previous == '*' && c == '/' {
                        break;
                    }
                    previous = c;
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Rewrite single-quoted string literals as double-quoted ones
///
/// Apostrophes inside double-quoted strings are left alone.
fn normalize_quotes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;

    for ch in input.chars() {
        if in_double {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_double = false;
            }
            continue;
        }

        if in_single {
            if escaped {
                escaped = false;
                if ch == '\'' {
                    // \' is not a JSON escape
                    out.pop();
                }
                out.push(ch);
            } else {
                match ch {
                    '\\' => {
                        escaped = true;
                        out.push(ch);
                    }
                    '"' => out.push_str("\\\""),
                    '\'' => {
                        in_single = false;
                        out.push('"');
                    }
                    _ => out.push(ch),
                }
            }
            continue;
        }

        match ch {
            '"' => {
                in_double = true;
                out.push(ch);
            }
            '\'' => {
                in_single = true;
                out.push('"');
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Drop commas whose next non-whitespace character closes an object or array
fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (index, &ch) in chars.iter().enumerate() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        }
        if ch == ','
            && chars[index + 1..]
                .iter()
                .find(|c| !c.is_whitespace())
                .is_some_and(|c| matches!(c, '}' | ']'))
        {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Close an unterminated string and any open arrays or objects
fn close_truncated(input: &str) -> String {
    let mut closers: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in input.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => closers.push('}'),
            '[' => closers.push(']'),
            '}' | ']' => {
                closers.pop();
            }
            _ => {}
        }
    }

    if closers.is_empty() && !in_string {
        return input.to_owned();
    }

    let mut out = input.to_owned();
    if in_string {
        if escaped {
            out.pop();
        }
        out.push('"');
    }

    let kept = out.trim_end().len();
    out.truncate(kept);
    if out.ends_with(',') {
        out.pop();
    } else if out.ends_with(':') {
        out.push_str(" null");
    }

    while let Some(closer) = closers.pop() {
        out.push(closer);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_parse_rejects_non_objects() {
        assert!(parse_object("42").is_none());
        assert!(parse_object("\"text\"").is_none());
        assert!(parse_object("[1, 2]").is_none());
        assert!(parse_object("{}").is_some());
    }

    #[test]
    fn balanced_region_skips_braces_in_strings() {
        let text = r#"Note: {"note": "a } b", "n": 1} trailing }"#;
        assert_eq!(balanced_object(text), Some(r#"{"note": "a } b", "n": 1}"#));
    }

    #[test]
    fn later_balanced_region_is_tried() {
        let text = r#"Format {like this} then {"a": 1}"#;
        let recovered = recover_structured(text).unwrap();
        assert_eq!(recovered.stage, RecoveryStage::BalancedBraces);
        assert_eq!(recovered.node, json!({"a": 1}));
    }

    #[test]
    fn unclosed_region_yields_nothing() {
        assert_eq!(balanced_object(r#"{"a": {"b": 1}"#), None);
    }

    #[test]
    fn outer_requires_ordering() {
        assert_eq!(outer_object("} nothing {"), None);
        assert_eq!(outer_object("x {a} y {b} z"), Some("{a} y {b}"));
    }

    #[test]
    fn comments_inside_strings_survive() {
        let repaired = repair_json(
            "{\"url\": \"https://example.com/a\", // the link\n \"n\": 1 /* block */}",
        );
        assert_eq!(
            parse_object(&repaired),
            Some(json!({"url": "https://example.com/a", "n": 1}))
        );
    }

    #[test]
    fn single_quotes_and_trailing_commas() {
        let repaired = repair_json("{'name': 'Tea', 'items': [1, 2, ], }");
        assert_eq!(
            parse_object(&repaired),
            Some(json!({"name": "Tea", "items": [1, 2]}))
        );
    }

    #[test]
    fn apostrophes_in_double_quoted_strings_survive() {
        let repaired = repair_json(r#"{"name": "Caesar's salad",}"#);
        assert_eq!(parse_object(&repaired), Some(json!({"name": "Caesar's salad"})));
    }

    #[test]
    fn truncated_object_is_closed() {
        let repaired = repair_json(r#"{"foodItems": [{"name": "Apple", "estimatedWeight": 150}, {"name": "Ban"#);
        let node = parse_object(&repaired).unwrap();
        assert_eq!(node["foodItems"][0]["name"], "Apple");
        assert_eq!(node["foodItems"][1]["name"], "Ban");
    }

    #[test]
    fn dangling_key_gets_null() {
        let repaired = repair_json(r#"{"a": 1, "b":"#);
        assert_eq!(parse_object(&repaired), Some(json!({"a": 1, "b": null})));
    }

    #[test]
    fn reconstruction_runs_only_when_structure_fails() {
        let recovered = recover_json(r#"{"a": 1}"#, |_| panic!("not expected"));
        assert_eq!(recovered.map(|r| r.stage), Some(RecoveryStage::Strict));

        let recovered = recover_json("just words", |_| Some(json!({"rebuilt": true})));
        assert_eq!(
            recovered.map(|r| r.stage),
            Some(RecoveryStage::KeywordReconstruction)
        );

        assert!(recover_json("just words", |_| None).is_none());
    }
}
