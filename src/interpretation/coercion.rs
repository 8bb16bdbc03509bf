// ABOUTME: Tolerant field readers that turn loosely-typed vendor JSON into typed values
// ABOUTME: Accepts numeric strings, treats null and absent alike, and substitutes defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Field coercion
//!
//! Readers never fail. A value of the wrong shape is treated as absent and the
//! caller's default is used instead.

use serde_json::{Map, Value};

/// Read-only view of one JSON object
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
}

impl<'a> FieldReader<'a> {
    /// View `node`; non-objects behave like an empty object
    #[must_use]
    pub fn new(node: &'a Value) -> Self {
        Self {
            object: node.as_object(),
        }
    }

    /// Whether `field` is present with a non-null value
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Whether `field` is present at all, null included
    #[must_use]
    pub fn contains_key(&self, field: &str) -> bool {
        self.object.is_some_and(|map| map.contains_key(field))
    }

    /// Non-null value of `field`
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.object
            .and_then(|map| map.get(field))
            .filter(|value| !value.is_null())
    }

    /// Number from a JSON number or numeric string
    #[must_use]
    pub fn optional_number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(value_as_f64)
    }

    /// Number, or `default` when absent or unparseable
    #[must_use]
    pub fn number(&self, field: &str, default: f64) -> f64 {
        self.optional_number(field).unwrap_or(default)
    }

    /// Number rounded to the nearest integer, or `default`
    #[must_use]
    pub fn integer(&self, field: &str, default: i64) -> i64 {
        self.optional_number(field)
            .map_or(default, |value| value.round() as i64)
    }

    /// Explicit JSON boolean, or `default` for anything else (including `"true"` strings)
    #[must_use]
    pub fn boolean(&self, field: &str, default: bool) -> bool {
        self.get(field).and_then(Value::as_bool).unwrap_or(default)
    }

    /// String value; numbers and booleans are rendered as text
    #[must_use]
    pub fn optional_string(&self, field: &str) -> Option<String> {
        self.get(field).and_then(value_as_string)
    }

    /// String value, or `default` when absent or blank
    #[must_use]
    pub fn string(&self, field: &str, default: &str) -> String {
        self.optional_string(field)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default.to_owned())
    }

    /// Nested object reader; empty when the field is absent or not an object
    #[must_use]
    pub fn child(&self, field: &str) -> Self {
        Self {
            object: self.get(field).and_then(Value::as_object),
        }
    }

    /// Array elements; empty when the field is absent or not an array
    #[must_use]
    pub fn array(&self, field: &str) -> &'a [Value] {
        self.get(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Array elements of the first field that holds an array
    #[must_use]
    pub fn first_array(&self, fields: &[&str]) -> &'a [Value] {
        fields
            .iter()
            .map(|field| self.array(field))
            .find(|items| !items.is_empty())
            .unwrap_or(&[])
    }

    /// Array of strings; non-string scalars are rendered, other elements skipped
    #[must_use]
    pub fn string_list(&self, field: &str) -> Vec<String> {
        self.array(field)
            .iter()
            .filter_map(value_as_string)
            .filter(|s| !s.trim().is_empty())
            .collect()
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Clamp a confidence into `[0, 1]`
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// `value` when strictly positive, else `default`
#[must_use]
pub fn positive_or(value: f64, default: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        default
    }
}

/// `value` when not negative, else zero
#[must_use]
pub fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_accept_numeric_strings() {
        let node = json!({"a": "12.5", "b": " 7 ", "c": "about 5", "d": 3});
        let reader = FieldReader::new(&node);
        assert!((reader.number("a", 0.0) - 12.5).abs() < f64::EPSILON);
        assert!((reader.number("b", 0.0) - 7.0).abs() < f64::EPSILON);
        assert!((reader.number("c", 1.0) - 1.0).abs() < f64::EPSILON);
        assert_eq!(reader.integer("d", 0), 3);
    }

    #[test]
    fn non_finite_strings_are_rejected() {
        let node = json!({"a": "NaN", "b": "inf"});
        let reader = FieldReader::new(&node);
        assert_eq!(reader.optional_number("a"), None);
        assert_eq!(reader.optional_number("b"), None);
    }

    #[test]
    fn null_and_absent_are_the_same() {
        let node = json!({"name": null});
        let reader = FieldReader::new(&node);
        assert_eq!(reader.string("name", "fallback"), "fallback");
        assert_eq!(reader.string("missing", "fallback"), "fallback");
        assert!(reader.contains_key("name"));
        assert!(!reader.has("name"));
    }

    #[test]
    fn booleans_need_json_literals() {
        let node = json!({"a": true, "b": "true", "c": 1, "d": false});
        let reader = FieldReader::new(&node);
        assert!(reader.boolean("a", false));
        assert!(!reader.boolean("b", false));
        assert!(!reader.boolean("c", false));
        assert!(!reader.boolean("d", true));
    }

    #[test]
    fn strings_render_scalars() {
        let node = json!({"n": 42, "list": ["a", 1, {"x": 1}, "", null]});
        let reader = FieldReader::new(&node);
        assert_eq!(reader.string("n", ""), "42");
        assert_eq!(reader.string_list("list"), vec!["a".to_owned(), "1".to_owned()]);
    }

    #[test]
    fn wrong_shapes_read_as_empty() {
        let node = json!({"items": {"not": "an array"}, "child": [1]});
        let reader = FieldReader::new(&node);
        assert!(reader.array("items").is_empty());
        assert!(!reader.child("child").has("anything"));
        assert!(FieldReader::new(&json!(5)).array("items").is_empty());
    }
}
