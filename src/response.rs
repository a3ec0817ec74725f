//! Response envelope interpretation
//!
//! The relay wraps its payload under `data` on some paths and returns it
//! flat on others. Fields are read through explicit optional accessors and
//! default rather than fail.

use crate::types::InterpretedResponse;
use serde_json::{Map, Value};

/// Extract `success`, `code`, `message` and `signatures` from a response body
pub fn interpret(body: &Map<String, Value>) -> InterpretedResponse {
    let level = resolve_level(body);

    let success = level.get("success").and_then(Value::as_bool).unwrap_or(false);
    let code = level.get("code").and_then(as_code).unwrap_or(0);
    let message = level
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut signatures = level
        .get("data")
        .and_then(Value::as_object)
        .map(|data| string_array(data.get("signatures")))
        .unwrap_or_default();
    if signatures.is_empty() {
        signatures = string_array(level.get("signatures"));
    }

    InterpretedResponse {
        success,
        code,
        message,
        signatures,
    }
}

/// `body.data` when it is an object, otherwise the body itself
fn resolve_level(body: &Map<String, Value>) -> &Map<String, Value> {
    body.get("data").and_then(Value::as_object).unwrap_or(body)
}

fn as_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

/// String elements of an array value; non-strings are dropped
fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
