pub mod categories;
pub mod health;
pub mod questions;
pub mod quizzes;

use serde_json::Value;

/// Reads an integer that the client may send either as a JSON number or as
/// a numeric string (`2` and `"2"` are both accepted).
pub(crate) fn numeric_field(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
