//! Empty-field pruning.

use serde_json::Value;

/// Remove `null`, `""`, `[]` and `{}` from maps and sequences, bottom-up.
///
/// Children are pruned before their parent is tested, so a map whose only
/// entries were empty disappears as well. The top-level value itself is
/// never removed. Booleans and numbers always survive.
pub fn prune_empty(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, child)| (key, prune_empty(child)))
                .filter(|(_, child)| !is_empty_value(child))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items.into_iter().map(prune_empty).filter(|item| !is_empty_value(item)).collect(),
        ),
        other => other,
    }
}

pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
