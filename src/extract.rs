use serde_json::Value;

/// Collects every scalar leaf of `root` as text, in document order.
///
/// Objects and arrays are walked transparently. Numbers keep their literal
/// form, booleans render as `true`/`false`, and `null` contributes nothing.
/// Duplicates are kept.
pub fn extract_values(root: &Value) -> Vec<String> {
    let mut values = Vec::new();
    let mut stack = vec![root];

    while let Some(value) = stack.pop() {
        match value {
            Value::String(text) => values.push(text.clone()),
            Value::Number(number) => values.push(number.to_string()),
            Value::Bool(flag) => values.push(flag.to_string()),
            Value::Null => {}
            Value::Object(map) => stack.extend(map.values().rev()),
            Value::Array(items) => stack.extend(items.iter().rev()),
        }
    }

    values
}
