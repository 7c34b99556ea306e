//! Field-level diffs for audit entries

use serde_json::Value;

/// Fields that change on every write and carry no information
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Summarize what changed between two serialized records
///
/// Only top-level fields are compared. Returns `None` when nothing but
/// bookkeeping fields changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!("{} -> {}", format_value(before), format_value(after))),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_listed() {
        let before = json!({"description": "Lunch", "amount": 1000});
        let after = json!({"description": "Lunch", "amount": 1250});
        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("amount: 1000 -> 1250")
        );
    }

    #[test]
    fn test_updated_at_alone_is_no_change() {
        let before = json!({"name": "Rent", "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"name": "Rent", "updated_at": "2025-02-01T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"description": "bonus"});
        let after = json!({"source": "Salary"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("description: \"bonus\" -> (removed)"));
        assert!(diff.contains("source: (added) -> \"Salary\""));
    }

    #[test]
    fn test_long_strings_truncated_on_char_boundary() {
        let before = json!({"description": "é".repeat(60)});
        let after = json!({"description": "x"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }
}
