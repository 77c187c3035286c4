//! Partial-update support: merges a JSON patch into a stored record before
//! the result is deserialized and validated again.

use crate::error::ServiceError;
use serde_json::Value;

/// Recursively merges `patch` into `target`. Nested objects are merged key
/// by key; any other value replaces the stored one. Top-level keys listed in
/// `protected` are ignored.
pub fn merge_patch(target: &mut Value, patch: Value, protected: &[&str]) -> Result<(), ServiceError> {
    let Value::Object(fields) = patch else {
        return Err(ServiceError::Validation(
            "Update body must be a JSON object".to_string(),
        ));
    };
    let Value::Object(stored) = target else {
        return Err(ServiceError::Internal("Stored record is not an object".to_string()));
    };
    for (key, value) in fields {
        if protected.contains(&key.as_str()) {
            continue;
        }
        merge_value(stored.entry(key).or_insert(Value::Null), value);
    }
    Ok(())
}

fn merge_value(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(stored), Value::Object(fields)) => {
            for (key, value) in fields {
                merge_value(stored.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_and_scalars_replace() {
        let mut stored = json!({
            "id": "a",
            "name": "Old",
            "infrastructure": { "wired": { "vendor": "cisco", "dot1x": true } }
        });
        merge_patch(
            &mut stored,
            json!({ "id": "b", "name": "New", "infrastructure": { "wired": { "dot1x": false } } }),
            &["id"],
        )
        .expect("merge");
        assert_eq!(stored["id"], "a");
        assert_eq!(stored["name"], "New");
        assert_eq!(stored["infrastructure"]["wired"]["vendor"], "cisco");
        assert_eq!(stored["infrastructure"]["wired"]["dot1x"], false);
    }

    #[test]
    fn non_object_patch_is_rejected() {
        let mut stored = json!({ "name": "x" });
        let err = merge_patch(&mut stored, json!([1, 2]), &[]).expect_err("array patch");
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
