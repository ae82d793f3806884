use serde::Serialize;
use serde_json::{Map, Value};

use crate::config;

/// Request name -> request body, in file order.
pub type RequestCollection = Map<String, Value>;

/// A request is sendable when it is an object carrying a `method` key.
/// The method's value is not checked; the server is the authority on names.
pub fn request_is_valid(request: &Value) -> bool {
    request
        .as_object()
        .map(|obj| obj.contains_key("method"))
        .unwrap_or(false)
}

/// Returns a copy of `value` with every object's keys in ascending order.
///
/// `preserve_order` makes `Map` insertion-ordered, so sorting has to be explicit.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut entries: Vec<(&String, &Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Pretty JSON with sorted keys and a 4-space indent, the format responses are printed in.
pub fn to_pretty_sorted(value: &Value) -> serde_json::Result<String> {
    let sorted = sort_keys(value);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(config::output::PRETTY_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    sorted.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_is_valid() {
        assert!(request_is_valid(&json!({"id": 1, "method": "bdev_get_bdevs"})));
        // Any method value is accepted.
        assert!(request_is_valid(&json!({"method": 42})));
        assert!(request_is_valid(&json!({"method": null})));
        assert!(!request_is_valid(&json!({"id": 1})));
        assert!(!request_is_valid(&json!({})));
    }

    #[test]
    fn test_request_is_valid_rejects_non_objects() {
        assert!(!request_is_valid(&json!("method")));
        assert!(!request_is_valid(&json!(["method"])));
        assert!(!request_is_valid(&Value::Null));
    }

    #[test]
    fn test_sort_keys_nested() {
        let v: Value = serde_json::from_str(r#"{"b": {"z": 1, "a": 2}, "a": [{"y": 0, "x": 0}]}"#).unwrap();
        let sorted = sort_keys(&v);
        let top: Vec<&String> = sorted.as_object().unwrap().keys().collect();
        assert_eq!(top, vec!["a", "b"]);
        let inner: Vec<&String> = sorted["b"].as_object().unwrap().keys().collect();
        assert_eq!(inner, vec!["a", "z"]);
        let in_array: Vec<&String> = sorted["a"][0].as_object().unwrap().keys().collect();
        assert_eq!(in_array, vec!["x", "y"]);
    }

    #[test]
    fn test_to_pretty_sorted_format() {
        let v: Value = serde_json::from_str(r#"{"result": [], "id": 1}"#).unwrap();
        let out = to_pretty_sorted(&v).unwrap();
        assert_eq!(out, "{\n    \"id\": 1,\n    \"result\": []\n}");
    }

    #[test]
    fn test_to_pretty_sorted_reparses_equal() {
        let v = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "result": [{"name": "Malloc0", "block_size": 512, "claimed": false}, null, 1.5, "s"]
        });
        let out = to_pretty_sorted(&v).unwrap();
        let back: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_to_pretty_sorted_keeps_utf8_unescaped() {
        let v = json!({"name": "nvme-é"});
        assert_eq!(to_pretty_sorted(&v).unwrap(), "{\n    \"name\": \"nvme-é\"\n}");
    }

    #[test]
    fn test_to_pretty_sorted_scalars_and_arrays() {
        assert_eq!(to_pretty_sorted(&json!(true)).unwrap(), "true");
        assert_eq!(to_pretty_sorted(&json!([1, 2])).unwrap(), "[\n    1,\n    2\n]");
    }
}
