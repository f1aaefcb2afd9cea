//! Key search and lenient field reads over schema-less scrape JSON.

use serde_json::{Map, Value};

/// Collect every value stored under `target_key`, anywhere in `tree`.
///
/// Depth-first: objects in key order, arrays in index order. A matched
/// value is still searched when it is itself an object or array. Scalars
/// are terminals.
pub fn find_all_values<'a>(tree: &'a Value, target_key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect(tree, target_key, &mut found);
    found
}

fn collect<'a>(node: &'a Value, target_key: &str, found: &mut Vec<&'a Value>) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                if key == target_key {
                    found.push(value);
                }
                collect(value, target_key, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, target_key, found);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// String field, or empty when missing or not a string.
pub fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// String field, `None` when missing, null, or not a string.
pub fn opt_str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Non-empty string elements of an array field; empty when missing.
pub fn string_list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Non-negative count. Accepts integers, non-negative floats (truncated)
/// and numeric strings; anything else is 0.
pub fn count_field(obj: &Map<String, Value>, key: &str) -> u64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_all_values_depth_first_order() {
        let tree = json!([
            {"name": "a", "child": {"name": "b"}},
            [{"name": "c"}],
            {"other": 1, "name": "d"}
        ]);

        let names: Vec<_> = find_all_values(&tree, "name")
            .into_iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_find_all_values_recurses_into_matches() {
        let tree = json!({
            "topPosts": [
                {"url": "outer", "topPosts": [{"url": "inner"}]}
            ]
        });

        let found = find_all_values(&tree, "topPosts");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0][0]["url"], "outer");
        assert_eq!(found[1][0]["url"], "inner");
    }

    #[test]
    fn test_find_all_values_follows_source_key_order() {
        let tree: Value =
            serde_json::from_str(r#"{"z": {"k": 1}, "a": {"k": 2}, "k": 3}"#).unwrap();

        let found: Vec<_> = find_all_values(&tree, "k")
            .into_iter()
            .filter_map(Value::as_i64)
            .collect();
        assert_eq!(found, [1, 2, 3]);
    }

    #[test]
    fn test_find_all_values_scalars_and_misses() {
        assert!(find_all_values(&json!("topPosts"), "topPosts").is_empty());
        assert!(find_all_values(&json!(null), "topPosts").is_empty());
        assert!(find_all_values(&json!({"a": [1, 2, {"b": null}]}), "topPosts").is_empty());
    }

    #[test]
    fn test_null_match_is_still_reported() {
        let tree = json!({"locationName": null});
        let found = find_all_values(&tree, "locationName");
        assert_eq!(found, [&Value::Null]);
    }

    #[test]
    fn test_count_field_variants() {
        let obj = json!({
            "int": 42,
            "neg": -1,
            "float": 12.9,
            "text": " 300 ",
            "junk": "lots",
            "null": null,
            "list": [1]
        });
        let obj = obj.as_object().unwrap();

        assert_eq!(count_field(obj, "int"), 42);
        assert_eq!(count_field(obj, "neg"), 0);
        assert_eq!(count_field(obj, "float"), 12);
        assert_eq!(count_field(obj, "text"), 300);
        assert_eq!(count_field(obj, "junk"), 0);
        assert_eq!(count_field(obj, "null"), 0);
        assert_eq!(count_field(obj, "list"), 0);
        assert_eq!(count_field(obj, "missing"), 0);
    }

    #[test]
    fn test_string_fields() {
        let obj = json!({
            "caption": "hello",
            "url": 7,
            "hashtags": ["a", 1, "", "b", null]
        });
        let obj = obj.as_object().unwrap();

        assert_eq!(str_field(obj, "caption"), "hello");
        assert_eq!(str_field(obj, "url"), "");
        assert_eq!(opt_str_field(obj, "url"), None);
        assert_eq!(opt_str_field(obj, "caption").as_deref(), Some("hello"));
        assert_eq!(string_list_field(obj, "hashtags"), ["a", "b"]);
        assert!(string_list_field(obj, "caption").is_empty());
    }
}
