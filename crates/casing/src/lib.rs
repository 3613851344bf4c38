//! Key-casing conversion for backend JSON payloads
//!
//! The backend serializes mapping keys in snake_case; the frontend consumes
//! them in camelCase. [`camelize_value`] rewrites every key of a freshly
//! parsed payload before it is handed to a component.

use serde_json::Value;

/// Converts a string in snake_case or kebab-case to camelCase.
///
/// Words may be separated by `-`, `_`, or whitespace; separators are removed
/// and the letter following each one is uppercased. A run of consecutive
/// separators counts as a single word break, so `a__b` becomes `aB`. Input
/// that is already camelCase comes back unchanged.
pub fn camelize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;
    for c in input.chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Returns a value with its mapping keys recursively replaced by their
/// camelCase form.
///
/// Arrays are converted element-wise; strings, numbers, booleans, and null
/// pass through untouched. Payloads are always freshly parsed JSON, so the
/// input is finite and conversion terminates.
pub fn camelize_value(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(camelize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (camelize(&key), camelize_value(value)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camelize_snake_case() {
        assert_eq!(camelize("user_id"), "userId");
        assert_eq!(camelize("first_name"), "firstName");
    }

    #[test]
    fn camelize_kebab_case() {
        assert_eq!(camelize("nested-key"), "nestedKey");
    }

    #[test]
    fn camelize_whitespace_separated() {
        assert_eq!(camelize("a few words"), "aFewWords");
    }

    #[test]
    fn camelize_leaves_camel_case_alone() {
        assert_eq!(camelize("alreadyCamel"), "alreadyCamel");
    }

    // A separator run is one word break. Pair-wise replacement would instead
    // let the second separator swallow the uppercase slot ("a__b" -> "ab");
    // idempotency holds either way.
    #[test]
    fn camelize_collapses_repeated_separators() {
        assert_eq!(camelize("a__b"), "aB");
        assert_eq!(camelize("a-_b"), "aB");
    }

    #[test]
    fn camelize_value_rewrites_nested_keys() {
        let input = json!({"user_id": 1, "nested-key": {"first_name": "a"}});
        let expected = json!({"userId": 1, "nestedKey": {"firstName": "a"}});
        assert_eq!(camelize_value(input), expected);
    }

    #[test]
    fn camelize_value_converts_array_elements() {
        let input = json!([{"item_id": 1}, {"item_id": 2}]);
        let expected = json!([{"itemId": 1}, {"itemId": 2}]);
        assert_eq!(camelize_value(input), expected);
    }

    #[test]
    fn camelize_value_passes_scalars_through() {
        assert_eq!(camelize_value(json!("a_string")), json!("a_string"));
        assert_eq!(camelize_value(json!(3)), json!(3));
        assert_eq!(camelize_value(json!(true)), json!(true));
        assert_eq!(camelize_value(Value::Null), Value::Null);
    }

    #[test]
    fn camelize_value_preserves_leaf_values() {
        let input = json!({"outer_key": {"inner_key": "inner_value", "a_list": [1, "two", null]}});
        let converted = camelize_value(input);
        assert_eq!(converted["outerKey"]["innerKey"], json!("inner_value"));
        assert_eq!(converted["outerKey"]["aList"], json!([1, "two", null]));
    }

    #[test]
    fn camelize_value_is_idempotent() {
        let input = json!({
            "user_id": 7,
            "nested-key": {"first_name": "a", "tags": [{"tag_id": 1}]},
            "plain": [1, 2, 3]
        });
        let once = camelize_value(input);
        let twice = camelize_value(once.clone());
        assert_eq!(once, twice);
    }
}
