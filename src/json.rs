//! Strict field extraction from raw response trees.
//!
//! Every accessor carries the dotted path of the value it is reading, so a
//! parse failure deep inside a nested payload names the exact field (for
//! example `walletsList[3].balance`).

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// JSON type name used in "expected X, got Y" diagnostics.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

pub(crate) fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}

pub(crate) fn as_object<'a>(path: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::invalid_field(path, "object", type_name(value)))
}

/// A required key; absence is a [`Error::MissingField`].
pub(crate) fn get<'a>(obj: &'a Map<String, Value>, path: &str, key: &str) -> Result<&'a Value> {
    obj.get(key).ok_or_else(|| Error::missing(join(path, key)))
}

pub(crate) fn req_str(obj: &Map<String, Value>, path: &str, key: &str) -> Result<String> {
    let value = get(obj, path, key)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_field(join(path, key), "string", type_name(value)))
}

pub(crate) fn req_bool(obj: &Map<String, Value>, path: &str, key: &str) -> Result<bool> {
    let value = get(obj, path, key)?;
    value
        .as_bool()
        .ok_or_else(|| Error::invalid_field(join(path, key), "bool", type_name(value)))
}

pub(crate) fn req_u64(obj: &Map<String, Value>, path: &str, key: &str) -> Result<u64> {
    let value = get(obj, path, key)?;
    match value.as_i64() {
        Some(n) if n >= 0 => Ok(n as u64),
        Some(n) => Err(Error::invalid_field(
            join(path, key),
            "non-negative integer",
            n.to_string(),
        )),
        None => Err(Error::invalid_field(
            join(path, key),
            "integer",
            type_name(value),
        )),
    }
}

pub(crate) fn req_array<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Vec<Value>> {
    let value = get(obj, path, key)?;
    value
        .as_array()
        .ok_or_else(|| Error::invalid_field(join(path, key), "array", type_name(value)))
}

pub(crate) fn req_object<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Map<String, Value>> {
    let value = get(obj, path, key)?;
    value
        .as_object()
        .ok_or_else(|| Error::invalid_field(join(path, key), "object", type_name(value)))
}

/// An optional key; absent or `null` becomes `None`, any other non-string
/// value is rejected.
pub(crate) fn opt_str(obj: &Map<String, Value>, path: &str, key: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::invalid_field(
            join(path, key),
            "string",
            type_name(other),
        )),
    }
}

pub(crate) fn opt_object<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(Error::invalid_field(
            join(path, key),
            "object",
            type_name(other),
        )),
    }
}

/// Parse one record out of a raw response value.
///
/// Implemented by every response model; `path` is the dotted location of
/// `value` inside the full payload and prefixes every error the parse
/// raises.
pub(crate) trait FromJson: Sized {
    fn from_json(path: &str, value: &Value) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_and_index() {
        assert_eq!(join("", "id"), "id");
        assert_eq!(join("walletInfo", "id"), "walletInfo.id");
        assert_eq!(index("walletsList", 3), "walletsList[3]");
    }

    #[test]
    fn test_req_str_missing() {
        let value = json!({"name": "x"});
        let obj = value.as_object().unwrap();
        let err = req_str(obj, "walletInfo", "id").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Required field \"walletInfo.id\" not found in API response"
        );
    }

    #[test]
    fn test_req_u64_rejects_negative() {
        let value = json!({"page": -1});
        let obj = value.as_object().unwrap();
        let err = req_u64(obj, "meta.pagination", "page").unwrap_err();
        assert!(err.to_string().contains("meta.pagination.page"));
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_opt_str() {
        let value = json!({"a": "x", "b": null, "c": 3});
        let obj = value.as_object().unwrap();
        assert_eq!(opt_str(obj, "", "a").unwrap(), Some("x".to_string()));
        assert_eq!(opt_str(obj, "", "b").unwrap(), None);
        assert_eq!(opt_str(obj, "", "missing").unwrap(), None);
        assert!(opt_str(obj, "", "c").is_err());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!([1])), "array");
        assert_eq!(type_name(&json!({"k": 1})), "object");
    }
}
