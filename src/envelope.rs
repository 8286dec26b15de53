//! Response envelopes for the two API dialects.
//!
//! The v1 dialect wraps every payload in `{status, data, meta.pagination}`
//! and a missing pagination block is an error even on success; the v2
//! dialect returns the payload as the bare body. The two are deliberately
//! separate code paths: neither ever infers the other from payload shape.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::json;
use crate::transport::HttpResponse;

/// v1 list pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total_pages: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_entries: u64,
}

impl Pagination {
    pub(crate) fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;
        Ok(Self {
            total_pages: json::req_u64(obj, path, "totalPages")?,
            page: json::req_u64(obj, path, "page")?,
            per_page: json::req_u64(obj, path, "perPage")?,
            total_entries: json::req_u64(obj, path, "totalEntries")?,
        })
    }
}

/// A validated v1 response envelope.
#[derive(Debug, Clone)]
pub struct Envelope {
    http_code: u16,
    data: Value,
    pagination: Pagination,
}

impl Envelope {
    /// Validates a raw v1 response.
    ///
    /// Success requires an HTTP 2xx code AND `status == "success"` in the
    /// body; the `status` literal overrides the HTTP code, so a 200 with
    /// `status: "fail"` is still a failure. A successful response must
    /// also carry the `meta.pagination` block.
    pub fn parse(res: &HttpResponse) -> Result<Self> {
        let status = res.payload.get("status").and_then(Value::as_str);
        if status != Some("success") || !res.is_success_code() {
            return Err(v1_failure(res, status));
        }

        let pagination_value = res
            .payload
            .pointer("/meta/pagination")
            .ok_or_else(|| Error::missing("meta.pagination"))?;
        let pagination = Pagination::from_json("meta.pagination", pagination_value)?;

        Ok(Self {
            http_code: res.http_code,
            data: res.payload.get("data").cloned().unwrap_or(Value::Null),
            pagination,
        })
    }

    /// Accepts a delete-style v1 success that carries no parseable body.
    pub fn expect_no_content(res: &HttpResponse) -> Result<()> {
        if res.is_success_code() {
            Ok(())
        } else {
            Err(v1_failure(res, res.payload.get("status").and_then(Value::as_str)))
        }
    }

    /// The extracted `data` payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn http_code(&self) -> u16 {
        self.http_code
    }
}

fn v1_failure(res: &HttpResponse, status: Option<&str>) -> Error {
    let msg = res.payload.get("message").and_then(Value::as_str);
    let detail = res
        .payload
        .pointer("/diagnostic/msg")
        .and_then(Value::as_str)
        .or_else(|| res.payload.pointer("/diagnostic/details/msg").and_then(Value::as_str));

    let message = match (msg, detail) {
        (Some(msg), Some(detail)) => format!("[{}]: {}", msg, detail),
        (Some(msg), None) => msg.to_string(),
        _ => format!(
            "API call not successful, unknown error, status \"{}\"",
            status.unwrap_or("")
        ),
    };

    Error::Api {
        http_code: res.http_code,
        message,
    }
}

/// Unwraps a v2 response, whose body is the payload itself.
pub fn unwrap_v2(res: &HttpResponse) -> Result<Value> {
    if !res.is_success_code() {
        return Err(v2_failure(res));
    }
    Ok(res.payload.clone())
}

/// Accepts a v2 success with no content (delete, change-passphrase).
pub fn expect_no_content_v2(res: &HttpResponse) -> Result<()> {
    if res.is_success_code() {
        Ok(())
    } else {
        Err(v2_failure(res))
    }
}

fn v2_failure(res: &HttpResponse) -> Error {
    let msg = res
        .payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown node error");
    let message = match res.payload.get("code").and_then(Value::as_str) {
        Some(code) => format!("{} ({})", msg, code),
        None => msg.to_string(),
    };
    Error::Api {
        http_code: res.http_code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(http_code: u16, payload: Value) -> HttpResponse {
        HttpResponse {
            http_code,
            payload,
            headers: None,
            raw_body: None,
        }
    }

    fn success_body(data: Value) -> Value {
        json!({
            "status": "success",
            "data": data,
            "meta": {"pagination": {"totalPages": 1, "page": 1, "perPage": 10, "totalEntries": 1}}
        })
    }

    #[test]
    fn test_v1_success() {
        let env = Envelope::parse(&response(200, success_body(json!([1, 2])))).unwrap();
        assert_eq!(env.data(), &json!([1, 2]));
        assert_eq!(env.pagination().total_entries, 1);
        assert_eq!(env.http_code(), 200);
    }

    #[test]
    fn test_v1_status_literal_overrides_http_code() {
        let err =
            Envelope::parse(&response(200, json!({"status": "fail", "message": "x"}))).unwrap_err();
        match err {
            Error::Api { http_code, message } => {
                assert_eq!(http_code, 200);
                assert_eq!(message, "x");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_v1_http_failure_despite_success_status() {
        let err = Envelope::parse(&response(500, success_body(json!(null)))).unwrap_err();
        assert!(matches!(err, Error::Api { http_code: 500, .. }));
    }

    #[test]
    fn test_v1_diagnostic_detail() {
        let body = json!({
            "status": "error",
            "message": "ValidationError",
            "diagnostic": {"msg": "wallet not found"}
        });
        let err = Envelope::parse(&response(404, body)).unwrap_err();
        assert!(err.to_string().contains("[ValidationError]: wallet not found"));
    }

    #[test]
    fn test_v1_missing_pagination_is_error() {
        let body = json!({"status": "success", "data": []});
        let err = Envelope::parse(&response(200, body)).unwrap_err();
        assert!(matches!(err, Error::MissingField(ref f) if f == "meta.pagination"));
    }

    #[test]
    fn test_v1_negative_pagination_rejected() {
        let body = json!({
            "status": "success",
            "data": [],
            "meta": {"pagination": {"totalPages": 1, "page": -2, "perPage": 10, "totalEntries": 0}}
        });
        let err = Envelope::parse(&response(200, body)).unwrap_err();
        assert!(err.to_string().contains("meta.pagination.page"));
    }

    #[test]
    fn test_v2_no_content() {
        assert!(expect_no_content_v2(&response(204, Value::Null)).is_ok());
        assert!(expect_no_content_v2(&response(404, Value::Null)).is_err());
    }

    #[test]
    fn test_v2_error_appends_code() {
        let err = unwrap_v2(&response(
            403,
            json!({"message": "passphrase is wrong", "code": "wrong_encryption_passphrase"}),
        ))
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("passphrase is wrong (wrong_encryption_passphrase)"));
    }

    #[test]
    fn test_v2_success_passthrough() {
        let body = json!({"id": "x"});
        assert_eq!(unwrap_v2(&response(200, body.clone())).unwrap(), body);
    }
}
