/// Response envelope formatting
///
/// Status code, fixed CORS headers and a JSON-serialized body. Building an
/// envelope cannot fail.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Credentials", "true"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON text
    pub body: String,
}

impl ResponseEnvelope {
    /// Parse the body back into JSON
    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// Wrap a body object into an envelope
pub fn create_response<T: Serialize>(status_code: u16, body: &T) -> ResponseEnvelope {
    let body = serde_json::to_string(body).unwrap_or_else(|e| {
        json!({ "error": format!("Failed to serialize response body: {}", e) }).to_string()
    });

    ResponseEnvelope {
        status_code,
        headers: CORS_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_has_cors_headers_and_json_body() {
        let envelope = create_response(400, &json!({ "error": "Account is not active" }));

        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.headers["Content-Type"], "application/json");
        assert_eq!(envelope.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(envelope.headers["Access-Control-Allow-Credentials"], "true");
        assert_eq!(envelope.body, r#"{"error":"Account is not active"}"#);
    }

    #[test]
    fn serializes_with_camel_case_status_code() {
        let envelope = create_response(200, &json!({}));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["statusCode"], json!(200));
        assert!(value["body"].is_string());
    }

    #[test]
    fn body_round_trips_to_json() {
        let envelope = create_response(200, &json!({ "message": "ok", "order_details": { "order_id": "x" } }));
        assert_eq!(envelope.body_json()["order_details"]["order_id"], json!("x"));
    }
}
