//! Pipeline invocation result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The sole externally observable output of one invocation.
///
/// Constructed exactly once per invocation regardless of which stage the
/// pipeline reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded body: `{}` on success, an error description otherwise.
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl PipelineResult {
    /// Successful invocation.
    pub fn ok() -> Self {
        Self::build(200, "{}".to_string())
    }

    /// Failed invocation with a client-visible message.
    pub fn failure(status_code: u16, message: impl AsRef<str>) -> Self {
        let body = serde_json::Value::String(message.as_ref().to_string()).to_string();
        Self::build(status_code, body)
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    fn build(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());

        Self {
            status_code,
            body,
            headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_result() {
        let result = PipelineResult::ok();
        assert_eq!(result.status_code, 200);
        assert_eq!(result.body, "{}");
        assert!(result.is_success());
    }

    #[test]
    fn test_failure_result_encodes_message() {
        let result = PipelineResult::failure(500, "Failed to fetch source video");
        assert_eq!(result.status_code, 500);
        assert_eq!(result.body, "\"Failed to fetch source video\"");
        assert!(!result.is_success());
    }

    #[test]
    fn test_headers_always_present() {
        for result in [PipelineResult::ok(), PipelineResult::failure(400, "bad event")] {
            assert_eq!(
                result.headers.get("Content-Type").map(String::as_str),
                Some("application/json")
            );
            assert_eq!(
                result.headers.get("Access-Control-Allow-Origin").map(String::as_str),
                Some("*")
            );
        }
    }

    #[test]
    fn test_serializes_with_status_code_key() {
        let json = serde_json::to_value(PipelineResult::ok()).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["body"], "{}");
    }
}
