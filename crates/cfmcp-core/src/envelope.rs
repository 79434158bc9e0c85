//! Response envelope returned by every tool
//!
//! Exactly two shapes exist:
//!
//! ```json
//! {"status": "success", "data": <any>, "message": ""}
//! {"status": "error",   "data": null,  "message": "<non-empty>"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome marker of an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The uniform tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    pub data: Value,
    pub message: String,
}

impl Envelope {
    /// Wrap a successful result
    pub fn success(data: Value) -> Self {
        Self {
            status: Status::Success,
            data,
            message: String::new(),
        }
    }

    /// Wrap an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            data: Value::Null,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Serialize to the wire string
    ///
    /// Non-ASCII text is emitted as-is, not `\u` escaped.
    pub fn to_json(&self) -> String {
        // An envelope is a string, a status tag and an already-built Value;
        // serde_json cannot fail on it.
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"status":"error","data":null,"message":"failed to encode response"}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let env = Envelope::success(json!([{"id": "z1"}]));
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({"status": "success", "data": [{"id": "z1"}], "message": ""})
        );
        assert!(env.is_success());
    }

    #[test]
    fn test_error_shape() {
        let env = Envelope::error("Zone abc does not exist");
        assert_eq!(
            env.to_json(),
            r#"{"status":"error","data":null,"message":"Zone abc does not exist"}"#
        );
    }

    #[test]
    fn test_non_ascii_not_escaped() {
        let env = Envelope::error("区域不存在");
        assert!(env.to_json().contains("区域不存在"));
    }
}
