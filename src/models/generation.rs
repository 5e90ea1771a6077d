use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PENDING_STATUS: &str = "pending";
pub const DEFAULT_PENDING_MESSAGE: &str =
    "Image generation is still in progress. Please try again in a few minutes.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResponse {
    /// May be empty; the controller decides what an empty list means.
    Success { images: Vec<String> },
    Pending { message: String },
    Error { message: String },
}

impl GenerationResponse {
    /// Classifies a `/generate` body. An `error` field wins over `status`,
    /// and `status == "pending"` wins over `images`.
    pub fn from_body(body: &Value) -> Self {
        if let Some(message) = error_message(body) {
            return GenerationResponse::Error { message };
        }

        if body.get("status").and_then(Value::as_str) == Some(PENDING_STATUS) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_PENDING_MESSAGE)
                .to_string();
            return GenerationResponse::Pending { message };
        }

        let images = body
            .get("images")
            .and_then(Value::as_array)
            .map(|images| {
                images
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        GenerationResponse::Success { images }
    }
}

/// Reads a truthy `error` field: a non-empty string, or any other
/// non-null, non-false value rendered as JSON.
pub fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
