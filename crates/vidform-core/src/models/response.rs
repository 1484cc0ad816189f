use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SubmissionError;

/// Body returned by the webhook on success.
///
/// The generator answers either with a list of results or a single object;
/// anything else is kept so it can be reported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    Batch(Vec<Value>),
    Single(Map<String, Value>),
    Unrecognized(Value),
}

impl GenerationResponse {
    /// Parse a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, SubmissionError> {
        serde_json::from_slice(body).map_err(|e| {
            SubmissionError::ResponseFormat(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// The `video` link of the single object, or of the first element of a list.
    pub fn video_url(&self) -> Option<&str> {
        let entry = match self {
            GenerationResponse::Batch(items) => items.first()?.as_object()?,
            GenerationResponse::Single(object) => object,
            GenerationResponse::Unrecognized(_) => return None,
        };

        entry
            .get("video")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Resolve to the video link, or a format error describing what arrived.
    pub fn into_video_url(self) -> Result<String, SubmissionError> {
        if let Some(url) = self.video_url() {
            return Ok(url.to_string());
        }

        let shape = match &self {
            GenerationResponse::Batch(items) if items.is_empty() => "empty list".to_string(),
            GenerationResponse::Batch(_) => "list without a video field".to_string(),
            GenerationResponse::Single(_) => "object without a video field".to_string(),
            GenerationResponse::Unrecognized(value) => format!("unexpected value {}", value),
        };
        Err(SubmissionError::ResponseFormat(shape))
    }
}
