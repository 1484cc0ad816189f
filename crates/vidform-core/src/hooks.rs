//! Hooks and traits for the submission workflow
//!
//! The workflow talks to the outside world through two seams: the remote
//! video-generation service and the user notification shown on success. Both
//! are traits so the HTTP client and the terminal front-end plug in from their
//! own crates, and tests substitute fakes.

use async_trait::async_trait;

use crate::error::SubmissionError;
use crate::models::{GenerationResponse, SubmissionPayload};

/// Remote service that turns a submission into a video.
///
/// Implementations send exactly one request per call and never retry.
#[async_trait]
pub trait VideoGenerationApi: Send + Sync {
    /// Send the payload and return the parsed success body.
    ///
    /// Non-success statuses and transport faults are returned as errors.
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<GenerationResponse, SubmissionError>;
}

/// One-shot notice emitted when a video is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyNotice {
    pub video_id: String,
    pub video_url: String,
}

impl ReadyNotice {
    pub fn message(&self) -> String {
        format!("Your video is ready! Download it here: {}", self.video_url)
    }
}

/// Presents a [`ReadyNotice`] to the user (modal, toast, log line...).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &ReadyNotice);
}
