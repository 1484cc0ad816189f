//! Error types module
//!
//! Two families of errors exist: [`ValidationError`] is raised when a file is
//! selected for one of the upload slots, [`SubmissionError`] when a request to
//! the video-generation webhook does not yield a download link.
//!
//! Both describe themselves through [`ErrorMetadata`] so front-ends can render a
//! user-facing message and log the underlying cause at the right level.

use crate::constants::SUBMISSION_FAILED_MESSAGE;
use crate::models::MediaSlot;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like rejected requests
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented and logged
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether resubmitting the same input may succeed
    fn is_recoverable(&self) -> bool;

    /// User-facing message (may differ from the diagnostic `Display` output)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{slot} too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge {
        slot: MediaSlot,
        size: u64,
        limit: u64,
    },
}

impl ErrorMetadata for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FileTooLarge { .. } => "FILE_TOO_LARGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn client_message(&self) -> String {
        match self {
            ValidationError::FileTooLarge { slot, limit, .. } => {
                format!("{} must be under {}MB.", slot, limit / (1024 * 1024))
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The request never reached the webhook or its response never arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The webhook answered with a non-success status.
    #[error("Webhook returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The webhook answered successfully but without a usable video link.
    #[error("Invalid response format from webhook: {0}")]
    ResponseFormat(String),
}

impl SubmissionError {
    /// True for failures of the request itself (connection or HTTP status),
    /// false for well-delivered responses that could not be interpreted.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SubmissionError::Transport(_) | SubmissionError::Status { .. }
        )
    }
}

/// Static metadata for each variant: (error_code, recoverable, log_level).
fn submission_error_static_metadata(err: &SubmissionError) -> (&'static str, bool, LogLevel) {
    match err {
        SubmissionError::Transport(_) => ("TRANSPORT_ERROR", true, LogLevel::Error),
        SubmissionError::Status { .. } => ("HTTP_STATUS_ERROR", true, LogLevel::Warn),
        SubmissionError::ResponseFormat(_) => ("RESPONSE_FORMAT_ERROR", true, LogLevel::Error),
    }
}

impl ErrorMetadata for SubmissionError {
    fn error_code(&self) -> &'static str {
        submission_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        submission_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        SUBMISSION_FAILED_MESSAGE.to_string()
    }

    fn log_level(&self) -> LogLevel {
        submission_error_static_metadata(self).2
    }
}
