use serde::{Deserialize, Serialize};

use crate::error::{ErrorMetadata, SubmissionError};

/// Position of the submission state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Workflow status observed by the presentation layer.
///
/// The phase and its payload live in one enum, so a result link only exists
/// after success and an error only after failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Submitting {
        video_id: String,
    },
    Succeeded {
        video_id: String,
        video_url: String,
    },
    Failed {
        video_id: String,
        error: SubmissionError,
    },
}

impl WorkflowStatus {
    pub fn phase(&self) -> WorkflowPhase {
        match self {
            WorkflowStatus::Idle => WorkflowPhase::Idle,
            WorkflowStatus::Submitting { .. } => WorkflowPhase::Submitting,
            WorkflowStatus::Succeeded { .. } => WorkflowPhase::Succeeded,
            WorkflowStatus::Failed { .. } => WorkflowPhase::Failed,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowStatus::Submitting { .. })
    }

    /// Identifier of the current or most recent attempt.
    pub fn video_id(&self) -> Option<&str> {
        match self {
            WorkflowStatus::Idle => None,
            WorkflowStatus::Submitting { video_id }
            | WorkflowStatus::Succeeded { video_id, .. }
            | WorkflowStatus::Failed { video_id, .. } => Some(video_id),
        }
    }

    pub fn video_url(&self) -> Option<&str> {
        match self {
            WorkflowStatus::Succeeded { video_url, .. } => Some(video_url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        match self {
            WorkflowStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// User-facing error text, present only when failed.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.client_message())
    }
}
