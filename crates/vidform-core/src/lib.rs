//! Vidform Core Library
//!
//! This crate provides the domain models, validation, identifier generation and
//! submission workflow shared by the vidform HTTP client and front-ends.

pub mod config;
pub mod constants;
pub mod error;
pub mod hooks;
pub mod identifier;
pub mod models;
pub mod session;
pub mod submission;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ErrorMetadata, LogLevel, SubmissionError, ValidationError};
pub use hooks::{Notifier, ReadyNotice, VideoGenerationApi};
pub use identifier::{build_identifier, local_now};
pub use models::{
    GenerationResponse, MediaFile, MediaSlot, Orientation, SubmissionInput, SubmissionPayload,
    SubtitleMode, WorkflowPhase, WorkflowStatus,
};
pub use session::FormSession;
pub use submission::SubmissionController;
pub use validation::validate_file;
