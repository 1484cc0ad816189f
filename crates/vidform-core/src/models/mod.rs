//! Data models for the intake form
//!
//! Each sub-module represents one concern: uploaded media, the user's
//! submission choices, the workflow status and the webhook's response shape.

mod media;
mod response;
mod status;
mod submission;

// Re-export all models for convenient imports
pub use media::*;
pub use response::*;
pub use status::*;
pub use submission::*;
