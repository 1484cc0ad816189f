//! Fixed limits and user-facing strings.

/// Upload limit for both the audio and background-music slots (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Webhook used when neither the environment nor the command line names one.
pub const DEFAULT_WEBHOOK_URL: &str =
    "http://localhost:5678/webhook-test/1a9744b5-0299-4dce-8632-4d832632eb97";

/// Shown for every failed submission, whatever the cause.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Error creating video. Please try again later.";

// Multipart field names expected by the webhook
pub const FIELD_VIDEO_ID: &str = "video_id";
pub const FIELD_AUDIO_FILE: &str = "audio_file";
pub const FIELD_BACKGROUND_MUSIC: &str = "background_music";
pub const FIELD_ORIENTATION: &str = "orientation";
pub const FIELD_SUBTITLES: &str = "subtitles";
