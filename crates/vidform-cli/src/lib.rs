//! Terminal front-end for the vidform intake form.

pub mod form;

use vidform_core::{
    ErrorMetadata, FormSession, Notifier, ReadyNotice, ValidationError, WorkflowStatus,
};

/// Initialize tracing for CLI binaries. Logs go to stderr so they don't mix
/// with form output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the ready notice on stdout.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &ReadyNotice) {
        println!("{}", notice.message());
    }
}

/// User text for a failed file selection: the validation message when the file
/// was rejected, the full error chain otherwise.
pub fn describe_select_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ValidationError>() {
        Some(rejected) => rejected.client_message(),
        None => format!("{:#}", err),
    }
}

pub fn describe_status(status: &WorkflowStatus) -> String {
    match status {
        WorkflowStatus::Idle => "Status: idle".to_string(),
        WorkflowStatus::Submitting { video_id } => format!("Status: creating video {}...", video_id),
        WorkflowStatus::Succeeded { video_url, .. } => {
            format!("Status: video ready. Download: {}", video_url)
        }
        WorkflowStatus::Failed { error, .. } => {
            format!("Status: failed. {}", error.client_message())
        }
    }
}

/// Everything the form shows: inputs, file-name echoes, status and message.
pub fn describe_session(session: &FormSession) -> String {
    let input = session.input();
    let mut lines = vec![
        format!(
            "Video ID: {}",
            if input.base_id.is_empty() {
                "(empty)"
            } else {
                input.base_id.as_str()
            }
        ),
        match session.audio_file_name() {
            Some(name) => format!("Audio file: Uploaded: {}", name),
            None => "Audio file: (none, max 5MB)".to_string(),
        },
        match session.background_music_file_name() {
            Some(name) => format!("Background music: Uploaded: {}", name),
            None => "Background music: (none, max 5MB)".to_string(),
        },
        format!("Orientation: {}", input.orientation),
        format!("Subtitles: {}", input.subtitles),
        describe_status(session.status()),
    ];
    if session.validation_error().is_some() {
        lines.extend(session.error_message());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidform_core::{MediaFile, MediaSlot, Orientation, SubmissionError};

    #[test]
    fn describe_status_variants() {
        assert_eq!(describe_status(&WorkflowStatus::Idle), "Status: idle");
        assert_eq!(
            describe_status(&WorkflowStatus::Succeeded {
                video_id: "a".to_string(),
                video_url: "https://host/x.mp4".to_string(),
            }),
            "Status: video ready. Download: https://host/x.mp4"
        );
        assert_eq!(
            describe_status(&WorkflowStatus::Failed {
                video_id: "a".to_string(),
                error: SubmissionError::ResponseFormat("no video".to_string()),
            }),
            "Status: failed. Error creating video. Please try again later."
        );
    }

    #[test]
    fn describe_session_echoes_file_names() {
        let mut session = FormSession::new();
        session.set_base_id("show1");
        session.set_orientation(Orientation::Portrait);
        session
            .select_audio(Some(MediaFile::new("voice.mp3", b"voice".to_vec())))
            .unwrap();

        let text = describe_session(&session);
        assert!(text.contains("Video ID: show1"));
        assert!(text.contains("Audio file: Uploaded: voice.mp3"));
        assert!(text.contains("Background music: (none, max 5MB)"));
        assert!(text.contains("Orientation: Portrait"));
        assert!(text.contains("Subtitles: Without Subtitles"));
    }

    #[test]
    fn describe_session_shows_validation_message() {
        let mut session = FormSession::new();
        session
            .select_audio(Some(MediaFile::new("big.wav", vec![0u8; 5 * 1024 * 1024 + 1])))
            .unwrap_err();

        assert!(describe_session(&session).ends_with("Audio file must be under 5MB."));
    }

    #[test]
    fn describe_select_error_prefers_validation_message() {
        let rejected = anyhow::Error::new(ValidationError::FileTooLarge {
            slot: MediaSlot::BackgroundMusic,
            size: 6 * 1024 * 1024,
            limit: 5 * 1024 * 1024,
        });
        assert_eq!(
            describe_select_error(&rejected),
            "Background music must be under 5MB."
        );

        let io = anyhow::anyhow!("No such file").context("Failed to read file: a.mp3");
        assert_eq!(
            describe_select_error(&io),
            "Failed to read file: a.mp3: No such file"
        );
    }
}
