//! Form state store.
//!
//! A [`FormSession`] owns everything one form session knows: the user's inputs,
//! the workflow status and the last validation message. Mutation happens only
//! through its methods, and the submission lifecycle is split in two
//! synchronous halves ([`FormSession::begin_submission`] and
//! [`FormSession::resolve`]) so the session stays editable while the request
//! is in flight.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::constants::MAX_UPLOAD_BYTES;
use crate::error::{ErrorMetadata, LogLevel, SubmissionError, ValidationError};
use crate::hooks::ReadyNotice;
use crate::identifier::build_identifier;
use crate::models::{
    GenerationResponse, MediaFile, MediaSlot, Orientation, SubmissionInput, SubmissionPayload,
    SubtitleMode, WorkflowPhase, WorkflowStatus,
};
use crate::validation::{check_size, validate_file};

#[derive(Debug, Default)]
pub struct FormSession {
    input: SubmissionInput,
    status: WorkflowStatus,
    validation_error: Option<ValidationError>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    pub fn status(&self) -> &WorkflowStatus {
        &self.status
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.status.phase()
    }

    pub fn set_base_id(&mut self, base_id: impl Into<String>) {
        self.input.base_id = base_id.into();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.input.orientation = orientation;
    }

    pub fn set_subtitles(&mut self, subtitles: SubtitleMode) {
        self.input.subtitles = subtitles;
    }

    pub fn select_audio(&mut self, file: Option<MediaFile>) -> Result<(), ValidationError> {
        self.select(MediaSlot::Audio, file)
    }

    pub fn select_background_music(
        &mut self,
        file: Option<MediaFile>,
    ) -> Result<(), ValidationError> {
        self.select(MediaSlot::BackgroundMusic, file)
    }

    /// Put `file` into `slot`, or empty the slot when `None`.
    ///
    /// A rejected file leaves the slot as it was and records the message.
    pub fn select(
        &mut self,
        slot: MediaSlot,
        file: Option<MediaFile>,
    ) -> Result<(), ValidationError> {
        let Some(file) = file else {
            self.clear(slot);
            return Ok(());
        };

        match validate_file(slot, file, MAX_UPLOAD_BYTES) {
            Ok(file) => {
                tracing::debug!(slot = %slot, name = file.name(), size = file.size(), "File accepted");
                *self.input.slot_mut(slot) = Some(file);
                self.validation_error = None;
                Ok(())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Load the file at `path` into `slot`.
    ///
    /// The size is checked against file metadata first, so an oversized file
    /// is rejected without being read. Validation failures surface as a
    /// [`ValidationError`] inside the returned error.
    pub fn select_path(&mut self, slot: MediaSlot, path: &Path) -> anyhow::Result<()> {
        let size = MediaFile::size_on_disk(path)?;
        if let Err(err) = check_size(slot, size, MAX_UPLOAD_BYTES) {
            return Err(self.reject(err).into());
        }

        let file = MediaFile::from_path(path)?;
        self.select(slot, Some(file))?;
        Ok(())
    }

    /// Empty `slot`. Clearing is never validated.
    pub fn clear(&mut self, slot: MediaSlot) {
        *self.input.slot_mut(slot) = None;
    }

    fn reject(&mut self, err: ValidationError) -> ValidationError {
        tracing::warn!(error = %err, "File rejected");
        self.validation_error = Some(err.clone());
        err
    }

    pub fn audio_file_name(&self) -> Option<&str> {
        self.input.audio.as_ref().map(MediaFile::name)
    }

    pub fn background_music_file_name(&self) -> Option<&str> {
        self.input.background_music.as_ref().map(MediaFile::name)
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    /// The message to show next to the form, if any.
    ///
    /// A pending validation message takes precedence over a failed submission.
    pub fn error_message(&self) -> Option<String> {
        self.validation_error
            .as_ref()
            .map(|e| e.client_message())
            .or_else(|| self.status.error_message())
    }

    /// Whether the submit trigger would currently start a request.
    pub fn can_submit(&self) -> bool {
        self.input.audio.is_some() && !self.status.is_submitting()
    }

    /// Enter `Submitting` and build the request body.
    ///
    /// Returns `None` without touching any state when no audio file is set or
    /// a submission is already in flight.
    pub fn begin_submission(&mut self, now: NaiveDateTime) -> Option<SubmissionPayload> {
        if self.status.is_submitting() {
            tracing::debug!("Submission already in flight, ignoring trigger");
            return None;
        }
        let Some(audio) = self.input.audio.clone() else {
            tracing::debug!("No audio file selected, ignoring trigger");
            return None;
        };

        let video_id = build_identifier(&self.input.base_id, now);
        self.validation_error = None;
        self.status = WorkflowStatus::Submitting {
            video_id: video_id.clone(),
        };

        tracing::info!(
            video_id = %video_id,
            orientation = self.input.orientation.transport_token(),
            subtitles = self.input.subtitles.transport_token(),
            background_music = self.input.background_music.is_some(),
            "Submitting video request"
        );

        Some(SubmissionPayload {
            video_id,
            audio,
            background_music: self.input.background_music.clone(),
            orientation: self.input.orientation,
            subtitles: self.input.subtitles,
        })
    }

    /// Apply the outcome of the in-flight request.
    ///
    /// Returns the notice to show when the video is ready. Outcomes arriving
    /// while nothing is in flight are dropped.
    pub fn resolve(
        &mut self,
        outcome: Result<GenerationResponse, SubmissionError>,
    ) -> Option<ReadyNotice> {
        let WorkflowStatus::Submitting { video_id } = &self.status else {
            tracing::warn!(phase = ?self.phase(), "No submission in flight, dropping outcome");
            return None;
        };
        let video_id = video_id.clone();

        match outcome.and_then(GenerationResponse::into_video_url) {
            Ok(video_url) => {
                tracing::info!(video_id = %video_id, video_url = %video_url, "Video ready");
                self.status = WorkflowStatus::Succeeded {
                    video_id: video_id.clone(),
                    video_url: video_url.clone(),
                };
                Some(ReadyNotice {
                    video_id,
                    video_url,
                })
            }
            Err(error) => {
                log_submission_error(&video_id, &error);
                self.status = WorkflowStatus::Failed { video_id, error };
                None
            }
        }
    }

    /// Return every input to its default and drop any message.
    ///
    /// A submission in flight keeps running: the status stays `Submitting`
    /// until [`FormSession::resolve`] sees its outcome.
    pub fn reset(&mut self) {
        let status = if self.status.is_submitting() {
            std::mem::take(&mut self.status)
        } else {
            WorkflowStatus::Idle
        };
        *self = Self {
            status,
            ..Self::default()
        };
    }
}

fn log_submission_error(video_id: &str, error: &SubmissionError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(video_id, code, error = %error, "Submission failed"),
        LogLevel::Warn => tracing::warn!(video_id, code, error = %error, "Submission failed"),
        LogLevel::Error => tracing::error!(video_id, code, error = %error, "Submission failed"),
    }
}
