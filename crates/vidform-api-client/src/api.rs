//! Video generation over the webhook.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use vidform_core::{GenerationResponse, SubmissionError, SubmissionPayload, VideoGenerationApi};

use crate::WebhookClient;

/// Build the multipart body for a submission.
pub fn build_form(payload: &SubmissionPayload) -> Form {
    let mut form = Form::new();
    for (name, value) in payload.text_fields() {
        form = form.text(name, value);
    }
    for (name, media) in payload.file_fields() {
        form = form.part(
            name,
            Part::bytes(media.data().to_vec()).file_name(media.name().to_string()),
        );
    }
    form
}

#[async_trait]
impl VideoGenerationApi for WebhookClient {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<GenerationResponse, SubmissionError> {
        tracing::debug!(
            video_id = %payload.video_id,
            webhook_url = %self.webhook_url(),
            "Posting multipart submission"
        );
        self.post_multipart(build_form(payload)).await
    }
}
