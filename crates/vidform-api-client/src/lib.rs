//! HTTP client for the video-generation webhook.
//!
//! Provides a minimal reqwest client that posts multipart forms to a single
//! configured webhook and classifies the outcome into the core
//! [`SubmissionError`] taxonomy. The CLI plugs it into
//! `vidform_core::SubmissionController` through the `VideoGenerationApi` trait.

pub mod api;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use vidform_core::{ClientConfig, GenerationResponse, SubmissionError};

/// HTTP client bound to one webhook URL.
#[derive(Clone, Debug)]
pub struct WebhookClient {
    client: Client,
    webhook_url: String,
}

impl WebhookClient {
    /// No overall request timeout is set: a dispatched submission runs until
    /// the webhook answers or the connection fails.
    pub fn new(webhook_url: String, connect_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.webhook_url.clone(),
            config.connect_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// POST multipart form to the webhook and parse the JSON response.
    pub async fn post_multipart(
        &self,
        form: reqwest::multipart::Form,
    ) -> Result<GenerationResponse, SubmissionError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SubmissionError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            SubmissionError::Transport(format!("Failed to read response body: {}", e))
        })?;

        GenerationResponse::from_slice(&body)
    }
}
